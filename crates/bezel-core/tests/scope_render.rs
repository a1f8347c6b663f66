//! End-to-end rendering against known test signals.

use bezel_core::accumulate::{
    Accumulator, DensityLayer, Mapping, vectorscope_cell, waveform_row,
};
use bezel_core::scopes::vectorscope;
use bezel_core::{
    ColorBars, ColorSpace, Frame, FrameSource, Scope, ScopeConfig, ScopeKind, StillSource,
    StridePolicy,
};

const GRID: u32 = 200;

fn bars_frame() -> Frame {
    ColorBars::new(140, 90, ColorSpace::Srgb)
        .expect("valid bar dimensions")
        .sample()
        .expect("bars are always ready")
}

fn density_near(layer: &DensityLayer, x: u32, y: u32) -> f32 {
    let mut total = 0.0;
    for yy in y.saturating_sub(1)..=y + 1 {
        for xx in x.saturating_sub(1)..=x + 1 {
            total += layer.get(xx, yy).x;
        }
    }
    total
}

#[test]
fn test_color_bars_hit_75_percent_targets() {
    let frame = bars_frame();
    let acc = Accumulator::new(Mapping::Vectorscope, StridePolicy::Every, 0.1);
    let mut layer = DensityLayer::new(GRID, GRID);
    acc.accumulate(&frame, &mut layer);

    for marker in vectorscope::default_markers(&[0.75]) {
        let (x, y) = vectorscope_cell(marker.position(), GRID, GRID)
            .unwrap_or_else(|| panic!("{} off the plane", marker.name));
        assert!(
            density_near(&layer, x, y) > 1.0,
            "no bar energy near {} at ({x}, {y})",
            marker.name
        );
    }

    for marker in vectorscope::default_markers(&[1.0]) {
        if let Some((x, y)) = vectorscope_cell(marker.position(), GRID, GRID) {
            assert_eq!(
                density_near(&layer, x, y),
                0.0,
                "unexpected energy at full-scale {}",
                marker.name
            );
        }
    }
}

#[test]
fn test_color_bars_luma_waveform_levels() {
    let frame = bars_frame();
    let height = 255;
    let acc = Accumulator::new(Mapping::LumaWaveform, StridePolicy::Every, 0.1);
    let mut layer = DensityLayer::new(140, height);
    acc.accumulate(&frame, &mut layer);

    // Leftmost bar is 75% white: (191 + 191 + 191) / 3.
    let white_row = waveform_row(191.0, height);
    assert!(layer.get(0, white_row).x > 5.0);
    // Rightmost top bar is 75% blue: 191 / 3.
    let blue_row = waveform_row(191.0 / 3.0, height);
    assert!(layer.get(139, blue_row).x > 5.0);
}

#[test]
fn test_every_kind_renders_at_requested_size() {
    let frame = bars_frame();
    for kind in ScopeKind::ALL {
        let (w, h) = (kind.default_width(120).expect("width fits"), 120);
        let scope = Scope::with_defaults(kind, w, h).expect("valid scope");
        let raster = scope.render(&frame);
        assert_eq!((raster.width(), raster.height()), (w, h), "{}", kind.id());
        assert!(raster.pixels().iter().all(|p| p[3] == 255));
    }
}

#[test]
fn test_config_loaded_from_json_drives_render() {
    let config = ScopeConfig::from_json(r#"{ "guidelines": [0.5] }"#).expect("valid config");
    let scope = Scope::new(ScopeKind::LumaWaveform, 16, 100, config).expect("valid scope");
    let raster = scope.render(&Frame::empty(ColorSpace::Srgb));
    assert_eq!(raster.pixel(0, 50), Some([255, 255, 255, 255]));
    assert_eq!(raster.pixel(0, 10), Some([0, 0, 0, 255]));
}

#[test]
fn test_saved_raster_reloads_as_still_source() {
    let scope = Scope::with_defaults(ScopeKind::Vectorscope, 48, 48).expect("valid scope");
    let raster = scope.render(&bars_frame());

    let path = std::env::temp_dir().join(format!("bezel-core-roundtrip-{}.png", std::process::id()));
    raster.save(&path).expect("png encodes");
    let still = StillSource::open(&path, ColorSpace::Srgb).expect("png decodes");
    let _ = std::fs::remove_file(&path);

    assert!(still.is_ready());
    let frame = still.sample().expect("still is ready");
    assert_eq!(frame.dimensions(), (48, 48));
    assert_eq!(frame.pixels(), raster.pixels());
}
