//! Where rendered rasters go.

use std::collections::HashMap;
use std::path::PathBuf;

use bezel_core::{Raster, ScopeInfo};

use crate::error::{StackError, StackResult};
use crate::stack::ScopeId;

/// Receives one raster per scope per tick.
pub trait Presenter {
    /// Display (or store) `raster`, rendered by scope `id`.
    fn present(&mut self, id: ScopeId, info: &ScopeInfo, raster: &Raster) -> StackResult<()>;
}

/// Keeps the most recent raster of every scope in memory.
#[derive(Debug, Default)]
pub struct LatestRasters {
    rasters: HashMap<ScopeId, (ScopeInfo, Raster)>,
    presented: u64,
}

impl LatestRasters {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent raster for `id`.
    pub fn get(&self, id: ScopeId) -> Option<&Raster> {
        self.rasters.get(&id).map(|(_, raster)| raster)
    }

    /// Identity of the scope that produced `id`'s raster.
    pub fn info(&self, id: ScopeId) -> Option<&ScopeInfo> {
        self.rasters.get(&id).map(|(info, _)| info)
    }

    /// Total rasters received.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Number of scopes with a stored raster.
    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    /// Whether nothing has been presented yet.
    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }
}

impl Presenter for LatestRasters {
    fn present(&mut self, id: ScopeId, info: &ScopeInfo, raster: &Raster) -> StackResult<()> {
        self.rasters.insert(id, (*info, raster.clone()));
        self.presented += 1;
        Ok(())
    }
}

/// Writes each raster to `<dir>/<scope id>-<instance>.png`, overwriting.
#[derive(Debug, Clone)]
pub struct PngDirectory {
    dir: PathBuf,
}

impl PngDirectory {
    /// Write into `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output path for a scope instance.
    pub fn path_for(&self, id: ScopeId, info: &ScopeInfo) -> PathBuf {
        self.dir.join(format!("{}-{}.png", info.id, id))
    }
}

impl Presenter for PngDirectory {
    fn present(&mut self, id: ScopeId, info: &ScopeInfo, raster: &Raster) -> StackResult<()> {
        let path = self.path_for(id, info);
        raster
            .save(&path)
            .map_err(|e| StackError::Present(format!("{}: {e}", path.display())))
    }
}
