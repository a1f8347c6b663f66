//! Stack-wide runtime configuration.

use std::time::Duration;

use bezel_core::{ScopeKind, ScopeResult};

/// Default scope height in pixels.
const DEFAULT_SCOPE_HEIGHT: u32 = 300;
/// Default refresh rate.
const DEFAULT_TICK_HZ: u32 = 30;

/// Runtime configuration for a [`ScopeStack`](crate::ScopeStack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// Output height of newly attached scopes. Width follows each kind's aspect.
    pub scope_height: u32,
    /// Refresh ticks per second.
    pub tick_hz: u32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            scope_height: env_or("BEZEL_SCOPE_HEIGHT", DEFAULT_SCOPE_HEIGHT),
            tick_hz: env_or("BEZEL_TICK_HZ", DEFAULT_TICK_HZ),
        }
    }
}

impl StackConfig {
    /// Output `(width, height)` for a new scope of `kind`.
    pub fn scope_dimensions(&self, kind: ScopeKind) -> ScopeResult<(u32, u32)> {
        Ok((kind.default_width(self.scope_height)?, self.scope_height))
    }

    /// Time between refresh ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.tick_hz.max(1) as u64)
    }
}

/// Parse a positive integer from `var`, falling back to `default`.
fn env_or(var: &str, default: u32) -> u32 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}
