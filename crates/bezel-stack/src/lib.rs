//! Bezel Stack: drives a set of scopes from one frame source.
//!
//! Provides [`ScopeStack`], which owns the attached scope instances, and the
//! [`Ticker`] and [`Presenter`] seams through which a host paces the refresh
//! loop and receives rendered rasters.

pub mod config;
pub mod error;
pub mod presenter;
pub mod stack;
pub mod ticker;

pub use config::StackConfig;
pub use error::{StackError, StackResult};
pub use presenter::{LatestRasters, PngDirectory, Presenter};
pub use stack::{ScopeHandle, ScopeId, ScopeStack, TickReport};
pub use ticker::{FixedTicks, IntervalTicker, Ticker};
