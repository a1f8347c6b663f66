//! The scope stack: several scope instances sharing one frame source.
//!
//! Each tick, every attached instance samples the source on its own and
//! renders a fresh raster. Instances are isolated: one failing (for example
//! because the source is not ready yet) only skips its own presentation.
//!
//! ```text
//!   Ticker ──wait_next──→ tick ──┬─→ scope A: sample → render → present
//!                                ├─→ scope B: sample → render → present
//!                                └─→ ...
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use bezel_core::{FrameSource, Scope, ScopeConfig, ScopeError, ScopeInfo, ScopeKind};

use crate::config::StackConfig;
use crate::error::{StackError, StackResult};
use crate::presenter::Presenter;
use crate::ticker::Ticker;

/// Consecutive not-ready ticks before an instance is reported at `warn`.
pub const NOT_READY_WARN_AFTER: u32 = 30;

/// Identifier of one attached scope instance, unique within a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner-side handle to an attached scope.
///
/// Detaching through the handle takes effect at the start of the next tick;
/// a render already in progress always completes.
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    id: ScopeId,
    info: ScopeInfo,
    detached: Arc<AtomicBool>,
}

impl ScopeHandle {
    /// Stack-assigned identifier of the instance.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Kind metadata of the instance.
    pub fn info(&self) -> ScopeInfo {
        self.info
    }

    /// Request removal from the stack.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }

    /// Whether removal has been requested, by this handle or by the stack.
    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }
}

/// What happened during one [`ScopeStack::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Instances that rendered and presented.
    pub presented: usize,
    /// Instances skipped because the source was not ready.
    pub not_ready: usize,
    /// Instances that failed for any other reason.
    pub failed: usize,
    /// Instances removed because their handle was detached.
    pub pruned: usize,
}

#[derive(Debug)]
struct Instance {
    id: ScopeId,
    scope: Scope,
    detached: Arc<AtomicBool>,
    not_ready_ticks: u32,
}

/// Scope instances attached to a shared [`FrameSource`].
pub struct ScopeStack {
    source: Arc<dyn FrameSource>,
    config: StackConfig,
    instances: Vec<Instance>,
    next_id: u64,
    ticks: u64,
}

impl ScopeStack {
    /// An empty stack sampling `source`.
    pub fn new(source: Arc<dyn FrameSource>, config: StackConfig) -> Self {
        Self {
            source,
            config,
            instances: Vec::new(),
            next_id: 0,
            ticks: 0,
        }
    }

    /// Stack configuration.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Attach a scope of `kind` at the configured size with default settings.
    pub fn attach(&mut self, kind: ScopeKind) -> StackResult<ScopeHandle> {
        let (width, height) = self.config.scope_dimensions(kind)?;
        let scope = Scope::with_defaults(kind, width, height)?;
        Ok(self.attach_scope(scope))
    }

    /// Attach an already configured scope.
    pub fn attach_scope(&mut self, scope: Scope) -> ScopeHandle {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        let detached = Arc::new(AtomicBool::new(false));
        let info = scope.info();
        let (width, height) = scope.dimensions();
        tracing::info!(%id, scope = info.id, width, height, "scope attached");
        self.instances.push(Instance {
            id,
            scope,
            detached: Arc::clone(&detached),
            not_ready_ticks: 0,
        });
        ScopeHandle { id, info, detached }
    }

    /// Remove an instance immediately.
    pub fn detach(&mut self, id: ScopeId) -> StackResult<()> {
        let pos = self.position(id)?;
        let instance = self.instances.remove(pos);
        instance.detached.store(true, Ordering::Release);
        tracing::info!(%id, scope = instance.scope.info().id, "scope detached");
        Ok(())
    }

    /// Replace an instance's configuration. Takes effect on the next render.
    pub fn update_config(&mut self, id: ScopeId, config: ScopeConfig) -> StackResult<()> {
        let pos = self.position(id)?;
        if let Err(e) = self.instances[pos].scope.set_config(config) {
            tracing::warn!(%id, error = %e, "config update rejected");
            return Err(e.into());
        }
        Ok(())
    }

    /// Resize an instance's output.
    pub fn resize(&mut self, id: ScopeId, width: u32, height: u32) -> StackResult<()> {
        let pos = self.position(id)?;
        self.instances[pos].scope.resize(width, height)?;
        Ok(())
    }

    /// The scope behind `id`.
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.instances.iter().find(|i| i.id == id).map(|i| &i.scope)
    }

    /// Identity of every attached instance, in attach order.
    pub fn infos(&self) -> Vec<(ScopeId, ScopeInfo)> {
        self.instances.iter().map(|i| (i.id, i.scope.info())).collect()
    }

    /// Number of instances, including detached ones not yet pruned.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instances are attached.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Render and present every attached instance once.
    pub fn tick(&mut self, presenter: &mut dyn Presenter) -> TickReport {
        let started = Instant::now();
        let mut report = TickReport {
            pruned: self.prune_detached(),
            ..TickReport::default()
        };

        for instance in &mut self.instances {
            let info = instance.scope.info();
            let result = instance
                .scope
                .render_from(self.source.as_ref())
                .map_err(StackError::from)
                .and_then(|raster| presenter.present(instance.id, &info, &raster));

            match result {
                Ok(()) => {
                    instance.not_ready_ticks = 0;
                    report.presented += 1;
                }
                Err(StackError::Scope(ScopeError::SourceNotReady)) => {
                    instance.not_ready_ticks = instance.not_ready_ticks.saturating_add(1);
                    report.not_ready += 1;
                    if instance.not_ready_ticks == NOT_READY_WARN_AFTER {
                        tracing::warn!(
                            id = %instance.id,
                            scope = info.id,
                            ticks = NOT_READY_WARN_AFTER,
                            "source still not ready"
                        );
                    } else {
                        tracing::debug!(id = %instance.id, scope = info.id, "source not ready");
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(id = %instance.id, scope = info.id, error = %e, "scope skipped");
                }
            }
        }

        self.ticks += 1;
        tracing::debug!(
            tick = self.ticks,
            presented = report.presented,
            not_ready = report.not_ready,
            failed = report.failed,
            elapsed_us = started.elapsed().as_micros() as u64,
            "tick complete"
        );
        report
    }

    /// Tick until the ticker stops or no instances remain. Returns ticks run.
    pub fn run(&mut self, ticker: &mut dyn Ticker, presenter: &mut dyn Presenter) -> u64 {
        let mut ran = 0;
        while ticker.wait_next() {
            if self.attached_live() == 0 {
                break;
            }
            self.tick(presenter);
            ran += 1;
        }
        tracing::info!(ticks = ran, "scope loop stopped");
        ran
    }

    fn attached_live(&self) -> usize {
        self.instances
            .iter()
            .filter(|i| !i.detached.load(Ordering::Acquire))
            .count()
    }

    fn prune_detached(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| {
            let keep = !i.detached.load(Ordering::Acquire);
            if !keep {
                tracing::info!(id = %i.id, scope = i.scope.info().id, "scope detached");
            }
            keep
        });
        before - self.instances.len()
    }

    fn position(&self, id: ScopeId) -> StackResult<usize> {
        self.instances
            .iter()
            .position(|i| i.id == id)
            .ok_or(StackError::UnknownScope(id))
    }
}

impl fmt::Debug for ScopeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeStack")
            .field("config", &self.config)
            .field("instances", &self.instances)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
