// crates/ports/src/stats.rs
use std::time::Duration;

/// Coarse phases of a run, timed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Load,
    Count,
    Print,
}

/// Observer of the core's primitive operations.
///
/// Hooks take `&self`: collectors use interior mutability. An observer must
/// never influence the operation it watches.
pub trait StatsSink {
    fn on_create(&self, _size: usize) {}
    fn on_insert(&self, _created: bool, _probes: usize) {}
    fn on_lookup(&self, _found: bool, _probes: usize) {}
    fn on_rehash(&self, _old_size: usize, _new_size: usize) {}
    fn on_read(&self, _bytes: usize) {}
    fn on_grow(&self, _old_size: usize, _new_size: usize) {}
    fn on_commit(&self, _bytes: usize) {}
    fn on_map(&self, _bytes: usize) {}
    fn on_line(&self, _len: usize) {}
    fn on_phase(&self, _phase: Phase, _elapsed: Duration) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStats;

impl StatsSink for NoStats {}
