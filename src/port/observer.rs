//! Progress reporting port.
//!
//! The scan pipeline never prints. Callers that want progress (a terminal
//! progress bar, log lines, counters in a test) implement [`ScanObserver`];
//! every method has a no-op default.

use std::fmt;

/// Pipeline stage being reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Matching,
    ItemVolumes,
    Cargo,
    Routes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Matching => "matching",
            Self::ItemVolumes => "item volumes",
            Self::Cargo => "cargo",
            Self::Routes => "routes",
        };
        f.write_str(name)
    }
}

/// Receives progress events from a scan.
///
/// Must be `Sync`: item matching may report from several worker threads.
pub trait ScanObserver: Sync {
    /// A stage is starting with `total` units of work.
    fn stage_started(&self, _stage: Stage, _total: usize) {}

    /// One unit of work finished; `found` is how many records it produced.
    fn advanced(&self, _stage: Stage, _found: usize) {}

    /// A stage finished with `produced` surviving records.
    fn stage_finished(&self, _stage: Stage, _produced: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
