//! Terminal progress for scans.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use indicatif::ProgressBar;

use super::output;
use crate::port::{ScanObserver, Stage};

/// Draws one progress bar per pipeline stage.
///
/// Hidden in JSON and quiet mode; matching workers report from several
/// threads, so the current bar lives behind a mutex.
#[derive(Debug, Default)]
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
    found: AtomicUsize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&self, bar: Option<ProgressBar>) -> Option<ProgressBar> {
        match self.bar.lock() {
            Ok(mut slot) => std::mem::replace(&mut *slot, bar),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), bar),
        }
    }

    fn current(&self) -> Option<ProgressBar> {
        match self.bar.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ScanObserver for ProgressObserver {
    fn stage_started(&self, stage: Stage, total: usize) {
        self.found.store(0, Ordering::Relaxed);
        let previous = self.replace(Some(output::progress(total, &stage.to_string())));
        if let Some(bar) = previous {
            bar.finish_and_clear();
        }
    }

    fn advanced(&self, _stage: Stage, found: usize) {
        let Some(bar) = self.current() else {
            return;
        };
        bar.inc(1);
        if found > 0 {
            let total = self.found.fetch_add(found, Ordering::Relaxed) + found;
            bar.set_prefix(format!("{total} found"));
        }
    }

    fn stage_finished(&self, stage: Stage, produced: usize) {
        if let Some(bar) = self.replace(None) {
            output::spinner_success(&bar, &format!("{stage}: {produced} kept"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_found_across_events() {
        let observer = ProgressObserver::new();
        observer.stage_started(Stage::Matching, 3);
        observer.advanced(Stage::Matching, 2);
        observer.advanced(Stage::Matching, 0);
        observer.advanced(Stage::Matching, 1);
        assert_eq!(observer.found.load(Ordering::Relaxed), 3);
        assert!(observer.current().is_some());

        observer.stage_finished(Stage::Matching, 3);
        assert!(observer.current().is_none());
    }
}
