// src/progress.rs
/// Lightweight progress reporting used by the crawlers.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of units (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit completed (a listing page, a contest).
    fn item_done(&mut self, _label: &str) {}

    /// One logical unit failed; the crawl carries on.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Progress sink that prints to stderr (CLI).
pub struct StderrProgress {
    done: usize,
    total: usize,
}

impl StderrProgress {
    pub fn new() -> Self { Self { done: 0, total: 0 } }
}

impl Default for StderrProgress {
    fn default() -> Self { Self::new() }
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        if self.total > 0 {
            eprintln!("[{}/{}] {}", self.done, self.total, label);
        } else {
            eprintln!("[{}] {}", self.done, label);
        }
    }
    fn item_failed(&mut self, label: &str) {
        eprintln!("failed: {label}");
    }
    fn finish(&mut self) {
        eprintln!("Done ({} item(s))", self.done);
    }
}
