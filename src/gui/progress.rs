// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Progress sink for crawls started from the GUI; writes the status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, failed: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        self.set_status(format!("{} ({}/{})", label, self.done, self.total));
    }
    fn item_failed(&mut self, label: &str) {
        self.failed += 1;
        self.set_status(format!("Failed: {label}"));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Crawl complete"));
        } else {
            self.set_status(format!(
                "Crawl complete ({}/{}, {} failed)",
                self.done, self.total, self.failed
            ));
        }
    }
}
