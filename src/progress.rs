//! Progress reporting and cooperative cancellation for scans.
//!
//! Scans report `worked(1)` once per record and poll
//! [`ProgressMonitor::is_canceled`] just as often. Monitors take `&self` and
//! keep their counters in atomics so a Ctrl-C handler can flip the cancel
//! flag while a scan runs.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Sink for scan progress.
pub trait ProgressMonitor {
    fn begin_task(&self, name: &str, total: usize);
    fn worked(&self, amount: usize);
    fn is_canceled(&self) -> bool;
    fn done(&self);
}

/// Monitor that reports nothing and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressMonitor for NullProgress {
    fn begin_task(&self, _name: &str, _total: usize) {}
    fn worked(&self, _amount: usize) {}
    fn is_canceled(&self) -> bool {
        false
    }
    fn done(&self) {}
}

/// Redraw the console line every this many records.
const REDRAW_EVERY: usize = 4096;

/// Progress line on stderr with a shared cancellation flag.
pub struct ConsoleProgress {
    task: Mutex<String>,
    completed: AtomicUsize,
    total: AtomicUsize,
    show_output: bool,
    canceled: Arc<AtomicBool>,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            task: Mutex::new(String::new()),
            completed: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            show_output: true,
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Monitor with output disabled; cancellation still works.
    pub fn quiet() -> Self {
        Self {
            show_output: false,
            ..Self::new()
        }
    }

    /// Flag shared with a signal handler.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.canceled)
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Current `(completed, total)` of the running task.
    pub fn get_progress(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    fn draw(&self, completed: usize) {
        let total = self.total.load(Ordering::SeqCst);
        let task = self.task.lock().map(|t| t.clone()).unwrap_or_default();
        eprint!("\r  [{}/{}] {}...", completed, total, task);
        let _ = io::stderr().flush();
    }
}

impl ProgressMonitor for ConsoleProgress {
    fn begin_task(&self, name: &str, total: usize) {
        if let Ok(mut task) = self.task.lock() {
            task.clear();
            task.push_str(name);
        }
        self.completed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        if self.show_output {
            self.draw(0);
        }
    }

    fn worked(&self, amount: usize) {
        let before = self.completed.fetch_add(amount, Ordering::SeqCst);
        let completed = before + amount;
        if self.show_output && completed / REDRAW_EVERY != before / REDRAW_EVERY {
            self.draw(completed);
        }
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    fn done(&self) {
        if self.show_output {
            // Clear the progress line
            eprint!("\r                                                    \r");
            let _ = io::stderr().flush();
        }
    }
}
