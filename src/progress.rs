// src/progress.rs
/// Progress reporting for batch collection.
/// Frontends implement this to surface status; results never depend on it.
pub trait Progress {
    /// Called at the start with the number of dates to collect.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One date collected (`Y-M-D`).
    fn item_done(&mut self, _key: &str) {}

    /// One date failed; the batch stops after this.
    fn item_failed(&mut self, _key: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
