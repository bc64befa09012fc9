//! Progress side channel.
//!
//! Long-running stages report how many items they have processed through a
//! caller-supplied callback. Reporting never feeds back into the data.

/// Invokes a callback every `interval` processed items.
pub struct Progress<'a> {
    interval: usize,
    callback: Option<Box<dyn FnMut(usize) + 'a>>,
}

impl<'a> Progress<'a> {
    /// A reporter that never calls anything.
    pub fn silent() -> Self {
        Self {
            interval: 0,
            callback: None,
        }
    }

    pub fn every(interval: usize, callback: impl FnMut(usize) + 'a) -> Self {
        Self {
            interval,
            callback: Some(Box::new(callback)),
        }
    }

    /// Called with the number of items handled so far, before handling the next one.
    pub fn tick(&mut self, processed: usize) {
        if self.interval == 0 {
            return;
        }
        if let Some(callback) = self.callback.as_mut() {
            if processed % self.interval == 0 {
                callback(processed);
            }
        }
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::silent()
    }
}
