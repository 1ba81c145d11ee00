//! Smoothing window size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("smoothing window {0} outside {min}..={max}", min = SmoothingWindow::MIN, max = SmoothingWindow::MAX)]
pub struct WindowError(pub usize);

/// Trailing window length in rows, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SmoothingWindow(usize);

impl SmoothingWindow {
    pub const MIN: usize = 1;
    pub const MAX: usize = 30;
    pub const DEFAULT: SmoothingWindow = SmoothingWindow(7);

    pub fn new(size: usize) -> Result<Self, WindowError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(WindowError(size))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for SmoothingWindow {
    type Error = WindowError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<SmoothingWindow> for usize {
    fn from(window: SmoothingWindow) -> Self {
        window.0
    }
}
