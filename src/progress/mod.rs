//! Progress indicator
//!
//! A single-line spinner that shows the foreground is alive while a long
//! external step runs. One background task redraws `\r<message> <symbol>`
//! every frame and polls a shared cancellation flag between frames.
//!
//! Lifecycle is `Idle -> Running -> Idle`. Both transitions are idempotent:
//! starting a running indicator and stopping an idle one do nothing.
//! [`ProgressIndicator::stop`] returns only after the task has written its
//! final blank line and exited, so nothing the caller prints afterwards can
//! be overdrawn by a late frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::console::Console;

/// Spinner frames, in display order
pub const FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Default delay between frames
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Idle,
    Running,
}

/// Spinner bound to a console
pub struct ProgressIndicator {
    message: String,
    console: Console,
    interval: Duration,
    cancel: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl ProgressIndicator {
    pub fn new(console: Console) -> Self {
        Self {
            message: "Processing".to_string(),
            console,
            interval: DEFAULT_FRAME_INTERVAL,
            cancel: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Change the text next to the spinner; ignored while running
    pub fn set_message(&mut self, message: impl Into<String>) {
        if self.task.is_none() {
            self.message = message.into();
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn state(&self) -> IndicatorState {
        if self.task.is_some() {
            IndicatorState::Running
        } else {
            IndicatorState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Launch the animation task unless one is already running
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }

        self.cancel.store(false, Ordering::Release);
        let cancel = Arc::clone(&self.cancel);
        let console = self.console.clone();
        let message = self.message.clone();
        let interval = self.interval;

        self.task = Some(tokio::spawn(async move {
            animate(console, message, interval, cancel).await;
        }));
        trace!("Progress indicator started");
    }

    /// Signal the task and wait until it has cleared the line and exited
    pub async fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        self.cancel.store(true, Ordering::Release);
        if let Err(e) = task.await {
            warn!("Progress indicator task ended abnormally: {}", e);
        }
        trace!("Progress indicator stopped");
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        // Cannot join here; the task still clears its line before exiting
        if self.task.is_some() {
            self.cancel.store(true, Ordering::Release);
        }
    }
}

impl std::fmt::Debug for ProgressIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressIndicator")
            .field("message", &self.message)
            .field("interval", &self.interval)
            .field("state", &self.state())
            .finish()
    }
}

async fn animate(console: Console, message: String, interval: Duration, cancel: Arc<AtomicBool>) {
    let mut frame = 0;
    while !cancel.load(Ordering::Acquire) {
        // A closed stdout is not worth failing the foreground step over
        let _ = console.write_str(&format!("\r{} {}", message, FRAMES[frame]));
        tokio::time::sleep(interval).await;
        frame = (frame + 1) % FRAMES.len();
    }

    let _ = console.write_str(&clear_line(&message));
}

/// Blank out `\r<message> <symbol>` and return the cursor to column zero
pub fn clear_line(message: &str) -> String {
    format!("\r{}\r", " ".repeat(message.chars().count() + 3))
}
