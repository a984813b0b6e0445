//! Shared console output
//!
//! The progress indicator and the orchestrator both write to the same
//! terminal line discipline; [`Console`] is the handle they share. It wraps
//! stdout in production and an in-memory buffer in tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

type Sink = Box<dyn Write + Send>;

/// Cloneable handle to one output sink
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Sink>>,
}

impl Console {
    /// Console writing to the process's standard output
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console writing into memory, plus a handle to read what was written
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        (Self::from_writer(captured.clone()), captured)
    }

    /// Write text as-is and flush
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }

    /// Write text followed by a newline and flush
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut sink = self.lock();
        sink.write_all(text.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        // A panic mid-write leaves the sink usable; keep writing
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// In-memory sink handed out by [`Console::capture`]
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
