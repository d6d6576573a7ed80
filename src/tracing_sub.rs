use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::log_buffer::{LogHandle, LogWriter, global_log};

/// Where log output goes. A file wins over the in-memory buffer; stderr
/// is the last resort for runs that never enter the alternate screen.
#[derive(Clone, Debug)]
pub enum LogSink {
    File(Arc<Mutex<File>>),
    Buffer(LogHandle),
    Stderr,
}

impl LogSink {
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogSink::File(Arc::new(Mutex::new(file))))
    }

    /// The global log buffer if one was installed, else stderr.
    pub fn from_global() -> Self {
        match global_log() {
            Some(handle) => LogSink::Buffer(handle),
            None => LogSink::Stderr,
        }
    }
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Buffer(LogWriter),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new(sink: &LogSink) -> Self {
        let inner = match sink {
            LogSink::File(file) => DelegatingInner::File(Arc::clone(file)),
            LogSink::Buffer(handle) => DelegatingInner::Buffer(handle.writer()),
            LogSink::Stderr => DelegatingInner::Stderr(io::stderr()),
        };
        DelegatingWriter { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Buffer(w) => w.write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Buffer(w) => w.flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    sink: LogSink,
}

impl SubscriberMakeWriter {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new(&self.sink)
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init(sink: LogSink, level: Level) {
    let ansi = matches!(sink, LogSink::Stderr);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter::new(sink))
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
