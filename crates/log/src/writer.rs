//! Writer implementations

// Standard library
use std::io;

// External dependencies
use tracing_subscriber::fmt::writer::BoxMakeWriter;

// Internal crates
use crate::config::WriterConfig;

/// Create a writer from configuration
pub fn make_writer(config: WriterConfig) -> BoxMakeWriter {
    match config {
        WriterConfig::Stdout => BoxMakeWriter::new(io::stdout),
        WriterConfig::Stderr => BoxMakeWriter::new(io::stderr),
    }
}

/// In-memory writer for tests
#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::Arc;

    use parking_lot::Mutex;

    /// Shared buffer that collects everything written through it
    #[derive(Clone, Debug, Default)]
    pub(crate) struct CaptureWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl CaptureWriter {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn output(&self) -> String {
            String::from_utf8_lossy(&self.buffer.lock()).into_owned()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.output().lines().map(ToString::to_string).collect()
        }

        pub(crate) fn json_lines(&self) -> Vec<serde_json::Value> {
            self.lines()
                .iter()
                .map(|line| serde_json::from_str(line).expect("valid JSON line"))
                .collect()
        }
    }

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
