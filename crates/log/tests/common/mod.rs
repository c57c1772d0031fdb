//! Shared helpers for wg-log integration tests

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use wg_log::{Config, Logger};

/// Writer collecting everything written through it
#[derive(Clone, Debug, Default)]
pub struct TestWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl TestWriter {
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.output()
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid JSON line"))
            .collect()
    }
}

impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TestWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Logger writing into a fresh [`TestWriter`]
pub fn capture(config: &Config) -> (Logger, TestWriter) {
    let writer = TestWriter::default();
    let logger = Logger::from_config_with_writer(config, writer.clone());
    (logger, writer)
}
