//! JSON lines encoder

use std::io;

use serde::Serializer as _;
use serde::ser::SerializeMap;

use super::{Encoder, Record, keys};
use crate::format::epoch_millis;

/// Machine-readable encoder
///
/// Writes keys in a stable order: `level`, `time`, `component`, `caller`,
/// `msg`, logger fields, span and event fields, `stacktrace`. Duplicate keys
/// are written as-is; the last one wins for most JSON readers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder {
    _private: (),
}

impl JsonEncoder {
    /// Create a JSON encoder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        {
            let mut ser = serde_json::Serializer::new(&mut *buf);
            let mut map = (&mut ser).serialize_map(None)?;

            map.serialize_entry(keys::LEVEL, record.level.as_str())?;
            map.serialize_entry(keys::TIME, &epoch_millis(record.time))?;
            if let Some(component) = record.component {
                map.serialize_entry(keys::COMPONENT, component)?;
            }
            if let Some(caller) = &record.caller {
                map.serialize_entry(keys::CALLER, caller)?;
            }
            map.serialize_entry(keys::MESSAGE, record.message)?;

            for field in record.context.iter().chain(record.fields) {
                map.serialize_entry(field.key(), &field.value)?;
            }

            if let Some(stacktrace) = &record.stacktrace {
                map.serialize_entry(keys::STACKTRACE, stacktrace)?;
            }
            map.end()?;
        }
        buf.push(b'\n');
        Ok(())
    }
}
