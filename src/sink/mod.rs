//! Metric sinks.
//!
//! A sink receives one `ValueList` per emitted sample. The value list is
//! borrowed for the duration of the call; sinks copy what they keep.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

mod json;
mod putval;

pub use json::JsonSink;
pub use putval::PutvalSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One dispatched counter value, identified collectd-style by
/// `host/plugin[-plugin_instance]/type[-type_instance]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    pub host: String,
    pub plugin: String,
    pub plugin_instance: String,
    pub type_name: String,
    pub type_instance: String,
    pub time: DateTime<Utc>,
    pub interval: Duration,
    /// Derive (monotonic counter) value.
    pub value: i64,
}

impl ValueList {
    /// Formats the `host/plugin/type` identifier.
    pub fn identifier(&self) -> String {
        let mut id = format!("{}/{}", self.host, self.plugin);
        if !self.plugin_instance.is_empty() {
            id.push('-');
            id.push_str(&self.plugin_instance);
        }
        id.push('/');
        id.push_str(&self.type_name);
        if !self.type_instance.is_empty() {
            id.push('-');
            id.push_str(&self.type_instance);
        }
        id
    }
}

/// Receiver of emitted values.
pub trait MetricSink {
    fn dispatch(&mut self, values: &ValueList) -> Result<(), SinkError>;

    /// Called once after a cycle has dispatched all of its values.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that keeps every dispatched value in memory.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub values: Vec<ValueList>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(type_instance, value)` pairs in dispatch order.
    pub fn pairs(&self) -> Vec<(String, i64)> {
        self.values
            .iter()
            .map(|v| (v.type_instance.clone(), v.value))
            .collect()
    }
}

impl MetricSink for VecSink {
    fn dispatch(&mut self, values: &ValueList) -> Result<(), SinkError> {
        self.values.push(values.clone());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_value_list() -> ValueList {
    use chrono::TimeZone;

    ValueList {
        host: "node-1".to_string(),
        plugin: "irq".to_string(),
        plugin_instance: String::new(),
        type_name: "irq".to_string(),
        type_instance: "0".to_string(),
        time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        interval: Duration::from_secs(10),
        value: 150,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let mut vl = sample_value_list();
        assert_eq!(vl.identifier(), "node-1/irq/irq-0");

        vl.plugin_instance = "a".to_string();
        vl.type_instance = String::new();
        assert_eq!(vl.identifier(), "node-1/irq-a/irq");
    }

    #[test]
    fn test_vec_sink_keeps_values() {
        let mut sink = VecSink::new();
        let vl = sample_value_list();
        sink.dispatch(&vl).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.values, vec![vl]);
        assert_eq!(sink.pairs(), vec![("0".to_string(), 150)]);
    }
}
