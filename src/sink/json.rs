use std::io::Write;

use serde::Serialize;

use super::{MetricSink, SinkError, ValueList};

/// Writes one JSON object per value, in the field layout of collectd's JSON
/// output.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Serialize)]
struct JsonValue<'a> {
    values: [i64; 1],
    dstypes: [&'static str; 1],
    dsnames: [&'static str; 1],
    time: f64,
    interval: f64,
    host: &'a str,
    plugin: &'a str,
    plugin_instance: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    type_instance: &'a str,
}

impl<'a> From<&'a ValueList> for JsonValue<'a> {
    fn from(values: &'a ValueList) -> Self {
        Self {
            values: [values.value],
            dstypes: ["derive"],
            dsnames: ["value"],
            time: values.time.timestamp_millis() as f64 / 1000.0,
            interval: values.interval.as_secs_f64(),
            host: &values.host,
            plugin: &values.plugin,
            plugin_instance: &values.plugin_instance,
            type_name: &values.type_name,
            type_instance: &values.type_instance,
        }
    }
}

impl<W: Write> MetricSink for JsonSink<W> {
    fn dispatch(&mut self, values: &ValueList) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &JsonValue::from(values))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
