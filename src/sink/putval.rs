use std::io::Write;

use super::{MetricSink, SinkError, ValueList};

/// Writes values in collectd's plain-text `PUTVAL` protocol.
///
/// ```text
/// PUTVAL "node-1/irq/irq-0" interval=10.000 1700000000:150
/// ```
pub struct PutvalSink<W: Write> {
    out: W,
}

impl<W: Write> PutvalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MetricSink for PutvalSink<W> {
    fn dispatch(&mut self, values: &ValueList) -> Result<(), SinkError> {
        writeln!(
            self.out,
            "PUTVAL \"{}\" interval={:.3} {}:{}",
            values.identifier(),
            values.interval.as_secs_f64(),
            values.time.timestamp(),
            values.value
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::sample_value_list;

    #[test]
    fn test_putval_line() {
        let mut sink = PutvalSink::new(Vec::new());
        sink.dispatch(&sample_value_list()).unwrap();
        sink.flush().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "PUTVAL \"node-1/irq/irq-0\" interval=10.000 1700000000:150\n"
        );
    }

    #[test]
    fn test_putval_negative_counter() {
        let mut vl = sample_value_list();
        vl.value = -5;
        let mut sink = PutvalSink::new(Vec::new());
        sink.dispatch(&vl).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.ends_with(" 1700000000:-5\n"));
    }
}
