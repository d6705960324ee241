//! Interrupt collector for `/proc/interrupts`.
//!
//! One call to [`IrqCollector::collect`] is one collection cycle: the table
//! is opened, read line by line, each record is summed across CPUs, filtered
//! and emitted. Values are raw kernel counters; consumers derive rates.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::collector::filter::Filter;
use crate::collector::procfs::parser::{aggregate, parse_interrupt_line, truncate_name};
use crate::collector::traits::{FileSystem, Plugin};
use crate::config::{self, ConfigError, DIRECTIVE_IGNORE_SELECTED, DIRECTIVE_IRQ};
use crate::sink::{MetricSink, ValueList};

/// Plugin and type name of emitted values.
pub const PLUGIN_NAME: &str = "irq";

/// Error type for collection failures.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The interrupt table could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cumulative count for one interrupt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrqSample {
    pub name: String,
    pub total: i64,
}

/// Phase of the current collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Opening,
    Scanning,
    Closed,
}

/// Collects per-interrupt counters from `/proc/interrupts`.
pub struct IrqCollector<F: FileSystem> {
    fs: F,
    source: PathBuf,
    filter: Filter,
    host: String,
    interval: Duration,
    name_limit: Option<usize>,
    state: CycleState,
}

impl<F: FileSystem> IrqCollector<F> {
    /// Default scheduling interval reported with each value.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Creates a new interrupt collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    ///
    /// The host name is read from `<proc_path>/sys/kernel/hostname`, falling
    /// back to `localhost`.
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        let proc_path = proc_path.as_ref();
        let host = crate::util::resolve_hostname(&fs, proc_path);

        Self {
            fs,
            source: proc_path.join("interrupts"),
            filter: Filter::new(),
            host,
            interval: Self::DEFAULT_INTERVAL,
            name_limit: None,
            state: CycleState::Idle,
        }
    }

    /// Overrides the host name attached to emitted values.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the interval reported with emitted values.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Truncates interrupt names to at most `limit` bytes.
    pub fn with_name_limit(mut self, limit: usize) -> Self {
        self.name_limit = Some(limit);
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Phase reached by the most recent cycle.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Applies one configuration directive.
    ///
    /// Keys are matched case-insensitively. `IgnoreSelected true` drops the
    /// listed interrupts; `IgnoreSelected false` reports only them.
    pub fn configure(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        if key.eq_ignore_ascii_case(DIRECTIVE_IRQ) {
            self.filter.add_pattern(value);
        } else if key.eq_ignore_ascii_case(DIRECTIVE_IGNORE_SELECTED) {
            let ignore_selected = config::parse_bool(key, value)?;
            self.filter.set_invert(ignore_selected);
        } else {
            return Err(ConfigError::UnknownDirective(key.to_string()));
        }
        Ok(())
    }

    /// Runs one collection cycle and returns the reported samples.
    pub fn collect(&mut self) -> Result<Vec<IrqSample>, CollectError> {
        let mut samples = Vec::new();
        self.scan(|sample| samples.push(sample))?;
        Ok(samples)
    }

    fn scan(&mut self, mut emit: impl FnMut(IrqSample)) -> Result<(), CollectError> {
        self.state = CycleState::Opening;
        let mut reader = match self.fs.open(&self.source) {
            Ok(reader) => reader,
            Err(source) => {
                self.state = CycleState::Closed;
                error!("irq: cannot open {}: {}", self.source.display(), source);
                return Err(CollectError::Open {
                    path: self.source.clone(),
                    source,
                });
            }
        };

        self.state = CycleState::Scanning;
        let mut buf = Vec::new();
        let mut emitted = 0usize;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!("irq: read error in {}: {}", self.source.display(), e);
                    break;
                }
            }

            let line = String::from_utf8_lossy(&buf);
            let Some(record) = parse_interrupt_line(&line) else {
                trace!("irq: skipping line {:?}", line.trim_end());
                continue;
            };

            let name = match self.name_limit {
                Some(limit) => truncate_name(record.name, limit),
                None => record.name,
            };
            if !self.filter.matches(name) {
                continue;
            }

            emit(IrqSample {
                name: name.to_string(),
                total: aggregate(&record.fields),
            });
            emitted += 1;
        }
        drop(reader);

        self.state = CycleState::Closed;
        debug!("irq: cycle emitted {} samples", emitted);
        Ok(())
    }

    /// Runs one collection cycle, dispatching each sample to `sink`.
    ///
    /// A sink failure is logged and skips that value only. Returns the number
    /// of values the sink accepted.
    pub fn read(&mut self, sink: &mut dyn MetricSink) -> Result<usize, CollectError> {
        let time = Utc::now();
        let host = self.host.clone();
        let interval = self.interval;
        let mut accepted = 0usize;

        self.scan(|sample| {
            let values = ValueList {
                host: host.clone(),
                plugin: PLUGIN_NAME.to_string(),
                plugin_instance: String::new(),
                type_name: PLUGIN_NAME.to_string(),
                type_instance: sample.name,
                time,
                interval,
                value: sample.total,
            };
            match sink.dispatch(&values) {
                Ok(()) => accepted += 1,
                Err(e) => warn!("irq: dispatch of {} failed: {}", values.identifier(), e),
            }
        })?;

        if let Err(e) = sink.flush() {
            warn!("irq: sink flush failed: {}", e);
        }
        Ok(accepted)
    }
}

impl<F: FileSystem> Plugin for IrqCollector<F> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn configure(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        IrqCollector::configure(self, key, value)
    }

    fn read(&mut self, sink: &mut dyn MetricSink) -> Result<usize, CollectError> {
        IrqCollector::read(self, sink)
    }
}
