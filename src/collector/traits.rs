//! Abstractions for source access and plugin wiring.
//!
//! The `FileSystem` trait allows the collector to work with both the real
//! `/proc` filesystem on Linux and in-memory implementations for testing.
//! The `Plugin` trait is the surface a scheduler holds on to.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::ConfigError;
use crate::sink::MetricSink;

use super::procfs::CollectError;

/// Abstraction for filesystem operations.
///
/// This trait allows collectors to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Opens a file for line-oriented reading.
    ///
    /// The returned reader owns the underlying handle; dropping it releases
    /// the handle.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>>;

    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
        let file = std::fs::File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A read plugin driven by an external scheduler.
///
/// Configuration happens once, strictly before the first `read`.
pub trait Plugin {
    /// Plugin name, also used as the `plugin` field of emitted values.
    fn name(&self) -> &'static str;

    /// Applies one configuration directive.
    fn configure(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;

    /// Runs one collection cycle, dispatching values to `sink`.
    ///
    /// Returns the number of values the sink accepted.
    fn read(&mut self, sink: &mut dyn MetricSink) -> Result<usize, CollectError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_real_fs_open_reads_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  0:   1   2").unwrap();
        writeln!(file, "  1:   3   4").unwrap();

        let fs = RealFs::new();
        let reader = fs.open(file.path()).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["  0:   1   2", "  1:   3   4"]);
    }

    #[test]
    fn test_real_fs_read_to_string() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "node-1").unwrap();

        let fs = RealFs::new();
        assert_eq!(fs.read_to_string(file.path()).unwrap(), "node-1\n");
    }

    #[test]
    fn test_real_fs_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let fs = RealFs::new();
        assert!(fs.exists(file.path()));
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn test_real_fs_open_missing() {
        let fs = RealFs::new();
        let err = fs.open(Path::new("/nonexistent/path/12345")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
