//! Configuration directives.
//!
//! The collector is configured through `Key value` directives, the same
//! shape collectd uses for plugin blocks:
//!
//! ```text
//! # only report the timer and the MSI lines
//! Irq "0"
//! Irq "/^2[0-9]$/"
//! IgnoreSelected false
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Adds a pattern to the interrupt filter.
pub const DIRECTIVE_IRQ: &str = "Irq";
/// Chooses whether listed patterns are excluded or the only ones reported.
pub const DIRECTIVE_IGNORE_SELECTED: &str = "IgnoreSelected";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown directive: {0}")]
    UnknownDirective(String),

    #[error("line {line}: directive {key} requires a value")]
    MissingValue { key: String, line: usize },

    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool { key: String, value: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single `Key value` pair with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Parses a collectd-style boolean.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parses directive text into `Key value` pairs.
///
/// Blank lines and `#` comments are skipped. Values may be wrapped in double
/// quotes, which are removed.
pub fn parse_directives(content: &str) -> Result<Vec<Directive>, ConfigError> {
    let mut directives = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim()),
            None => (trimmed, ""),
        };
        if rest.is_empty() {
            return Err(ConfigError::MissingValue {
                key: key.to_string(),
                line,
            });
        }

        directives.push(Directive {
            key: key.to_string(),
            value: unquote(rest, line)?.to_string(),
            line,
        });
    }

    Ok(directives)
}

/// Loads directives from a file.
pub fn load_directives(path: &Path) -> Result<Vec<Directive>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_directives(&content)
}

fn unquote(value: &str, line: usize) -> Result<&str, ConfigError> {
    let Some(inner) = value.strip_prefix('"') else {
        return Ok(value);
    };
    inner.strip_suffix('"').ok_or_else(|| ConfigError::Syntax {
        line,
        message: format!("unterminated quote in {}", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("IgnoreSelected", "true").unwrap());
        assert!(parse_bool("IgnoreSelected", "Yes").unwrap());
        assert!(parse_bool("IgnoreSelected", "ON").unwrap());
        assert!(!parse_bool("IgnoreSelected", "false").unwrap());
        assert!(!parse_bool("IgnoreSelected", "no").unwrap());
        assert!(!parse_bool("IgnoreSelected", " off ").unwrap());
        assert!(matches!(
            parse_bool("IgnoreSelected", "maybe"),
            Err(ConfigError::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_parse_directives() {
        let content = "\
# interrupts to keep
Irq \"0\"
Irq   /^eth/

IgnoreSelected false
";
        let directives = parse_directives(content).unwrap();
        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0].key, "Irq");
        assert_eq!(directives[0].value, "0");
        assert_eq!(directives[0].line, 2);
        assert_eq!(directives[1].value, "/^eth/");
        assert_eq!(directives[2].key, "IgnoreSelected");
        assert_eq!(directives[2].value, "false");
        assert_eq!(directives[2].line, 5);
    }

    #[test]
    fn test_parse_directives_quoted_spaces() {
        let directives = parse_directives("Irq \"Local timer\"\n").unwrap();
        assert_eq!(directives[0].value, "Local timer");
    }

    #[test]
    fn test_parse_directives_missing_value() {
        let err = parse_directives("# keep\nIrq\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { ref key, line: 2 } if key == "Irq"));
    }

    #[test]
    fn test_parse_directives_unterminated_quote() {
        let err = parse_directives("\nIrq \"timer\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_load_directives_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Irq NMI").unwrap();
        writeln!(file, "IgnoreSelected true").unwrap();

        let directives = load_directives(file.path()).unwrap();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].value, "NMI");
    }

    #[test]
    fn test_load_directives_missing_file() {
        let err = load_directives(Path::new("/nonexistent/irq.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
