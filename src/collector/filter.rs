//! Allow/deny list for interrupt names.
//!
//! Patterns are exact names (`timer`, `NMI`) or regular expressions wrapped
//! in slashes (`/^eth[0-9]+/`). `invert` selects whether the patterns name
//! the interrupts to drop or the only ones to keep.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, warn};

/// Name filter consulted before every emitted sample.
#[derive(Debug, Clone)]
pub struct Filter {
    exact: HashSet<String>,
    regexes: Vec<Regex>,
    invert: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            exact: HashSet::new(),
            regexes: Vec::new(),
            invert: true,
        }
    }
}

impl Filter {
    /// Creates an empty filter that reports everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern.
    ///
    /// Returns `false` if the pattern was dropped because its regex did not
    /// compile.
    pub fn add_pattern(&mut self, pattern: &str) -> bool {
        let Some(expr) = regex_body(pattern) else {
            debug!("Filter: exact pattern {:?}", pattern);
            self.exact.insert(pattern.to_string());
            return true;
        };

        match Regex::new(expr) {
            Ok(re) => {
                debug!("Filter: regex pattern {:?}", expr);
                self.regexes.push(re);
                true
            }
            Err(e) => {
                warn!("Filter: ignoring invalid regex {:?}: {}", pattern, e);
                false
            }
        }
    }

    /// Sets whether listed patterns are excluded (`true`) or are the only
    /// ones included (`false`).
    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.exact.len() + self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `name` should be reported.
    pub fn matches(&self, name: &str) -> bool {
        self.contains(name) ^ self.invert
    }

    fn contains(&self, name: &str) -> bool {
        self.exact.contains(name) || self.regexes.iter().any(|re| re.is_match(name))
    }
}

/// Returns the expression inside `/.../`, if `pattern` is slash-delimited.
fn regex_body(pattern: &str) -> Option<&str> {
    if pattern.len() > 2 {
        pattern.strip_prefix('/')?.strip_suffix('/')
    } else {
        None
    }
}
