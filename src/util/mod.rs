//! Utility modules for irqstat.

mod hostname;

pub use hostname::resolve_hostname;
