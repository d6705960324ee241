//! Collectors for the Linux `/proc` filesystem.
//!
//! `parser` holds the pure line and number parsers; `interrupts` drives a
//! collection cycle over `/proc/interrupts`.

pub mod interrupts;
pub mod parser;

pub use interrupts::{CollectError, CycleState, IrqCollector, IrqSample, PLUGIN_NAME};
pub use parser::{InterruptRecord, ParsedInt, aggregate, parse_c_integer, parse_interrupt_line};
