//! irqstat - interrupt counter collection library.
//!
//! Provides:
//! - `collector` — `/proc/interrupts` parsing, aggregation, filtering
//! - `config` — configuration directives and directive files
//! - `sink` — metric value lists and output encoders
//! - `util` — helper utilities

pub mod collector;
pub mod config;
pub mod sink;
pub mod util;
