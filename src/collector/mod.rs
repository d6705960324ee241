//! Interrupt counter collector for Linux.
//!
//! This module reads `/proc/interrupts`, sums the per-CPU counts of every
//! interrupt line and emits one counter per line, subject to a name filter.
//! Filesystem access goes through a trait so tests run without Linux.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      IrqCollector                       │
//! │  open ─► parse_interrupt_line ─► aggregate ─► Filter    │
//! │                                                │        │
//! │                                         MetricSink      │
//! │                    ┌──────────────┐                     │
//! │                    │  FileSystem  │ (trait)             │
//! │                    └──────┬───────┘                     │
//! └───────────────────────────┼─────────────────────────────┘
//!                    ┌────────┴────────┐
//!             ┌──────▼──────┐   ┌──────▼──────┐
//!             │   RealFs    │   │   MockFs    │
//!             │  (Linux)    │   │  (Testing)  │
//!             └─────────────┘   └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use irqstat::collector::{IrqCollector, RealFs};
//!
//! let mut collector = IrqCollector::new(RealFs::new(), "/proc");
//! collector.configure("Irq", "LOC").unwrap();
//! let samples = collector.collect().unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use irqstat::collector::{IrqCollector, MockFs};
//!
//! let mut collector = IrqCollector::new(MockFs::minimal_system(), "/proc");
//! let samples = collector.collect().unwrap();
//! assert_eq!(samples.len(), 2);
//! assert_eq!(samples[0].total, 150);
//! ```

pub mod filter;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use filter::Filter;
pub use mock::MockFs;
pub use procfs::{CollectError, CycleState, IrqCollector, IrqSample};
pub use traits::{FileSystem, Plugin, RealFs};
