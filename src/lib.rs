//! Virtual Memory Simulator Core
//!
//! This crate simulates address translation and page replacement for a
//! demand-paged virtual memory subsystem: an inverted page table of fixed
//! capacity, FIFO/LRU/CLOCK victim selection and swap accounting.

pub mod config;
pub mod error;
pub mod page_table;
pub mod progress;
pub mod replacement;
pub mod replay;
pub mod report;
pub mod simulator;
pub mod trace;

pub use config::{ConfigBuilder, SimulatorConfig};
pub use error::{Error, Result};
pub use page_table::{PageTable, PageTableEntry};
pub use replacement::{ReplacementPolicy, Replacer};
pub use simulator::{Simulator, Stats};
pub use trace::{AccessKind, TraceReader, TraceRecord};
