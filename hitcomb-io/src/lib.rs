//! hitcomb-io: Event file I/O for hitcomb.
//!
//! This crate reads JSON event files through memory-mapped files via
//! memmap2 and writes combination output as CSV or JSON.
//!

mod error;
pub mod event;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use event::{EventFile, EventRecord, FileSummary};
pub use reader::{EventFileReader, MappedFileReader};
pub use writer::{CombinationWriter, EventCombinations};
