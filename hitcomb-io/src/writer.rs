//! Writers for combination output.

use crate::Result;
use hitcomb_core::{Combination, RecHitCollection};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Combinations of one event, as written to JSON output.
#[derive(Debug, Serialize)]
pub struct EventCombinations<'a> {
    pub event: usize,
    pub combinations: &'a [Combination],
}

/// Writer for combination output files.
pub struct CombinationWriter<W: Write = BufWriter<File>> {
    writer: W,
}

impl CombinationWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CombinationWriter<W> {
    /// Wraps an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the combinations of one event as CSV, one row per rec hit.
    ///
    /// Columns: `event,combination,rec_hit,x,y,z`. Positions are looked up in
    /// `rec_hits`.
    ///
    /// # Errors
    /// Returns an error on write failure or if a reference does not resolve.
    pub fn write_event_csv(
        &mut self,
        event: usize,
        combinations: &[Combination],
        rec_hits: &RecHitCollection,
        with_header: bool,
    ) -> Result<()> {
        if with_header {
            writeln!(self.writer, "event,combination,rec_hit,x,y,z")?;
        }

        for (index, combination) in combinations.iter().enumerate() {
            for reference in combination {
                let position = rec_hits.resolve(*reference)?.global_position;
                writeln!(
                    self.writer,
                    "{},{},{},{},{},{}",
                    event,
                    index,
                    reference.index(),
                    position.x,
                    position.y,
                    position.z
                )?;
            }
        }

        Ok(())
    }

    /// Writes every event's combinations as one JSON array.
    ///
    /// # Errors
    /// Returns an error on write or serialization failure.
    pub fn write_json(&mut self, events: &[Vec<Combination>]) -> Result<()> {
        let records: Vec<EventCombinations<'_>> = events
            .iter()
            .enumerate()
            .map(|(event, combinations)| EventCombinations {
                event,
                combinations,
            })
            .collect();
        serde_json::to_writer_pretty(&mut self.writer, &records)?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
