//! Memory-mapped event file readers.
//!

use crate::event::EventFile;
use crate::{Error, Result};
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A memory-mapped file reader.
///
/// Uses memmap2 to access file contents without copying them into a
/// separate buffer first.
pub struct MappedFileReader {
    mmap: Mmap,
    path: PathBuf,
}

impl MappedFileReader {
    /// Opens a file for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
        // This is the standard safety contract for memory mapping.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Returns the file contents as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap[..]
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Returns the path the reader was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reader for JSON event files.
pub struct EventFileReader {
    reader: MappedFileReader,
}

impl EventFileReader {
    /// Opens an event file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            reader: MappedFileReader::open(path)?,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.reader.len()
    }

    /// Parses the file and checks every event for consistency.
    ///
    /// # Errors
    /// Returns an error if the file is empty, is not a valid event document,
    /// or holds an event whose map and references are inconsistent.
    pub fn read(&self) -> Result<EventFile> {
        if self.reader.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "{} is empty",
                self.reader.path().display()
            )));
        }

        let file: EventFile = serde_json::from_slice(self.reader.as_bytes())?;
        for (index, event) in file.events.iter().enumerate() {
            event.validate().map_err(|err| err.in_event(index))?;
        }

        debug!(
            "read {} events over {} detector elements from {}",
            file.events.len(),
            file.geometry.len(),
            self.reader.path().display()
        );
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_mapped_file_reader() {
        let mut file = NamedTempFile::new().unwrap();
        let data = br#"{"geometry":{},"events":[]}"#;
        file.write_all(data).unwrap();
        file.flush().unwrap();

        let reader = MappedFileReader::open(file.path()).unwrap();
        assert_eq!(reader.len(), data.len());
        assert!(!reader.is_empty());
        assert_eq!(reader.as_bytes(), &data[..]);
        assert_eq!(reader.path(), file.path());
    }

    #[test]
    fn test_event_file_reader_empty() {
        let file = NamedTempFile::new().unwrap();

        let reader = EventFileReader::open(file.path()).unwrap();
        assert_eq!(reader.file_size(), 0);
        assert!(matches!(reader.read(), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_event_file_reader_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"geometry\": ").unwrap();
        file.flush().unwrap();

        let reader = EventFileReader::open(file.path()).unwrap();
        assert!(matches!(reader.read(), Err(Error::Json(_))));
    }

    #[test]
    fn test_event_file_reader_misaligned_event() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "geometry": {},
            "events": [
                { "sim_hits": [], "rec_hits": [], "sim_to_rec": [] },
                { "sim_hits": [], "rec_hits": [], "sim_to_rec": [null] }
            ]
        }"#;
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let reader = EventFileReader::open(file.path()).unwrap();
        let err = reader.read().unwrap_err();
        assert!(matches!(
            err,
            Error::CoreError(hitcomb_core::Error::Event { index: 1, .. })
        ));
    }
}
