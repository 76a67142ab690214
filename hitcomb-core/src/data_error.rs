//! Readout error records.
//!
//! A [`DataError`] describes one error word reported by a pixel readout
//! unit. It carries the raw 32- or 64-bit word, the numeric error type and
//! the id of the unit that reported it; the message is derived from the
//! type. Equality compares every field; callers that want the records
//! grouped by unit sort with [`DataError::fed_id`] as the key.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error type reported for a disabled readout channel.
pub const DISABLED_CHANNEL: i32 = 25;
/// Error type reported for an invalid dcol/pixel address (last known type).
pub const INVALID_PIXEL_ADDRESS: i32 = 37;

/// Returns the message for an error type code.
#[must_use]
pub fn message_for(error_type: i32) -> &'static str {
    match error_type {
        25 => "Error: Disabled FED channel (ROC=25)",
        26 => "Error: Gap word",
        27 => "Error: Dummy word",
        28 => "Error: FIFO nearly full",
        29 => "Error: Timeout",
        30 => "Error: Trailer",
        31 => "Error: Event number mismatch",
        32 => "Error: Invalid or missing header",
        33 => "Error: Invalid or missing trailer",
        34 => "Error: Size mismatch",
        35 => "Error: Invalid channel",
        36 => "Error: Invalid ROC number",
        37 => "Error: Invalid dcol/pixel address",
        _ => "Error: Unknown error type",
    }
}

/// An error word reported by a readout unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataError {
    word32: u32,
    word64: u64,
    error_type: i32,
    fed_id: i32,
}

impl DataError {
    /// Creates a record from a 32-bit error word.
    #[must_use]
    pub fn from_word32(word: u32, error_type: i32, fed_id: i32) -> Self {
        Self {
            word32: word,
            word64: 0,
            error_type,
            fed_id,
        }
    }

    /// Creates a record from a 64-bit header or trailer word.
    #[must_use]
    pub fn from_word64(word: u64, error_type: i32, fed_id: i32) -> Self {
        Self {
            word32: 0,
            word64: word,
            error_type,
            fed_id,
        }
    }

    /// Sets the 32-bit word.
    pub fn set_word32(&mut self, word: u32) {
        self.word32 = word;
    }

    /// Sets the 64-bit word.
    pub fn set_word64(&mut self, word: u64) {
        self.word64 = word;
    }

    /// Sets the error type, which also changes the message.
    pub fn set_type(&mut self, error_type: i32) {
        self.error_type = error_type;
    }

    /// Sets the reporting unit id.
    pub fn set_fed_id(&mut self, fed_id: i32) {
        self.fed_id = fed_id;
    }

    #[must_use]
    pub fn word32(&self) -> u32 {
        self.word32
    }

    #[must_use]
    pub fn word64(&self) -> u64 {
        self.word64
    }

    #[must_use]
    pub fn error_type(&self) -> i32 {
        self.error_type
    }

    #[must_use]
    pub fn fed_id(&self) -> i32 {
        self.fed_id
    }

    /// Human-readable message for the error type.
    #[must_use]
    pub fn message(&self) -> &'static str {
        message_for(self.error_type)
    }

    /// Returns true if the type is one of the known readout error types.
    #[must_use]
    pub fn is_known_type(&self) -> bool {
        (DISABLED_CHANNEL..=INVALID_PIXEL_ADDRESS).contains(&self.error_type)
    }
}

impl Default for DataError {
    fn default() -> Self {
        Self::from_word32(0, 0, 0)
    }
}
