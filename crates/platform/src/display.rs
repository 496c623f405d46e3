//! Character display abstraction
//!
//! The console front panel carries a 2×16 character LCD. The game core only
//! ever clears the screen, homes the cursor, or writes a string starting at a
//! line origin — no pixel addressing exists at this layer.

/// Number of visible character columns per line.
pub const DISPLAY_COLUMNS: usize = 16;

/// Addressable lines of the character LCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// First (upper) line.
    Top,
    /// Second (lower) line.
    Bottom,
}

/// Character display driver trait.
///
/// Implementations own cursor placement and command timing; callers only
/// provide line-addressed text. Strings longer than [`DISPLAY_COLUMNS`] are
/// truncated by the driver, never an error.
pub trait CharacterDisplay {
    /// Error type for display operations.
    type Error: core::fmt::Debug;

    /// Blank the entire display and home the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Return the cursor to the origin without blanking.
    fn home(&mut self) -> Result<(), Self::Error>;

    /// Write `text` starting at the origin of `line`, overwriting what was
    /// there. The remainder of the line is left untouched.
    fn write_at(&mut self, line: Line, text: &str) -> Result<(), Self::Error>;
}

/// Display errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or GPIO communication error.
    #[error("display communication error")]
    Communication,
    /// The controller did not come ready within its command deadline.
    #[error("display operation timeout")]
    Timeout,
}
