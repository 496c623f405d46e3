//! Keypad and panel-switch input abstractions
//!
//! The console has a 4×4 matrix keypad (16-symbol alphabet) and three panel
//! switches. Both are debounced below this layer; the game core only ever
//! sees settled values.

/// The 4×4 keypad legend, row-major, as printed on the panel.
pub const KEYPAD_GRID: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Keypad symbols reserved for menu control, never part of game content.
pub const RESERVED_KEYS: [char; 2] = ['*', '#'];

/// Debounced matrix keypad.
pub trait Keypad {
    /// Wait for the next debounced keypress and return its legend character.
    ///
    /// Blocks (asynchronously) until a key settles; every returned character
    /// is one of [`KEYPAD_GRID`].
    async fn read_key(&mut self) -> char;
}

/// Panel switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    /// Cycles the difficulty selection (S1).
    Cycle,
    /// Commits the current selection (S2).
    Commit,
    /// The reaction-task push button.
    Reaction,
}

/// Debounced panel-switch input.
pub trait Switches {
    /// Current settled state of `switch` (true = pressed).
    fn is_pressed(&mut self, switch: Switch) -> bool;

    /// Wait for the next debounced press of any switch and return which.
    async fn next_press(&mut self) -> Switch;
}
