//! 4×4 matrix keypad scanner with debouncing
//!
//! Rows are strobed low one at a time; a low column identifies the key.
//! [`read_key`](platform::Keypad::read_key) settles the press (debounce)
//! and waits for release, so callers see exactly one character per
//! keystroke.

use embassy_stm32::gpio::{AnyPin, Input, Output};
use embassy_time::Timer;
use platform::{Keypad, KEYPAD_GRID};

const SCAN_PERIOD_MS: u64 = 10;
const DEBOUNCE_MS: u64 = 20;

/// Matrix keypad: four strobed row outputs, four pulled-up column inputs.
pub struct MatrixKeypad {
    rows: [Output<'static, AnyPin>; 4],
    cols: [Input<'static, AnyPin>; 4],
}

impl MatrixKeypad {
    /// Wrap the row/column pins. Rows must idle high.
    pub fn new(
        mut rows: [Output<'static, AnyPin>; 4],
        cols: [Input<'static, AnyPin>; 4],
    ) -> Self {
        for row in &mut rows {
            row.set_high();
        }
        Self { rows, cols }
    }

    /// One scan pass: the (row, col) of the first pressed key, if any.
    fn scan_once(&mut self) -> Option<(usize, usize)> {
        for row in 0..4 {
            for (i, pin) in self.rows.iter_mut().enumerate() {
                if i == row {
                    pin.set_low();
                } else {
                    pin.set_high();
                }
            }
            let hit = self.cols.iter().position(|col| col.is_low());
            if let Some(col) = hit {
                for pin in &mut self.rows {
                    pin.set_high();
                }
                return Some((row, col));
            }
        }
        for pin in &mut self.rows {
            pin.set_high();
        }
        None
    }

    /// True while the key at (row, col) is still held.
    fn still_held(&mut self, row: usize, col: usize) -> bool {
        self.scan_once() == Some((row, col))
    }
}

impl Keypad for MatrixKeypad {
    async fn read_key(&mut self) -> char {
        loop {
            let Some((row, col)) = self.scan_once() else {
                Timer::after_millis(SCAN_PERIOD_MS).await;
                continue;
            };
            // Settle, confirm, then wait for release so one physical press
            // yields one character.
            Timer::after_millis(DEBOUNCE_MS).await;
            if !self.still_held(row, col) {
                continue;
            }
            while self.still_held(row, col) {
                Timer::after_millis(SCAN_PERIOD_MS).await;
            }
            let symbol = KEYPAD_GRID
                .get(row)
                .and_then(|r| r.get(col))
                .copied()
                .unwrap_or(' ');
            return symbol;
        }
    }
}
