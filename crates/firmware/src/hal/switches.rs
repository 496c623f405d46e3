//! Panel switches: two menu switches and the reaction button
//!
//! All three are active-low with internal pull-ups; debouncing lives here
//! so the game core only sees settled presses.

use embassy_stm32::gpio::{AnyPin, Input};
use embassy_time::Timer;
use platform::{Switch, Switches};

const POLL_PERIOD_MS: u64 = 10;
const DEBOUNCE_MS: u64 = 20;

/// The three panel switches.
pub struct PanelSwitches {
    cycle: Input<'static, AnyPin>,
    commit: Input<'static, AnyPin>,
    reaction: Input<'static, AnyPin>,
}

impl PanelSwitches {
    /// Wrap the three switch inputs.
    pub fn new(
        cycle: Input<'static, AnyPin>,
        commit: Input<'static, AnyPin>,
        reaction: Input<'static, AnyPin>,
    ) -> Self {
        Self {
            cycle,
            commit,
            reaction,
        }
    }

    fn pin(&self, switch: Switch) -> &Input<'static, AnyPin> {
        match switch {
            Switch::Cycle => &self.cycle,
            Switch::Commit => &self.commit,
            Switch::Reaction => &self.reaction,
        }
    }
}

impl Switches for PanelSwitches {
    fn is_pressed(&mut self, switch: Switch) -> bool {
        self.pin(switch).is_low()
    }

    async fn next_press(&mut self) -> Switch {
        const ALL: [Switch; 3] = [Switch::Cycle, Switch::Commit, Switch::Reaction];
        loop {
            for switch in ALL {
                if !self.pin(switch).is_low() {
                    continue;
                }
                Timer::after_millis(DEBOUNCE_MS).await;
                if !self.pin(switch).is_low() {
                    continue;
                }
                // Full press-and-release cycle per reported press.
                while self.pin(switch).is_low() {
                    Timer::after_millis(POLL_PERIOD_MS).await;
                }
                return switch;
            }
            Timer::after_millis(POLL_PERIOD_MS).await;
        }
    }
}
