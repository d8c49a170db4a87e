//! Debounced edge detection for the user buttons.
//!
//! The two buttons are active-low momentary switches polled from the
//! control loop.  A qualifying trigger is a rising activity edge (line
//! newly active) at least the debounce window after the previous trigger;
//! edges closer together than the window collapse into one trigger, and
//! holding the button does not retrigger.

/// Edge detector with a retrigger window.
#[derive(Debug)]
pub struct DebouncedInput {
    debounce_ms: u32,
    prev_active: bool,
    last_trigger_ms: Option<u64>,
}

impl DebouncedInput {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            prev_active: false,
            last_trigger_ms: None,
        }
    }

    /// Feed the current line level; returns `true` on a qualifying edge.
    ///
    /// `now_ms` is monotonic milliseconds. Edges separated by at least
    /// the debounce window trigger independently; anything closer is
    /// treated as contact bounce.
    pub fn triggered(&mut self, active: bool, now_ms: u64) -> bool {
        let edge = active && !self.prev_active;
        self.prev_active = active;
        if !edge {
            return false;
        }
        match self.last_trigger_ms {
            Some(last) if now_ms.saturating_sub(last) < u64::from(self.debounce_ms) => false,
            _ => {
                self.last_trigger_ms = Some(now_ms);
                true
            }
        }
    }
}
