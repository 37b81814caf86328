//! # Relay Register (RELAIS)
//!
//! Eight relay states packed in one byte. The byte is printed as eight binary
//! digits, most significant first, and printed position `n` gives relay
//! `n + 1`. A `0` digit is an open relay, anything else a closed one.

use crate::constants::TIC_RELAY_BIT_COUNT;
use serde::Serialize;

/// Decoded relay states; `true` is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelayRegister {
    pub relay1: bool,
    pub relay2: bool,
    pub relay3: bool,
    pub relay4: bool,
    pub relay5: bool,
    pub relay6: bool,
    pub relay7: bool,
    pub relay8: bool,
}

impl RelayRegister {
    pub fn from_raw(value: u8) -> Self {
        let digits = format!("{value:0width$b}", width = TIC_RELAY_BIT_COUNT);
        let mut states = [false; TIC_RELAY_BIT_COUNT];
        for (state, digit) in states.iter_mut().zip(digits.chars()) {
            *state = digit != '0';
        }
        Self::from_states(states)
    }

    pub fn from_states(states: [bool; TIC_RELAY_BIT_COUNT]) -> Self {
        let [relay1, relay2, relay3, relay4, relay5, relay6, relay7, relay8] = states;
        RelayRegister {
            relay1,
            relay2,
            relay3,
            relay4,
            relay5,
            relay6,
            relay7,
            relay8,
        }
    }

    /// Relay states, relay 1 first.
    pub fn states(&self) -> [bool; TIC_RELAY_BIT_COUNT] {
        [
            self.relay1,
            self.relay2,
            self.relay3,
            self.relay4,
            self.relay5,
            self.relay6,
            self.relay7,
            self.relay8,
        ]
    }

    /// State of relay `number` (1-based) as 0 (open) or 1 (closed).
    pub fn state(&self, number: usize) -> Option<u8> {
        number
            .checked_sub(1)
            .and_then(|i| self.states().get(i).copied())
            .map(u8::from)
    }

    pub fn to_raw(&self) -> u8 {
        self.states()
            .iter()
            .fold(0u8, |acc, closed| (acc << 1) | u8::from(*closed))
    }
}
