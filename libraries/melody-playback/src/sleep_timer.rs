//! Sleep timer
//!
//! A one-shot deadline that pauses playback and then clears itself. Arming
//! hands out a fresh [`TimerToken`]; only the most recently issued token can
//! fire, so re-arming cancels the earlier deadline instead of stacking.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one arming of the sleep timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Raw token value
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArmedTimer {
    minutes: u32,
    token: TimerToken,
}

/// Sleep timer state owned by the playback controller
#[derive(Debug, Clone, Default)]
pub struct SleepTimer {
    armed: Option<ArmedTimer>,
    issued: u64,
}

impl SleepTimer {
    /// Create a disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `minutes`, replacing any armed deadline
    pub fn arm(&mut self, minutes: u32) -> TimerToken {
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.armed = Some(ArmedTimer { minutes, token });
        token
    }

    /// Disarm, returning the token that can no longer fire
    pub fn disarm(&mut self) -> Option<TimerToken> {
        self.armed.take().map(|armed| armed.token)
    }

    /// Consume an expiry; true only for the currently armed token
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some(armed) if armed.token == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    /// Minutes the timer was armed with
    pub fn minutes(&self) -> Option<u32> {
        self.armed.map(|armed| armed.minutes)
    }

    /// Token of the armed deadline
    pub fn token(&self) -> Option<TimerToken> {
        self.armed.map(|armed| armed.token)
    }

    /// Whether a deadline is pending
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

/// Delay between arming and expiry
pub fn delay_for(minutes: u32) -> Duration {
    Duration::from_secs(u64::from(minutes) * 60)
}
