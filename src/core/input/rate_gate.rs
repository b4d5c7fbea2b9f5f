//=========================================================================
// Rate Gate
//=========================================================================
//
// Minimum-interval filter for one category of input events.
//
// Events arriving sooner than `interval` after the last accepted one are
// dropped, never queued. The first event is always accepted.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::Millis;

//=== RateGate ============================================================

/// Stateful gate accepting at most one event per `interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateGate {
    interval: Millis,
    last_accepted: Option<Millis>,
}

impl RateGate {
    /// Creates an open gate with the given minimum interval.
    pub fn new(interval: Millis) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Returns `true` and records `now` if the event may pass.
    ///
    /// A timestamp earlier than the last accepted one (clock going
    /// backwards) is treated as too soon.
    pub fn try_accept(&mut self, now: Millis) -> bool {
        match self.last_accepted {
            Some(last) if now - last < self.interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn last_accepted(&self) -> Option<Millis> {
        self.last_accepted
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
