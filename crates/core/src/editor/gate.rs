//! Confirmation gates.
//!
//! A gate holds a target between the moment a destructive action is
//! requested and the moment the user confirms it. The delete flow and the
//! discard-changes flow both use one.

/// Where a gate is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState<T> {
    /// Nothing requested.
    Closed,
    /// Waiting for confirm or cancel.
    Armed(T),
    /// Confirmed; the action is running.
    InFlight(T),
}

/// Armed / in-flight / closed state around one target.
#[derive(Debug, Clone)]
pub struct ConfirmGate<T> {
    state: GateState<T>,
}

impl<T: Clone> Default for ConfirmGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ConfirmGate<T> {
    /// Create a closed gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GateState::Closed,
        }
    }

    /// Arm the gate for `target`, replacing any armed target.
    ///
    /// Refused while an action is in flight.
    pub fn arm(&mut self, target: T) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.state = GateState::Armed(target);
        true
    }

    /// Confirm: move an armed gate in flight and hand out its target.
    pub fn begin(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, GateState::Closed) {
            GateState::Armed(target) => {
                self.state = GateState::InFlight(target.clone());
                Some(target)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// The in-flight action ended, successfully or not.
    pub fn finish(&mut self) {
        if self.is_in_flight() {
            self.state = GateState::Closed;
        }
    }

    /// Disarm without acting. Refused while in flight.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            GateState::Armed(_) => {
                self.state = GateState::Closed;
                true
            }
            GateState::Closed | GateState::InFlight(_) => false,
        }
    }

    /// Current target, armed or in flight.
    #[must_use]
    pub const fn target(&self) -> Option<&T> {
        match &self.state {
            GateState::Armed(target) | GateState::InFlight(target) => Some(target),
            GateState::Closed => None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &GateState<T> {
        &self.state
    }

    /// Whether a target awaits confirmation.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, GateState::Armed(_))
    }

    /// Whether the confirmed action is running.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self.state, GateState::InFlight(_))
    }
}
