//! Interaction gate for user actions.
//!
//! A user action goes out only if all of these hold:
//!
//! - no earlier action is still waiting for its response
//! - no death sequence is running
//! - the session has not been torn down
//!
//! A rejected action is dropped. Nothing is sent and no state changes.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, EntityId};

/// A user action bound for the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    Attack { attacker: EntityId, target: EntityId },
    PlayCard { card_id: CardId, target: Option<EntityId> },
    EndTurn,
    Surrender,
}

/// The network side of user actions.
pub trait ActionTransport {
    /// Send an action. Its response comes back through
    /// `ChoreoSession::receive`.
    fn send(&mut self, action: &PlayerAction);
}

/// Collects actions instead of sending them.
impl ActionTransport for Vec<PlayerAction> {
    fn send(&mut self, action: &PlayerAction) {
        self.push(action.clone());
    }
}

/// Why an action was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    RoundTripPending,
    DeathSequenceActive,
    SessionClosed,
}

/// Result of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Dispatched,
    Rejected(RejectReason),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_dispatched(self) -> bool {
        self == SubmitOutcome::Dispatched
    }
}

/// Round-trip and lifetime flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionGate {
    in_flight: bool,
    closed: bool,
}

impl InteractionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reason to reject an action right now, if any.
    #[must_use]
    pub fn check(&self, active_deaths: usize) -> Option<RejectReason> {
        if self.closed {
            Some(RejectReason::SessionClosed)
        } else if self.in_flight {
            Some(RejectReason::RoundTripPending)
        } else if active_deaths > 0 {
            Some(RejectReason::DeathSequenceActive)
        } else {
            None
        }
    }

    pub fn begin_round_trip(&mut self) {
        self.in_flight = true;
    }

    pub fn end_round_trip(&mut self) {
        self.in_flight = false;
    }

    #[must_use]
    pub fn round_trip_pending(&self) -> bool {
        self.in_flight
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.in_flight = false;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gate() {
        let gate = InteractionGate::new();
        assert_eq!(gate.check(0), None);
    }

    #[test]
    fn test_reject_reasons() {
        let mut gate = InteractionGate::new();
        assert_eq!(gate.check(2), Some(RejectReason::DeathSequenceActive));

        gate.begin_round_trip();
        assert_eq!(gate.check(0), Some(RejectReason::RoundTripPending));
        gate.end_round_trip();
        assert_eq!(gate.check(0), None);

        gate.close();
        assert_eq!(gate.check(0), Some(RejectReason::SessionClosed));
    }

    #[test]
    fn test_vec_transport_records() {
        let mut sent: Vec<PlayerAction> = Vec::new();
        sent.send(&PlayerAction::EndTurn);
        assert_eq!(sent, vec![PlayerAction::EndTurn]);
    }

    #[test]
    fn test_action_serialization() {
        let action = PlayerAction::Attack {
            attacker: EntityId::new("c-1"),
            target: EntityId::new("ENEMY_HERO"),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"ATTACK\""));
        let back: PlayerAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
