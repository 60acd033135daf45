//! Client-side mirror of the rules engine's state.

use serde::{Deserialize, Serialize};

use crate::board::BoardSnapshot;
use crate::events::GameEvent;

/// What the rules engine returns for every action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub game: BoardSnapshot,
    /// Events produced by this action, in order.
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

/// Accumulated event log plus the latest snapshot.
#[derive(Clone, Debug, Default)]
pub struct GameMirror {
    events: Vec<GameEvent>,
    game: BoardSnapshot,
}

impl GameMirror {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the response's events and replace the snapshot.
    pub fn apply_response(&mut self, response: ActionResponse) {
        self.events.extend(response.events);
        self.game = response.game;
    }

    /// Start a new match. The next ingest sees a shorter log.
    pub fn reset(&mut self) {
        self.events.clear();
        self.game = BoardSnapshot::default();
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn game(&self) -> &BoardSnapshot {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SideState;

    #[test]
    fn test_apply_appends_and_replaces() {
        let mut mirror = GameMirror::new();
        mirror.apply_response(ActionResponse {
            game: BoardSnapshot::new(SideState::new("a"), SideState::new("b")),
            events: vec![GameEvent::damage("x", 1)],
        });
        mirror.apply_response(ActionResponse {
            game: BoardSnapshot::new(SideState::new("a"), SideState::new("c")),
            events: vec![GameEvent::heal("x", 1), GameEvent::death("x")],
        });

        assert_eq!(mirror.events().len(), 3);
        assert_eq!(mirror.game().opponent.hero_id.as_str(), "c");

        mirror.reset();
        assert!(mirror.events().is_empty());
    }

    #[test]
    fn test_response_wire_format() {
        let json = r#"{
            "game": {
                "player1State": { "userId": "u1", "battlefield": [] },
                "player2State": { "userId": "u2", "battlefield": [] }
            },
            "events": [ { "type": "DAMAGE", "targetId": "u2", "value": 2 } ]
        }"#;
        let response: ActionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.events.len(), 1);
        assert_eq!(response.events[0].value, 2);
    }
}
