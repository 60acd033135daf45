//! Authoritative board snapshots.
//!
//! Each action response carries a complete snapshot that replaces the
//! previous one. The choreography engine reads it for two things: the live
//! creature lists to reconcile against, and "which side is this id on" when
//! an attack names the enemy hero by alias.

use serde::{Deserialize, Serialize};

use super::creature::BoardCreature;
use crate::core::EntityId;

/// One side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The local player.
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// One player's public state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideState {
    /// Hero id; the rules engine uses the player's user id.
    #[serde(alias = "userId")]
    pub hero_id: EntityId,

    #[serde(default)]
    pub hero_health: i64,

    #[serde(default)]
    pub battlefield: Vec<BoardCreature>,
}

impl SideState {
    #[must_use]
    pub fn new(hero_id: impl Into<EntityId>) -> Self {
        Self {
            hero_id: hero_id.into(),
            hero_health: 0,
            battlefield: Vec::new(),
        }
    }

    /// Add a creature (builder pattern).
    #[must_use]
    pub fn with_creature(mut self, creature: BoardCreature) -> Self {
        self.battlefield.push(creature);
        self
    }

    #[must_use]
    pub fn creature(&self, id: &EntityId) -> Option<&BoardCreature> {
        self.battlefield.iter().find(|c| &c.instance_id == id)
    }
}

/// Complete board state from the rules engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    #[serde(alias = "player1State")]
    pub player: SideState,

    #[serde(alias = "player2State")]
    pub opponent: SideState,
}

impl BoardSnapshot {
    #[must_use]
    pub fn new(player: SideState, opponent: SideState) -> Self {
        Self { player, opponent }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Find a creature on either side.
    #[must_use]
    pub fn find_creature(&self, id: &EntityId) -> Option<(Side, &BoardCreature)> {
        Side::BOTH
            .iter()
            .find_map(|&side| self.side(side).creature(id).map(|c| (side, c)))
    }
}

/// What the planner needs to know about the board.
pub trait BoardView {
    /// Side an id belongs to (creature or hero).
    fn side_of(&self, id: &EntityId) -> Option<Side>;

    /// Hero id of a side.
    fn hero_id(&self, side: Side) -> Option<&EntityId>;
}

impl BoardView for BoardSnapshot {
    fn side_of(&self, id: &EntityId) -> Option<Side> {
        Side::BOTH.iter().copied().find(|&side| {
            let state = self.side(side);
            &state.hero_id == id || state.creature(id).is_some()
        })
    }

    fn hero_id(&self, side: Side) -> Option<&EntityId> {
        Some(&self.side(side).hero_id)
    }
}

/// The incoming snapshot backed by the one it replaces.
///
/// A creature that died in this response is gone from `current` but still
/// in `previous`.
#[derive(Clone, Copy, Debug)]
pub struct BoardHistory<'a> {
    pub current: &'a BoardSnapshot,
    pub previous: Option<&'a BoardSnapshot>,
}

impl<'a> BoardHistory<'a> {
    #[must_use]
    pub fn new(current: &'a BoardSnapshot, previous: Option<&'a BoardSnapshot>) -> Self {
        Self { current, previous }
    }
}

impl BoardView for BoardHistory<'_> {
    fn side_of(&self, id: &EntityId) -> Option<Side> {
        self.current
            .side_of(id)
            .or_else(|| self.previous.and_then(|prev| prev.side_of(id)))
    }

    fn hero_id(&self, side: Side) -> Option<&EntityId> {
        self.current.hero_id(side)
    }
}

/// No board knowledge at all.
impl BoardView for () {
    fn side_of(&self, _id: &EntityId) -> Option<Side> {
        None
    }

    fn hero_id(&self, _side: Side) -> Option<&EntityId> {
        None
    }
}
