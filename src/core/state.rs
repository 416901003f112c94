//! Battle state.
//!
//! `BattleState` is the single source of truth for a battle:
//! - both teams and every character in them
//! - the round counter and phase
//! - this round's turn order and cursor
//! - the final result once decided
//! - a compact action history
//!
//! The orchestrator owns it; observers only ever see `&BattleState`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::ids::{CharacterId, Side};
use crate::error::BattleError;
use crate::roster::{Character, Team};

/// Where the battle is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    NotStarted,
    RoundInProgress,
    /// Waiting for the player to choose an action for this character.
    AwaitingAction(CharacterId),
    Ended,
}

/// How a battle finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Winner(Side),
    /// Both teams fell at once, or the round limit ran out.
    Draw,
}

impl std::fmt::Display for BattleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleResult::Winner(side) => write!(f, "{} wins", side),
            BattleResult::Draw => write!(f, "draw"),
        }
    }
}

/// Complete battle state.
#[derive(Clone, Debug, Serialize)]
pub struct BattleState {
    /// Current round, 0 before the first round starts.
    pub round: u32,

    pub phase: BattlePhase,

    teams: [Team; 2],

    /// Living actors for this round, fastest first.
    pub turn_order: Vec<CharacterId>,

    /// Index of the current actor in `turn_order`.
    pub cursor: usize,

    pub result: Option<BattleResult>,

    /// Every resolved action, oldest first.
    pub history: Vector<ActionRecord>,
}

impl BattleState {
    /// Create the state for a new battle.
    ///
    /// Both teams need at least one member and every character id must
    /// be unique across the two teams.
    pub fn new(team_a: Team, team_b: Team) -> Result<Self, BattleError> {
        let teams = [team_a, team_b];

        for side in Side::ALL {
            if teams[side.index()].is_empty() {
                return Err(BattleError::EmptyTeam(side));
            }
        }

        let mut seen = Vec::new();
        for character in teams.iter().flat_map(|team| team.members()) {
            if seen.contains(&character.id) {
                return Err(BattleError::DuplicateCharacter(character.id));
            }
            seen.push(character.id);
        }

        Ok(Self {
            round: 0,
            phase: BattlePhase::NotStarted,
            teams,
            turn_order: Vec::new(),
            cursor: 0,
            result: None,
            history: Vector::new(),
        })
    }

    // === Teams and characters ===

    #[must_use]
    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side.index()]
    }

    /// Every character, team A first.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.teams.iter().flat_map(|team| team.members())
    }

    pub fn characters_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.teams.iter_mut().flat_map(|team| team.members_mut())
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.teams.iter().find_map(|team| team.member(id))
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.teams.iter_mut().find_map(|team| team.member_mut(id))
    }

    /// Which side a character fights on.
    #[must_use]
    pub fn side_of(&self, id: CharacterId) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| self.team(*side).contains(id))
    }

    /// Whether a character exists and has hp left.
    #[must_use]
    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.character(id).is_some_and(Character::is_alive)
    }

    /// Ids of the living members of one side, in team order.
    #[must_use]
    pub fn alive_ids(&self, side: Side) -> Vec<CharacterId> {
        self.team(side).alive().map(|c| c.id).collect()
    }

    #[must_use]
    pub fn any_alive(&self, side: Side) -> bool {
        self.team(side).any_alive()
    }

    // === Turn order ===

    /// The character whose turn it is, if any remain this round.
    #[must_use]
    pub fn current_actor(&self) -> Option<CharacterId> {
        self.turn_order.get(self.cursor).copied()
    }

    /// Move the cursor to the next actor.
    pub fn advance(&mut self) {
        if self.cursor < self.turn_order.len() {
            self.cursor += 1;
        }
    }

    // === Outcome ===

    /// True unless both sides still have a living member.
    #[must_use]
    pub fn is_battle_over(&self) -> bool {
        !(self.any_alive(Side::A) && self.any_alive(Side::B))
    }

    /// The outcome decided by the teams' hp alone.
    #[must_use]
    pub fn evaluate_result(&self) -> Option<BattleResult> {
        match (self.any_alive(Side::A), self.any_alive(Side::B)) {
            (true, true) => None,
            (true, false) => Some(BattleResult::Winner(Side::A)),
            (false, true) => Some(BattleResult::Winner(Side::B)),
            (false, false) => Some(BattleResult::Draw),
        }
    }

    /// The winning side once the battle is decided. `None` for a draw
    /// or a battle still in progress.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.result.or_else(|| self.evaluate_result()) {
            Some(BattleResult::Winner(side)) => Some(side),
            _ => None,
        }
    }

    // === History ===

    /// Append an action to the history.
    pub fn record(&mut self, round: u32, action: Action, success: bool) {
        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.history
            .push_back(ActionRecord::new(round, sequence, action, success));
    }
}
