//! Actions and their outcomes.
//!
//! An `Action` is what a combatant wants to do. It is immutable once
//! built; the resolver turns it into an `ActionResult` describing what
//! actually happened. Failed actions are ordinary results with
//! `success == false`, never errors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::ids::CharacterId;
use crate::roster::{SkillId, StatusKind};

/// What kind of action is being taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Skill,
    Item,
    Pass,
}

/// One combatant's chosen action.
///
/// ## Example
///
/// ```
/// use chakra_clash::core::{Action, ActionKind, CharacterId};
/// use chakra_clash::roster::SkillId;
///
/// let strike = Action::attack(CharacterId::new(1), CharacterId::new(4));
/// assert_eq!(strike.kind, ActionKind::Attack);
///
/// let cast = Action::skill(CharacterId::new(1), SkillId::new(2), None);
/// assert_eq!(cast.skill, Some(SkillId::new(2)));
/// assert!(cast.target.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub actor: CharacterId,
    pub kind: ActionKind,
    pub target: Option<CharacterId>,
    pub skill: Option<SkillId>,
}

impl Action {
    /// Basic attack on `target`.
    #[must_use]
    pub fn attack(actor: CharacterId, target: CharacterId) -> Self {
        Self {
            actor,
            kind: ActionKind::Attack,
            target: Some(target),
            skill: None,
        }
    }

    /// Cast `skill`. Area and self skills need no target.
    #[must_use]
    pub fn skill(actor: CharacterId, skill: SkillId, target: Option<CharacterId>) -> Self {
        Self {
            actor,
            kind: ActionKind::Skill,
            target,
            skill: Some(skill),
        }
    }

    #[must_use]
    pub fn item(actor: CharacterId) -> Self {
        Self {
            actor,
            kind: ActionKind::Item,
            target: None,
            skill: None,
        }
    }

    #[must_use]
    pub fn pass(actor: CharacterId) -> Self {
        Self {
            actor,
            kind: ActionKind::Pass,
            target: None,
            skill: None,
        }
    }
}

/// Why an action did nothing.
///
/// The `Display` text is the message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionFailure {
    #[error("the acting character cannot act")]
    ActorUnavailable,

    #[error("no valid target")]
    NoValidTarget,

    #[error("no skill specified")]
    NoSkillSpecified,

    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("{name} is on cooldown for {remaining} more round(s)")]
    SkillOnCooldown { name: String, remaining: u32 },

    #[error("not enough chakra: {needed} needed, {available} available")]
    InsufficientChakra { needed: i32, available: i32 },

    #[error("items are not implemented")]
    NotImplemented,
}

/// A status change caused by an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusChange {
    Applied { target: CharacterId, kind: StatusKind },
    /// Blocked by immunity.
    Resisted { target: CharacterId, kind: StatusKind },
    Removed { target: CharacterId, kind: StatusKind },
}

/// Everything that happened while one action resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: Action,
    pub success: bool,
    pub failure: Option<ActionFailure>,
    pub messages: Vec<String>,
    /// Hp actually lost per target, in resolution order.
    pub damage: SmallVec<[(CharacterId, i32); 4]>,
    /// Hp actually gained per target, in resolution order.
    pub healing: SmallVec<[(CharacterId, i32); 4]>,
    pub chakra_spent: i32,
    pub status_changes: Vec<StatusChange>,
    /// Characters that dropped to 0 hp during this action.
    pub defeated: SmallVec<[CharacterId; 2]>,
}

impl ActionResult {
    /// Start a successful, empty result.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            action,
            success: true,
            failure: None,
            messages: Vec::new(),
            damage: SmallVec::new(),
            healing: SmallVec::new(),
            chakra_spent: 0,
            status_changes: Vec::new(),
            defeated: SmallVec::new(),
        }
    }

    /// Build an unsuccessful result carrying `failure`.
    #[must_use]
    pub fn failed(action: Action, failure: ActionFailure) -> Self {
        let mut result = Self::new(action);
        result.messages.push(failure.to_string());
        result.success = false;
        result.failure = Some(failure);
        result
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    pub fn record_damage(&mut self, target: CharacterId, amount: i32) {
        self.damage.push((target, amount));
    }

    pub fn record_healing(&mut self, target: CharacterId, amount: i32) {
        self.healing.push((target, amount));
    }

    pub fn record_defeat(&mut self, target: CharacterId) {
        if !self.defeated.contains(&target) {
            self.defeated.push(target);
        }
    }

    #[must_use]
    pub fn total_damage(&self) -> i32 {
        self.damage.iter().map(|(_, amount)| amount).sum()
    }

    #[must_use]
    pub fn total_healing(&self) -> i32 {
        self.healing.iter().map(|(_, amount)| amount).sum()
    }

    /// Damage dealt to one character.
    #[must_use]
    pub fn damage_to(&self, target: CharacterId) -> i32 {
        self.damage
            .iter()
            .filter(|(id, _)| *id == target)
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// A compact history entry kept after the result is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Round the action was taken in.
    pub round: u32,

    /// Position within the whole battle, starting at 0.
    pub sequence: u32,

    pub action: Action,

    pub success: bool,
}

impl ActionRecord {
    #[must_use]
    pub fn new(round: u32, sequence: u32, action: Action, success: bool) -> Self {
        Self {
            round,
            sequence,
            action,
            success,
        }
    }
}
