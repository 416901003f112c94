//! Battle events.
//!
//! The orchestrator emits one `BattleEvent` for every observable step of
//! a battle. Rendering and logging are built entirely on top of them.

use serde::{Deserialize, Serialize};

use crate::core::{ActionResult, BattleResult, CharacterId};
use crate::roster::StatusKind;

/// Something that happened during a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStart,

    BattleEnd { result: BattleResult, rounds: u32 },

    /// A new round began; `order` is who acts, fastest first.
    RoundStart { round: u32, order: Vec<CharacterId> },

    TurnStart { actor: CharacterId },

    TurnEnd { actor: CharacterId },

    /// The actor could not act because of a disabling status.
    TurnSkipped { actor: CharacterId, cause: StatusKind },

    ActionExecuted(ActionResult),

    /// A periodic status fired. `amount` is the hp actually changed.
    EffectTriggered {
        target: CharacterId,
        kind: StatusKind,
        amount: i32,
    },

    /// A status ran out and was detached.
    StatusRemoved {
        target: CharacterId,
        kind: StatusKind,
        name: String,
    },
}

impl BattleEvent {
    /// Short event name, used as a structured log field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            BattleEvent::BattleStart => "battle_start",
            BattleEvent::BattleEnd { .. } => "battle_end",
            BattleEvent::RoundStart { .. } => "round_start",
            BattleEvent::TurnStart { .. } => "turn_start",
            BattleEvent::TurnEnd { .. } => "turn_end",
            BattleEvent::TurnSkipped { .. } => "turn_skipped",
            BattleEvent::ActionExecuted(_) => "action_executed",
            BattleEvent::EffectTriggered { .. } => "effect_triggered",
            BattleEvent::StatusRemoved { .. } => "status_removed",
        }
    }
}
