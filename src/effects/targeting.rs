//! Skill targeting.
//!
//! - `TargetCategory`: which characters a skill may affect
//! - `TargetSelector`: turns a category plus an optional chosen target
//!   into the concrete list of characters an action hits

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleRng, BattleState, CharacterId};

/// Resolved targets. Teams are small, so this rarely spills to the heap.
pub type Targets = SmallVec<[CharacterId; 4]>;

/// Target-selection category of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    /// Only the caster.
    SelfOnly,
    /// One chosen living enemy.
    SingleEnemy,
    /// Every living enemy.
    AllEnemies,
    /// One chosen living ally (the caster included).
    SingleAlly,
    /// Every living ally (the caster included).
    AllAllies,
    /// One living enemy picked at random.
    RandomEnemy,
}

impl TargetCategory {
    /// Whether the skill hits a whole team.
    #[must_use]
    pub const fn is_area(self) -> bool {
        matches!(self, TargetCategory::AllEnemies | TargetCategory::AllAllies)
    }

    /// Whether the skill is aimed at the caster's own side.
    #[must_use]
    pub const fn is_friendly(self) -> bool {
        matches!(
            self,
            TargetCategory::SelfOnly | TargetCategory::SingleAlly | TargetCategory::AllAllies
        )
    }

    /// Whether the caller has to name a target.
    #[must_use]
    pub const fn needs_choice(self) -> bool {
        matches!(self, TargetCategory::SingleEnemy | TargetCategory::SingleAlly)
    }
}

/// Resolves a category into concrete targets for one actor.
#[derive(Clone, Copy, Debug)]
pub struct TargetSelector {
    category: TargetCategory,
    actor: CharacterId,
}

impl TargetSelector {
    /// Create a selector for `actor` using `category`.
    pub fn new(category: TargetCategory, actor: CharacterId) -> Self {
        Self { category, actor }
    }

    /// Every character the actor could pick for this category.
    ///
    /// For area and random categories this is the pool the skill draws
    /// from. Empty if the actor is not in the battle.
    pub fn candidates(&self, state: &BattleState) -> Targets {
        let Some(side) = state.side_of(self.actor) else {
            return Targets::new();
        };

        match self.category {
            TargetCategory::SelfOnly => {
                if state.is_alive(self.actor) {
                    Targets::from_slice(&[self.actor])
                } else {
                    Targets::new()
                }
            }
            TargetCategory::SingleAlly | TargetCategory::AllAllies => {
                state.alive_ids(side).into_iter().collect()
            }
            TargetCategory::SingleEnemy
            | TargetCategory::AllEnemies
            | TargetCategory::RandomEnemy => state.alive_ids(side.opponent()).into_iter().collect(),
        }
    }

    /// Resolve the targets an action actually hits.
    ///
    /// Single-target categories keep `chosen` only if it is a living
    /// member of the right side. An empty result means there is no
    /// valid target.
    pub fn resolve(
        &self,
        state: &BattleState,
        chosen: Option<CharacterId>,
        rng: &mut BattleRng,
    ) -> Targets {
        let candidates = self.candidates(state);

        match self.category {
            TargetCategory::SelfOnly
            | TargetCategory::AllEnemies
            | TargetCategory::AllAllies => candidates,
            TargetCategory::SingleEnemy | TargetCategory::SingleAlly => match chosen {
                Some(target) if candidates.contains(&target) => Targets::from_slice(&[target]),
                _ => Targets::new(),
            },
            TargetCategory::RandomEnemy => rng
                .choose(&candidates)
                .map(|target| Targets::from_slice(&[*target]))
                .unwrap_or_default(),
        }
    }
}
