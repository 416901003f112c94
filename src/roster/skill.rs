//! Skill definitions.
//!
//! A `Skill` is mostly static data: a cost, a target category and an
//! ordered list of [`SkillEffect`]s. The only state that changes during
//! a battle is `current_cooldown`, which lives on the character's own
//! copy of the skill.

use serde::{Deserialize, Serialize};

use crate::effects::{SkillEffect, TargetCategory};

/// Unique identifier for a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl SkillId {
    /// Create a new skill ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skill({})", self.0)
    }
}

/// Broad purpose of a skill. The AI picks skills by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Damage,
    Healing,
    Buff,
    Debuff,
    Utility,
}

/// A skill as owned by a character.
///
/// ## Example
///
/// ```
/// use chakra_clash::effects::{SkillEffect, TargetCategory};
/// use chakra_clash::roster::{Skill, SkillId, SkillKind};
///
/// let rasengan = Skill::new(SkillId::new(1), "Rasengan", SkillKind::Damage, TargetCategory::SingleEnemy)
///     .with_cost(30)
///     .with_cooldown(2)
///     .with_effect(SkillEffect::damage(100, 50));
///
/// assert_eq!(rasengan.power_rating(), 150);
/// assert!(rasengan.is_ready());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub kind: SkillKind,

    pub target: TargetCategory,

    /// Chakra deducted from the caster.
    #[serde(default)]
    pub cost: i32,

    /// Round starts that must pass before the skill is usable again.
    #[serde(default)]
    pub cooldown: u32,

    /// Round starts left before the skill is usable again.
    #[serde(skip)]
    pub current_cooldown: u32,

    /// Applied in order to every target. Caster chakra changes apply once.
    #[serde(default)]
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    /// Create a free skill with no effects.
    #[must_use]
    pub fn new(id: SkillId, name: impl Into<String>, kind: SkillKind, target: TargetCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind,
            target,
            cost: 0,
            cooldown: 0,
            current_cooldown: 0,
            effects: Vec::new(),
        }
    }

    /// Set the chakra cost (builder pattern). Negative costs become 0.
    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost.max(0);
        self
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Off cooldown.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Off cooldown and payable with `chakra`.
    #[must_use]
    pub fn is_affordable(&self, chakra: i32) -> bool {
        self.is_ready() && self.cost <= chakra
    }

    /// Rough strength: the sum of `base + scaling` over damage and heal effects.
    #[must_use]
    pub fn power_rating(&self) -> i32 {
        self.effects
            .iter()
            .map(|effect| match *effect {
                SkillEffect::Damage { base, scaling } | SkillEffect::Heal { base, scaling } => {
                    base.saturating_add(scaling)
                }
                _ => 0,
            })
            .fold(0, i32::saturating_add)
    }

    #[must_use]
    pub fn is_area(&self) -> bool {
        self.target.is_area()
    }

    #[must_use]
    pub fn has_damage(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, SkillEffect::Damage { .. }))
    }

    #[must_use]
    pub fn has_debuff(&self) -> bool {
        self.effects.iter().any(SkillEffect::is_debuff)
    }

    /// Put the skill on cooldown after a successful use.
    pub fn start_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// Count the cooldown down by one round.
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}
