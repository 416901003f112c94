//! Skill effect definitions.
//!
//! Effects are the atomic building blocks of skills. A skill carries an
//! ordered list of them and the resolver applies each one, in order, to
//! every target the skill selected. Chakra changes on the caster land once
//! per cast.

use serde::{Deserialize, Serialize};

use crate::roster::character::saturate;
use crate::roster::{StatusFilter, StatusTemplate};

/// Who receives a chakra change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChakraRecipient {
    /// The skill's target.
    Target,
    /// The character casting the skill.
    Caster,
}

/// An atomic skill effect.
///
/// ## Scaling
///
/// `Damage` and `Heal` amounts are `base + caster_attack * scaling / 100`,
/// in integer arithmetic.
///
/// ## Status Effects
///
/// - `ApplyStatus`: attach a status to the target, subject to `chance`
/// - `RemoveStatus`: strip every status matching the filter
///
/// ## Resources
///
/// - `ModifyChakra`: add (or with a negative amount, drain) chakra
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEffect {
    /// Deal damage to the target.
    Damage { base: i32, scaling: i32 },

    /// Restore hp to the target.
    Heal { base: i32, scaling: i32 },

    /// Attach a status to the target.
    ApplyStatus {
        status: StatusTemplate,
        /// Probability in `0.0..=1.0`.
        #[serde(default = "certain")]
        chance: f64,
    },

    /// Remove matching statuses from the target.
    RemoveStatus { filter: StatusFilter },

    /// Change chakra on the target or the caster.
    ModifyChakra {
        amount: i32,
        #[serde(default = "target_recipient")]
        recipient: ChakraRecipient,
    },
}

fn certain() -> f64 {
    1.0
}

fn target_recipient() -> ChakraRecipient {
    ChakraRecipient::Target
}

impl SkillEffect {
    /// Create a scaled damage effect.
    pub fn damage(base: i32, scaling: i32) -> Self {
        Self::Damage { base, scaling }
    }

    /// Create a scaled heal effect.
    pub fn heal(base: i32, scaling: i32) -> Self {
        Self::Heal { base, scaling }
    }

    /// Create a status effect that always applies.
    pub fn apply(status: StatusTemplate) -> Self {
        Self::ApplyStatus {
            status,
            chance: 1.0,
        }
    }

    /// Create a status effect that applies with the given chance.
    pub fn apply_with_chance(status: StatusTemplate, chance: f64) -> Self {
        Self::ApplyStatus { status, chance }
    }

    /// Create a dispel effect.
    pub fn remove(filter: StatusFilter) -> Self {
        Self::RemoveStatus { filter }
    }

    /// Create a chakra change on the target.
    pub fn chakra(amount: i32) -> Self {
        Self::ModifyChakra {
            amount,
            recipient: ChakraRecipient::Target,
        }
    }

    /// Create a chakra change on the caster.
    pub fn caster_chakra(amount: i32) -> Self {
        Self::ModifyChakra {
            amount,
            recipient: ChakraRecipient::Caster,
        }
    }

    /// Scaled amount for damage and heal effects, 0 for everything else.
    #[must_use]
    pub fn scaled_amount(&self, caster_attack: i32) -> i32 {
        match *self {
            SkillEffect::Damage { base, scaling } | SkillEffect::Heal { base, scaling } => {
                let bonus = i64::from(caster_attack) * i64::from(scaling) / 100;
                saturate(i64::from(base) + bonus)
            }
            _ => 0,
        }
    }

    /// Whether this lands on the caster rather than on each target.
    #[must_use]
    pub fn targets_caster(&self) -> bool {
        matches!(
            self,
            SkillEffect::ModifyChakra {
                recipient: ChakraRecipient::Caster,
                ..
            }
        )
    }

    /// Whether this applies a harmful status.
    #[must_use]
    pub fn is_debuff(&self) -> bool {
        matches!(self, SkillEffect::ApplyStatus { status, .. } if status.kind.is_harmful())
    }
}
