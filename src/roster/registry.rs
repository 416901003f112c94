//! Character template repository.
//!
//! The `Roster` stores skill definitions and character templates loaded
//! from JSON. Templates are keyed by a short string ("naruto"); spawning
//! one clones it into a battle [`Character`] under a fresh id.
//!
//! Records are validated when they are registered, so the battle core
//! never sees a template that references a missing skill.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::skill::{Skill, SkillId};
use crate::core::CharacterId;
use crate::effects::SkillEffect;
use crate::error::LoadError;

/// Largest stat, cost or effect magnitude a roster file may declare.
pub const STAT_LIMIT: i32 = 1_000_000;

const BUILTIN_ROSTER: &str = include_str!("../../data/roster.json");

fn default_regen() -> i32 {
    10
}

fn default_crit_rate() -> f64 {
    0.05
}

fn default_crit_bonus() -> f64 {
    0.5
}

/// Static description of a character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    /// Lookup key, e.g. "naruto".
    pub key: String,
    pub name: String,
    /// Max hp. Characters spawn at full health.
    pub hp: i32,
    /// Max chakra. Characters spawn with a full pool.
    pub chakra: i32,
    #[serde(default = "default_regen")]
    pub chakra_regen: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(default = "default_crit_rate")]
    pub crit_rate: f64,
    #[serde(default = "default_crit_bonus")]
    pub crit_bonus: f64,
    /// Skills by id, in menu order.
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

#[derive(Deserialize)]
struct RosterFile {
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    characters: Vec<CharacterTemplate>,
}

/// Registry of skills and character templates.
///
/// ## Example
///
/// ```
/// use chakra_clash::core::CharacterId;
/// use chakra_clash::roster::Roster;
///
/// let roster = Roster::builtin().unwrap();
/// let naruto = roster.spawn("naruto", CharacterId::new(1), true).unwrap();
///
/// assert_eq!(naruto.name, "Naruto Uzumaki");
/// assert!(naruto.player_controlled);
/// assert_eq!(naruto.skills.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Roster {
    skills: FxHashMap<SkillId, Skill>,
    templates: Vec<CharacterTemplate>,
    index: FxHashMap<String, usize>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The roster shipped with the crate.
    pub fn builtin() -> Result<Self, LoadError> {
        Self::from_json_str(BUILTIN_ROSTER)
    }

    /// Parse a roster from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let file: RosterFile = serde_json::from_str(json)?;

        let mut roster = Self::new();
        for skill in file.skills {
            roster.register_skill(skill)?;
        }
        for template in file.characters {
            roster.register(template)?;
        }
        Ok(roster)
    }

    /// Load a roster from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Register a skill definition.
    ///
    /// Fails on a duplicate id, or a cost or effect magnitude outside
    /// `STAT_LIMIT`.
    pub fn register_skill(&mut self, skill: Skill) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::InvalidTemplate {
            key: skill.name.clone(),
            reason,
        };

        if self.skills.contains_key(&skill.id) {
            return Err(invalid(format!("duplicate skill id {}", skill.id.raw())));
        }
        check_range("cost", skill.cost, 0).map_err(invalid)?;
        for effect in &skill.effects {
            match effect {
                SkillEffect::Damage { base, scaling } | SkillEffect::Heal { base, scaling } => {
                    check_range("base", *base, 0).map_err(invalid)?;
                    check_range("scaling", *scaling, 0).map_err(invalid)?;
                }
                SkillEffect::ApplyStatus { status, .. } => {
                    check_range("status magnitude", status.magnitude, 0).map_err(invalid)?;
                }
                SkillEffect::ModifyChakra { amount, .. } => {
                    check_range("chakra amount", *amount, -STAT_LIMIT).map_err(invalid)?;
                }
                SkillEffect::RemoveStatus { .. } => {}
            }
        }
        self.skills.insert(skill.id, skill);
        Ok(())
    }

    /// Register a character template.
    ///
    /// Fails on a duplicate key, non-positive hp, a stat outside
    /// `STAT_LIMIT`, or a reference to a skill that has not been
    /// registered.
    pub fn register(&mut self, template: CharacterTemplate) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::InvalidTemplate {
            key: template.key.clone(),
            reason,
        };

        if self.index.contains_key(&template.key) {
            return Err(invalid("duplicate key".to_string()));
        }
        if template.hp <= 0 {
            return Err(invalid(format!("hp must be positive, got {}", template.hp)));
        }
        let stats = [
            ("hp", template.hp),
            ("chakra", template.chakra),
            ("chakra_regen", template.chakra_regen),
            ("attack", template.attack),
            ("defense", template.defense),
            ("speed", template.speed),
        ];
        for (name, value) in stats {
            check_range(name, value, 0).map_err(invalid)?;
        }
        if let Some(missing) = template.skills.iter().find(|id| !self.skills.contains_key(*id)) {
            return Err(invalid(format!("unknown skill id {}", missing.raw())));
        }

        self.index.insert(template.key.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    #[must_use]
    pub fn template(&self, key: &str) -> Option<&CharacterTemplate> {
        self.index.get(key).and_then(|&i| self.templates.get(i))
    }

    /// Templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &CharacterTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Clone a template into a battle character at full hp and chakra.
    pub fn spawn(
        &self,
        key: &str,
        id: CharacterId,
        player_controlled: bool,
    ) -> Result<Character, LoadError> {
        let template = self
            .template(key)
            .ok_or_else(|| LoadError::UnknownTemplate(key.to_string()))?;

        let mut character = Character::new(id, template.name.clone(), template.hp)
            .with_chakra(template.chakra)
            .with_chakra_regen(template.chakra_regen)
            .with_attack(template.attack)
            .with_defense(template.defense)
            .with_speed(template.speed)
            .with_crit(template.crit_rate, template.crit_bonus);

        for skill_id in &template.skills {
            let skill = self
                .skill(*skill_id)
                .ok_or_else(|| LoadError::InvalidTemplate {
                    key: key.to_string(),
                    reason: format!("unknown skill id {}", skill_id.raw()),
                })?;
            character = character.with_skill(skill.clone());
        }

        if player_controlled {
            character = character.player_controlled();
        }
        Ok(character)
    }
}

fn check_range(name: &str, value: i32, min: i32) -> Result<(), String> {
    if (min..=STAT_LIMIT).contains(&value) {
        Ok(())
    } else {
        Err(format!("{} must be within {}..={}, got {}", name, min, STAT_LIMIT, value))
    }
}
