//! Status effects: definitions carried by skills and active instances
//! attached to characters.
//!
//! A `StatusTemplate` is the static description inside a skill effect.
//! Applying it creates a `StatusEffect` on the target, which the status
//! processor ticks down at every round start.

use serde::{Deserialize, Serialize};

use crate::core::CharacterId;

/// The kind of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Loses `magnitude` hp at each round start.
    DamageOverTime,
    /// Gains `magnitude` hp at each round start.
    HealOverTime,
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,
    SpeedUp,
    SpeedDown,
    /// Skips turns while active.
    Stun,
    /// Skips turns while active.
    Freeze,
    /// Absorbs up to `magnitude` incoming damage.
    Shield,
    /// Rejects new harmful statuses.
    Immunity,
}

impl StatusKind {
    /// Whether this kind hurts the character carrying it.
    #[must_use]
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            StatusKind::DamageOverTime
                | StatusKind::AttackDown
                | StatusKind::DefenseDown
                | StatusKind::SpeedDown
                | StatusKind::Stun
                | StatusKind::Freeze
        )
    }

    /// Whether this kind prevents the character from acting.
    #[must_use]
    pub const fn disables(self) -> bool {
        matches!(self, StatusKind::Stun | StatusKind::Freeze)
    }

    /// Display name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusKind::DamageOverTime => "damage over time",
            StatusKind::HealOverTime => "heal over time",
            StatusKind::AttackUp => "attack up",
            StatusKind::AttackDown => "attack down",
            StatusKind::DefenseUp => "defense up",
            StatusKind::DefenseDown => "defense down",
            StatusKind::SpeedUp => "speed up",
            StatusKind::SpeedDown => "speed down",
            StatusKind::Stun => "stun",
            StatusKind::Freeze => "freeze",
            StatusKind::Shield => "shield",
            StatusKind::Immunity => "immunity",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a status lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    /// Remaining round-start passes.
    Turns(u32),
    /// Never expires on its own.
    Permanent,
}

/// Static description of a status, as stored in a skill effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTemplate {
    pub kind: StatusKind,
    #[serde(default)]
    pub magnitude: i32,
    pub duration: Duration,
    /// Display name. Falls back to the kind's name.
    #[serde(default)]
    pub name: Option<String>,
}

impl StatusTemplate {
    /// A template lasting `turns` rounds.
    pub fn new(kind: StatusKind, magnitude: i32, turns: u32) -> Self {
        Self {
            kind,
            magnitude,
            duration: Duration::Turns(turns),
            name: None,
        }
    }

    /// A template that never expires.
    pub fn permanent(kind: StatusKind, magnitude: i32) -> Self {
        Self {
            kind,
            magnitude,
            duration: Duration::Permanent,
            name: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An active status attached to a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub name: String,
    pub magnitude: i32,
    pub duration: Duration,
    /// Character who applied it, if any.
    pub source: Option<CharacterId>,
}

impl StatusEffect {
    /// Create an active status lasting `turns` rounds.
    pub fn new(kind: StatusKind, magnitude: i32, turns: u32) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            magnitude,
            duration: Duration::Turns(turns),
            source: None,
        }
    }

    /// Instantiate a template applied by `source`.
    pub fn from_template(template: &StatusTemplate, source: Option<CharacterId>) -> Self {
        Self {
            kind: template.kind,
            name: template
                .name
                .clone()
                .unwrap_or_else(|| template.kind.as_str().to_string()),
            magnitude: template.magnitude,
            duration: template.duration,
            source,
        }
    }

    /// Mark as permanent (builder pattern).
    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.duration = Duration::Permanent;
        self
    }

    /// Remaining turns, or `None` if permanent.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        match self.duration {
            Duration::Turns(n) => Some(n),
            Duration::Permanent => None,
        }
    }

    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self.duration, Duration::Permanent)
    }

    /// Decrement a finite duration by one, saturating at zero.
    pub fn tick(&mut self) {
        if let Duration::Turns(n) = &mut self.duration {
            *n = n.saturating_sub(1);
        }
    }

    /// True once a finite duration has run out, or a shield is drained.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self.duration {
            Duration::Turns(0) => true,
            _ => self.kind == StatusKind::Shield && self.magnitude <= 0,
        }
    }
}

/// Selects statuses for removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every harmful status.
    Harmful,
    /// Every non-harmful status.
    Beneficial,
    /// Every status of one kind.
    Kind(StatusKind),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: &StatusEffect) -> bool {
        match self {
            StatusFilter::Harmful => status.kind.is_harmful(),
            StatusFilter::Beneficial => !status.kind.is_harmful(),
            StatusFilter::Kind(kind) => status.kind == kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmful_kinds() {
        assert!(StatusKind::DamageOverTime.is_harmful());
        assert!(StatusKind::Stun.is_harmful());
        assert!(!StatusKind::HealOverTime.is_harmful());
        assert!(!StatusKind::Shield.is_harmful());
        assert!(StatusKind::Freeze.disables());
        assert!(!StatusKind::AttackDown.disables());
    }

    #[test]
    fn test_tick_and_expire() {
        let mut status = StatusEffect::new(StatusKind::AttackUp, 20, 2);
        assert_eq!(status.remaining(), Some(2));
        assert!(!status.is_expired());

        status.tick();
        assert_eq!(status.remaining(), Some(1));
        assert!(!status.is_expired());

        status.tick();
        assert!(status.is_expired());

        // Saturates
        status.tick();
        assert_eq!(status.remaining(), Some(0));
    }

    #[test]
    fn test_permanent_never_expires() {
        let mut status = StatusEffect::new(StatusKind::DefenseUp, 10, 1).permanent();
        for _ in 0..5 {
            status.tick();
        }
        assert!(status.is_permanent());
        assert_eq!(status.remaining(), None);
        assert!(!status.is_expired());
    }

    #[test]
    fn test_drained_shield_expires() {
        let mut shield = StatusEffect::new(StatusKind::Shield, 30, 3);
        assert!(!shield.is_expired());
        shield.magnitude = 0;
        assert!(shield.is_expired());
    }

    #[test]
    fn test_from_template() {
        let template = StatusTemplate::new(StatusKind::DamageOverTime, 15, 3).named("Burn");
        let status = StatusEffect::from_template(&template, Some(CharacterId::new(4)));

        assert_eq!(status.name, "Burn");
        assert_eq!(status.magnitude, 15);
        assert_eq!(status.remaining(), Some(3));
        assert_eq!(status.source, Some(CharacterId::new(4)));

        let unnamed = StatusEffect::from_template(&StatusTemplate::permanent(StatusKind::Immunity, 0), None);
        assert_eq!(unnamed.name, "immunity");
        assert!(unnamed.is_permanent());
    }

    #[test]
    fn test_filter() {
        let dot = StatusEffect::new(StatusKind::DamageOverTime, 5, 2);
        let hot = StatusEffect::new(StatusKind::HealOverTime, 5, 2);

        assert!(StatusFilter::Harmful.matches(&dot));
        assert!(!StatusFilter::Harmful.matches(&hot));
        assert!(StatusFilter::Beneficial.matches(&hot));
        assert!(StatusFilter::Kind(StatusKind::HealOverTime).matches(&hot));
        assert!(!StatusFilter::Kind(StatusKind::HealOverTime).matches(&dot));
    }

    #[test]
    fn test_spec_json() {
        let template: StatusTemplate = serde_json::from_str(
            r#"{ "kind": "damage_over_time", "magnitude": 12, "duration": { "turns": 3 } }"#,
        )
        .unwrap();
        assert_eq!(template, StatusTemplate::new(StatusKind::DamageOverTime, 12, 3));

        let template: StatusTemplate =
            serde_json::from_str(r#"{ "kind": "immunity", "duration": "permanent" }"#).unwrap();
        assert_eq!(template.duration, Duration::Permanent);
        assert_eq!(template.magnitude, 0);
    }
}
