//! Battle characters.
//!
//! A `Character` is a template cloned into a battle. Vitals are kept
//! private so every change goes through a clamping mutator:
//!
//! - `0 <= hp <= max_hp`
//! - `0 <= chakra <= max_chakra`
//! - alive exactly when `hp > 0`
//!
//! Stats read by the combat formulas go through the `effective_*`
//! accessors, which fold in active stat modifiers.

use serde::Serialize;

use super::skill::{Skill, SkillId};
use super::status::{StatusEffect, StatusFilter, StatusKind};
use crate::core::CharacterId;

/// A character taking part in a battle.
///
/// ## Example
///
/// ```
/// use chakra_clash::core::CharacterId;
/// use chakra_clash::roster::Character;
///
/// let mut naruto = Character::new(CharacterId::new(1), "Naruto", 1000)
///     .with_attack(85)
///     .with_defense(60);
///
/// assert_eq!(naruto.take_damage(300), 300);
/// assert_eq!(naruto.hp(), 700);
/// assert_eq!(naruto.heal(500), 300);
/// assert_eq!(naruto.hp(), 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,

    hp: i32,
    pub max_hp: i32,

    chakra: i32,
    pub max_chakra: i32,
    /// Chakra regained at every round start.
    pub chakra_regen: i32,

    pub attack: i32,
    pub defense: i32,
    pub speed: i32,

    /// Carried from templates for display. Combat formulas do not roll crits.
    pub crit_rate: f64,
    pub crit_bonus: f64,

    pub skills: Vec<Skill>,

    statuses: Vec<StatusEffect>,

    /// Driven by the player rather than the AI.
    pub player_controlled: bool,
}

impl Character {
    /// Create a character at full hp and chakra.
    ///
    /// `max_hp` is raised to at least 1.
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>, max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            id,
            name: name.into(),
            hp: max_hp,
            max_hp,
            chakra: 100,
            max_chakra: 100,
            chakra_regen: 10,
            attack: 10,
            defense: 0,
            speed: 10,
            crit_rate: 0.05,
            crit_bonus: 0.5,
            skills: Vec::new(),
            statuses: Vec::new(),
            player_controlled: false,
        }
    }

    /// Set attack (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack.max(0);
        self
    }

    /// Set defense (builder pattern).
    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense.max(0);
        self
    }

    /// Set speed (builder pattern).
    #[must_use]
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.max(0);
        self
    }

    /// Set the chakra pool and fill it (builder pattern).
    #[must_use]
    pub fn with_chakra(mut self, max_chakra: i32) -> Self {
        self.max_chakra = max_chakra.max(0);
        self.chakra = self.max_chakra;
        self
    }

    /// Set round-start chakra regeneration (builder pattern).
    #[must_use]
    pub fn with_chakra_regen(mut self, regen: i32) -> Self {
        self.chakra_regen = regen.max(0);
        self
    }

    /// Set critical hit data (builder pattern).
    #[must_use]
    pub fn with_crit(mut self, rate: f64, bonus: f64) -> Self {
        self.crit_rate = rate.clamp(0.0, 1.0);
        self.crit_bonus = bonus.max(0.0);
        self
    }

    /// Add a skill (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Hand control to the player (builder pattern).
    #[must_use]
    pub fn player_controlled(mut self) -> Self {
        self.player_controlled = true;
        self
    }

    // === Vitals ===

    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn chakra(&self) -> i32 {
        self.chakra
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Current hp as a fraction of max hp.
    #[must_use]
    pub fn hp_ratio(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Set hp directly, clamped into `0..=max_hp`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Set chakra directly, clamped into `0..=max_chakra`.
    pub fn set_chakra(&mut self, chakra: i32) {
        self.chakra = chakra.clamp(0, self.max_chakra);
    }

    /// Apply incoming damage. Shields absorb first.
    ///
    /// Returns the hp actually lost. A defeated character takes nothing.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }

        let mut remaining = amount;
        for shield in self
            .statuses
            .iter_mut()
            .filter(|s| s.kind == StatusKind::Shield && s.magnitude > 0)
        {
            let absorbed = shield.magnitude.min(remaining);
            shield.magnitude -= absorbed;
            remaining -= absorbed;
            if remaining == 0 {
                break;
            }
        }

        self.lose_hp(remaining)
    }

    /// Lose hp directly, ignoring shields. Returns the hp actually lost.
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore hp up to max. Returns the hp actually gained.
    ///
    /// A defeated character cannot be healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Pay chakra, never going below 0. Returns the chakra actually spent.
    pub fn spend_chakra(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let spent = amount.min(self.chakra);
        self.chakra -= spent;
        spent
    }

    /// Regain chakra up to max. Returns the chakra actually gained.
    pub fn restore_chakra(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let gained = amount.min(self.max_chakra - self.chakra);
        self.chakra += gained;
        gained
    }

    // === Statuses ===

    /// Active statuses in attachment order.
    #[must_use]
    pub fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    pub(crate) fn statuses_mut(&mut self) -> &mut Vec<StatusEffect> {
        &mut self.statuses
    }

    /// Attach a status. Returns false if immunity rejected it.
    pub fn add_status(&mut self, status: StatusEffect) -> bool {
        if status.kind.is_harmful() && self.has_status(StatusKind::Immunity) {
            return false;
        }
        self.statuses.push(status);
        true
    }

    /// Remove every status matching `filter`, returning them.
    pub fn remove_statuses(&mut self, filter: StatusFilter) -> Vec<StatusEffect> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.statuses)
            .into_iter()
            .partition(|status| filter.matches(status));
        self.statuses = kept;
        removed
    }

    #[must_use]
    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind)
    }

    /// Stunned or frozen.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.statuses.iter().any(|s| s.kind.disables())
    }

    /// Total shield pool left.
    #[must_use]
    pub fn shield(&self) -> i32 {
        self.statuses
            .iter()
            .filter(|s| s.kind == StatusKind::Shield)
            .map(|s| s.magnitude.max(0))
            .sum()
    }

    // === Effective stats ===

    fn modified(&self, base: i32, up: StatusKind, down: StatusKind) -> i32 {
        let percent = self
            .statuses
            .iter()
            .map(|s| {
                if s.kind == up {
                    i64::from(s.magnitude)
                } else if s.kind == down {
                    -i64::from(s.magnitude)
                } else {
                    0
                }
            })
            .fold(0i64, i64::saturating_add);
        let scaled = i64::from(base).saturating_mul(percent.saturating_add(100)) / 100;
        saturate(scaled.max(0))
    }

    /// Attack after AttackUp/AttackDown.
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        self.modified(self.attack, StatusKind::AttackUp, StatusKind::AttackDown)
    }

    /// Defense after DefenseUp/DefenseDown.
    #[must_use]
    pub fn effective_defense(&self) -> i32 {
        self.modified(self.defense, StatusKind::DefenseUp, StatusKind::DefenseDown)
    }

    /// Speed after SpeedUp/SpeedDown.
    #[must_use]
    pub fn effective_speed(&self) -> i32 {
        self.modified(self.speed, StatusKind::SpeedUp, StatusKind::SpeedDown)
    }

    // === Skills ===

    #[must_use]
    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn skill_mut(&mut self, id: SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    /// Skills that are off cooldown and payable right now.
    pub fn affordable_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills
            .iter()
            .filter(move |s| s.is_affordable(self.chakra))
    }

    /// Count every skill cooldown down by one round.
    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.skills {
            skill.tick_cooldown();
        }
    }
}

/// Narrow an `i64` back to `i32`, saturating at the bounds.
pub(crate) fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TargetCategory;
    use crate::roster::SkillKind;

    fn fighter() -> Character {
        Character::new(CharacterId::new(1), "Fighter", 100)
            .with_attack(50)
            .with_defense(40)
            .with_speed(30)
    }

    #[test]
    fn test_new_is_full() {
        let c = Character::new(CharacterId::new(1), "Fresh", 250).with_chakra(80);
        assert_eq!(c.hp(), 250);
        assert_eq!(c.chakra(), 80);
        assert!(c.is_alive());
        assert_eq!(c.hp_ratio(), 1.0);

        let tiny = Character::new(CharacterId::new(2), "Tiny", 0);
        assert_eq!(tiny.max_hp, 1);
        assert!(tiny.is_alive());
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut c = fighter();
        assert_eq!(c.take_damage(30), 30);
        assert_eq!(c.hp(), 70);

        assert_eq!(c.take_damage(500), 70);
        assert_eq!(c.hp(), 0);
        assert!(!c.is_alive());

        // Already defeated
        assert_eq!(c.take_damage(10), 0);
        assert_eq!(c.take_damage(-5), 0);
    }

    #[test]
    fn test_heal_clamps_and_skips_defeated() {
        let mut c = fighter();
        c.set_hp(50);
        assert_eq!(c.heal(35), 35);
        assert_eq!(c.heal(100), 15);
        assert_eq!(c.hp(), 100);

        c.set_hp(0);
        assert_eq!(c.heal(50), 0);
        assert_eq!(c.hp(), 0);
    }

    #[test]
    fn test_chakra_clamps() {
        let mut c = fighter().with_chakra(50);
        assert_eq!(c.spend_chakra(20), 20);
        assert_eq!(c.chakra(), 30);
        assert_eq!(c.spend_chakra(100), 30);
        assert_eq!(c.chakra(), 0);
        assert_eq!(c.restore_chakra(80), 50);
        assert_eq!(c.chakra(), 50);
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut c = fighter();
        c.add_status(StatusEffect::new(StatusKind::Shield, 25, 3));
        assert_eq!(c.shield(), 25);

        assert_eq!(c.take_damage(10), 0);
        assert_eq!(c.hp(), 100);
        assert_eq!(c.shield(), 15);

        assert_eq!(c.take_damage(40), 25);
        assert_eq!(c.hp(), 75);
        assert_eq!(c.shield(), 0);
        // Drained shield stays until the next status pass
        assert!(c.statuses()[0].is_expired());

        // Direct hp loss ignores shields
        c.add_status(StatusEffect::new(StatusKind::Shield, 50, 3));
        assert_eq!(c.lose_hp(5), 5);
        assert_eq!(c.shield(), 50);
    }

    #[test]
    fn test_immunity_blocks_harmful() {
        let mut c = fighter();
        c.add_status(StatusEffect::new(StatusKind::Immunity, 0, 2));

        assert!(!c.add_status(StatusEffect::new(StatusKind::Stun, 0, 1)));
        assert!(c.add_status(StatusEffect::new(StatusKind::AttackUp, 20, 1)));
        assert!(!c.is_disabled());
        assert_eq!(c.statuses().len(), 2);
    }

    #[test]
    fn test_remove_statuses() {
        let mut c = fighter();
        c.add_status(StatusEffect::new(StatusKind::DamageOverTime, 5, 3));
        c.add_status(StatusEffect::new(StatusKind::AttackUp, 20, 3));
        c.add_status(StatusEffect::new(StatusKind::Stun, 0, 1));

        let removed = c.remove_statuses(StatusFilter::Harmful);
        assert_eq!(removed.len(), 2);
        assert_eq!(c.statuses().len(), 1);
        assert!(c.has_status(StatusKind::AttackUp));
    }

    #[test]
    fn test_effective_stats() {
        let mut c = fighter();
        assert_eq!(c.effective_attack(), 50);

        c.add_status(StatusEffect::new(StatusKind::AttackUp, 30, 3));
        assert_eq!(c.effective_attack(), 65);

        c.add_status(StatusEffect::new(StatusKind::AttackDown, 10, 3));
        assert_eq!(c.effective_attack(), 60);

        c.add_status(StatusEffect::new(StatusKind::DefenseDown, 150, 3));
        assert_eq!(c.effective_defense(), 0);

        c.add_status(StatusEffect::new(StatusKind::SpeedUp, 50, 3));
        assert_eq!(c.effective_speed(), 45);
    }

    #[test]
    fn test_serialized_snapshot_is_clamped() {
        let mut c = fighter();
        c.take_damage(30);
        c.heal(1_000);

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["hp"], json["max_hp"]);
        assert_eq!(json["statuses"], serde_json::json!([]));
    }

    #[test]
    fn test_effective_stats_saturate() {
        let mut c = Character::new(CharacterId::new(1), "Titan", 100).with_attack(30_000_000);
        c.add_status(StatusEffect::new(StatusKind::AttackUp, i32::MAX, 3));
        c.add_status(StatusEffect::new(StatusKind::AttackUp, i32::MAX, 3));
        assert_eq!(c.effective_attack(), i32::MAX);

        c.add_status(StatusEffect::new(StatusKind::AttackDown, i32::MAX, 3));
        c.add_status(StatusEffect::new(StatusKind::AttackDown, i32::MAX, 3));
        c.add_status(StatusEffect::new(StatusKind::AttackDown, i32::MAX, 3));
        assert_eq!(c.effective_attack(), 0);
    }

    #[test]
    fn test_disabled() {
        let mut c = fighter();
        assert!(!c.is_disabled());
        c.add_status(StatusEffect::new(StatusKind::Freeze, 0, 1));
        assert!(c.is_disabled());
    }

    #[test]
    fn test_skills_and_cooldowns() {
        let skill = Skill::new(SkillId::new(5), "Kick", SkillKind::Damage, TargetCategory::SingleEnemy)
            .with_cost(40)
            .with_cooldown(1);
        let mut c = fighter().with_chakra(50).with_skill(skill);

        assert!(c.skill(SkillId::new(5)).is_some());
        assert!(c.skill(SkillId::new(6)).is_none());
        assert_eq!(c.affordable_skills().count(), 1);

        c.spend_chakra(20);
        assert_eq!(c.affordable_skills().count(), 0);

        c.restore_chakra(20);
        if let Some(skill) = c.skill_mut(SkillId::new(5)) {
            skill.start_cooldown();
        }
        assert_eq!(c.affordable_skills().count(), 0);

        c.tick_cooldowns();
        assert_eq!(c.affordable_skills().count(), 1);
    }
}
