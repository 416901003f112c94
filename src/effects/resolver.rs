//! Action resolution.
//!
//! `ActionResolver` turns one [`Action`] into state changes and an
//! [`ActionResult`]. An action that cannot be carried out produces an
//! unsuccessful result and leaves the state untouched.
//!
//! ## Attack
//!
//! `max(1, attack - defense / 2)` using effective stats, through the
//! target's shields.
//!
//! ## Skill
//!
//! Checked in order: a skill was named, the caster owns it, it is off
//! cooldown, the category yields a target, and (only when the config
//! enforces it) the caster can pay. The cost is then deducted, clamped
//! at 0, before any effect applies. Effects apply in list order, each to
//! every resolved target.

use tracing::trace;

use super::effect::{ChakraRecipient, SkillEffect};
use super::targeting::{TargetSelector, Targets};
use crate::core::{
    Action, ActionFailure, ActionKind, ActionResult, BattleConfig, BattleRng, BattleState,
    CharacterId, StatusChange,
};
use crate::roster::{Skill, StatusEffect};

/// Resolves actions against the battle state.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve `action`, mutating `state`.
    pub fn resolve(
        state: &mut BattleState,
        action: &Action,
        rng: &mut BattleRng,
        config: &BattleConfig,
    ) -> ActionResult {
        let result = match action.kind {
            ActionKind::Pass => {
                let mut result = ActionResult::new(action.clone());
                result.message(format!("{} waits", name_of(state, action.actor)));
                result
            }
            ActionKind::Item => ActionResult::failed(action.clone(), ActionFailure::NotImplemented),
            _ if !state.is_alive(action.actor) => {
                ActionResult::failed(action.clone(), ActionFailure::ActorUnavailable)
            }
            ActionKind::Attack => Self::resolve_attack(state, action),
            ActionKind::Skill => Self::resolve_skill(state, action, rng, config),
        };

        trace!(
            actor = %action.actor,
            kind = ?action.kind,
            success = result.success,
            "resolved action"
        );
        result
    }

    fn resolve_attack(state: &mut BattleState, action: &Action) -> ActionResult {
        let Some(target) = action.target.filter(|id| state.is_alive(*id)) else {
            return ActionResult::failed(action.clone(), ActionFailure::NoValidTarget);
        };

        let attack = state
            .character(action.actor)
            .map_or(0, |c| c.effective_attack());
        let defense = state.character(target).map_or(0, |c| c.effective_defense());
        let damage = (attack - defense / 2).max(1);

        let mut result = ActionResult::new(action.clone());
        let lost = state
            .character_mut(target)
            .map_or(0, |c| c.take_damage(damage));
        result.record_damage(target, lost);
        result.message(format!(
            "{} attacks {} for {} damage",
            name_of(state, action.actor),
            name_of(state, target),
            lost
        ));
        check_defeat(state, target, &mut result);
        result
    }

    fn resolve_skill(
        state: &mut BattleState,
        action: &Action,
        rng: &mut BattleRng,
        config: &BattleConfig,
    ) -> ActionResult {
        let Some(skill_id) = action.skill else {
            return ActionResult::failed(action.clone(), ActionFailure::NoSkillSpecified);
        };
        let Some(caster) = state.character(action.actor) else {
            return ActionResult::failed(action.clone(), ActionFailure::ActorUnavailable);
        };
        let Some(skill) = caster.skill(skill_id).cloned() else {
            return ActionResult::failed(action.clone(), ActionFailure::UnknownSkill(skill_id));
        };
        if !skill.is_ready() {
            return ActionResult::failed(
                action.clone(),
                ActionFailure::SkillOnCooldown {
                    name: skill.name,
                    remaining: skill.current_cooldown,
                },
            );
        }
        let available = caster.chakra();
        let caster_attack = caster.effective_attack();

        let targets =
            TargetSelector::new(skill.target, action.actor).resolve(state, action.target, rng);
        if targets.is_empty() {
            return ActionResult::failed(action.clone(), ActionFailure::NoValidTarget);
        }

        if config.enforce_chakra_cost && available < skill.cost {
            return ActionResult::failed(
                action.clone(),
                ActionFailure::InsufficientChakra {
                    needed: skill.cost,
                    available,
                },
            );
        }

        let mut result = ActionResult::new(action.clone());
        if let Some(caster) = state.character_mut(action.actor) {
            result.chakra_spent = caster.spend_chakra(skill.cost);
            if let Some(owned) = caster.skill_mut(skill_id) {
                owned.start_cooldown();
            }
        }
        result.message(format!("{} uses {}", name_of(state, action.actor), skill.name));

        Self::apply_effects(state, action.actor, &skill, &targets, caster_attack, rng, &mut result);
        result
    }

    fn apply_effects(
        state: &mut BattleState,
        caster: CharacterId,
        skill: &Skill,
        targets: &Targets,
        caster_attack: i32,
        rng: &mut BattleRng,
        result: &mut ActionResult,
    ) {
        for effect in &skill.effects {
            // Once per cast, however many targets the skill hits
            if effect.targets_caster() {
                Self::apply_effect(state, caster, caster, effect, caster_attack, rng, result);
                continue;
            }
            for &target in targets {
                if !state.is_alive(target) {
                    continue;
                }
                Self::apply_effect(state, caster, target, effect, caster_attack, rng, result);
            }
        }
    }

    fn apply_effect(
        state: &mut BattleState,
        caster: CharacterId,
        target: CharacterId,
        effect: &SkillEffect,
        caster_attack: i32,
        rng: &mut BattleRng,
        result: &mut ActionResult,
    ) {
        let target_name = name_of(state, target);

        match effect {
            SkillEffect::Damage { .. } => {
                let amount = effect.scaled_amount(caster_attack);
                let lost = state
                    .character_mut(target)
                    .map_or(0, |c| c.take_damage(amount));
                result.record_damage(target, lost);
                result.message(format!("{} takes {} damage", target_name, lost));
                check_defeat(state, target, result);
            }
            SkillEffect::Heal { .. } => {
                let amount = effect.scaled_amount(caster_attack);
                let gained = state.character_mut(target).map_or(0, |c| c.heal(amount));
                result.record_healing(target, gained);
                result.message(format!("{} recovers {} hp", target_name, gained));
            }
            SkillEffect::ApplyStatus { status, chance } => {
                if !rng.roll(*chance) {
                    result.message(format!("{} avoids {}", target_name, status.kind));
                    return;
                }
                let instance = StatusEffect::from_template(status, Some(caster));
                let label = instance.name.clone();
                let applied = state
                    .character_mut(target)
                    .is_some_and(|c| c.add_status(instance));
                if applied {
                    result.status_changes.push(StatusChange::Applied {
                        target,
                        kind: status.kind,
                    });
                    result.message(format!("{} is affected by {}", target_name, label));
                } else {
                    result.status_changes.push(StatusChange::Resisted {
                        target,
                        kind: status.kind,
                    });
                    result.message(format!("{} is immune to {}", target_name, label));
                }
            }
            SkillEffect::RemoveStatus { filter } => {
                let removed = state
                    .character_mut(target)
                    .map(|c| c.remove_statuses(*filter))
                    .unwrap_or_default();
                for status in removed {
                    result.message(format!("{} loses {}", target_name, status.name));
                    result.status_changes.push(StatusChange::Removed {
                        target,
                        kind: status.kind,
                    });
                }
            }
            SkillEffect::ModifyChakra { amount, recipient } => {
                let who = match recipient {
                    ChakraRecipient::Target => target,
                    ChakraRecipient::Caster => caster,
                };
                let Some(character) = state.character_mut(who) else {
                    return;
                };
                let name = character.name.clone();
                if *amount >= 0 {
                    let gained = character.restore_chakra(*amount);
                    result.message(format!("{} gains {} chakra", name, gained));
                } else {
                    let lost = character.spend_chakra(-amount);
                    result.message(format!("{} loses {} chakra", name, lost));
                }
            }
        }
    }
}

fn name_of(state: &BattleState, id: CharacterId) -> String {
    state
        .character(id)
        .map_or_else(|| id.to_string(), |c| c.name.clone())
}

fn check_defeat(state: &BattleState, target: CharacterId, result: &mut ActionResult) {
    if !state.is_alive(target) && !result.defeated.contains(&target) {
        result.record_defeat(target);
        result.message(format!("{} is defeated", name_of(state, target)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TargetCategory;
    use crate::roster::{Character, SkillId, SkillKind, StatusFilter, StatusKind, StatusTemplate, Team};

    const HERO: CharacterId = CharacterId::new(1);
    const MEDIC: CharacterId = CharacterId::new(2);
    const FOE: CharacterId = CharacterId::new(3);
    const FOE2: CharacterId = CharacterId::new(4);

    fn blast() -> Skill {
        Skill::new(SkillId::new(1), "Blast", SkillKind::Damage, TargetCategory::SingleEnemy)
            .with_cost(20)
            .with_effect(SkillEffect::damage(30, 0))
    }

    fn mend() -> Skill {
        Skill::new(SkillId::new(2), "Mend", SkillKind::Healing, TargetCategory::SingleAlly)
            .with_cost(10)
            .with_effect(SkillEffect::heal(20, 50))
    }

    fn state() -> BattleState {
        let hero = Character::new(HERO, "Hero", 100)
            .with_attack(50)
            .with_defense(10)
            .with_chakra(100)
            .with_skill(blast());
        let medic = Character::new(MEDIC, "Medic", 100)
            .with_attack(30)
            .with_skill(mend());
        let foe = Character::new(FOE, "Foe", 100).with_attack(20).with_defense(30);
        let foe2 = Character::new(FOE2, "Foe2", 100).with_defense(40);

        BattleState::new(
            Team::new("Leaf", vec![hero, medic]),
            Team::new("Sand", vec![foe, foe2]),
        )
        .unwrap()
    }

    fn resolve(state: &mut BattleState, action: Action) -> ActionResult {
        let mut rng = BattleRng::new(42);
        ActionResolver::resolve(state, &action, &mut rng, &BattleConfig::default())
    }

    fn hp(state: &BattleState, id: CharacterId) -> i32 {
        state.character(id).unwrap().hp()
    }

    fn chakra(state: &BattleState, id: CharacterId) -> i32 {
        state.character(id).unwrap().chakra()
    }

    #[test]
    fn test_attack_damage_formula() {
        let mut state = state();
        let result = resolve(&mut state, Action::attack(HERO, FOE));

        // 50 - 30 / 2
        assert!(result.success);
        assert_eq!(result.damage_to(FOE), 35);
        assert_eq!(hp(&state, FOE), 65);

        // 50 - 40 / 2
        resolve(&mut state, Action::attack(HERO, FOE2));
        assert_eq!(hp(&state, FOE2), 70);
    }

    #[test]
    fn test_attack_minimum_one() {
        let mut state = state();
        if let Some(hero) = state.character_mut(HERO) {
            hero.defense = 200;
        }
        // 20 - 200 / 2 is negative
        let result = resolve(&mut state, Action::attack(FOE, HERO));
        assert_eq!(result.damage_to(HERO), 1);
    }

    #[test]
    fn test_attack_on_defeated_target_fails() {
        let mut state = state();
        state.character_mut(FOE).unwrap().set_hp(0);
        let before = state.clone();

        let result = resolve(&mut state, Action::attack(HERO, FOE));

        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionFailure::NoValidTarget));
        assert_eq!(hp(&state, HERO), hp(&before, HERO));
    }

    #[test]
    fn test_attack_defeats() {
        let mut state = state();
        state.character_mut(FOE).unwrap().set_hp(5);

        let result = resolve(&mut state, Action::attack(HERO, FOE));

        assert_eq!(result.damage_to(FOE), 5);
        assert_eq!(result.defeated.as_slice(), &[FOE]);
        assert!(result.messages.iter().any(|m| m == "Foe is defeated"));
    }

    #[test]
    fn test_pass_changes_nothing() {
        let mut state = state();
        let before: Vec<_> = state.characters().cloned().collect();

        let result = resolve(&mut state, Action::pass(HERO));

        assert!(result.success);
        let after: Vec<_> = state.characters().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_item_not_implemented() {
        let mut state = state();
        let result = resolve(&mut state, Action::item(HERO));
        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionFailure::NotImplemented));
    }

    #[test]
    fn test_skill_cost_deducted_once() {
        let mut state = state();
        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(1), Some(FOE)));

        assert!(result.success);
        assert_eq!(result.chakra_spent, 20);
        assert_eq!(chakra(&state, HERO), 80);
        assert_eq!(hp(&state, FOE), 70);
    }

    #[test]
    fn test_skill_without_target_costs_nothing() {
        let mut state = state();
        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(1), None));

        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionFailure::NoValidTarget));
        assert_eq!(chakra(&state, HERO), 100);
    }

    #[test]
    fn test_skill_failures() {
        let mut state = state();

        let mut action = Action::skill(HERO, SkillId::new(1), Some(FOE));
        action.skill = None;
        assert_eq!(
            resolve(&mut state, action).failure,
            Some(ActionFailure::NoSkillSpecified)
        );

        assert_eq!(
            resolve(&mut state, Action::skill(HERO, SkillId::new(2), Some(MEDIC))).failure,
            Some(ActionFailure::UnknownSkill(SkillId::new(2)))
        );

        state.character_mut(HERO).unwrap().set_hp(0);
        assert_eq!(
            resolve(&mut state, Action::skill(HERO, SkillId::new(1), Some(FOE))).failure,
            Some(ActionFailure::ActorUnavailable)
        );
    }

    #[test]
    fn test_heal_scenario() {
        let mut state = state();
        state.character_mut(HERO).unwrap().set_hp(50);

        let result = resolve(&mut state, Action::skill(MEDIC, SkillId::new(2), Some(HERO)));

        // 20 + 30 * 50 / 100
        assert!(result.success);
        assert_eq!(result.total_healing(), 35);
        assert_eq!(hp(&state, HERO), 85);
    }

    #[test]
    fn test_cost_clamped_at_zero() {
        let mut state = state();
        state.character_mut(HERO).unwrap().set_chakra(5);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(1), Some(FOE)));

        assert!(result.success);
        assert_eq!(result.chakra_spent, 5);
        assert_eq!(chakra(&state, HERO), 0);
    }

    #[test]
    fn test_enforced_cost() {
        let mut state = state();
        state.character_mut(HERO).unwrap().set_chakra(5);
        let config = BattleConfig::default().enforce_chakra_cost();
        let mut rng = BattleRng::new(1);

        let result = ActionResolver::resolve(
            &mut state,
            &Action::skill(HERO, SkillId::new(1), Some(FOE)),
            &mut rng,
            &config,
        );

        assert_eq!(
            result.failure,
            Some(ActionFailure::InsufficientChakra {
                needed: 20,
                available: 5
            })
        );
        assert_eq!(chakra(&state, HERO), 5);
        assert_eq!(hp(&state, FOE), 100);
    }

    #[test]
    fn test_cooldown_blocks_reuse() {
        let mut state = state();
        let skill = blast().with_cooldown(2);
        state.character_mut(HERO).unwrap().skills = vec![skill];

        assert!(resolve(&mut state, Action::skill(HERO, SkillId::new(1), Some(FOE))).success);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(1), Some(FOE)));
        assert_eq!(
            result.failure,
            Some(ActionFailure::SkillOnCooldown {
                name: "Blast".to_string(),
                remaining: 2
            })
        );
        assert_eq!(chakra(&state, HERO), 80);
    }

    #[test]
    fn test_area_skill_hits_living_enemies() {
        let mut state = state();
        let quake = Skill::new(SkillId::new(5), "Quake", SkillKind::Damage, TargetCategory::AllEnemies)
            .with_effect(SkillEffect::damage(10, 20));
        state.character_mut(HERO).unwrap().skills.push(quake);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(5), None));

        // 10 + 50 * 20 / 100 = 20 each
        assert_eq!(result.damage_to(FOE), 20);
        assert_eq!(result.damage_to(FOE2), 20);
        assert_eq!(result.total_damage(), 40);
    }

    #[test]
    fn test_status_effects() {
        let mut state = state();
        let hex = Skill::new(SkillId::new(6), "Hex", SkillKind::Debuff, TargetCategory::SingleEnemy)
            .with_effect(SkillEffect::apply(StatusTemplate::new(StatusKind::Stun, 0, 1)))
            .with_effect(SkillEffect::apply(StatusTemplate::new(StatusKind::AttackDown, 20, 2)));
        let cleanse = Skill::new(SkillId::new(7), "Cleanse", SkillKind::Utility, TargetCategory::SingleEnemy)
            .with_effect(SkillEffect::remove(StatusFilter::Harmful));
        {
            let hero = state.character_mut(HERO).unwrap();
            hero.skills.push(hex);
            hero.skills.push(cleanse);
        }

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(6), Some(FOE)));
        assert_eq!(result.status_changes.len(), 2);
        let foe = state.character(FOE).unwrap();
        assert!(foe.is_disabled());
        assert_eq!(foe.statuses()[0].source, Some(HERO));
        assert_eq!(foe.effective_attack(), 16);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(7), Some(FOE)));
        assert_eq!(
            result.status_changes,
            vec![
                StatusChange::Removed { target: FOE, kind: StatusKind::Stun },
                StatusChange::Removed { target: FOE, kind: StatusKind::AttackDown },
            ]
        );
        assert!(state.character(FOE).unwrap().statuses().is_empty());
    }

    #[test]
    fn test_immunity_resists() {
        let mut state = state();
        state
            .character_mut(FOE)
            .unwrap()
            .add_status(StatusEffect::new(StatusKind::Immunity, 0, 2));
        let hex = Skill::new(SkillId::new(6), "Hex", SkillKind::Debuff, TargetCategory::SingleEnemy)
            .with_effect(SkillEffect::apply(StatusTemplate::new(StatusKind::Stun, 0, 1)));
        state.character_mut(HERO).unwrap().skills.push(hex);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(6), Some(FOE)));

        assert!(result.success);
        assert_eq!(
            result.status_changes,
            vec![StatusChange::Resisted { target: FOE, kind: StatusKind::Stun }]
        );
        assert!(!state.character(FOE).unwrap().is_disabled());
    }

    #[test]
    fn test_zero_chance_status_never_lands() {
        let mut state = state();
        let fizzle = Skill::new(SkillId::new(8), "Fizzle", SkillKind::Debuff, TargetCategory::SingleEnemy)
            .with_effect(SkillEffect::apply_with_chance(StatusTemplate::new(StatusKind::Freeze, 0, 1), 0.0));
        state.character_mut(HERO).unwrap().skills.push(fizzle);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(8), Some(FOE)));

        assert!(result.success);
        assert!(result.status_changes.is_empty());
        assert!(state.character(FOE).unwrap().statuses().is_empty());
    }

    #[test]
    fn test_chakra_effects() {
        let mut state = state();
        let siphon = Skill::new(SkillId::new(9), "Siphon", SkillKind::Utility, TargetCategory::SingleEnemy)
            .with_cost(30)
            .with_effect(SkillEffect::chakra(-40))
            .with_effect(SkillEffect::caster_chakra(15));
        state.character_mut(HERO).unwrap().skills.push(siphon);

        resolve(&mut state, Action::skill(HERO, SkillId::new(9), Some(FOE)));

        assert_eq!(chakra(&state, FOE), 60);
        assert_eq!(chakra(&state, HERO), 85);
    }

    #[test]
    fn test_caster_chakra_once_per_area_skill() {
        let mut state = state();
        let meditate = Skill::new(SkillId::new(11), "Meditate", SkillKind::Damage, TargetCategory::AllEnemies)
            .with_effect(SkillEffect::damage(5, 0))
            .with_effect(SkillEffect::caster_chakra(15));
        let hero = state.character_mut(HERO).unwrap();
        hero.skills.push(meditate);
        hero.set_chakra(0);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(11), None));

        assert!(result.success);
        assert_eq!(result.damage_to(FOE), 5);
        assert_eq!(result.damage_to(FOE2), 5);
        assert_eq!(chakra(&state, HERO), 15);
    }

    #[test]
    fn test_effects_skip_target_defeated_mid_skill() {
        let mut state = state();
        state.character_mut(FOE).unwrap().set_hp(10);
        let finisher = Skill::new(SkillId::new(10), "Finisher", SkillKind::Damage, TargetCategory::SingleEnemy)
            .with_effect(SkillEffect::damage(50, 0))
            .with_effect(SkillEffect::apply(StatusTemplate::new(StatusKind::DamageOverTime, 5, 3)));
        state.character_mut(HERO).unwrap().skills.push(finisher);

        let result = resolve(&mut state, Action::skill(HERO, SkillId::new(10), Some(FOE)));

        assert_eq!(result.damage_to(FOE), 10);
        assert_eq!(result.defeated.as_slice(), &[FOE]);
        assert!(result.status_changes.is_empty());
    }
}
