//! Action selection for computer-controlled characters.
//!
//! `ActionPolicy` is the seam the orchestrator calls whenever an
//! AI-controlled character comes up. `HeuristicAi` is the shipped
//! implementation: a short priority list of rules, most of them gated by
//! a probability from [`AiConfig`].

use std::cmp::Ordering;

use crate::core::{Action, AiConfig, BattleRng, BattleState, CharacterId};
use crate::effects::TargetCategory;
use crate::roster::{Character, Skill, SkillKind};

/// Chooses an action for a computer-controlled character.
pub trait ActionPolicy {
    /// Choose what `actor` does this turn.
    ///
    /// Must always return an action; pass when nothing sensible exists.
    fn choose_action(&self, state: &BattleState, actor: CharacterId, rng: &mut BattleRng)
        -> Action;
}

/// Rule-based AI.
///
/// Rules are tried in order and the first one that fires wins:
///
/// 1. **Emergency heal**: a teammate other than the caster is under the
///    emergency threshold and the caster has a usable healing skill that
///    reaches allies
/// 2. **Area skill**: two or more enemies stand and an area skill is usable
/// 3. **Buff**: the team is healthy and a buff skill is usable
/// 4. **Offensive skill**: a damage or debuff skill is usable
/// 5. **Attack**: usually the weakest enemy, sometimes a random one
///
/// Rules 2-5 roll against the chances in [`AiConfig`].
#[derive(Clone, Debug, Default)]
pub struct HeuristicAi {
    config: AiConfig,
}

impl HeuristicAi {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    fn emergency_heal(&self, me: &Character, allies: &[&Character], usable: &[&Skill]) -> Option<Action> {
        // Self heals never reach a teammate
        let skill = usable
            .iter()
            .filter(|s| s.kind == SkillKind::Healing)
            .filter(|s| matches!(s.target, TargetCategory::SingleAlly | TargetCategory::AllAllies))
            .max_by_key(|s| s.power_rating())?;

        let patient = allies
            .iter()
            .filter(|c| c.id != me.id)
            .filter(|c| c.hp_ratio() < self.config.emergency_heal_threshold)
            .min_by(|a, b| by_ratio(a, b))?;

        tracing::debug!(
            "{} heals {} ({:.0}% hp) with {}",
            me.name,
            patient.name,
            patient.hp_ratio() * 100.0,
            skill.name
        );
        Some(Action::skill(me.id, skill.id, chosen_target(skill, patient.id)))
    }

    fn area_skill(
        &self,
        me: &Character,
        enemies: &[&Character],
        usable: &[&Skill],
        rng: &mut BattleRng,
    ) -> Option<Action> {
        if enemies.len() < 2 {
            return None;
        }
        let area: Vec<&Skill> = usable.iter().copied().filter(|s| s.is_area()).collect();
        if area.is_empty() || !rng.roll(self.config.area_skill_chance) {
            return None;
        }
        let skill = rng.choose(&area)?;

        tracing::debug!("{} uses area skill {} on {} enemies", me.name, skill.name, enemies.len());
        Some(Action::skill(me.id, skill.id, None))
    }

    fn buff(
        &self,
        me: &Character,
        state: &BattleState,
        allies: &[&Character],
        usable: &[&Skill],
        rng: &mut BattleRng,
    ) -> Option<Action> {
        let side = state.side_of(me.id)?;
        let team_hp = state.team(side).average_hp_ratio();
        if team_hp <= self.config.buff_team_hp_threshold {
            return None;
        }
        let buffs: Vec<&Skill> = usable
            .iter()
            .copied()
            .filter(|s| s.kind == SkillKind::Buff)
            .collect();
        if buffs.is_empty() || !rng.roll(self.config.buff_chance) {
            return None;
        }
        let skill = rng.choose(&buffs)?;

        let target = if skill.target == TargetCategory::SelfOnly {
            me.id
        } else {
            let others: Vec<CharacterId> = allies
                .iter()
                .filter(|c| c.id != me.id)
                .map(|c| c.id)
                .collect();
            rng.choose(&others).copied().unwrap_or(me.id)
        };

        tracing::debug!(
            "{} buffs with {} (team at {:.0}% hp)",
            me.name,
            skill.name,
            team_hp * 100.0
        );
        Some(Action::skill(me.id, skill.id, chosen_target(skill, target)))
    }

    fn offensive_skill(
        &self,
        me: &Character,
        enemies: &[&Character],
        usable: &[&Skill],
        rng: &mut BattleRng,
    ) -> Option<Action> {
        let offensive: Vec<&Skill> = usable
            .iter()
            .copied()
            .filter(|s| matches!(s.kind, SkillKind::Damage | SkillKind::Debuff))
            .collect();
        if offensive.is_empty() || !rng.roll(self.config.offensive_skill_chance) {
            return None;
        }

        let multi = |s: &&Skill| {
            matches!(s.target, TargetCategory::AllEnemies | TargetCategory::RandomEnemy)
        };
        let crowd_pick = if enemies.len() >= 3 {
            offensive.iter().copied().filter(multi).max_by_key(|s| s.power_rating())
        } else {
            None
        };
        let skill = crowd_pick
            .or_else(|| {
                offensive
                    .iter()
                    .copied()
                    .filter(|s| s.target == TargetCategory::SingleEnemy)
                    .max_by_key(|s| s.power_rating())
            })
            .or_else(|| rng.choose(&offensive).copied())?;

        let target = if !skill.target.needs_choice() {
            None
        } else if skill.has_damage() && !skill.has_debuff() {
            enemies.iter().min_by_key(|c| c.hp()).map(|c| c.id)
        } else if skill.has_debuff() && !skill.has_damage() {
            enemies.iter().max_by_key(|c| c.hp()).map(|c| c.id)
        } else {
            rng.choose(enemies).map(|c| c.id)
        };

        tracing::debug!("{} uses offensive skill {} on {:?}", me.name, skill.name, target);
        Some(Action::skill(me.id, skill.id, target))
    }

    fn attack(&self, me: &Character, enemies: &[&Character], rng: &mut BattleRng) -> Action {
        let focus = rng.roll(self.config.focus_weakest_chance);
        let target = if focus {
            enemies.iter().min_by_key(|c| c.hp())
        } else {
            rng.choose(enemies)
        };

        match target {
            Some(target) => {
                tracing::debug!(
                    "{} attacks {} ({})",
                    me.name,
                    target.name,
                    if focus { "weakest" } else { "random" }
                );
                Action::attack(me.id, target.id)
            }
            None => Action::pass(me.id),
        }
    }
}

impl ActionPolicy for HeuristicAi {
    fn choose_action(
        &self,
        state: &BattleState,
        actor: CharacterId,
        rng: &mut BattleRng,
    ) -> Action {
        let (Some(me), Some(side)) = (state.character(actor), state.side_of(actor)) else {
            return Action::pass(actor);
        };

        let enemies: Vec<&Character> = state.team(side.opponent()).alive().collect();
        if enemies.is_empty() {
            tracing::debug!("{} has no enemies left and passes", me.name);
            return Action::pass(actor);
        }
        let allies: Vec<&Character> = state.team(side).alive().collect();
        let usable: Vec<&Skill> = me.affordable_skills().collect();

        self.emergency_heal(me, &allies, &usable)
            .or_else(|| self.area_skill(me, &enemies, &usable, rng))
            .or_else(|| self.buff(me, state, &allies, &usable, rng))
            .or_else(|| self.offensive_skill(me, &enemies, &usable, rng))
            .unwrap_or_else(|| self.attack(me, &enemies, rng))
    }
}

fn by_ratio(a: &Character, b: &Character) -> Ordering {
    a.hp_ratio()
        .partial_cmp(&b.hp_ratio())
        .unwrap_or(Ordering::Equal)
}

/// The target to put on the action: only single-target categories name one.
fn chosen_target(skill: &Skill, target: CharacterId) -> Option<CharacterId> {
    skill.target.needs_choice().then_some(target)
}
