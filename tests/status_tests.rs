//! Status effect tests.
//!
//! These tests use the built-in roster's skills to check the status
//! lifecycle end to end:
//! - Application and periodic effects
//! - Expiry
//! - Immunity, shields and cleansing
//! - Stat modifiers feeding combat

use chakra_clash::core::{
    Action, ActionResult, BattleConfig, BattleRng, BattleState, CharacterId, StatusChange,
};
use chakra_clash::effects::{ActionResolver, StatusProcessor};
use chakra_clash::events::BattleEvent;
use chakra_clash::roster::{Roster, SkillId, StatusEffect, StatusKind, Team};

const SASUKE: CharacterId = CharacterId::new(1);
const SAKURA: CharacterId = CharacterId::new(2);
const NARUTO: CharacterId = CharacterId::new(3);
const GAARA: CharacterId = CharacterId::new(4);
const NEJI: CharacterId = CharacterId::new(5);

const AMATERASU: SkillId = SkillId::new(5);
const MYSTICAL_PALM: SkillId = SkillId::new(8);
const SHARINGAN_INSIGHT: SkillId = SkillId::new(12);
const PALM_ROTATION: SkillId = SkillId::new(14);
const ARMOUR_OF_SAND: SkillId = SkillId::new(18);

/// Sasuke, Sakura and Naruto against Gaara and Neji. Kakashi's debuff
/// is given to Naruto so it can be cast on demand.
fn state() -> BattleState {
    let roster = Roster::builtin().expect("builtin roster");
    let spawn = |key: &str, id: CharacterId| roster.spawn(key, id, false).expect("template");

    let mut naruto = spawn("naruto", NARUTO);
    let insight = roster
        .skill(SHARINGAN_INSIGHT)
        .cloned()
        .expect("builtin skill");
    naruto.skills.push(insight);

    BattleState::new(
        Team::new(
            "Leaf",
            vec![spawn("sasuke", SASUKE), spawn("sakura", SAKURA), naruto],
        ),
        Team::new("Sand", vec![spawn("gaara", GAARA), spawn("neji", NEJI)]),
    )
    .expect("valid teams")
}

fn cast(
    state: &mut BattleState,
    actor: CharacterId,
    skill: SkillId,
    target: Option<CharacterId>,
) -> ActionResult {
    let mut rng = BattleRng::new(8);
    let result = ActionResolver::resolve(
        state,
        &Action::skill(actor, skill, target),
        &mut rng,
        &BattleConfig::default(),
    );
    assert!(result.success, "{:?}", result.messages);
    result
}

fn hp(state: &BattleState, id: CharacterId) -> i32 {
    state.character(id).unwrap().hp()
}

/// Amaterasu burns for 40 on each of three round starts, then expires.
#[test]
fn test_damage_over_time_lifecycle() {
    let mut state = state();
    let result = cast(&mut state, SASUKE, AMATERASU, Some(NEJI));

    assert_eq!(
        result.status_changes,
        vec![StatusChange::Applied {
            target: NEJI,
            kind: StatusKind::DamageOverTime
        }]
    );
    assert_eq!(hp(&state, NEJI), 800);

    let mut triggered = 0;
    let mut removed = Vec::new();
    for _ in 0..3 {
        let neji = state.character_mut(NEJI).unwrap();
        for event in StatusProcessor::apply_round_effects(neji) {
            match event {
                BattleEvent::EffectTriggered { amount, .. } => {
                    assert_eq!(amount, 40);
                    triggered += 1;
                }
                BattleEvent::StatusRemoved { name, .. } => removed.push(name),
                other => panic!("Unexpected event {:?}", other),
            }
        }
    }

    assert_eq!(triggered, 3);
    assert_eq!(hp(&state, NEJI), 680);
    assert_eq!(removed, vec!["Amaterasu".to_string()]);
    assert!(state.character(NEJI).unwrap().statuses().is_empty());
}

/// Armour of Sand grants immunity, so Amaterasu is resisted.
#[test]
fn test_immunity_resists_harmful_status() {
    let mut state = state();
    cast(&mut state, GAARA, ARMOUR_OF_SAND, None);

    let gaara = state.character(GAARA).unwrap();
    assert!(gaara.has_status(StatusKind::Immunity));
    assert!(gaara.has_status(StatusKind::DefenseUp));

    let result = cast(&mut state, SASUKE, AMATERASU, Some(GAARA));
    assert_eq!(
        result.status_changes,
        vec![StatusChange::Resisted {
            target: GAARA,
            kind: StatusKind::DamageOverTime
        }]
    );
    assert!(!state
        .character(GAARA)
        .unwrap()
        .has_status(StatusKind::DamageOverTime));
}

/// Palm Rotation's shield soaks up an attack before any hp is lost.
#[test]
fn test_shield_absorbs_attack() {
    let mut state = state();
    cast(&mut state, NEJI, PALM_ROTATION, None);
    assert_eq!(state.character(NEJI).unwrap().shield(), 120);

    // 95 attack against 75 defense raised by 40%: 95 - 105 / 2 = 43
    let mut rng = BattleRng::new(1);
    let result = ActionResolver::resolve(
        &mut state,
        &Action::attack(SASUKE, NEJI),
        &mut rng,
        &BattleConfig::default(),
    );

    assert!(result.success);
    assert_eq!(hp(&state, NEJI), 800);
    assert_eq!(state.character(NEJI).unwrap().shield(), 77);
}

/// Mystical Palm heals and strips harmful statuses, keeping buffs.
#[test]
fn test_cleansing_heal() {
    let mut state = state();
    let naruto = state.character_mut(NARUTO).unwrap();
    naruto.set_hp(500);
    naruto.add_status(StatusEffect::new(StatusKind::DamageOverTime, 30, 3));
    naruto.add_status(StatusEffect::new(StatusKind::AttackDown, 20, 2));
    naruto.add_status(StatusEffect::new(StatusKind::AttackUp, 30, 2));

    let result = cast(&mut state, SAKURA, MYSTICAL_PALM, Some(NARUTO));

    // 100 + 65 * 50%
    assert_eq!(result.total_healing(), 132);
    assert_eq!(hp(&state, NARUTO), 632);

    let kinds: Vec<StatusKind> = state
        .character(NARUTO)
        .unwrap()
        .statuses()
        .iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(kinds, vec![StatusKind::AttackUp]);
    assert_eq!(
        result
            .status_changes
            .iter()
            .filter(|c| matches!(c, StatusChange::Removed { .. }))
            .count(),
        2
    );
}

/// Attack Down lowers the damage the target's attacks deal.
#[test]
fn test_attack_down_weakens_attacks() {
    let mut state = state();
    cast(&mut state, NARUTO, SHARINGAN_INSIGHT, Some(GAARA));

    let gaara = state.character(GAARA).unwrap();
    // 80 * (100 - 30) / 100
    assert_eq!(gaara.effective_attack(), 56);

    let mut rng = BattleRng::new(1);
    let result = ActionResolver::resolve(
        &mut state,
        &Action::attack(GAARA, SASUKE),
        &mut rng,
        &BattleConfig::default(),
    );
    // 56 - 65 / 2
    assert_eq!(result.total_damage(), 24);
}

/// A status is gone after one pass at duration 1 and survives one pass
/// at duration 2.
#[test]
fn test_expiry_boundaries() {
    let mut state = state();
    let sakura = state.character_mut(SAKURA).unwrap();
    sakura.add_status(StatusEffect::new(StatusKind::SpeedUp, 10, 1));
    sakura.add_status(StatusEffect::new(StatusKind::DefenseUp, 10, 2));

    let events = StatusProcessor::apply_round_effects(sakura);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        BattleEvent::StatusRemoved {
            kind: StatusKind::SpeedUp,
            ..
        }
    ));

    let remaining: Vec<(StatusKind, Option<u32>)> = sakura
        .statuses()
        .iter()
        .map(|s| (s.kind, s.remaining()))
        .collect();
    assert_eq!(remaining, vec![(StatusKind::DefenseUp, Some(1))]);
}
