//! Plain-text rendering of battle events and state.

use std::fmt::Write;

use crate::core::{BattleResult, BattleState, CharacterId, Side};
use crate::events::{BattleEvent, BattleObserver};
use crate::roster::{Character, StatusKind};

/// Prints every event as plain text lines on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BattleObserver for ConsoleObserver {
    fn on_event(&mut self, event: &BattleEvent, state: &BattleState) {
        if let Some(text) = render_event(event, state) {
            println!("{}", text);
        }
    }
}

fn name_of(state: &BattleState, id: CharacterId) -> String {
    state
        .character(id)
        .map_or_else(|| id.to_string(), |c| c.name.clone())
}

/// Text for one event, or `None` for events not worth showing.
#[must_use]
pub fn render_event(event: &BattleEvent, state: &BattleState) -> Option<String> {
    let text = match event {
        BattleEvent::BattleStart => {
            let [a, b] = Side::ALL.map(|side| state.team(side).name.as_str());
            format!("=== {} vs {} ===", a, b)
        }
        BattleEvent::BattleEnd { result, rounds } => {
            let outcome = match result {
                BattleResult::Winner(side) => format!("{} wins", state.team(*side).name),
                BattleResult::Draw => "Draw".to_string(),
            };
            format!("=== {} after {} round(s) ===", outcome, rounds)
        }
        BattleEvent::RoundStart { round, .. } => format!("--- Round {} ---", round),
        BattleEvent::TurnStart { .. } | BattleEvent::TurnEnd { .. } => return None,
        BattleEvent::TurnSkipped { actor, cause } => {
            let condition = match cause {
                StatusKind::Freeze => "frozen",
                _ => "stunned",
            };
            format!("{} is {} and cannot act", name_of(state, *actor), condition)
        }
        BattleEvent::ActionExecuted(result) => {
            if result.messages.is_empty() {
                return None;
            }
            result.messages.join("\n")
        }
        BattleEvent::EffectTriggered {
            target,
            kind,
            amount,
        } => match kind {
            StatusKind::HealOverTime => {
                format!("{} recovers {} hp", name_of(state, *target), amount)
            }
            _ => format!("{} takes {} damage from {}", name_of(state, *target), amount, kind),
        },
        BattleEvent::StatusRemoved { target, name, .. } => {
            format!("{}'s {} wore off", name_of(state, *target), name)
        }
    };
    Some(text)
}

fn character_line(out: &mut String, label: &str, character: &Character) {
    let _ = write!(
        out,
        "  {} {:<16} HP {:>4}/{:<4} CK {:>3}/{:<3}",
        label,
        character.name,
        character.hp(),
        character.max_hp,
        character.chakra(),
        character.max_chakra
    );
    for status in character.statuses() {
        match status.remaining() {
            Some(turns) => {
                let _ = write!(out, " [{} {}]", status.name, turns);
            }
            None => {
                let _ = write!(out, " [{}]", status.name);
            }
        }
    }
    out.push('\n');
}

/// Both teams, living members numbered the way commands index them.
#[must_use]
pub fn status_report(state: &BattleState) -> String {
    let mut out = String::new();
    for side in Side::ALL {
        let team = state.team(side);
        if team.buffs.is_empty() {
            let _ = writeln!(out, "{}", team.name);
        } else {
            let _ = writeln!(out, "{} ({})", team.name, team.buffs.join(", "));
        }

        let mut index = 0;
        for character in team.members() {
            let label = if character.is_alive() {
                index += 1;
                format!("{:>2}.", index)
            } else {
                " x.".to_string()
            };
            character_line(&mut out, &label, character);
        }
    }
    out
}

/// Prompt shown when `actor` has to choose an action.
#[must_use]
pub fn turn_prompt(state: &BattleState, actor: CharacterId) -> String {
    let Some(character) = state.character(actor) else {
        return format!("{}> ", actor);
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}'s turn (HP {}/{}, CK {}/{})",
        character.name,
        character.hp(),
        character.max_hp,
        character.chakra(),
        character.max_chakra
    );
    for (i, skill) in character.skills.iter().enumerate() {
        let readiness = if skill.is_ready() {
            "ready".to_string()
        } else {
            format!("{} round(s)", skill.current_cooldown)
        };
        let _ = writeln!(
            out,
            "  s{} {} ({} CK, {}): {}",
            i + 1,
            skill.name,
            skill.cost,
            readiness,
            skill.description
        );
    }
    out.push_str("> ");
    out
}

/// Command reference for the `help` command.
#[must_use]
pub fn help_text() -> &'static str {
    "Commands:
  attack <n>    (a)   attack living enemy n
  skill <k> <n> (s)   use skill k, on target n if it needs one
  item          (i)   use an item
  pass          (p)   skip the turn
  status        (st)  show both teams
  help          (h)   show this list
Target numbers count living enemies, or living allies for ally skills."
}
