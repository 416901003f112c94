//! Player command parsing.
//!
//! Commands are single lines of text:
//!
//! | Command            | Meaning                                   |
//! |--------------------|-------------------------------------------|
//! | `attack <n>`, `a`  | basic attack on living enemy `n`          |
//! | `skill <k> [n]`, `s` | skill `k` on target `n` if it needs one |
//! | `item`, `i`        | use an item                               |
//! | `pass`, `p`        | do nothing                                |
//! | `status`, `st`     | show both teams                           |
//! | `help`, `h`        | list commands                             |
//!
//! Numbers are 1-based. A target number indexes the living enemies, or the
//! living allies for skills aimed at the caster's own side.

use thiserror::Error;

use crate::core::{Action, BattleState, CharacterId};

/// A parsed player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Attack { target: usize },
    Skill { skill: usize, target: Option<usize> },
    Item,
    Pass,
    Status,
    Help,
}

/// Why a line could not be turned into an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("type a command, or 'help' for the list")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a number from 1 up")]
    BadNumber(String),

    #[error("there is no skill {0}")]
    NoSuchSkill(usize),

    #[error("there is no target {0}")]
    NoSuchTarget(usize),
}

/// Parse one line of input.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(InputError::Empty);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "attack" | "a" => Command::Attack {
            target: number(words.next(), "attack", "a target number")?,
        },
        "skill" | "s" => Command::Skill {
            skill: number(words.next(), "skill", "a skill number")?,
            target: words.next().map(parse_index).transpose()?,
        },
        "item" | "i" => Command::Item,
        "pass" | "p" => Command::Pass,
        "status" | "st" => Command::Status,
        "help" | "h" => Command::Help,
        _ => return Err(InputError::UnknownCommand(verb.to_string())),
    };
    Ok(command)
}

fn number(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<usize, InputError> {
    let word = word.ok_or(InputError::MissingArgument { command, argument })?;
    parse_index(word)
}

fn parse_index(word: &str) -> Result<usize, InputError> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(InputError::BadNumber(word.to_string())),
    }
}

impl Command {
    /// Turn the command into an action for `actor`.
    ///
    /// `Status` and `Help` are not actions and give `Ok(None)`. The
    /// result is only structurally valid; cost, cooldown and target rules
    /// are checked when the action resolves.
    pub fn to_action(
        &self,
        state: &BattleState,
        actor: CharacterId,
    ) -> Result<Option<Action>, InputError> {
        let action = match *self {
            Command::Attack { target } => {
                let target = pick(&enemies(state, actor), target)?;
                Action::attack(actor, target)
            }
            Command::Skill { skill, target } => {
                let chosen = state
                    .character(actor)
                    .zip(skill.checked_sub(1))
                    .and_then(|(c, i)| c.skills.get(i))
                    .ok_or(InputError::NoSuchSkill(skill))?;

                let target = if chosen.target.needs_choice() {
                    let index = target.ok_or(InputError::MissingArgument {
                        command: "skill",
                        argument: "a target number",
                    })?;
                    let pool = if chosen.target.is_friendly() {
                        allies(state, actor)
                    } else {
                        enemies(state, actor)
                    };
                    Some(pick(&pool, index)?)
                } else {
                    None
                };
                Action::skill(actor, chosen.id, target)
            }
            Command::Item => Action::item(actor),
            Command::Pass => Action::pass(actor),
            Command::Status | Command::Help => return Ok(None),
        };
        Ok(Some(action))
    }
}

/// Living enemies of `actor`, in team order.
#[must_use]
pub fn enemies(state: &BattleState, actor: CharacterId) -> Vec<CharacterId> {
    state
        .side_of(actor)
        .map(|side| state.alive_ids(side.opponent()))
        .unwrap_or_default()
}

/// Living allies of `actor` (itself included), in team order.
#[must_use]
pub fn allies(state: &BattleState, actor: CharacterId) -> Vec<CharacterId> {
    state
        .side_of(actor)
        .map(|side| state.alive_ids(side))
        .unwrap_or_default()
}

fn pick(pool: &[CharacterId], index: usize) -> Result<CharacterId, InputError> {
    index
        .checked_sub(1)
        .and_then(|i| pool.get(i))
        .copied()
        .ok_or(InputError::NoSuchTarget(index))
}
