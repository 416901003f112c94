//! Event observers.
//!
//! Observers are handed every event together with a read-only view of
//! the state it happened in. The battle fans events out to all of its
//! observers in registration order.
//!
//! - `EventLog`: records events; clones share the same log
//! - `TracingObserver`: mirrors events as structured `tracing` records
//! - `NullObserver`: ignores everything

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use super::event::BattleEvent;
use crate::core::{BattleState, Side};

/// Receives battle events.
pub trait BattleObserver {
    fn on_event(&mut self, event: &BattleEvent, state: &BattleState);
}

/// Observer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {
    fn on_event(&mut self, _event: &BattleEvent, _state: &BattleState) {}
}

/// In-memory event recorder.
///
/// Cloning returns a handle to the same log, so a test can keep one
/// handle and give the other to the battle.
///
/// ```
/// use chakra_clash::events::{BattleEvent, BattleObserver, EventLog};
/// # use chakra_clash::core::{BattleState, CharacterId};
/// # use chakra_clash::roster::{Character, Team};
/// # let state = BattleState::new(
/// #     Team::new("A", vec![Character::new(CharacterId::new(1), "a", 10)]),
/// #     Team::new("B", vec![Character::new(CharacterId::new(2), "b", 10)]),
/// # ).unwrap();
///
/// let log = EventLog::new();
/// let mut handle = log.clone();
/// handle.on_event(&BattleEvent::BattleStart, &state);
///
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<BattleEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return every recorded event.
    pub fn drain(&self) -> Vec<BattleEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of recorded events with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }
}

impl BattleObserver for EventLog {
    fn on_event(&mut self, event: &BattleEvent, _state: &BattleState) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Mirrors events as `tracing` records.
///
/// Battle start and end are logged at `info`, everything else at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl BattleObserver for TracingObserver {
    fn on_event(&mut self, event: &BattleEvent, state: &BattleState) {
        let name = event.name();
        match event {
            BattleEvent::BattleStart => {
                info!(
                    event = name,
                    team_a = %state.team(Side::A).name,
                    team_b = %state.team(Side::B).name,
                    "battle started"
                );
            }
            BattleEvent::BattleEnd { result, rounds } => {
                info!(event = name, %result, rounds, "battle ended");
            }
            BattleEvent::RoundStart { round, order } => {
                debug!(event = name, round, actors = order.len(), "round started");
            }
            BattleEvent::TurnStart { actor } | BattleEvent::TurnEnd { actor } => {
                debug!(event = name, %actor, round = state.round);
            }
            BattleEvent::TurnSkipped { actor, cause } => {
                debug!(event = name, %actor, %cause, "turn skipped");
            }
            BattleEvent::ActionExecuted(result) => {
                debug!(
                    event = name,
                    actor = %result.action.actor,
                    kind = ?result.action.kind,
                    success = result.success,
                    damage = result.total_damage(),
                    healing = result.total_healing(),
                    chakra_spent = result.chakra_spent,
                    "action resolved"
                );
            }
            BattleEvent::EffectTriggered {
                target,
                kind,
                amount,
            } => {
                debug!(event = name, %target, %kind, amount, "status triggered");
            }
            BattleEvent::StatusRemoved {
                target,
                kind,
                name: status,
            } => {
                debug!(event = name, %target, %kind, status = %status, "status expired");
            }
        }
    }
}
