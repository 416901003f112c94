//! Round-start status processing.
//!
//! Every living character goes through one pass per round:
//!
//! 1. Each status, in attachment order, loses one turn of duration
//!    (permanent statuses are exempt).
//! 2. Periodic statuses fire: damage over time straight to hp
//!    (shields do not absorb it), heal over time up to max hp.
//! 3. Statuses that ran out, and shields drained to nothing, are
//!    detached.
//!
//! A status with one turn left still fires on the pass that removes it.

use crate::events::BattleEvent;
use crate::roster::{Character, StatusKind};

/// Applies per-round status effects to a character.
pub struct StatusProcessor;

impl StatusProcessor {
    /// Run one round-start pass over `character`'s statuses.
    ///
    /// Returns the events produced, in order: every trigger first, then
    /// every removal.
    pub fn apply_round_effects(character: &mut Character) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let target = character.id;

        let count = character.statuses().len();
        for index in 0..count {
            let Some(status) = character.statuses_mut().get_mut(index) else {
                break;
            };
            status.tick();
            let (kind, magnitude) = (status.kind, status.magnitude);

            let amount = match kind {
                StatusKind::DamageOverTime => character.lose_hp(magnitude),
                StatusKind::HealOverTime => character.heal(magnitude),
                _ => continue,
            };
            events.push(BattleEvent::EffectTriggered {
                target,
                kind,
                amount,
            });
        }

        let (expired, active): (Vec<_>, Vec<_>) = std::mem::take(character.statuses_mut())
            .into_iter()
            .partition(|status| status.is_expired());
        *character.statuses_mut() = active;

        events.extend(expired.into_iter().map(|status| BattleEvent::StatusRemoved {
            target,
            kind: status.kind,
            name: status.name,
        }));

        events
    }
}
