//! Round preparation and turn order.

use crate::core::{BattleRng, BattleState, CharacterId};
use crate::effects::StatusProcessor;
use crate::events::BattleEvent;

/// Prepares each new round.
pub struct TurnScheduler;

impl TurnScheduler {
    /// Start the next round.
    ///
    /// 1. Increment the round counter
    /// 2. Tick skill cooldowns
    /// 3. Regenerate chakra for living characters
    /// 4. Process statuses on living characters
    /// 5. Order the characters still alive: shuffle, then stable-sort by
    ///    effective speed, fastest first, so ties fall to the seeded RNG
    /// 6. Reset the cursor
    ///
    /// Returns the status events followed by `RoundStart`. An empty order
    /// means nobody is left standing.
    pub fn prepare_round(state: &mut BattleState, rng: &mut BattleRng) -> Vec<BattleEvent> {
        state.round += 1;
        let mut events = Vec::new();

        for character in state.characters_mut() {
            character.tick_cooldowns();
            if !character.is_alive() {
                continue;
            }
            character.restore_chakra(character.chakra_regen);
            events.extend(StatusProcessor::apply_round_effects(character));
        }

        let mut order: Vec<(CharacterId, i32)> = state
            .characters()
            .filter(|c| c.is_alive())
            .map(|c| (c.id, c.effective_speed()))
            .collect();
        rng.shuffle(&mut order);
        order.sort_by(|a, b| b.1.cmp(&a.1));

        state.turn_order = order.into_iter().map(|(id, _)| id).collect();
        state.cursor = 0;

        events.push(BattleEvent::RoundStart {
            round: state.round,
            order: state.turn_order.clone(),
        });
        events
    }
}
