//! The battle loop.
//!
//! `Battle` owns the state, the RNG, the AI policy and the observers, and
//! walks the phases:
//!
//! ```text
//! NotStarted -> RoundInProgress -> AwaitingAction(id) -> ... -> Ended
//! ```
//!
//! AI turns resolve inside [`Battle::process_turn`]; it only returns when a
//! player-controlled character needs an action or the battle is over.

use crate::core::{
    Action, BattleConfig, BattlePhase, BattleResult, BattleRng, BattleState, CharacterId, Side,
};
use crate::effects::ActionResolver;
use crate::error::BattleError;
use crate::events::{BattleEvent, BattleObserver};
use crate::roster::Team;

use super::ai::{ActionPolicy, HeuristicAi};
use super::scheduler::TurnScheduler;

/// What the caller has to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleStatus {
    /// Call [`Battle::execute_action`] for this character.
    AwaitingInput(CharacterId),
    Ended(BattleResult),
}

/// A battle between two teams.
///
/// ## Example
///
/// ```
/// use chakra_clash::battle::{Battle, BattleStatus};
/// use chakra_clash::core::{BattleConfig, CharacterId};
/// use chakra_clash::roster::Roster;
/// use chakra_clash::roster::Team;
///
/// let roster = Roster::builtin().unwrap();
/// let leaf = Team::new("Leaf", vec![roster.spawn("naruto", CharacterId::new(1), false).unwrap()]);
/// let sand = Team::new("Sand", vec![roster.spawn("gaara", CharacterId::new(2), false).unwrap()]);
///
/// let mut battle = Battle::new(leaf, sand, BattleConfig::new().with_seed(3)).unwrap();
/// let result = battle.run_to_completion().unwrap();
///
/// assert_eq!(battle.result(), Some(result));
/// ```
pub struct Battle {
    state: BattleState,
    rng: BattleRng,
    config: BattleConfig,
    policy: Box<dyn ActionPolicy>,
    observers: Vec<Box<dyn BattleObserver>>,
    /// Whether `TurnStart` has gone out for the current actor.
    turn_started: bool,
}

impl Battle {
    /// Set up a battle. Fails if a team is empty or ids collide.
    pub fn new(team_a: Team, team_b: Team, config: BattleConfig) -> Result<Self, BattleError> {
        let state = BattleState::new(team_a, team_b)?;
        let rng = match config.seed {
            Some(seed) => BattleRng::new(seed),
            None => BattleRng::from_entropy(),
        };

        Ok(Self {
            state,
            rng,
            policy: Box::new(HeuristicAi::new(config.ai.clone())),
            config,
            observers: Vec::new(),
            turn_started: false,
        })
    }

    /// Add an observer (builder pattern).
    #[must_use]
    pub fn with_observer(mut self, observer: impl BattleObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Replace the AI policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: impl ActionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn add_observer(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    /// The final result, once the battle has ended.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        self.state.result
    }

    /// The winning side. `None` while running or after a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    // === Flow ===

    /// Announce the battle and prepare the first round.
    pub fn start(&mut self) -> Result<(), BattleError> {
        if self.state.phase != BattlePhase::NotStarted {
            return Err(BattleError::AlreadyStarted);
        }

        tracing::info!(
            seed = self.rng.seed(),
            team_a = %self.state.team(Side::A).name,
            team_b = %self.state.team(Side::B).name,
            "battle started"
        );
        self.emit(BattleEvent::BattleStart);
        self.state.phase = BattlePhase::RoundInProgress;
        self.begin_round();
        Ok(())
    }

    /// Run turns until a player has to act or the battle ends.
    ///
    /// Calling this again while waiting for input, or after the end,
    /// returns the same status without doing anything.
    pub fn process_turn(&mut self) -> Result<BattleStatus, BattleError> {
        match self.state.phase {
            BattlePhase::NotStarted => return Err(BattleError::NotStarted),
            BattlePhase::AwaitingAction(id) => return Ok(BattleStatus::AwaitingInput(id)),
            BattlePhase::Ended => {
                let result = self.state.result.unwrap_or(BattleResult::Draw);
                return Ok(BattleStatus::Ended(result));
            }
            BattlePhase::RoundInProgress => {}
        }

        loop {
            if let Some(result) = self.state.evaluate_result() {
                return Ok(self.finish(result));
            }

            let Some(actor) = self.state.current_actor() else {
                if self
                    .config
                    .max_rounds
                    .is_some_and(|max| self.state.round >= max)
                {
                    tracing::debug!("round limit {} reached", self.state.round);
                    return Ok(self.finish(BattleResult::Draw));
                }
                self.begin_round();
                continue;
            };

            let Some(character) = self.state.character(actor) else {
                self.state.advance();
                continue;
            };
            if !character.is_alive() {
                self.state.advance();
                self.turn_started = false;
                continue;
            }
            let player_controlled = character.player_controlled;
            let disabled_by = character
                .statuses()
                .iter()
                .find(|s| s.kind.disables())
                .map(|s| s.kind);

            if !self.turn_started {
                self.turn_started = true;
                self.emit(BattleEvent::TurnStart { actor });
            }

            if let Some(cause) = disabled_by {
                tracing::debug!("{} skips the turn ({:?})", actor, cause);
                self.emit(BattleEvent::TurnSkipped { actor, cause });
                self.end_turn(actor);
                continue;
            }

            if player_controlled {
                self.state.phase = BattlePhase::AwaitingAction(actor);
                return Ok(BattleStatus::AwaitingInput(actor));
            }

            let action = self.policy.choose_action(&self.state, actor, &mut self.rng);
            tracing::debug!("AI {} chose {:?}", actor, action.kind);
            if let Some(result) = self.apply_action(action) {
                return Ok(self.finish(result));
            }
        }
    }

    /// Resolve the player's action for the character being waited on,
    /// then keep going until the next player turn or the end.
    ///
    /// A failed action still uses up the turn.
    pub fn execute_action(&mut self, action: Action) -> Result<BattleStatus, BattleError> {
        let expected = match self.state.phase {
            BattlePhase::AwaitingAction(id) => id,
            BattlePhase::Ended => return Err(BattleError::BattleOver),
            BattlePhase::NotStarted | BattlePhase::RoundInProgress => {
                return Err(BattleError::NotAwaitingInput)
            }
        };
        if action.actor != expected {
            return Err(BattleError::WrongActor {
                expected,
                actual: action.actor,
            });
        }

        self.state.phase = BattlePhase::RoundInProgress;
        if let Some(result) = self.apply_action(action) {
            return Ok(self.finish(result));
        }
        self.process_turn()
    }

    /// Drive a battle with no player-controlled characters to the end,
    /// starting it first if needed.
    pub fn run_to_completion(&mut self) -> Result<BattleResult, BattleError> {
        if self.state.phase == BattlePhase::NotStarted {
            self.start()?;
        }
        match self.process_turn()? {
            BattleStatus::Ended(result) => Ok(result),
            BattleStatus::AwaitingInput(id) => Err(BattleError::NeedsInput(id)),
        }
    }

    // === Internals ===

    fn begin_round(&mut self) {
        let events = TurnScheduler::prepare_round(&mut self.state, &mut self.rng);
        tracing::debug!(
            "round {} prepared, order {:?}",
            self.state.round,
            self.state.turn_order
        );
        for event in events {
            self.emit(event);
        }
        self.turn_started = false;
    }

    /// Resolve, record and announce an action. Returns the outcome if it
    /// ended the battle, otherwise closes the turn.
    fn apply_action(&mut self, action: Action) -> Option<BattleResult> {
        let actor = action.actor;
        let result = ActionResolver::resolve(&mut self.state, &action, &mut self.rng, &self.config);

        let round = self.state.round;
        self.state.record(round, action, result.success);
        self.emit(BattleEvent::ActionExecuted(result));

        if let Some(outcome) = self.state.evaluate_result() {
            return Some(outcome);
        }
        self.end_turn(actor);
        None
    }

    fn end_turn(&mut self, actor: CharacterId) {
        self.emit(BattleEvent::TurnEnd { actor });
        self.state.advance();
        self.turn_started = false;
    }

    fn finish(&mut self, result: BattleResult) -> BattleStatus {
        self.state.result = Some(result);
        self.state.phase = BattlePhase::Ended;

        tracing::info!(rounds = self.state.round, %result, "battle ended");
        self.emit(BattleEvent::BattleEnd {
            result,
            rounds: self.state.round,
        });
        BattleStatus::Ended(result)
    }

    fn emit(&mut self, event: BattleEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event, &self.state);
        }
    }
}
