//! Core battle types: identifiers, RNG, configuration, actions and state.
//!
//! Everything here is plain data. The rules that change it live in
//! `effects` (action resolution, status ticks) and `battle`
//! (scheduling and orchestration).

pub mod action;
pub mod config;
pub mod ids;
pub mod rng;
pub mod state;

pub use action::{Action, ActionFailure, ActionKind, ActionRecord, ActionResult, StatusChange};
pub use config::{AiConfig, BattleConfig};
pub use ids::{CharacterId, Side};
pub use rng::BattleRng;
pub use state::{BattlePhase, BattleResult, BattleState};
