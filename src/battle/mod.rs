//! Battle flow: round scheduling, AI decisions and the orchestrator.

pub mod ai;
pub mod orchestrator;
pub mod scheduler;

pub use ai::{ActionPolicy, HeuristicAi};
pub use orchestrator::{Battle, BattleStatus};
pub use scheduler::TurnScheduler;
