//! # chakra-clash
//!
//! A turn-based team battle engine.
//!
//! Two teams of characters fight in rounds. Each round every living
//! character acts once, fastest first. Characters attack, cast skills
//! that cost chakra and carry cooldowns, and pick up timed status effects
//! (damage or healing over time, stat modifiers, stuns, shields).
//!
//! ## Design Principles
//!
//! 1. **One owner**: `Battle` owns the state and the RNG. Rules are plain
//!    functions over `&mut BattleState`, so every step is testable alone.
//!
//! 2. **Deterministic**: all randomness flows from one seeded `BattleRng`.
//!    The same seed and the same inputs replay the same battle.
//!
//! 3. **Failures are results**: an invalid action produces an unsuccessful
//!    `ActionResult`; `BattleError` is reserved for misuse of the API.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, actions, battle state
//! - `roster`: characters, teams, skills, statuses, JSON templates
//! - `effects`: skill effects, targeting, action resolution, status ticks
//! - `events`: battle events and observers
//! - `battle`: turn scheduling, AI and the orchestrator
//! - `cli`: command parsing and console rendering for the binary

pub mod battle;
pub mod cli;
pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod roster;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionFailure, ActionKind, ActionResult, AiConfig, BattleConfig, BattlePhase,
    BattleResult, BattleRng, BattleState, CharacterId, Side,
};

pub use crate::roster::{Character, Roster, Skill, SkillId, StatusEffect, StatusKind, Team};

pub use crate::effects::{ActionResolver, SkillEffect, StatusProcessor, TargetCategory};

pub use crate::events::{BattleEvent, BattleObserver, EventLog, TracingObserver};

pub use crate::battle::{ActionPolicy, Battle, BattleStatus, HeuristicAi, TurnScheduler};

pub use crate::error::{BattleError, LoadError};
