//! Rules that change characters.
//!
//! - `SkillEffect`: the atomic effects a skill is built from
//! - `TargetCategory` / `TargetSelector`: who a skill hits
//! - `ActionResolver`: executes attacks, skills, items and passes
//! - `StatusProcessor`: ticks statuses at every round start

pub mod effect;
pub mod resolver;
pub mod status;
pub mod targeting;

pub use effect::{ChakraRecipient, SkillEffect};
pub use resolver::ActionResolver;
pub use status::StatusProcessor;
pub use targeting::{TargetCategory, TargetSelector, Targets};
