//! Entity model: characters, teams, skills and statuses, plus the JSON
//! template repository that produces them.

pub mod character;
pub mod registry;
pub mod skill;
pub mod status;
pub mod team;

pub use character::Character;
pub use registry::{CharacterTemplate, Roster};
pub use skill::{Skill, SkillId, SkillKind};
pub use status::{Duration, StatusEffect, StatusFilter, StatusKind, StatusTemplate};
pub use team::Team;
