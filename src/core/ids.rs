//! Identifiers for battle participants.
//!
//! ## CharacterId
//!
//! Every character taking part in a battle gets a `CharacterId` that is
//! unique for that battle. Templates in the roster are keyed by string;
//! the id is assigned when a template is spawned into a battle.
//!
//! ## Side
//!
//! A battle always has exactly two teams. `Side` names them and gives
//! O(1) indexing into per-side storage.

use serde::{Deserialize, Serialize};

/// Unique identifier for a character within one battle.
///
/// ```
/// use chakra_clash::core::CharacterId;
///
/// let id = CharacterId::new(3);
/// assert_eq!(id.raw(), 3);
/// assert_eq!(format!("{}", id), "#3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Create a new character ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two opposing teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, A first.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Index into two-element per-side storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Team A"),
            Side::B => write!(f, "Team B"),
        }
    }
}
