//! Teams.
//!
//! Membership is fixed for the whole battle: defeated members stay in
//! the list with 0 hp.

use serde::Serialize;

use super::character::Character;
use crate::core::CharacterId;

/// An ordered group of characters fighting on one side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub name: String,

    members: Vec<Character>,

    /// Team-wide buff tags, shown in the status report.
    pub buffs: Vec<String>,
}

impl Team {
    /// Create a team from its members, in display order.
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<Character>) -> Self {
        Self {
            name: name.into(),
            members,
            buffs: Vec::new(),
        }
    }

    /// Add a team buff tag (builder pattern).
    #[must_use]
    pub fn with_buff(mut self, buff: impl Into<String>) -> Self {
        self.buffs.push(buff.into());
        self
    }

    #[must_use]
    pub fn members(&self) -> &[Character] {
        &self.members
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.members.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member(&self, id: CharacterId) -> Option<&Character> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn member_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.members.iter_mut().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.member(id).is_some()
    }

    /// Living members, in team order.
    pub fn alive(&self) -> impl Iterator<Item = &Character> {
        self.members.iter().filter(|c| c.is_alive())
    }

    #[must_use]
    pub fn any_alive(&self) -> bool {
        self.members.iter().any(Character::is_alive)
    }

    /// No member is alive.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        !self.any_alive()
    }

    /// Mean hp ratio over living members, 0.0 if none are alive.
    #[must_use]
    pub fn average_hp_ratio(&self) -> f64 {
        let (sum, count) = self
            .alive()
            .fold((0.0, 0u32), |(sum, count), c| (sum + c.hp_ratio(), count + 1));
        if count == 0 {
            0.0
        } else {
            sum / f64::from(count)
        }
    }
}
