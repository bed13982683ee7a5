//! Alliance identification and per-alliance data storage.
//!
//! ## Team
//!
//! The two alliances, Red and Blue.
//!
//! ## TeamMap
//!
//! Per-team storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two alliances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Both teams in index order.
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    /// Get the team index (Red = 0, Blue = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    /// The opposing alliance.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Relabel this team in `viewer`'s frame, where the viewer is always Red.
    #[must_use]
    pub const fn relative_to(self, viewer: Team) -> Self {
        match viewer {
            Team::Red => self,
            Team::Blue => self.opponent(),
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Red => write!(f, "Red"),
            Team::Blue => write!(f, "Blue"),
        }
    }
}

/// Per-team data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_hubsim::core::{Team, TeamMap};
///
/// let mut score: TeamMap<u32> = TeamMap::with_value(0);
/// score[Team::Blue] += 3;
///
/// assert_eq!(score[Team::Red], 0);
/// assert_eq!(score[Team::Blue], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(factory: impl Fn(Team) -> T) -> Self {
        Self {
            data: [factory(Team::Red), factory(Team::Blue)],
        }
    }

    /// Create a new TeamMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a team's data.
    #[must_use]
    pub fn get(&self, team: Team) -> &T {
        &self.data[team.index()]
    }

    /// Get a mutable reference to a team's data.
    pub fn get_mut(&mut self, team: Team) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (Team, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        Team::ALL.into_iter().zip(self.data.iter())
    }

    /// Return a copy with the two entries swapped, so that `team` comes first.
    #[must_use]
    pub fn ordered_for(&self, team: Team) -> Self
    where
        T: Clone,
    {
        Self {
            data: [self[team].clone(), self[team.opponent()].clone()],
        }
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        self.get_mut(team)
    }
}
