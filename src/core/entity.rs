//! Robot identification.
//!
//! Every robot on the field has a `RobotId` equal to its slot in the
//! roster. Slot order is the tie-break order used by the resolver, so
//! identical inputs always resolve identically.
//!
//! ## ID Layout
//!
//! - `0..3`: Red alliance
//! - `3..6`: Blue alliance
//!
//! ```
//! use rust_hubsim::core::{RobotId, Team};
//!
//! let id = RobotId::new(4);
//! assert!(id.is_valid());
//! assert_eq!(id.default_team(), Team::Blue);
//!
//! // Blue sees itself first: its robot 4 is slot 1 in its own view.
//! assert_eq!(id.relative_to(Team::Blue), RobotId::new(1));
//! ```

use serde::{Deserialize, Serialize};

use super::team::Team;

/// Total robots on the field.
pub const ROBOT_COUNT: usize = 6;

/// Robots per alliance.
pub const ROBOTS_PER_TEAM: usize = 3;

/// Unique identifier for a robot, equal to its roster slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId(pub u8);

impl RobotId {
    /// Create a robot ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the roster slot (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this ID addresses a roster slot.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < ROBOT_COUNT
    }

    /// The alliance that owns this slot in a standard roster.
    #[must_use]
    pub const fn default_team(self) -> Team {
        if (self.0 as usize) < ROBOTS_PER_TEAM {
            Team::Red
        } else {
            Team::Blue
        }
    }

    /// Map between absolute slots and a team's own-robots-first view.
    ///
    /// Red's view is the identity. Blue's view swaps the two halves of
    /// the roster. The mapping is its own inverse, so the same call
    /// converts in both directions.
    #[must_use]
    pub const fn relative_to(self, team: Team) -> Self {
        match team {
            Team::Red => self,
            Team::Blue => Self(((self.0 as usize + ROBOTS_PER_TEAM) % ROBOT_COUNT) as u8),
        }
    }

    /// Iterate over all roster slots in resolution order.
    pub fn all() -> impl Iterator<Item = RobotId> {
        (0..ROBOT_COUNT as u8).map(RobotId)
    }
}

impl std::fmt::Display for RobotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Robot({})", self.0)
    }
}
