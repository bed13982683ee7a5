//! Policies and full-match rollouts.
//!
//! A `Policy` controls one alliance. It always plays from Red's seat:
//! `act` receives the snapshot relabelled by `MatchSnapshot::for_team`,
//! a robot ID in that frame (0..3 are its own robots), and answers with
//! an action in the same frame. `team_actions` translates back to
//! absolute terms, so any policy can play either side.
//!
//! - `HoldPolicy`: never acts
//! - `RandomPolicy`: uniform over the discrete action space
//! - `ShuttlePolicy`: intake, carry to the own hub, shoot, repeat

pub mod simple;
pub mod rollout;

pub use rollout::{run_match, MatchReport, RolloutOptions};
pub use simple::{HoldPolicy, RandomPolicy, ShuttlePolicy};

use crate::core::action::RobotAction;
use crate::core::entity::{RobotId, ROBOTS_PER_TEAM, ROBOT_COUNT};
use crate::core::snapshot::MatchSnapshot;
use crate::core::team::Team;

/// Decision maker for one alliance, seen from Red's seat.
pub trait Policy: Send {
    /// Name for logs and reports.
    fn name(&self) -> &str;

    /// Choose an action for `robot` (one of `0..3` in the view's frame).
    fn act(&mut self, view: &MatchSnapshot, robot: RobotId) -> RobotAction;

    /// Called at the start of each match.
    fn reset(&mut self) {}
}

/// Ask `policy` for `team`'s three actions and write them, in absolute
/// terms, into `actions`.
pub fn team_actions(
    policy: &mut dyn Policy,
    snapshot: &MatchSnapshot,
    team: Team,
    actions: &mut [RobotAction; ROBOT_COUNT],
) {
    let view = snapshot.for_team(team);
    for slot in 0..ROBOTS_PER_TEAM as u8 {
        let own = RobotId::new(slot);
        let absolute = own.relative_to(team);
        actions[absolute.index()] = policy.act(&view, own).for_team(team);
    }
}
