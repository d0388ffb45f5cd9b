//! Shared data models spanning the service layers.

pub mod athlete;
pub mod game;
pub mod team;
pub mod user;

pub use athlete::{Athlete, AthleteSeason, AthleteStat};
pub use game::{Game, NewGame};
pub use team::{SeasonRecord, Team, TeamObservation, TeamStat};
pub use user::User;
