pub mod player;
pub mod team;
pub mod user;

pub use player::{Player, PlayerStats};
pub use team::{NewTeam, Team};
pub use user::{NewUser, User};
