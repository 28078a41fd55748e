pub mod manager;
pub mod models;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewTeam, NewUser, Player, PlayerStats, Team, User};
