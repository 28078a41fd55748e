// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Route prefix: /api/v1. ID validation runs first, then JWT authentication,
// so every handler here can take `AuthUser` and trust numeric path IDs.

pub mod analytics;
pub mod auth;
pub mod players;
pub mod teams;
pub mod users;
