// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required).
// Both tiers return `ApiResult<T>`; errors are translated once, by `ApiError`.

pub mod health;
pub mod protected;
pub mod public;

pub use health::health;
