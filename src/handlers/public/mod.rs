// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Route prefix: /api/v1/public. Only ID validation runs in front of these.

pub mod analytics;
pub mod auth;

pub use analytics::waiver_wire_get;
pub use auth::login_post;
