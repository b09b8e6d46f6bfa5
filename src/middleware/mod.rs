pub mod auth;
pub mod gate;

pub use auth::{bearer_token, identity_from_headers, Identity};
pub use gate::{gate_middleware, Access, Gate, RoutePolicy};
