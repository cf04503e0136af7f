//! Application services for the access context.

mod auth;

pub use auth::{
    AccessError, AccessResult, AuthService, DEFAULT_SESSION_TTL_MINUTES, GUEST_EMAIL,
    MAX_SESSION_TTL_MINUTES,
};
