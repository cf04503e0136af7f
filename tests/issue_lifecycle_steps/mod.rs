//! Step definitions for issue lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
