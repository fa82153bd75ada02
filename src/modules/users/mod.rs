//! User-role administration.

pub mod service;

pub use service::{UserAdmin, can_manage_target};
