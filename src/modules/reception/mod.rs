//! Reception desk: late passes and student lookup.

pub mod service;

pub use service::ReceptionDesk;
