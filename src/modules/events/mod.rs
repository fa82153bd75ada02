//! Campus events screen: the canonical gated list/create module.

pub mod controller;
pub mod model;

pub use controller::EventsScreen;
pub use model::EventsStatus;
