pub mod approvals;
pub mod events;
pub mod reception;
pub mod users;
