pub mod error;
pub mod historical;
