pub mod error_handling;
pub mod maintenance;
