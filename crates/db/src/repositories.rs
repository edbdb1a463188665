pub mod catalog;
pub mod customer;
pub mod loyalty;
pub mod order;
pub mod slot_config;
