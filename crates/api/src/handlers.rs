pub mod catalog;
pub mod customers;
pub mod loyalty;
pub mod orders;
pub mod slots;
