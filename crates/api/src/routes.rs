pub mod catalog;
pub mod customers;
pub mod health;
pub mod orders;
pub mod slots;
