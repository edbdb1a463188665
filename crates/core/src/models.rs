pub mod customer;
pub mod loyalty;
pub mod opening_hours;
pub mod order;
pub mod product;
pub mod slot_policy;
pub mod time_slot;
