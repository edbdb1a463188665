//! # Bakeshop Core
//!
//! Domain types and pure business rules for the bakery storefront: pickup and
//! delivery slot generation, the per-user session context, catalog pricing,
//! order validation and the loyalty offers ladder.
//!
//! Nothing in this crate performs I/O. Collaborators that read configuration
//! are expressed as traits (see [`slots::SlotConfigSource`]) and implemented by
//! the database crate.

pub mod catalog;
pub mod errors;
pub mod loyalty;
pub mod models;
pub mod session;
pub mod slots;
