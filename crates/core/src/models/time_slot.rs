use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A bookable pickup or delivery window in bakery-local time.
///
/// Slots are derived on every query and never stored; an order only records
/// the start and end it was booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub capacity: u32,
}

/// A generated slot annotated with the orders already placed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub capacity: u32,
    pub booked: u32,
    pub remaining: u32,
}

impl SlotAvailability {
    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub date: chrono::NaiveDate,
    pub slots: Vec<SlotAvailability>,
}
