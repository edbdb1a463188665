use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOT_LENGTH_MINUTES: i32 = 45;
pub const DEFAULT_MAX_ORDERS_PER_SLOT: i32 = 2;
pub const DEFAULT_SAME_DAY_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(15, 0, 0) {
    Some(time) => time,
    None => panic!("default same-day cutoff is not a valid time"),
};
pub const DEFAULT_MAX_PREORDER_DAYS: i32 = 14;

/// Slot rules configured by bakery staff.
///
/// Values are kept as read from storage; the generator treats a non-positive
/// slot length or capacity as a configuration error and offers nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPolicy {
    pub slot_length_minutes: i32,
    pub max_orders_per_slot: i32,
    /// Same-day listing closes at this time of day. `None` means the default cutoff.
    pub last_same_day_order_time: Option<NaiveTime>,
    pub max_preorder_days: i32,
}

impl SlotPolicy {
    pub fn same_day_cutoff(&self) -> NaiveTime {
        self.last_same_day_order_time.unwrap_or(DEFAULT_SAME_DAY_CUTOFF)
    }

    pub fn is_usable(&self) -> bool {
        self.slot_length_minutes > 0 && self.max_orders_per_slot > 0
    }
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            slot_length_minutes: DEFAULT_SLOT_LENGTH_MINUTES,
            max_orders_per_slot: DEFAULT_MAX_ORDERS_PER_SLOT,
            last_same_day_order_time: Some(DEFAULT_SAME_DAY_CUTOFF),
            max_preorder_days: DEFAULT_MAX_PREORDER_DAYS,
        }
    }
}
