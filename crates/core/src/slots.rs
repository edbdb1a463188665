//! # Slot Generation
//!
//! Computes the pickup and delivery windows a customer may book on a given
//! date. Generation is a pure function of the requested date, the weekly
//! opening hours, the slot policy and the current bakery-local time.
//!
//! ## Rules
//!
//! A date offers no slots when any of these hold:
//!
//! - its weekday has no opening-hours rule, or the rule is marked closed
//! - the policy has a non-positive slot length or capacity
//! - the date is before today, or later than today plus the preorder horizon
//! - the date is today and the current time is at or after the same-day cutoff
//! - the close time does not come after the open time
//!
//! Otherwise slots are laid end to end from the open time. A slot that would
//! finish after the close time is not offered.
//!
//! "No slots" is always an empty list, never an error.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::{
    errors::{ShopError, ShopResult},
    models::{
        opening_hours::OpeningHoursRule,
        slot_policy::SlotPolicy,
        time_slot::{SlotAvailability, TimeSlot},
    },
};

/// Read-only source of the two configuration tables slot generation needs.
#[async_trait]
pub trait SlotConfigSource: Send + Sync {
    /// Weekly opening hours, at most one rule per weekday.
    async fn opening_hours(&self) -> eyre::Result<Vec<OpeningHoursRule>>;

    /// The configured slot policy, or `None` when none has been set up.
    async fn slot_policy(&self) -> eyre::Result<Option<SlotPolicy>>;
}

/// Produces the ordered, non-overlapping slots bookable on `date`.
pub fn generate_slots(
    date: NaiveDate,
    opening_hours: &[OpeningHoursRule],
    policy: &SlotPolicy,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let Some(rule) = opening_hours.iter().find(|rule| rule.weekday == date.weekday()) else {
        return Vec::new();
    };
    if rule.is_closed {
        return Vec::new();
    }
    if !policy.is_usable() {
        warn!(?policy, "Slot policy has a non-positive length or capacity");
        return Vec::new();
    }

    let today = now.date();
    if date < today {
        return Vec::new();
    }
    if date == today && now.time() >= policy.same_day_cutoff() {
        return Vec::new();
    }
    let horizon_days = u64::try_from(policy.max_preorder_days).unwrap_or(0);
    match today.checked_add_days(Days::new(horizon_days)) {
        Some(last_bookable) if date <= last_bookable => {}
        _ => return Vec::new(),
    }

    if rule.open_time >= rule.close_time {
        return Vec::new();
    }

    let length = Duration::minutes(i64::from(policy.slot_length_minutes));
    let capacity = policy.max_orders_per_slot.unsigned_abs();
    let closing = date.and_time(rule.close_time);

    let mut slots = Vec::new();
    let mut cursor = date.and_time(rule.open_time);
    while cursor + length <= closing {
        slots.push(TimeSlot {
            start: cursor,
            end: cursor + length,
            capacity,
        });
        cursor += length;
    }

    debug!(%date, count = slots.len(), "Generated slots");
    slots
}

/// Reads configuration from `source` and generates the slots for `date`.
///
/// Unreadable opening hours mean no slots; an unreadable or missing policy
/// falls back to [`SlotPolicy::default`].
pub async fn available_slots(
    source: &dyn SlotConfigSource,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let opening_hours = match source.opening_hours().await {
        Ok(rules) => rules,
        Err(err) => {
            warn!(error = %err, "Could not read opening hours, offering no slots");
            return Vec::new();
        }
    };

    let policy = match source.slot_policy().await {
        Ok(Some(policy)) => policy,
        Ok(None) => SlotPolicy::default(),
        Err(err) => {
            warn!(error = %err, "Could not read slot policy, using defaults");
            SlotPolicy::default()
        }
    };

    generate_slots(date, &opening_hours, &policy, now)
}

/// Parses the `YYYY-MM-DD` date a caller asked slots for.
pub fn parse_requested_date(value: Option<&str>) -> ShopResult<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ShopError::InvalidArgument("date is required".to_string()))?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ShopError::InvalidArgument(format!("date '{}' is not in YYYY-MM-DD format", value))
    })
}

/// Annotates slots with how many orders already occupy them.
///
/// `booked` maps a slot start to its count of non-cancelled orders.
pub fn with_bookings(
    slots: &[TimeSlot],
    booked: &HashMap<NaiveDateTime, i64>,
) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|slot| {
            let count = booked.get(&slot.start).copied().unwrap_or(0).max(0);
            let taken = u32::try_from(count).unwrap_or(u32::MAX);
            SlotAvailability {
                start: slot.start,
                end: slot.end,
                capacity: slot.capacity,
                booked: taken,
                remaining: slot.capacity.saturating_sub(taken),
            }
        })
        .collect()
}

/// True while a slot holding `booked` orders can take one more.
pub fn slot_has_room(booked: i64, capacity: u32) -> bool {
    booked < i64::from(capacity)
}

/// Finds the generated slot matching a requested window exactly.
pub fn find_offered_slot(
    slots: &[TimeSlot],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Option<&TimeSlot> {
    slots
        .iter()
        .find(|slot| slot.start == start && slot.end == end)
}
