use bakeshop_core::{
    models::{opening_hours::OpeningHoursRule, slot_policy::SlotPolicy},
    slots::available_slots,
};
use bakeshop_db::mock::repositories::MockSlotConfig;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use pretty_assertions::assert_eq;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

// Thursday 2025-01-02, asked on the Wednesday before.
fn thursday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_time(time(10, 0))
}

fn thursday_hours() -> Vec<OpeningHoursRule> {
    vec![OpeningHoursRule::open(Weekday::Thu, time(9, 0), time(11, 0))]
}

#[test_log::test(tokio::test)]
async fn test_slots_from_configured_source() {
    let mut source = MockSlotConfig::new();
    source
        .expect_opening_hours()
        .times(1)
        .returning(|| Ok(thursday_hours()));
    source.expect_slot_policy().times(1).returning(|| {
        Ok(Some(SlotPolicy {
            slot_length_minutes: 30,
            max_orders_per_slot: 3,
            last_same_day_order_time: None,
            max_preorder_days: 7,
        }))
    });

    let slots = available_slots(&source, thursday(), now()).await;

    let starts: Vec<NaiveTime> = slots.iter().map(|slot| slot.start.time()).collect();
    assert_eq!(starts, vec![time(9, 0), time(9, 30), time(10, 0), time(10, 30)]);
    assert!(slots.iter().all(|slot| slot.capacity == 3));
}

#[test_log::test(tokio::test)]
async fn test_unreadable_hours_offer_nothing() {
    let mut source = MockSlotConfig::new();
    source
        .expect_opening_hours()
        .returning(|| Err(eyre::eyre!("connection refused")));
    source.expect_slot_policy().never();

    let slots = available_slots(&source, thursday(), now()).await;

    assert!(slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_policy_uses_defaults() {
    let mut source = MockSlotConfig::new();
    source
        .expect_opening_hours()
        .returning(|| Ok(thursday_hours()));
    source.expect_slot_policy().returning(|| Ok(None));

    let slots = available_slots(&source, thursday(), now()).await;

    // 45 minute slots: 09:00 and 09:45 fit before 11:00
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].capacity, 2);
}

#[test_log::test(tokio::test)]
async fn test_unreadable_policy_uses_defaults() {
    let mut source = MockSlotConfig::new();
    source
        .expect_opening_hours()
        .returning(|| Ok(thursday_hours()));
    source
        .expect_slot_policy()
        .returning(|| Err(eyre::eyre!("relation \"slot_rules\" does not exist")));

    let slots = available_slots(&source, thursday(), now()).await;

    assert_eq!(slots.len(), 2);
}
