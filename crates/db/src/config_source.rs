use async_trait::async_trait;
use bakeshop_core::{
    models::{opening_hours::OpeningHoursRule, slot_policy::SlotPolicy},
    slots::SlotConfigSource,
};
use tracing::warn;

use crate::{
    DbPool,
    models::DbOpeningHours,
    repositories::slot_config::{get_opening_hours, get_slot_rule},
};

/// Reads opening hours and slot rules from PostgreSQL.
#[derive(Clone)]
pub struct PgSlotConfig {
    pool: DbPool,
}

impl PgSlotConfig {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotConfigSource for PgSlotConfig {
    async fn opening_hours(&self) -> eyre::Result<Vec<OpeningHoursRule>> {
        let rows = get_opening_hours(&self.pool).await?;
        Ok(rules_from_rows(rows))
    }

    async fn slot_policy(&self) -> eyre::Result<Option<SlotPolicy>> {
        let rule = get_slot_rule(&self.pool).await?;
        Ok(rule.map(SlotPolicy::from))
    }
}

/// Converts stored rows, skipping any that cannot describe a weekday.
/// A skipped weekday is treated as closed.
pub fn rules_from_rows(rows: Vec<DbOpeningHours>) -> Vec<OpeningHoursRule> {
    rows.into_iter()
        .filter_map(|row| {
            let weekday = row.weekday;
            let rule = row.into_rule();
            if rule.is_none() {
                warn!(weekday, "Skipping malformed opening hours row");
            }
            rule
        })
        .collect()
}
