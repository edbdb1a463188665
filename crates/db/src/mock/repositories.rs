use async_trait::async_trait;
use bakeshop_core::{
    models::{opening_hours::OpeningHoursRule, slot_policy::SlotPolicy},
    slots::SlotConfigSource,
};
use mockall::mock;

// Mock configuration source for testing
mock! {
    pub SlotConfig {}

    #[async_trait]
    impl SlotConfigSource for SlotConfig {
        async fn opening_hours(&self) -> eyre::Result<Vec<OpeningHoursRule>>;

        async fn slot_policy(&self) -> eyre::Result<Option<SlotPolicy>>;
    }
}
