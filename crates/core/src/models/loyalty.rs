use serde::{Deserialize, Serialize};

use crate::loyalty::LoyaltyProgress;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    pub points_balance: i32,
    pub lifetime_points: i32,
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyResponse {
    pub points_balance: i32,
    pub lifetime_points: i32,
    pub tier: Option<String>,
    pub progress: LoyaltyProgress,
}
