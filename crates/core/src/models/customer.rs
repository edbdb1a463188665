use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ShopError, ShopResult};

/// Allergens a customer can record on their profile.
pub const ALLERGY_OPTIONS: [&str; 6] = ["gluten", "nuts", "dairy", "eggs", "soy", "sesame"];

/// A storefront customer, linked to an identity-provider user once they sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: Uuid,
    pub auth_user_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
    /// Lowercase entries from [`ALLERGY_OPTIONS`]
    pub allergies: Vec<String>,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

impl CustomerProfile {
    /// Details still needed before the customer can place orders.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("address_line1", &self.address_line1),
            ("postcode", &self.postcode),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|value| value.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfileResponse {
    #[serde(flatten)]
    pub profile: CustomerProfile,
    pub missing_fields: Vec<&'static str>,
}

impl From<CustomerProfile> for CustomerProfileResponse {
    fn from(profile: CustomerProfile) -> Self {
        Self {
            missing_fields: profile.missing_fields(),
            profile,
        }
    }
}

/// First contact after sign-in: find or create the profile for this user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsureCustomerRequest {
    pub auth_user_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub marketing_opt_in: bool,
}

impl EnsureCustomerRequest {
    pub fn validate(&self) -> ShopResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ShopError::Validation("a valid email is required".to_string()));
        }
        Ok(())
    }
}

/// Replaces the editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    pub postcode: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub marketing_opt_in: bool,
}

/// An `UpdateProfileRequest` after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub postcode: String,
    pub allergies: Vec<String>,
    pub marketing_opt_in: bool,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl UpdateProfileRequest {
    /// Trims every field, lowercases and de-duplicates allergies, and rejects
    /// blank required fields or allergies outside [`ALLERGY_OPTIONS`].
    pub fn normalize(&self) -> ShopResult<ProfileUpdate> {
        let mut errors = Vec::new();

        let required = [
            ("full name", &self.full_name),
            ("phone", &self.phone),
            ("address line 1", &self.address_line1),
            ("postcode", &self.postcode),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                errors.push(format!("{} is required", label));
            }
        }

        let mut allergies: Vec<String> = Vec::new();
        for allergy in &self.allergies {
            let allergy = allergy.trim().to_lowercase();
            if allergy.is_empty() || allergies.contains(&allergy) {
                continue;
            }
            if !ALLERGY_OPTIONS.contains(&allergy.as_str()) {
                errors.push(format!("unknown allergy '{}'", allergy));
                continue;
            }
            allergies.push(allergy);
        }

        if !errors.is_empty() {
            return Err(ShopError::Validation(errors.join("; ")));
        }

        Ok(ProfileUpdate {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address_line1: self.address_line1.trim().to_string(),
            address_line2: trimmed(self.address_line2.as_deref()),
            town: trimmed(self.town.as_deref()),
            postcode: self.postcode.trim().to_uppercase(),
            allergies,
            marketing_opt_in: self.marketing_opt_in,
        })
    }
}
