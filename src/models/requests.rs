use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::UserProfile;

/// User message for an ongoing conversation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MessageRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Request to match the profile collected in a session
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionMatchesRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub top_n: Option<usize>,
    /// Desired support amount in millions of KRW
    #[serde(default)]
    pub desired_support_scale: Option<f64>,
}

/// Stateless matching request carrying a complete profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    pub profile: UserProfile,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub top_n: Option<usize>,
}

/// Catalog search criteria, amounts in KRW
///
/// GET /api/v1/programs?realm=창업&minAmount=10000000&maxAmount=100000000
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSearchQuery {
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_amount: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_amount: Option<f64>,
}

impl ProgramSearchQuery {
    /// Support area to filter on; a blank value means any
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref().map(str::trim).filter(|realm| !realm.is_empty())
    }

    /// Whether both bounds are present and inverted
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.min_amount, self.max_amount), (Some(min), Some(max)) if min > max)
    }
}
