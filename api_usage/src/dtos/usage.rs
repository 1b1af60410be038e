use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EligibilityResponse {
    pub can_generate: bool,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct IncrementResponse {
    pub success: bool,
    pub new_usage_count: i64,
}
