use common::error::{AppError, Res};
use db::UsageStore;
use log::{debug, error};
use uuid::Uuid;

pub(crate) const CHECK_FAILED: &str = "Failed to check generation eligibility";
pub(crate) const INCREMENT_FAILED: &str = "Failed to increment usage";

/// Asks the external check procedure whether `user_id` may generate.
///
/// Any failure of the procedure is logged and replaced by a generic message.
pub async fn check_eligibility(store: &dyn UsageStore, user_id: Uuid) -> Res<bool> {
    let can_generate = store.can_generate(user_id).await.map_err(|e| {
        error!("Eligibility check failed for user {}: {}", user_id, e);
        AppError::Procedure(CHECK_FAILED.to_string())
    })?;

    debug!("User {} can_generate={}", user_id, can_generate);
    Ok(can_generate)
}

/// Increments the user's usage counter through the external procedure.
///
/// Not idempotent: each call is one increment. Nothing is retried.
pub async fn increment_usage(store: &dyn UsageStore, user_id: Uuid) -> Res<i64> {
    let new_usage_count = store.increment_usage(user_id).await.map_err(|e| {
        error!("Usage increment failed for user {}: {}", user_id, e);
        AppError::Procedure(INCREMENT_FAILED.to_string())
    })?;

    debug!("User {} usage is now {}", user_id, new_usage_count);
    Ok(new_usage_count)
}
