use async_trait::async_trait;
use common::error::{AppError, Res};
use uuid::Uuid;

/// The two usage procedures owned by the external database.
///
/// Implementations invoke the procedure and hand back its result as-is.
/// Limits, resets and atomicity of the counter are the database's business.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Read-only check: may this user generate right now?
    async fn can_generate(&self, user_id: Uuid) -> Res<bool>;

    /// Increments the user's usage counter and returns its new value.
    async fn increment_usage(&self, user_id: Uuid) -> Res<i64>;
}

const MAX_IDENTIFIER_LEN: usize = 63;

/// Checks that `name` is a plain, optionally schema-qualified SQL identifier
/// (`increment_usage`, `public.increment_usage`). Procedure names end up
/// in SQL text and URL paths, so nothing else is accepted.
pub fn validate_procedure_name(name: &str) -> Res<()> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && part.len() <= MAX_IDENTIFIER_LEN
        });

    if valid {
        Ok(())
    } else {
        Err(AppError::Internal(format!("Invalid procedure name '{}'", name)))
    }
}
