use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity behind a request.
///
/// Inserted into the request extensions by the authentication middleware
/// and read by handlers through `web::ReqData<Principal>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: Option<String>,
}
