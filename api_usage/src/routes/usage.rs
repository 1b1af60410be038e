use actix_web::{Responder, post, web};
use common::{error::Res, http::Success, principal::Principal};
use db::UsageStore;

use crate::{dtos::usage::IncrementResponse, service};

/// Records one more generation for the authenticated user.
///
/// # Output
/// - Success: `200 { "success": true, "new_usage_count": N }`
/// - Error: 401 when unauthenticated, 500 when the procedure fails
#[post("/increment")]
pub async fn post_increment(
    principal: web::ReqData<Principal>,
    store: web::Data<dyn UsageStore>,
) -> Res<impl Responder> {
    let new_usage_count = service::usage::increment_usage(store.get_ref(), principal.user_id).await?;
    Success::ok(IncrementResponse {
        success: true,
        new_usage_count,
    })
}
