use actix_web::{Responder, get, web};
use common::{error::Res, http::Success, principal::Principal};
use db::UsageStore;

use crate::{dtos::usage::EligibilityResponse, service};

/// Tells the authenticated user whether they may start another generation.
///
/// # Input
/// - `principal`: resolved by the authentication middleware
/// - `store`: the usage store invoking the external check procedure
///
/// # Output
/// - Success: `200 { "can_generate": bool, "user_id": "<uuid>" }`
/// - Error: 401 when unauthenticated, 500 when the procedure fails
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/usage/can-generate', {
///   headers: { 'Authorization': `Bearer ${session.access_token}` }
/// });
/// const { can_generate } = await response.json();
/// ```
#[get("/can-generate")]
pub async fn get_can_generate(
    principal: web::ReqData<Principal>,
    store: web::Data<dyn UsageStore>,
) -> Res<impl Responder> {
    let user_id = principal.user_id;
    let can_generate = service::usage::check_eligibility(store.get_ref(), user_id).await?;
    Success::ok(EligibilityResponse {
        can_generate,
        user_id,
    })
}
