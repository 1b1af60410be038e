use actix_web::web;

pub mod routes {
    pub mod eligibility;
    pub mod usage;
}

mod service {
    pub(crate) mod usage;
}
pub mod dtos {
    pub mod usage;
}

/// Usage endpoints. Must be mounted behind `api_auth::auth_middleware`,
/// and the app must carry a `web::Data<dyn db::UsageStore>`.
pub fn mount_usage() -> actix_web::Scope {
    web::scope("/usage")
        .service(routes::eligibility::get_can_generate)
        .service(routes::usage::post_increment)
}
