use actix_web::web;

pub mod loader;
pub mod routes {
    pub mod loader;
}

pub use loader::{LoaderSize, render_loader};

pub fn mount_ui() -> actix_web::Scope {
    web::scope("/ui")
        .service(routes::loader::get_loader_css)
        .service(routes::loader::get_loader)
}
