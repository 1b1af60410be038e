use actix_web::{HttpResponse, Responder, get, http::header::ContentType, web};
use serde::Deserialize;

use crate::loader::{LOADER_CSS, LoaderSize, render_loader};

#[derive(Debug, Deserialize)]
pub struct LoaderQuery {
    #[serde(default)]
    pub size: LoaderSize,
    pub class: Option<String>,
}

/// Serves the loading indicator as an HTML fragment.
///
/// `GET /ui/loader?size=lg&class=text-white`
#[get("/loader")]
pub async fn get_loader(query: web::Query<LoaderQuery>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_loader(query.size, query.class.as_deref()))
}

#[get("/loader.css")]
pub async fn get_loader_css() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(LOADER_CSS)
}
