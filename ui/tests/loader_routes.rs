use actix_web::{App, http::StatusCode, test};

#[actix_web::test]
async fn loader_fragment_is_html_with_three_markers() {
    let app = test::init_service(App::new().service(ui::mount_ui())).await;

    let req = test::TestRequest::get()
        .uri("/ui/loader?size=lg&class=text-white")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("loader loader--lg text-white"));
    assert_eq!(body.matches("loader__dot").count(), 3);
}

#[actix_web::test]
async fn invalid_or_missing_size_falls_back_to_medium() {
    let app = test::init_service(App::new().service(ui::mount_ui())).await;

    for uri in ["/ui/loader", "/ui/loader?size=enormous"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("loader loader--md\""), "{uri}: {body}");
        assert_eq!(body.matches("loader__dot").count(), 3);
    }
}

#[actix_web::test]
async fn stylesheet_is_served() {
    let app = test::init_service(App::new().service(ui::mount_ui())).await;

    let req = test::TestRequest::get().uri("/ui/loader.css").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("@keyframes loader-bounce"));
    assert!(body.contains(".loader--lg"));
}

#[actix_web::test]
async fn malformed_query_is_a_json_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(common::http::query_config())
            .service(ui::mount_ui()),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/ui/loader?size=lg&size=sm")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Bad request:"), "{message}");
    assert!(message.contains("size"), "{message}");
}
