use common::env_config::ProcedureNames;
use db::{RestUsageStore, UsageStore};
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn store_for(server: &MockServer) -> RestUsageStore {
    RestUsageStore::new(
        &server.uri(),
        "service-key".to_string(),
        "user_id".to_string(),
        ProcedureNames::default(),
    )
    .unwrap()
}

#[actix_web::test]
async fn can_generate_posts_user_id_and_decodes_boolean() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/can_generate"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .and(body_json(serde_json::json!({ "user_id": user_id })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(false)))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!store_for(&server).can_generate(user_id).await.unwrap());
}

#[actix_web::test]
async fn increment_returns_new_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/increment_usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(7)))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).increment_usage(Uuid::new_v4()).await.unwrap(), 7);
}

#[actix_web::test]
async fn custom_argument_name_and_base_path_are_honoured() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/db/rest/v1/rpc/can_generate"))
        .and(body_json(serde_json::json!({ "p_user_id": user_id })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestUsageStore::new(
        &format!("{}/db/", server.uri()),
        "service-key".to_string(),
        "p_user_id".to_string(),
        ProcedureNames::default(),
    )
    .unwrap();

    assert!(store.can_generate(user_id).await.unwrap());
}

#[actix_web::test]
async fn error_status_and_null_result_are_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/can_generate"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "message": "function not found" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/increment_usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(store.can_generate(Uuid::new_v4()).await.is_err());
    assert!(store.increment_usage(Uuid::new_v4()).await.is_err());
}

#[test]
fn rejects_invalid_rpc_url() {
    let result = RestUsageStore::new(
        "not a url",
        "k".to_string(),
        "user_id".to_string(),
        ProcedureNames::default(),
    );
    assert!(result.is_err());
}
