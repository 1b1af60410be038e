use api_auth::{IdentityProvider, services::auth_client::AuthClient};
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/validate/validate-token"))
        .and(header("X-API-Key", "auth-key"))
        .and(body_json(serde_json::json!({ "token": "tok" })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> AuthClient {
    AuthClient::new(format!("{}/", server.uri()), "auth-key".to_string())
}

#[actix_web::test]
async fn valid_token_resolves_to_principal() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": user_id,
            "email": "ada@example.com"
        })),
    )
    .await;

    let principal = client_for(&server).resolve("tok").await.unwrap().unwrap();
    assert_eq!(principal.user_id, user_id);
    assert_eq!(principal.email.as_deref(), Some("ada@example.com"));
}

#[actix_web::test]
async fn rejected_token_resolves_to_nobody() {
    for status in [401, 403, 404] {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(status).set_body_json(serde_json::json!({ "message": "rejected" })),
        )
        .await;

        assert_eq!(
            client_for(&server).resolve("tok").await.unwrap(),
            None,
            "status {status}"
        );
    }
}

#[actix_web::test]
async fn missing_user_resolves_to_nobody() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user_id": null })),
    )
    .await;

    assert_eq!(client_for(&server).resolve("tok").await.unwrap(), None);
}

#[actix_web::test]
async fn auth_service_failure_is_an_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503)).await;

    assert!(client_for(&server).resolve("tok").await.is_err());
}
