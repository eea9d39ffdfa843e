//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use std::sync::Arc;

use bikeshop_client::{
    ApiClient, ClientError, Credentials, FileUpload, FormPayload, MemoryTokenStore, ProfileUpdate,
    TokenStore,
};
use bikeshop_core::QueryParams;
use rust_decimal::Decimal;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, tokens: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::with_base_url(base_url, tokens).expect("client construction should not fail")
}

fn anonymous(base_url: &str) -> ApiClient {
    test_client(base_url, Arc::new(MemoryTokenStore::new()))
}

#[tokio::test]
async fn list_products_sends_query_and_reads_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            {"_id": "p1", "name": "C11 PRO", "price": {"current": 1299, "currency": "USD"}},
            {"_id": "p2", "name": "T2", "price": {"current": 999, "currency": "USD"}}
        ],
        "total": 14,
        "totalPages": 2,
        "page": 1
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .and(query_param("sort", "priceLow"))
        .and(query_param("category", "Electric Bike"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mut params = QueryParams::new();
    params.push("category", "Electric Bike");
    params.push("page", 1);
    params.push("limit", 12);
    params.push("sort", "priceLow");

    let listing = anonymous(&server.uri())
        .list_products(&params)
        .await
        .expect("should parse listing");

    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].name, "C11 PRO");
    assert_eq!(listing.total, 14);
    assert_eq!(listing.total_pages, 2);
    assert!(listing.has_next());
}

#[tokio::test]
async fn list_accessories_accepts_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accessories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"_id": "a1", "name": "Rear Rack", "price": {"current": 59, "currency": "USD"}}
        ])))
        .mount(&server)
        .await;

    let listing = anonymous(&server.uri())
        .list_accessories(&QueryParams::new())
        .await
        .expect("should parse bare array");

    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.total, 1);
    assert_eq!(listing.total_pages, 1);
}

#[tokio::test]
async fn get_product_unwraps_keyed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/p9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "product": {"_id": "p9", "name": "Titan", "price": 1499}
        })))
        .mount(&server)
        .await;

    let product = anonymous(&server.uri())
        .get_product("p9")
        .await
        .expect("should parse product");

    assert_eq!(product.id, "p9");
    assert_eq!(product.price.current, Decimal::from(1499));
}

#[tokio::test]
async fn attaches_bearer_token_from_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "c1",
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "T2", "price": {"current": 10}}, "quantity": 2}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Arc::new(MemoryTokenStore::with_token("jwt-abc")));
    let cart = client.get_cart().await.expect("should parse cart");

    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn api_error_preserves_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid email or password"})),
        )
        .mount(&server)
        .await;

    let err = anonymous(&server.uri())
        .login(&Credentials {
            email: "rider@example.com".to_owned(),
            password: "wrong".to_owned(),
        })
        .await
        .expect_err("should fail");

    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert_eq!(err.user_message("Login failed"), "Invalid email or password");
}

#[tokio::test]
async fn api_error_without_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = anonymous(&server.uri())
        .clear_cart()
        .await
        .expect_err("should fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message("Failed to clear cart"), "Failed to clear cart");
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(serde_json::json!({
            "email": "admin@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "u1",
            "name": "Ada",
            "email": "admin@example.com",
            "role": "admin",
            "token": "jwt-admin"
        })))
        .mount(&server)
        .await;

    let auth = anonymous(&server.uri())
        .login(&Credentials {
            email: "admin@example.com".to_owned(),
            password: "secret".to_owned(),
        })
        .await
        .expect("should log in");

    assert_eq!(auth.token, "jwt-admin");
    assert!(auth.user.is_admin());
}

#[tokio::test]
async fn update_profile_sends_only_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/profile"))
        .and(body_json(serde_json::json!({"name": "Grace"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "u1",
            "name": "Grace",
            "email": "grace@example.com",
            "role": "user"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Arc::new(MemoryTokenStore::with_token("jwt")));
    let user = client
        .update_profile(&ProfileUpdate {
            name: Some("Grace".to_owned()),
            ..ProfileUpdate::default()
        })
        .await
        .expect("should update");

    assert_eq!(user.name, "Grace");
    assert!(!user.is_admin());
}

#[tokio::test]
async fn add_to_cart_posts_product_and_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(body_json(serde_json::json!({"productId": "p1", "quantity": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cart": {
                "items": [
                    {"_id": "i1", "product": {"_id": "p1", "name": "T2", "price": 10}, "quantity": 1}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Arc::new(MemoryTokenStore::with_token("jwt")));
    let cart = client.add_to_cart("p1", 1).await.expect("should add");

    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total(), Decimal::from(10));
}

#[tokio::test]
async fn create_product_sends_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .and(header_contains_multipart())
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "_id": "p10",
            "name": "C22",
            "price": {"current": 1599, "currency": "USD"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut payload = FormPayload::new();
    payload
        .text("name", "C22")
        .text("price[current]", 1599)
        .file(
            "images",
            FileUpload {
                file_name: "c22.png".to_owned(),
                mime: "image/png".to_owned(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            },
        );

    let client = test_client(&server.uri(), Arc::new(MemoryTokenStore::with_token("jwt")));
    let product = client
        .create_product(payload)
        .await
        .expect("should create");

    assert_eq!(product.id, "p10");

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"price[current]\""));
    assert!(body.contains("filename=\"c22.png\""));
}

fn header_contains_multipart() -> impl wiremock::Match {
    |request: &wiremock::Request| {
        request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    }
}

#[tokio::test]
async fn delete_accessory_ignores_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/accessories/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Accessory removed"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Arc::new(MemoryTokenStore::with_token("jwt")));
    client
        .delete_accessory("a1")
        .await
        .expect("non-JSON body is fine for deletes");
}

#[tokio::test]
async fn pending_count_returns_to_zero_after_success_and_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/ok"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"_id": "ok", "name": "T2"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = anonymous(&server.uri());
    let mut rx = client.loading().subscribe();

    client.get_product("ok").await.expect("should parse");
    assert_eq!(client.loading().pending(), 0);
    assert!(rx.has_changed().expect("sender alive"));
    rx.borrow_and_update();

    assert!(client.get_product("missing").await.is_err());
    assert_eq!(client.loading().pending(), 0);
    assert!(!client.loading().is_loading());
}

#[tokio::test]
async fn ids_stay_inside_their_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"_id": "u1", "name": "Ann", "email": "a@x.io"})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let client = anonymous(&server.uri());
    let result = client.get_accessory("../users/profile").await;
    assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/accessories/..%2Fusers%2Fprofile");

    let err = client.remove_from_cart("..").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidId { .. }));
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}
