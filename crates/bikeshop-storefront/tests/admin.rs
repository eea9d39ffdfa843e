//! Admin forms and inventory lists against a wiremock API.

use std::sync::Arc;
use std::time::Duration;

use bikeshop_client::{ApiClient, FileUpload, MemoryTokenStore};
use bikeshop_core::{Accessory, Product};
use bikeshop_storefront::admin::debounced;
use bikeshop_storefront::{AdminInventory, EntityForm};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_client(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::with_base_url(&server.uri(), Arc::new(MemoryTokenStore::with_token("admin")))
            .expect("client construction should not fail"),
    )
}

fn png(name: &str) -> FileUpload {
    FileUpload {
        file_name: name.to_owned(),
        mime: "image/png".to_owned(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

fn product(id: &str, name: &str) -> Value {
    json!({"_id": id, "name": name, "price": {"current": 999, "currency": "USD"}})
}

fn received_bodies(requests: &[wiremock::Request]) -> Vec<String> {
    requests
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

#[tokio::test]
async fn product_without_price_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = EntityForm::<Product>::create();
    form.set("name", "C22").unwrap();
    form.add_images(vec![png("c22.png")]).unwrap();

    let err = form.submit(&admin_client(&server)).await.unwrap_err();
    assert_eq!(err.message, "Current price is required");
}

#[tokio::test]
async fn create_product_posts_the_full_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"product": product("p9", "C22")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut form = EntityForm::<Product>::create();
    form.set("name", "C22").unwrap();
    form.set("price.current", "1599").unwrap();
    form.add_item("features", "Torque sensor").unwrap();
    form.add_images(vec![png("c22.png")]).unwrap();

    let created = form.submit(&admin_client(&server)).await.expect("create should succeed");
    assert_eq!(created.id, "p9");

    let requests = server.received_requests().await.expect("recording enabled");
    let body = &received_bodies(&requests)[0];
    assert!(body.contains("name=\"price[current]\""));
    assert!(body.contains("name=\"features[0]\""));
    assert!(body.contains("name=\"inStock\""));
    assert!(body.contains("filename=\"c22.png\""));
}

#[tokio::test]
async fn failed_save_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/accessories/a1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Not authorized as an admin"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/accessories/a2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    for (id, expected) in [
        ("a1", "Not authorized as an admin"),
        ("a2", "Failed to save accessory"),
    ] {
        let accessory: Accessory = serde_json::from_value(json!({
            "_id": id,
            "name": "Rear Rack",
            "price": 59,
            "images": ["https://cdn.example.com/rack.jpg"]
        }))
        .unwrap();
        let err = EntityForm::edit(&accessory).submit(&client).await.unwrap_err();
        assert_eq!(err.message, expected);
    }
}

#[tokio::test]
async fn deleting_the_last_row_steps_back_a_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product("p7", "T2")], "total": 7, "totalPages": 2, "page": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product("p1", "C11"), product("p2", "C21")],
            "total": 6, "totalPages": 1, "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/p7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Product removed"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut inventory = AdminInventory::<Product>::new(admin_client(&server), 6);
    inventory.set_page(2).await;
    assert_eq!(inventory.listing().items.len(), 1);

    inventory.delete("p7").await.expect("delete should succeed");
    assert_eq!(inventory.page(), 1);
    assert_eq!(inventory.listing().items.len(), 2);
    assert!(inventory.error().is_none());
}

#[tokio::test]
async fn only_the_settled_search_term_is_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "titan"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product("p3", "Titan")], "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut inventory = AdminInventory::<Product>::new(admin_client(&server), 6);
    let (input, mut terms) = debounced(String::new(), Duration::from_millis(50));
    for typed in ["t", "ti", "tit", "titan"] {
        input.send(typed.to_owned());
    }
    drop(input);

    assert!(inventory.next_search(&mut terms).await);
    assert_eq!(inventory.search(), "titan");
    assert_eq!(inventory.listing().items[0].name, "Titan");
    assert!(!inventory.next_search(&mut terms).await);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn toggle_listing_sends_only_the_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accessories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessories": [{"_id": "a1", "name": "Bag", "price": 20, "isListed": true}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/accessories/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessory": {"_id": "a1", "name": "Bag", "price": 20, "isListed": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut inventory = AdminInventory::<Accessory>::new(admin_client(&server), 6);
    inventory.refresh().await;

    let listed = inventory.toggle_listing("a1").await.expect("toggle should succeed");
    assert!(!listed);

    let requests = server.received_requests().await.expect("recording enabled");
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("PUT recorded");
    let body = String::from_utf8_lossy(&put.body);
    assert!(body.contains("name=\"isListed\""));
    assert!(body.contains("false"));
    assert!(!body.contains("name=\"name\""));
}

#[tokio::test]
async fn toggle_listing_reads_the_state_of_an_accessory_on_another_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accessories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessories": [{"_id": "a1", "name": "Bag", "price": 20, "isListed": true}],
            "total": 7
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accessories/a9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessory": {"_id": "a9", "name": "Lock", "price": 35, "isListed": false}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/accessories/a9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessory": {"_id": "a9", "name": "Lock", "price": 35, "isListed": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut inventory = AdminInventory::<Accessory>::new(admin_client(&server), 6);
    inventory.refresh().await;

    let listed = inventory.toggle_listing("a9").await.expect("toggle should succeed");
    assert!(listed);

    let requests = server.received_requests().await.expect("recording enabled");
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("PUT recorded");
    let body = String::from_utf8_lossy(&put.body);
    assert!(body.contains("true"));
    assert!(!body.contains("false"));
}
