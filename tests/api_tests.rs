//! End-to-end tests driving the full router
//!
//! These tests verify the complete flow from HTTP request to response:
//! middleware, auth guard, validation, store mutations and error mapping.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use product_api::prelude::*;
use serde_json::{Value, json};

const API_KEY: &str = "SECRET_KEY";

fn api_key_header() -> HeaderName {
    HeaderName::from_static("x-api-key")
}

fn api_key(value: &'static str) -> HeaderValue {
    HeaderValue::from_static(value)
}

// =============================================================================
// Helper functions to create test servers
// =============================================================================

fn create_test_server_with(config: ServerConfig) -> (TestServer, InMemoryProductStore) {
    let store = InMemoryProductStore::seeded();

    let app = ServerBuilder::new()
        .with_config(config)
        .with_store(store.clone())
        .build()
        .expect("Failed to build app");

    let server = TestServer::new(app).expect("Failed to create test server");

    (server, store)
}

fn create_test_server() -> (TestServer, InMemoryProductStore) {
    create_test_server_with(ServerConfig::default())
}

fn names(products: &Value) -> Vec<&str> {
    products
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|p| p["name"].as_str().expect("product without name"))
        .collect()
}

// =============================================================================
// Root and Health Tests
// =============================================================================

mod root_tests {
    use super::*;

    #[tokio::test]
    async fn test_root_greeting() {
        let (server, _) = create_test_server();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "Hello, World!");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _) = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (server, _) = create_test_server();

        let response = server.get("/api/widgets").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body, json!({ "error": "Not Found" }));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_json_405() {
        let (server, store) = create_test_server();

        for response in [
            server.patch("/api/products/1").await,
            server.post("/api/products/stats").await,
            server.delete("/").await,
        ] {
            response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

            let body: Value = response.json();
            assert_eq!(body, json!({ "error": "Method Not Allowed" }));
        }

        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_undecodable_id_is_json_400() {
        let (server, store) = create_test_server();

        for response in [
            server.get("/api/products/%FF").await,
            server.delete("/api/products/%FF").await,
        ] {
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            let message = body["error"].as_str().expect("error should be a string");
            assert!(message.starts_with("Invalid path parameter"), "{message}");
        }

        let response = server
            .put("/api/products/%FF")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Ghost", "price": 1 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());

        assert_eq!(store.len().await.unwrap(), 3);
    }
}

// =============================================================================
// Read Tests
// =============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_defaults() {
        let (server, _) = create_test_server();

        let response = server.get("/api/products").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body["data"]), vec!["Laptop", "Smartphone", "Coffee Maker"]);
        assert_eq!(body["page"], 1);
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let (server, _) = create_test_server();

        let first: Value = server.get("/api/products?page=1&limit=2").await.json();
        assert_eq!(first["data"].as_array().unwrap().len(), 2);
        assert_eq!(first["total"], 3);

        let second: Value = server.get("/api/products?page=2&limit=2").await.json();
        assert_eq!(names(&second["data"]), vec!["Coffee Maker"]);
        assert_eq!(second["page"], 2);

        let beyond: Value = server.get("/api/products?page=5&limit=2").await.json();
        assert!(beyond["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_category_filter() {
        let (server, _) = create_test_server();

        let body: Value = server.get("/api/products?category=kitchen").await.json();
        assert_eq!(names(&body["data"]), vec!["Coffee Maker"]);
        // total counts the whole store, not the filtered set
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn test_list_filter_applies_before_pagination() {
        let (server, _) = create_test_server();

        let body: Value = server
            .get("/api/products?category=electronics&page=2&limit=1")
            .await
            .json();
        assert_eq!(names(&body["data"]), vec!["Smartphone"]);
    }

    #[tokio::test]
    async fn test_list_invalid_pagination() {
        let (server, _) = create_test_server();

        for query in ["page=abc", "page=0", "limit=-3"] {
            let response = server.get(&format!("/api/products?{query}")).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert_eq!(body["error"], "Invalid pagination parameters", "{query}");
        }
    }

    #[tokio::test]
    async fn test_search() {
        let (server, _) = create_test_server();

        let response = server.get("/api/products/search?q=lap").await;
        response.assert_status_ok();
        assert_eq!(names(&response.json()), vec!["Laptop"]);

        let upper: Value = server.get("/api/products/search?q=PHONE").await.json();
        assert_eq!(names(&upper), vec!["Smartphone"]);
    }

    #[tokio::test]
    async fn test_search_without_query_is_400() {
        let (server, _) = create_test_server();

        let response = server.get("/api/products/search").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], "Missing search query");
    }

    #[tokio::test]
    async fn test_stats() {
        let (server, _) = create_test_server();

        let response = server.get("/api/products/stats").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body, json!({ "electronics": 2, "kitchen": 1 }));
    }

    #[tokio::test]
    async fn test_get_by_id_is_idempotent() {
        let (server, _) = create_test_server();

        let first: Value = server.get("/api/products/1").await.json();
        let second: Value = server.get("/api/products/1").await.json();

        assert_eq!(first, second);
        assert_eq!(first["name"], "Laptop");
        assert_eq!(first["inStock"], true);
    }

    #[tokio::test]
    async fn test_whole_prices_are_integers_on_the_wire() {
        let (server, _) = create_test_server();

        let text = server.get("/api/products/1").await.text();
        assert!(text.contains(r#""price":1200,"#), "{text}");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let (server, _) = create_test_server();

        let response = server.get("/api/products/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body, json!({ "error": "Product not found" }));
    }
}

// =============================================================================
// Create Tests
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_product() {
        let (server, store) = create_test_server();

        let response = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Desk Lamp", "price": 25 }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let id = body["id"].as_str().expect("id should be a string");
        assert!(!["1", "2", "3"].contains(&id));
        assert_eq!(body["name"], "Desk Lamp");
        assert_eq!(body["price"], 25.0);
        assert_eq!(body["inStock"], false);

        assert_eq!(store.len().await.unwrap(), 4);

        let fetched: Value = server.get(&format!("/api/products/{id}")).await.json();
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_create_without_key_is_401() {
        let (server, store) = create_test_server();

        let response = server
            .post("/api/products")
            .json(&json!({ "name": "Desk Lamp", "price": 25 }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body, json!({ "error": "Unauthorized" }));
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_with_wrong_key_is_401() {
        let (server, store) = create_test_server();

        let response = server
            .post("/api/products")
            .add_header(api_key_header(), api_key("guess"))
            .json(&json!({ "name": "Desk Lamp", "price": 25 }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_missing_name_is_400() {
        let (server, store) = create_test_server();

        let response = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "price": 25 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body, json!({ "error": "Invalid product data" }));
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_string_price_is_400() {
        let (server, _) = create_test_server();

        let response = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Desk Lamp", "price": "25" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_non_json_body_is_400() {
        let (server, _) = create_test_server();

        let response = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .text("name=Desk Lamp")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid product data");
    }

    #[tokio::test]
    async fn test_auth_is_checked_before_validation() {
        let (server, _) = create_test_server();

        let response = server
            .post("/api/products")
            .json(&json!({ "price": "not a number" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_custom_api_key() {
        let config = ServerConfig {
            api_key: "rotated".to_string(),
            ..ServerConfig::default()
        };
        let (server, _) = create_test_server_with(config);

        let old = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Mug", "price": 8 }))
            .await;
        old.assert_status(StatusCode::UNAUTHORIZED);

        let new = server
            .post("/api/products")
            .add_header(api_key_header(), api_key("rotated"))
            .json(&json!({ "name": "Mug", "price": 8 }))
            .await;
        new.assert_status(StatusCode::CREATED);
    }
}

// =============================================================================
// Update Tests
// =============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let (server, _) = create_test_server();

        let payload = json!({
            "name": "Gaming Laptop",
            "price": 1999.99,
            "category": "gaming",
            "inStock": false
        });

        let response = server
            .put("/api/products/1")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&payload)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["id"], "1");
        assert_eq!(body["name"], "Gaming Laptop");
        assert_eq!(body["price"], 1999.99);
        assert_eq!(body["category"], "gaming");
        assert_eq!(body["inStock"], false);
        // omitted optional fields are cleared, not merged
        assert!(body.get("description").is_none());

        let fetched: Value = server.get("/api/products/1").await.json();
        assert_eq!(fetched, body);

        let list: Value = server.get("/api/products").await.json();
        assert_eq!(
            names(&list["data"]),
            vec!["Gaming Laptop", "Smartphone", "Coffee Maker"]
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_404() {
        let (server, store) = create_test_server();

        let response = server
            .put("/api/products/999")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Ghost", "price": 1 }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_without_key_is_401() {
        let (server, store) = create_test_server();

        let response = server
            .put("/api/products/1")
            .json(&json!({ "name": "Hacked", "price": 0 }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let laptop = store.get("1").await.unwrap().unwrap();
        assert_eq!(laptop.name, "Laptop");
    }

    #[tokio::test]
    async fn test_update_invalid_payload_is_400() {
        let (server, store) = create_test_server();

        let response = server
            .put("/api/products/1")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "", "price": 10 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let laptop = store.get("1").await.unwrap().unwrap();
        assert_eq!(laptop.name, "Laptop");
    }
}

// =============================================================================
// Delete Tests
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_product() {
        let (server, store) = create_test_server();

        let response = server.delete("/api/products/2").await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        server
            .get("/api/products/2")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let (server, store) = create_test_server();

        let response = server.delete("/api/products/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["error"], "Product not found");
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_protected_delete_requires_key() {
        let config = ServerConfig {
            auth: AuthConfig {
                delete: AuthPolicy::ApiKey,
                ..AuthConfig::default()
            },
            ..ServerConfig::default()
        };
        let (server, store) = create_test_server_with(config);

        server
            .delete("/api/products/1")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(store.len().await.unwrap(), 3);

        server
            .delete("/api/products/1")
            .add_header(api_key_header(), api_key(API_KEY))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(store.len().await.unwrap(), 2);
    }
}

// =============================================================================
// Full Lifecycle
// =============================================================================

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_update_delete_roundtrip() {
        let (server, _) = create_test_server();

        let created: Value = server
            .post("/api/products")
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Blender", "price": 60, "category": "kitchen" }))
            .await
            .json();
        let id = created["id"].as_str().unwrap().to_string();

        let stats: Value = server.get("/api/products/stats").await.json();
        assert_eq!(stats["kitchen"], 2);

        let found: Value = server.get("/api/products/search?q=blend").await.json();
        assert_eq!(names(&found), vec!["Blender"]);

        server
            .put(&format!("/api/products/{id}"))
            .add_header(api_key_header(), api_key(API_KEY))
            .json(&json!({ "name": "Blender Pro", "price": 90, "category": "kitchen" }))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/api/products/{id}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let list: Value = server.get("/api/products").await.json();
        assert_eq!(list["total"], 3);
    }
}
