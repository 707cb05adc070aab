//! Integration tests for the ready-made furniture catalog.

use axum::http::StatusCode;
use serde_json::{Value, json};
use woodora_integration_tests::TestContext;

async fn create(ctx: &TestContext, name: &str, category: &str, material: &str) -> Value {
    let resp = ctx
        .post(
            "/api/furniture",
            json!({
                "name": name,
                "category": category,
                "material": material,
                "dimensions": {"width": 72, "height": 30, "depth": 36},
                "finish": "stained",
                "color": "brown",
                "price": "45000",
                "stock": "5"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "create failed: {:?}", resp.body);
    resp.body
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .map(|items| items.iter().filter_map(|l| l["name"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_empty_catalog() {
    let ctx = TestContext::new();
    let resp = ctx.get("/api/furniture").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));
    assert!(ctx.data_dir().join("furniture.json").exists());
}

#[tokio::test]
async fn test_create_listing() {
    let ctx = TestContext::new();
    let listing = create(&ctx, "Modern Oak Dining Table", "table", "oak").await;

    assert_eq!(listing["status"], "Active");
    assert_eq!(listing["price"], "45000");
    assert_eq!(listing["stock"], 5);
    assert_eq!(listing["dimensions"]["width"], "72");
    assert!(listing["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_create_requires_name_and_category() {
    let ctx = TestContext::new();

    let resp = ctx.post("/api/furniture", json!({"category": "table"})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "missing required field: name");

    let resp = ctx.post("/api/furniture", json!({"name": "Stool"})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_and_filters() {
    let ctx = TestContext::new();
    create(&ctx, "Modern Oak Dining Table", "table", "oak").await;
    create(&ctx, "Teak Wood Bookshelf", "bookshelf", "teak").await;
    create(&ctx, "Oak Rocking Chair", "chair", "oak").await;

    let resp = ctx.get("/api/furniture?search=OAK").await;
    let found = names(&resp.body);
    assert_eq!(found.len(), 2);
    assert!(!found.contains(&"Teak Wood Bookshelf"));

    let resp = ctx.get("/api/furniture?category=bookshelf&material=all").await;
    assert_eq!(names(&resp.body), vec!["Teak Wood Bookshelf"]);

    let resp = ctx.get("/api/furniture?category=chair&material=teak").await;
    assert!(names(&resp.body).is_empty());

    let resp = ctx.get("/api/furniture?search=&category=all&material=all").await;
    assert_eq!(names(&resp.body).len(), 3);
}

#[tokio::test]
async fn test_facets() {
    let ctx = TestContext::new();
    create(&ctx, "Modern Oak Dining Table", "table", "oak").await;
    create(&ctx, "Teak Wood Bookshelf", "bookshelf", "teak").await;
    create(&ctx, "Oak Side Table", "table", "oak").await;

    let resp = ctx.get("/api/furniture/facets").await;
    assert_eq!(resp.status, StatusCode::OK);

    let categories = resp.body["categories"].as_array().cloned().unwrap_or_default();
    assert_eq!(categories.first(), Some(&json!("all")));
    assert_eq!(categories.len(), 3);
    let materials = resp.body["materials"].as_array().cloned().unwrap_or_default();
    assert_eq!(materials.len(), 3);
}

#[tokio::test]
async fn test_inactive_listings_are_hidden() {
    let ctx = TestContext::new();
    let listing = create(&ctx, "Walnut Dresser", "dresser", "walnut").await;
    create(&ctx, "Pine Bed", "bed", "pine").await;
    let id = listing["id"].as_str().unwrap_or_default();

    let resp = ctx
        .patch(&format!("/api/furniture/{id}"), json!({"status": "Inactive"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "Inactive");
    assert_eq!(resp.body["name"], "Walnut Dresser");

    let resp = ctx.get("/api/furniture").await;
    assert_eq!(names(&resp.body), vec!["Pine Bed"]);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let ctx = TestContext::new();
    let listing = create(&ctx, "Maple Desk", "table", "maple").await;
    let id = listing["id"].as_str().unwrap_or_default();

    let resp = ctx
        .patch(&format!("/api/furniture/{id}"), json!({"price": "39999.50", "stock": 2}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["price"], "39999.50");
    assert_eq!(resp.body["stock"], 2);
    assert_eq!(resp.body["material"], "maple");
    assert_eq!(resp.body["created_at"], listing["created_at"]);
}

#[tokio::test]
async fn test_update_decodes_text_dimensions() {
    let ctx = TestContext::new();
    let listing = create(&ctx, "Walnut Stool", "chair", "walnut").await;
    let id = listing["id"].as_str().unwrap_or_default();

    let resp = ctx
        .patch(
            &format!("/api/furniture/{id}"),
            json!({"dimensions": "{\"width\":20,\"height\":18,\"depth\":14}"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["dimensions"]["width"], "20");
    assert_eq!(resp.body["dimensions"]["height"], "18");
    assert_eq!(resp.body["dimensions"]["depth"], "14");
}

#[tokio::test]
async fn test_out_of_range_price_is_rejected() {
    let ctx = TestContext::new();
    let resp = ctx
        .post(
            "/api/furniture",
            json!({"name": "Gilded Throne", "category": "chair", "price": "50000000000000000000000000000"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let listing = create(&ctx, "Oak Bench", "chair", "oak").await;
    let id = listing["id"].as_str().unwrap_or_default();
    let resp = ctx
        .patch(&format!("/api/furniture/{id}"), json!({"price": "-5"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = ctx.get("/api/furniture").await;
    assert_eq!(names(&resp.body), vec!["Oak Bench"]);
    assert_eq!(resp.body[0]["price"], "45000");
}

#[tokio::test]
async fn test_update_and_delete_unknown() {
    let ctx = TestContext::new();

    let resp = ctx.patch("/api/furniture/FURN-404", json!({"stock": 1})).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = ctx.delete("/api/furniture/FURN-404").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_listing() {
    let ctx = TestContext::new();
    let listing = create(&ctx, "Mahogany Sofa", "sofa", "mahogany").await;
    let id = listing["id"].as_str().unwrap_or_default();

    let resp = ctx.delete(&format!("/api/furniture/{id}")).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = ctx.get("/api/furniture").await;
    assert_eq!(resp.body, json!([]));
}
