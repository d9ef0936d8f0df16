use axum::http::StatusCode;
use procurement_service::catalog::Catalog;
use procurement_service::config::LlmConfig;
use procurement_service::handlers::{router, AppState};
use procurement_service::intent::{RemoteIntentExtractor, ResilientExtractor};
use procurement_service::store::RequestStore;
use reqwest::Client;
use serde_json::json;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// 트레이싱 초기화
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// 테스트 서버 실행 (API 키 없음: 의도 분석은 항상 폴백)
async fn spawn_app(seed: bool) -> String {
    init_tracing();
    let catalog = Arc::new(Catalog::builtin().expect("카탈로그 로드 실패"));
    let store = if seed {
        RequestStore::with_demo_data(Arc::clone(&catalog), chrono::Duration::minutes(45))
    } else {
        RequestStore::new(Arc::clone(&catalog), chrono::Duration::minutes(45))
    };
    let remote = RemoteIntentExtractor::new(LlmConfig::default()).expect("클라이언트 생성 실패");
    let state = AppState {
        store: Arc::new(store),
        catalog,
        intent: ResilientExtractor::new(Arc::new(remote), Duration::from_secs(1)),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state).into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

async fn post_json(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to send request");
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap_or(Value::Null))
}

fn laptop_request() -> Value {
    json!({
        "productCategory": "electronics",
        "productName": "Developer Laptop",
        "description": "Laptops for the platform team",
        "quantity": 5,
        "budget": 1500,
        "requiredBy": "2030-02-01",
        "authorizePayment": true
    })
}

/// 요청 생성/조회 테스트
#[tokio::test]
async fn test_create_and_get_request() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let (status, created) = post_json(&client, format!("{}/requests", base), laptop_request()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "BIDDING");
    assert_eq!(created["quantity"], 5);
    assert_eq!(created["requiredBy"], "2030-02-01");
    assert_eq!(created["customerInfo"]["name"], "John Doe");
    assert!(created["paymentAuthId"].as_str().unwrap().starts_with("pay_"));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = get_json(&client, format!("{}/requests/{}", base, id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, open) = get_json(&client, format!("{}/requests/open", base)).await;
    assert_eq!(open.as_array().unwrap().len(), 1);

    let (_, mine) = get_json(&client, format!("{}/customers/cust_1/requests", base)).await;
    assert_eq!(mine[0]["id"], id.as_str());
}

/// HTTP 전체 라이프사이클 테스트
#[tokio::test]
async fn test_lifecycle_over_http() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let (_, created) = post_json(&client, format!("{}/requests", base), laptop_request()).await;
    let id = created["id"].as_str().unwrap().to_string();

    // 입찰 제출
    let (status, bid) = post_json(
        &client,
        format!("{}/requests/{}/bids", base, id),
        json!({
            "price": 1450,
            "quantity": 5,
            "estimatedDeliveryDate": "2030-01-20",
            "notes": "Includes 3-year warranty",
            "tieredPricing": [{ "minQuantity": 5, "price": 1400 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bid["status"], "PENDING");
    let bid_id = bid["id"].as_str().unwrap().to_string();

    let (status, rival) = post_json(
        &client,
        format!("{}/requests/{}/bids", base, id),
        json!({ "price": 1499, "quantity": 5, "estimatedDeliveryDate": "2030-01-10" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // 입찰 수락
    let (status, accepted) = post_json(
        &client,
        format!("{}/requests/{}/bids/{}/accept", base, id, bid_id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["status"], "PAYMENT_PENDING");
    let rival_status = accepted["bids"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == rival["id"])
        .map(|b| b["status"].clone());
    assert_eq!(rival_status, Some(json!("REJECTED")));

    // 결제 확인
    let (status, awarded) = post_json(
        &client,
        format!("{}/requests/{}/confirm-payment", base, id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(awarded["status"], "AWARDED");
    assert_eq!(awarded["paymentConfirmed"], true);

    // 발주서 생성
    let (status, purchase_order) = post_json(
        &client,
        format!("{}/requests/{}/purchase-order", base, id),
        json!({ "bidId": bid_id, "contestId": "hdfc" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(purchase_order["totalPrice"], 7250.0);
    assert_eq!(purchase_order["status"], "pending");

    let (_, fulfilled) = get_json(&client, format!("{}/requests/{}", base, id)).await;
    assert_eq!(fulfilled["status"], "FULFILLED");
    assert_eq!(fulfilled["contestId"], "hdfc");

    let (_, orders) = get_json(&client, format!("{}/purchase-orders", base)).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let (status, events) = get_json(&client, format!("{}/requests/{}/events", base, id)).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0]["eventType"], "RequestCreated");
    assert_eq!(events[5]["eventType"], "PurchaseOrderCreated");
    assert_eq!(events[5]["version"], 6);
}

/// 오류 응답 테스트 (400 / 404 / 409)
#[tokio::test]
async fn test_error_responses() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/requests/req_missing", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Request not found");

    let mut invalid = laptop_request();
    invalid["quantity"] = json!(0);
    let (status, body) = post_json(&client, format!("{}/requests", base), invalid).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let (_, created) = post_json(&client, format!("{}/requests", base), laptop_request()).await;
    let id = created["id"].as_str().unwrap().to_string();
    let (status, body) = post_json(
        &client,
        format!("{}/requests/{}/confirm-payment", base, id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ILLEGAL_STATE");

    let (status, body) = post_json(
        &client,
        format!("{}/requests/{}/bids/bid_missing/accept", base, id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bid not found");

    // 실패한 커맨드는 이벤트를 남기지 않는다
    let (_, events) = get_json(&client, format!("{}/requests/{}/events", base, id)).await;
    assert_eq!(events.as_array().unwrap().len(), 1);
}

/// 잘못된 JSON 바디도 VALIDATION 오류 형태로 응답하는지 테스트
#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let mut fractional = laptop_request();
    fractional["quantity"] = json!(1.5);
    let mut unnamed = laptop_request();
    unnamed.as_object_mut().unwrap().remove("productName");

    for body in [fractional, unnamed] {
        let (status, body) = post_json(&client, format!("{}/requests", base), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    // JSON이 아닌 바디
    let response = client
        .post(format!("{}/intent/request", base))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION");

    // 아무것도 생성되지 않음
    let (_, all) = get_json(&client, format!("{}/requests", base)).await;
    assert!(all.as_array().unwrap().is_empty());
}

/// 구간 가격 견적 조회 테스트
#[tokio::test]
async fn test_bid_quote() {
    let base = spawn_app(true).await;
    let client = Client::new();

    // 데모 입찰 bid_1: 기본 1150, 20개 이상 1100, 50개 이상 1050
    let (status, quote) = get_json(
        &client,
        format!("{}/requests/req_1234567890/bids/bid_1/quote?quantity=25", base),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["bidId"], "bid_1");
    assert_eq!(quote["quantity"], 25);
    assert_eq!(quote["unitPrice"], 1100.0);
    assert_eq!(quote["totalPrice"], 27500.0);

    // 수량 생략 시 요청 수량(10) 기준
    let (_, quote) = get_json(
        &client,
        format!("{}/requests/req_1234567890/bids/bid_1/quote", base),
    )
    .await;
    assert_eq!(quote["quantity"], 10);
    assert_eq!(quote["totalPrice"], 11500.0);

    let (status, body) = get_json(
        &client,
        format!("{}/requests/req_1234567890/bids/bid_missing/quote", base),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

/// 데모 데이터 조회 테스트
#[tokio::test]
async fn test_demo_data_views() {
    let base = spawn_app(true).await;
    let client = Client::new();

    let (_, all) = get_json(&client, format!("{}/requests", base)).await;
    assert_eq!(all.as_array().unwrap().len(), 6);

    let (_, open) = get_json(&client, format!("{}/requests/open", base)).await;
    assert_eq!(open.as_array().unwrap().len(), 4);

    let (_, mine) = get_json(&client, format!("{}/customers/cust_1/requests", base)).await;
    assert_eq!(mine.as_array().unwrap().len(), 3);

    let (_, inventory) = get_json(&client, format!("{}/inventory", base)).await;
    let inventory = inventory.as_array().unwrap();
    assert_eq!(inventory.len(), 6);
    assert_eq!(inventory[0]["available"], 15);

    let (_, orders) = get_json(&client, format!("{}/purchase-orders", base)).await;
    assert_eq!(orders[0]["id"], "PO-123456");
    assert_eq!(orders[0]["status"], "delivered");
}

/// 상품 검색 테스트
#[tokio::test]
async fn test_products() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let (status, products) = get_json(
        &client,
        format!("{}/products?category=electronics&q=dell%20laptop", base),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["id"], "prod_laptop_1");

    let (status, body) = get_json(&client, format!("{}/products?category=toys", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let (status, product) = get_json(&client, format!("{}/products/prod_it_1", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["brand"], "Cisco");

    let (status, _) = get_json(&client, format!("{}/products/prod_missing", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 리워드 조회 테스트
#[tokio::test]
async fn test_rewards() {
    let base = spawn_app(false).await;
    let client = Client::new();

    let (status, items) = get_json(
        &client,
        format!("{}/rewards?brand=Apple&sort=price-low", base),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points: Vec<u64> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["points"].as_u64().unwrap())
        .collect();
    assert_eq!(points.len(), 4);
    assert!(points.windows(2).all(|pair| pair[0] <= pair[1]));

    let (_, all) = get_json(&client, format!("{}/rewards", base)).await;
    assert_eq!(all.as_array().unwrap().len(), 20);
}

/// 의도 분석 / 추천 / 링크 파싱 테스트
#[tokio::test]
async fn test_intent_endpoints() {
    let base = spawn_app(false).await;
    let client = Client::new();
    let sentence =
        "I need 5 Dell XPS laptops with 32GB RAM by the end of next month with a budget of $1500 each";

    let (status, intent) = post_json(
        &client,
        format!("{}/intent/request", base),
        json!({ "text": sentence }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(intent["productCategory"], "electronics");
    assert_eq!(intent["productName"], "Laptop");
    assert_eq!(intent["quantity"], 5);
    assert_eq!(intent["searchTerms"], "dell, Laptop, ram, 32gb");

    let (_, analysis) = post_json(
        &client,
        format!("{}/intent/search", base),
        json!({ "query": "sony headphones" }),
    )
    .await;
    assert_eq!(analysis["brand"], "sony");
    assert_eq!(analysis["category"], "electronics");

    let (_, recommendation) = post_json(
        &client,
        format!("{}/intent/recommendations", base),
        json!({ "text": sentence }),
    )
    .await;
    assert_eq!(recommendation["products"][0]["id"], "prod_laptop_1");
    assert_eq!(recommendation["intent"]["quantity"], 5);

    let (status, product) = post_json(
        &client,
        format!("{}/marketplace/parse", base),
        json!({ "url": "https://www.amazon.com/Logitech-MX-Master-3S/dp/B09HM94VDS" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["productId"], "B09HM94VDS");
    assert_eq!(product["productName"], "Logitech MX Master 3S");

    let (status, body) = post_json(
        &client,
        format!("{}/marketplace/parse", base),
        json!({ "url": "https://example.com/item/1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid Amazon product URL.");
}
