// region:    --- Imports
use crate::catalog::recommend::{recommend_products, Recommendation};
use crate::catalog::rewards::{rewards_catalog, RewardFilter, RewardItem};
use crate::catalog::{Catalog, Product, ProductCategory, DEFAULT_MAX_RESULTS};
use crate::error::{ProcurementError, Result};
use crate::event_store::Event;
use crate::intent::marketplace::{parse_marketplace_link, MarketplaceProduct};
use crate::intent::{RequestIntent, ResilientExtractor, SearchAnalysis};
use crate::ledger::{InventoryItem, PurchaseOrder};
use crate::query;
use crate::request::commands::CreatePurchaseOrderCommand;
use crate::request::model::{Bid, BidQuote, CreateRequestInput, Request, SubmitBidInput};
use crate::store::RequestStore;
use axum::async_trait;
use axum::extract::{DefaultBodyLimit, FromRequest, Path, Query, Request as HttpRequest, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RequestStore>,
    pub catalog: Arc<Catalog>,
    pub intent: ResilientExtractor,
}

/// 라우터 설정
pub fn router(state: AppState) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/requests", post(handle_create_request).get(handle_list_requests))
        .route("/requests/open", get(handle_list_open_requests))
        .route("/customers/:id/requests", get(handle_list_customer_requests))
        .route("/requests/:id", get(handle_get_request))
        .route("/requests/:id/events", get(handle_get_request_events))
        .route("/requests/:id/bids", post(handle_submit_bid))
        .route("/requests/:id/end-bidding", post(handle_end_bidding))
        .route("/requests/:id/bids/:bid_id/accept", post(handle_accept_bid))
        .route("/requests/:id/bids/:bid_id/quote", get(handle_quote_bid))
        .route("/requests/:id/confirm-payment", post(handle_confirm_payment))
        .route("/requests/:id/purchase-order", post(handle_create_purchase_order))
        .route("/purchase-orders", get(handle_list_purchase_orders))
        .route("/inventory", get(handle_list_inventory))
        .route("/products", get(handle_find_products))
        .route("/products/:id", get(handle_get_product))
        .route("/rewards", get(handle_rewards))
        .route("/intent/request", post(handle_extract_intent))
        .route("/intent/search", post(handle_analyze_search))
        .route("/intent/recommendations", post(handle_recommendations))
        .route("/marketplace/parse", post(handle_parse_marketplace_link))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
// endregion: --- App State

// region:    --- Extractors
/// JSON 바디 추출기
/// 파싱 실패도 다른 검증 오류와 같은 {error, code} 형태로 응답한다.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProcurementError;

    async fn from_request(req: HttpRequest, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
// endregion: --- Extractors

// region:    --- Command Handlers

/// 요청 생성
pub async fn handle_create_request(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRequestInput>,
) -> Result<(StatusCode, Json<Request>)> {
    info!("{:<12} --> 요청 생성: {}", "HandlerCmd", input.product_name);
    let request = state.store.create_request(input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// 입찰 제출
pub async fn handle_submit_bid(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    AppJson(input): AppJson<SubmitBidInput>,
) -> Result<(StatusCode, Json<Bid>)> {
    info!("{:<12} --> 입찰 제출: {}", "HandlerCmd", request_id);
    let bid = state.store.submit_bid(&request_id, input).await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// 입찰 조기 종료
pub async fn handle_end_bidding(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Request>> {
    info!("{:<12} --> 입찰 종료: {}", "HandlerCmd", request_id);
    Ok(Json(state.store.end_bidding(&request_id).await?))
}

/// 입찰 수락
pub async fn handle_accept_bid(
    State(state): State<AppState>,
    Path((request_id, bid_id)): Path<(String, String)>,
) -> Result<Json<Request>> {
    info!("{:<12} --> 입찰 수락: {} / {}", "HandlerCmd", request_id, bid_id);
    Ok(Json(state.store.accept_bid(&request_id, &bid_id).await?))
}

/// 결제 확인
pub async fn handle_confirm_payment(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Request>> {
    info!("{:<12} --> 결제 확인: {}", "HandlerCmd", request_id);
    Ok(Json(state.store.confirm_payment(&request_id).await?))
}

/// 발주서 생성
pub async fn handle_create_purchase_order(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    AppJson(cmd): AppJson<CreatePurchaseOrderCommand>,
) -> Result<(StatusCode, Json<PurchaseOrder>)> {
    info!("{:<12} --> 발주서 생성: {}", "HandlerCmd", request_id);
    let purchase_order = state.store.create_purchase_order(&request_id, cmd).await?;
    Ok((StatusCode::CREATED, Json(purchase_order)))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

pub async fn handle_list_requests(State(state): State<AppState>) -> Json<Vec<Request>> {
    Json(query::handlers::list_all_requests(&state.store).await)
}

pub async fn handle_list_open_requests(State(state): State<AppState>) -> Json<Vec<Request>> {
    Json(query::handlers::list_open_requests(&state.store).await)
}

pub async fn handle_list_customer_requests(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Json<Vec<Request>> {
    Json(query::handlers::list_customer_requests(&state.store, &customer_id).await)
}

pub async fn handle_get_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Request>> {
    Ok(Json(
        query::handlers::get_request(&state.store, &request_id).await?,
    ))
}

pub async fn handle_get_request_events(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Vec<Event>>> {
    Ok(Json(
        query::handlers::get_request_events(&state.store, &request_id).await?,
    ))
}

pub async fn handle_list_purchase_orders(
    State(state): State<AppState>,
) -> Json<Vec<PurchaseOrder>> {
    Json(query::handlers::list_purchase_orders(&state.store).await)
}

pub async fn handle_list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryItem>> {
    Json(query::handlers::list_inventory(&state.store).await)
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub quantity: Option<u32>,
}

/// 입찰 견적 조회 (구간 가격 반영)
pub async fn handle_quote_bid(
    State(state): State<AppState>,
    Path((request_id, bid_id)): Path<(String, String)>,
    Query(params): Query<QuoteQuery>,
) -> Result<Json<BidQuote>> {
    Ok(Json(
        query::handlers::quote_bid(&state.store, &request_id, &bid_id, params.quantity).await?,
    ))
}

// endregion: --- Query Handlers

// region:    --- Catalog Handlers

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// 상품 검색
pub async fn handle_find_products(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    info!("{:<12} --> 상품 검색: {:?}", "HandlerQuery", params);
    let category = params
        .category
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<ProductCategory>)
        .transpose()
        .map_err(ProcurementError::validation)?;
    let query = params.q.as_deref().filter(|q| !q.trim().is_empty());
    let limit = params.limit.unwrap_or(DEFAULT_MAX_RESULTS);
    Ok(Json(state.catalog.find_matching_products(category, query, limit)))
}

/// 상품 상세 조회
pub async fn handle_get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog
        .get_product_by_id(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ProcurementError::not_found("Product not found"))
}

/// 리워드 상품 조회
pub async fn handle_rewards(
    State(state): State<AppState>,
    Query(filter): Query<RewardFilter>,
) -> Json<Vec<RewardItem>> {
    info!("{:<12} --> 리워드 조회: {:?}", "HandlerQuery", filter);
    Json(rewards_catalog(&state.intent, &state.catalog, &filter).await)
}

// endregion: --- Catalog Handlers

// region:    --- Intent Handlers

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkBody {
    pub url: String,
}

/// 요청 문장 분석
pub async fn handle_extract_intent(
    State(state): State<AppState>,
    AppJson(body): AppJson<TextBody>,
) -> Json<RequestIntent> {
    Json(state.intent.extract_request(&body.text).await)
}

/// 검색어 분석
pub async fn handle_analyze_search(
    State(state): State<AppState>,
    AppJson(body): AppJson<SearchBody>,
) -> Json<SearchAnalysis> {
    Json(state.intent.analyze_search(&body.query).await)
}

/// 요청 문장 기반 상품 추천
pub async fn handle_recommendations(
    State(state): State<AppState>,
    AppJson(body): AppJson<TextBody>,
) -> Json<Recommendation> {
    Json(recommend_products(&state.intent, &state.catalog, &body.text).await)
}

/// 마켓플레이스 링크 파싱
pub async fn handle_parse_marketplace_link(
    AppJson(body): AppJson<LinkBody>,
) -> Result<Json<MarketplaceProduct>> {
    info!("{:<12} --> 링크 파싱: {}", "HandlerQuery", body.url);
    Ok(Json(parse_marketplace_link(&body.url)?))
}

// endregion: --- Intent Handlers
