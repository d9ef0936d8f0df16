// region:    --- Imports
use crate::error::{ProcurementError, Result};
use crate::event_store::Event;
use crate::ledger::{InventoryItem, PurchaseOrder};
use crate::request::model::{BidQuote, Request, RequestStatus};
use crate::store::RequestStore;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 고객별 요청 목록 조회 (최신순)
pub async fn list_customer_requests(store: &RequestStore, customer_id: &str) -> Vec<Request> {
    info!("{:<12} --> 고객 요청 목록 조회: {}", "Query", customer_id);
    let state = store.state.read().await;
    state
        .requests
        .iter()
        .filter(|request| request.customer_id == customer_id)
        .cloned()
        .collect()
}

/// 입찰 진행 중인 요청 목록 조회
/// 마감 시각이 지났더라도 상태가 BIDDING이면 포함된다.
pub async fn list_open_requests(store: &RequestStore) -> Vec<Request> {
    info!("{:<12} --> 진행 중 요청 목록 조회", "Query");
    let state = store.state.read().await;
    state
        .requests
        .iter()
        .filter(|request| request.status == RequestStatus::Bidding)
        .cloned()
        .collect()
}

/// 전체 요청 목록 조회
pub async fn list_all_requests(store: &RequestStore) -> Vec<Request> {
    info!("{:<12} --> 전체 요청 목록 조회", "Query");
    store.state.read().await.requests.clone()
}

/// 요청 상세 조회
pub async fn get_request(store: &RequestStore, request_id: &str) -> Result<Request> {
    info!("{:<12} --> 요청 상세 조회 id: {}", "Query", request_id);
    let state = store.state.read().await;
    state
        .requests
        .iter()
        .find(|request| request.id == request_id)
        .cloned()
        .ok_or_else(|| ProcurementError::not_found("Request not found"))
}

/// 요청 라이프사이클 이벤트 조회 (버전 순)
pub async fn get_request_events(store: &RequestStore, request_id: &str) -> Result<Vec<Event>> {
    info!("{:<12} --> 요청 이벤트 조회 id: {}", "Query", request_id);
    let state = store.state.read().await;
    if !state.requests.iter().any(|request| request.id == request_id) {
        return Err(ProcurementError::not_found("Request not found"));
    }
    Ok(state.events.events_for(request_id))
}

/// 입찰 견적 조회
/// 수량을 생략하면 요청 수량을 기준으로 한다.
pub async fn quote_bid(
    store: &RequestStore,
    request_id: &str,
    bid_id: &str,
    quantity: Option<u32>,
) -> Result<BidQuote> {
    info!(
        "{:<12} --> 입찰 견적 조회: {} / {} ({:?})",
        "Query", request_id, bid_id, quantity
    );
    let state = store.state.read().await;
    let request = state
        .requests
        .iter()
        .find(|request| request.id == request_id)
        .ok_or_else(|| ProcurementError::not_found("Request not found"))?;
    let bid = request
        .find_bid(bid_id)
        .ok_or_else(|| ProcurementError::not_found("Bid not found"))?;
    match quantity.unwrap_or(request.quantity) {
        0 => Err(ProcurementError::validation("Please enter a valid quantity")),
        quantity => Ok(bid.quote(quantity)),
    }
}

/// 발주서 목록 조회
pub async fn list_purchase_orders(store: &RequestStore) -> Vec<PurchaseOrder> {
    info!("{:<12} --> 발주서 목록 조회", "Query");
    store.state.read().await.ledger.purchase_orders().to_vec()
}

/// 재고 목록 조회
pub async fn list_inventory(store: &RequestStore) -> Vec<InventoryItem> {
    info!("{:<12} --> 재고 목록 조회", "Query");
    store.state.read().await.ledger.inventory().to_vec()
}

// endregion: --- Query Handlers
