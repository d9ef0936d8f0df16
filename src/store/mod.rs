/// 인메모리 요청 저장소
/// 모든 변경 커맨드는 쓰기 락을 잡은 상태에서 처음부터 끝까지 실행된다.
/// 같은 요청에 대한 입찰 제출과 입찰 수락은 서로 끼어들 수 없다.
// region:    --- Imports
use crate::catalog::Catalog;
use crate::error::{ProcurementError, Result};
use crate::event_store::EventLog;
use crate::ledger::{Ledger, PurchaseOrder};
use crate::request::commands::{self, CreatePurchaseOrderCommand};
use crate::request::events::RequestEvent;
use crate::request::model::{Bid, CreateRequestInput, Request, SubmitBidInput};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// endregion: --- Imports

pub mod seed;

// region:    --- Store State
/// 저장소 상태
/// requests는 최신 요청이 앞에 오도록 유지한다.
#[derive(Debug, Default)]
pub struct StoreState {
    pub(crate) requests: Vec<Request>,
    pub(crate) ledger: Ledger,
    pub(crate) events: EventLog,
}

impl StoreState {
    fn request_mut(&mut self, request_id: &str) -> Result<&mut Request> {
        self.requests
            .iter_mut()
            .find(|request| request.id == request_id)
            .ok_or_else(|| ProcurementError::not_found("Request not found"))
    }
}
// endregion: --- Store State

// region:    --- Request Store
pub struct RequestStore {
    pub(crate) state: RwLock<StoreState>,
    catalog: Arc<Catalog>,
    bidding_window: Duration,
}

impl RequestStore {
    /// 빈 저장소 생성
    /// bidding_window는 설정 로드 시 검증된 값을 받는다.
    pub fn new(catalog: Arc<Catalog>, bidding_window: Duration) -> Self {
        Self::with_state(catalog, bidding_window, StoreState::default())
    }

    /// 데모 데이터가 들어있는 저장소 생성
    pub fn with_demo_data(catalog: Arc<Catalog>, bidding_window: Duration) -> Self {
        let state = seed::demo_state(Utc::now());
        info!(
            "{:<12} --> 데모 데이터 로드: 요청 {}건, 발주서 {}건",
            "Store",
            state.requests.len(),
            state.ledger.purchase_orders().len()
        );
        Self::with_state(catalog, bidding_window, state)
    }

    fn with_state(catalog: Arc<Catalog>, bidding_window: Duration, state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
            catalog,
            bidding_window,
        }
    }

    /// 단일 요청에 대한 커맨드 실행
    /// 커맨드가 성공했을 때만 이벤트를 기록한다.
    async fn apply<T>(
        &self,
        request_id: &str,
        command: impl FnOnce(&mut Request, DateTime<Utc>) -> Result<(T, RequestEvent)>,
    ) -> Result<T> {
        let mut state = self.state.write().await;
        let request = state.request_mut(request_id)?;
        let (output, event) = command(request, Utc::now())?;
        state.events.append(event);
        Ok(output)
    }

    /// 1. 요청 생성 (목록 맨 앞에 추가)
    pub async fn create_request(&self, input: CreateRequestInput) -> Result<Request> {
        let catalog_product = match input.product_id.as_deref() {
            Some(product_id) => Some(
                self.catalog
                    .get_product_by_id(product_id)
                    .map(|product| product.to_product_info())
                    .ok_or_else(|| ProcurementError::not_found("Product not found"))?,
            ),
            None => None,
        };

        let (request, event) =
            commands::create_request(input, catalog_product, self.bidding_window, Utc::now())?;

        let mut state = self.state.write().await;
        state.requests.insert(0, request.clone());
        state.events.append(event);
        info!("{:<12} --> 요청 생성 완료: {}", "Store", request.id);
        Ok(request)
    }

    /// 2. 입찰 제출
    pub async fn submit_bid(&self, request_id: &str, input: SubmitBidInput) -> Result<Bid> {
        self.apply(request_id, |request, now| {
            commands::submit_bid(request, input, now)
        })
        .await
    }

    /// 3. 입찰 조기 종료
    pub async fn end_bidding(&self, request_id: &str) -> Result<Request> {
        self.apply(request_id, |request, now| {
            let event = commands::end_bidding(request, now)?;
            Ok((request.clone(), event))
        })
        .await
    }

    /// 4. 입찰 수락
    pub async fn accept_bid(&self, request_id: &str, bid_id: &str) -> Result<Request> {
        self.apply(request_id, |request, now| {
            let event = commands::accept_bid(request, bid_id, now)?;
            Ok((request.clone(), event))
        })
        .await
    }

    /// 5. 결제 확인
    pub async fn confirm_payment(&self, request_id: &str) -> Result<Request> {
        self.apply(request_id, |request, now| {
            let event = commands::confirm_payment(request, now)?;
            Ok((request.clone(), event))
        })
        .await
    }

    /// 6. 발주서 생성 (원장 추가와 요청 상태 변경을 한 번에)
    pub async fn create_purchase_order(
        &self,
        request_id: &str,
        cmd: CreatePurchaseOrderCommand,
    ) -> Result<PurchaseOrder> {
        let mut state = self.state.write().await;
        let request = state.request_mut(request_id)?;
        let (purchase_order, event) = commands::create_purchase_order(request, &cmd, Utc::now())?;
        state.ledger.append(purchase_order.clone());
        state.events.append(event);
        info!(
            "{:<12} --> 발주서 생성 완료: {} ({})",
            "Store", purchase_order.id, request_id
        );
        Ok(purchase_order)
    }
}
// endregion: --- Request Store
