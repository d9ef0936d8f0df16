use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum RequestEvent {
    // 요청 생성 이벤트
    RequestCreated {
        request_id: String,
        customer_id: String,
        quantity: u32,
        bidding_ends_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    // 입찰 제출 이벤트
    BidSubmitted {
        request_id: String,
        bid_id: String,
        seller_id: String,
        price: f64,
        quantity: u32,
        timestamp: DateTime<Utc>,
    },
    // 입찰 조기 종료 이벤트
    BiddingEnded {
        request_id: String,
        timestamp: DateTime<Utc>,
    },
    // 입찰 수락 이벤트 (나머지 입찰은 모두 거절)
    BidAccepted {
        request_id: String,
        bid_id: String,
        rejected_bid_ids: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    // 결제 확인 이벤트
    PaymentConfirmed {
        request_id: String,
        timestamp: DateTime<Utc>,
    },
    // 발주서 생성 이벤트
    PurchaseOrderCreated {
        request_id: String,
        purchase_order_id: String,
        bid_id: String,
        contest_id: String,
        total_price: f64,
        timestamp: DateTime<Utc>,
    },
}

impl RequestEvent {
    pub fn request_id(&self) -> &str {
        match self {
            RequestEvent::RequestCreated { request_id, .. }
            | RequestEvent::BidSubmitted { request_id, .. }
            | RequestEvent::BiddingEnded { request_id, .. }
            | RequestEvent::BidAccepted { request_id, .. }
            | RequestEvent::PaymentConfirmed { request_id, .. }
            | RequestEvent::PurchaseOrderCreated { request_id, .. } => request_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            RequestEvent::RequestCreated { .. } => "RequestCreated",
            RequestEvent::BidSubmitted { .. } => "BidSubmitted",
            RequestEvent::BiddingEnded { .. } => "BiddingEnded",
            RequestEvent::BidAccepted { .. } => "BidAccepted",
            RequestEvent::PaymentConfirmed { .. } => "PaymentConfirmed",
            RequestEvent::PurchaseOrderCreated { .. } => "PurchaseOrderCreated",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RequestEvent::RequestCreated { timestamp, .. }
            | RequestEvent::BidSubmitted { timestamp, .. }
            | RequestEvent::BiddingEnded { timestamp, .. }
            | RequestEvent::BidAccepted { timestamp, .. }
            | RequestEvent::PaymentConfirmed { timestamp, .. }
            | RequestEvent::PurchaseOrderCreated { timestamp, .. } => *timestamp,
        }
    }
}
