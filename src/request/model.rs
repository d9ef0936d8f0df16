use crate::catalog::ProductCategory;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// region:    --- Status
/// 요청 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Draft,
    Submitted,
    Bidding,
    PaymentPending,
    Awarded,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Draft => "DRAFT",
            RequestStatus::Submitted => "SUBMITTED",
            RequestStatus::Bidding => "BIDDING",
            RequestStatus::PaymentPending => "PAYMENT_PENDING",
            RequestStatus::Awarded => "AWARDED",
            RequestStatus::Fulfilled => "FULFILLED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }
}

/// 입찰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
    Cancelled,
}

/// 벌크 구매 참여자 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Invited,
    Confirmed,
    Declined,
}
// endregion: --- Status

// region:    --- Parties
/// 고객 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// 판매자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// 데모 고객 (인증이 없으므로 기본 고객으로 처리)
pub fn demo_customer() -> Customer {
    Customer {
        id: "cust_1".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
    }
}

/// 데모 판매자
pub fn demo_seller() -> Seller {
    Seller {
        id: "seller_1".to_string(),
        name: "TechSupplier Inc.".to_string(),
        email: "sales@techsupplier.com".to_string(),
    }
}
// endregion: --- Parties

// region:    --- Request Model
/// 요청에 연결된 상품 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: ParticipantStatus,
}

/// 벌크 구매 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkBuy {
    pub organizer_name: String,
    pub organizer_phone: String,
    pub participants: Vec<Participant>,
}

/// 구매 요청 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub customer_id: String,
    pub customer_info: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_info: Option<ProductInfo>,
    pub description: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_by: Option<NaiveDate>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidding_ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_auth_id: Option<String>,
    #[serde(default)]
    pub payment_confirmed: bool,
    #[serde(default)]
    pub accept_alternatives: bool,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_buy: Option<BulkBuy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<String>,
}

impl Request {
    pub fn is_bulk_buy(&self) -> bool {
        self.bulk_buy.is_some()
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_info.as_ref().map(|p| p.name.as_str())
    }

    pub fn find_bid(&self, bid_id: &str) -> Option<&Bid> {
        self.bids.iter().find(|bid| bid.id == bid_id)
    }

    /// 수락된 입찰 (최대 1개)
    pub fn accepted_bid(&self) -> Option<&Bid> {
        self.bids
            .iter()
            .find(|bid| bid.status == BidStatus::Accepted)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
// endregion: --- Request Model

// region:    --- Bid Model
/// 수량 구간별 단가
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredPricing {
    pub min_quantity: u32,
    pub price: f64,
}

/// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub request_id: String,
    pub seller_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_info: Option<Seller>,
    pub price: f64,
    pub quantity: u32,
    pub estimated_delivery_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: BidStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiered_pricing: Option<Vec<TieredPricing>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// 주문 수량에 적용되는 단가
    /// 최소 수량 조건을 만족하는 구간 중 가장 큰 구간의 가격, 없으면 기본 단가
    pub fn unit_price_for(&self, quantity: u32) -> f64 {
        self.tiered_pricing
            .iter()
            .flatten()
            .filter(|tier| tier.min_quantity <= quantity)
            .max_by_key(|tier| tier.min_quantity)
            .map(|tier| tier.price)
            .unwrap_or(self.price)
    }

    pub fn seller_name(&self) -> Option<&str> {
        self.seller_info.as_ref().map(|s| s.name.as_str())
    }

    /// 주문 수량 기준 견적
    pub fn quote(&self, quantity: u32) -> BidQuote {
        let unit_price = self.unit_price_for(quantity);
        BidQuote {
            request_id: self.request_id.clone(),
            bid_id: self.id.clone(),
            quantity,
            unit_price,
            total_price: unit_price * f64::from(quantity),
        }
    }
}

/// 구간 가격이 반영된 입찰 견적 (표시용, 발주서는 기본 단가 사용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidQuote {
    pub request_id: String,
    pub bid_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}
// endregion: --- Bid Model

// region:    --- Inputs
/// 요청 생성 입력
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestInput {
    #[serde(default)]
    pub customer_id: Option<String>,
    /// 카탈로그 상품을 선택한 경우
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_category: ProductCategory,
    pub product_name: String,
    pub description: String,
    pub quantity: i64,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub required_by: Option<NaiveDate>,
    #[serde(default)]
    pub accept_alternatives: bool,
    #[serde(default)]
    pub authorize_payment: bool,
    #[serde(default)]
    pub is_bulk_buy: bool,
    #[serde(default)]
    pub organizer_name: Option<String>,
    #[serde(default)]
    pub organizer_phone: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// 입찰 제출 입력
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidInput {
    #[serde(default)]
    pub seller_id: Option<String>,
    pub price: f64,
    pub quantity: i64,
    /// RFC 3339 또는 YYYY-MM-DD
    pub estimated_delivery_date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tiered_pricing: Option<Vec<TieredPricing>>,
}
// endregion: --- Inputs

// region:    --- Ids
/// 접두사가 붙은 랜덤 식별자
pub fn prefixed_id(prefix: &str, len: usize) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &raw[..len.min(raw.len())])
}

/// 대문자 랜덤 식별자 (PO, SKU)
pub fn prefixed_upper_id(prefix: &str, len: usize) -> String {
    prefixed_id(prefix, len).to_uppercase()
}
// endregion: --- Ids
