/// 요청 라이프사이클 커맨드 처리
/// 1. 요청 생성
/// 2. 입찰 제출
/// 3. 입찰 조기 종료
/// 4. 입찰 수락
/// 5. 결제 확인
/// 6. 발주서 생성
///
/// 모든 커맨드는 가드를 먼저 전부 검사한 뒤에만 상태를 변경한다.
/// 가드 실패 시 요청은 그대로 남는다.
// region:    --- Imports
use super::events::RequestEvent;
use super::model::{
    demo_customer, demo_seller, prefixed_id, prefixed_upper_id, Bid, BidStatus, BulkBuy,
    CreateRequestInput, Customer, Participant, ProductInfo, Request, RequestStatus,
    SubmitBidInput, TieredPricing,
};
use crate::error::{ProcurementError, Result};
use crate::ledger::{PurchaseOrder, PurchaseOrderStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

/// 벌크 구매 최소 참여자 수
pub const MIN_BULK_PARTICIPANTS: usize = 3;
/// 벌크 구매 최대 참여자 수
pub const MAX_BULK_PARTICIPANTS: usize = 15;
/// 입찰 유효 기간 (일)
pub const BID_VALIDITY_DAYS: i64 = 7;

// region:    --- Commands
/// 발주서 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderCommand {
    pub bid_id: String,
    pub contest_id: String,
}

/// 1. 요청 생성
/// 생성된 요청은 DRAFT/SUBMITTED를 거치지 않고 바로 BIDDING 상태가 된다.
pub fn create_request(
    input: CreateRequestInput,
    catalog_product: Option<ProductInfo>,
    bidding_window: Duration,
    now: DateTime<Utc>,
) -> Result<(Request, RequestEvent)> {
    info!(
        "{:<12} --> 요청 생성 처리 시작: {} x{}",
        "Command", input.product_name, input.quantity
    );

    let quantity = positive_quantity(input.quantity, "Quantity must be at least 1")?;
    let bidding_ends_at = now
        .checked_add_signed(bidding_window)
        .ok_or_else(|| ProcurementError::validation("Bidding window is out of range"))?;
    let bulk_buy = if input.is_bulk_buy {
        Some(validate_bulk_buy(
            input.organizer_name.as_deref(),
            input.organizer_phone.as_deref(),
            input.participants,
        )?)
    } else {
        None
    };

    let product_info = catalog_product.unwrap_or_else(|| ProductInfo {
        id: prefixed_id("prod_", 8),
        sku: prefixed_upper_id("SKU-", 6),
        name: input.product_name.clone(),
        description: input.description.clone(),
        price: input.budget.unwrap_or(0.0),
        category: input.product_category,
        image_url: None,
    });

    let customer = resolve_customer(input.customer_id);
    let request = Request {
        id: prefixed_id("req_", 10),
        customer_id: customer.id.clone(),
        customer_info: customer,
        product_info: Some(product_info),
        description: input.description,
        quantity,
        budget: input.budget,
        required_by: input.required_by,
        status: RequestStatus::Bidding,
        created_at: now,
        updated_at: now,
        bidding_ends_at: Some(bidding_ends_at),
        payment_auth_id: input
            .authorize_payment
            .then(|| prefixed_id("pay_", 12)),
        payment_confirmed: false,
        accept_alternatives: input.accept_alternatives,
        bids: Vec::new(),
        bulk_buy,
        contest_id: None,
    };

    let event = RequestEvent::RequestCreated {
        request_id: request.id.clone(),
        customer_id: request.customer_id.clone(),
        quantity,
        bidding_ends_at,
        timestamp: now,
    };
    Ok((request, event))
}

/// 2. 입찰 제출
pub fn submit_bid(
    request: &mut Request,
    input: SubmitBidInput,
    now: DateTime<Utc>,
) -> Result<(Bid, RequestEvent)> {
    info!(
        "{:<12} --> 입찰 제출 처리 시작: request={} price={}",
        "Command", request.id, input.price
    );

    ensure_status(request, RequestStatus::Bidding, "Request is not in bidding state")?;
    if !(input.price.is_finite() && input.price > 0.0) {
        return Err(ProcurementError::validation("Please enter a valid price"));
    }
    let quantity = positive_quantity(input.quantity, "Please enter a valid quantity")?;
    let estimated_delivery_date = parse_delivery_date(&input.estimated_delivery_date)
        .ok_or_else(|| ProcurementError::validation("Please enter a valid delivery date"))?;
    let tiered_pricing = validate_tiers(input.tiered_pricing)?;

    let seller = demo_seller();
    let seller_id = input.seller_id.unwrap_or_else(|| seller.id.clone());
    let seller_info = (seller_id == seller.id).then_some(seller);

    let bid = Bid {
        id: prefixed_id("bid_", 8),
        request_id: request.id.clone(),
        seller_id,
        seller_info,
        price: input.price,
        quantity,
        estimated_delivery_date,
        expires_at: now + Duration::days(BID_VALIDITY_DAYS),
        status: BidStatus::Pending,
        notes: input.notes.filter(|notes| !notes.trim().is_empty()),
        tiered_pricing,
        created_at: now,
        updated_at: now,
    };

    request.bids.push(bid.clone());
    request.touch(now);

    let event = RequestEvent::BidSubmitted {
        request_id: request.id.clone(),
        bid_id: bid.id.clone(),
        seller_id: bid.seller_id.clone(),
        price: bid.price,
        quantity: bid.quantity,
        timestamp: now,
    };
    Ok((bid, event))
}

/// 3. 입찰 조기 종료
/// 마감 시각만 현재로 당기고 상태는 BIDDING 그대로 둔다.
pub fn end_bidding(request: &mut Request, now: DateTime<Utc>) -> Result<RequestEvent> {
    info!("{:<12} --> 입찰 종료 처리 시작: {}", "Command", request.id);

    ensure_status(request, RequestStatus::Bidding, "Request is not in bidding state")?;

    request.bidding_ends_at = Some(now);
    request.touch(now);

    Ok(RequestEvent::BiddingEnded {
        request_id: request.id.clone(),
        timestamp: now,
    })
}

/// 4. 입찰 수락
/// 대상 입찰은 ACCEPTED, 나머지는 이전 상태와 무관하게 모두 REJECTED
pub fn accept_bid(request: &mut Request, bid_id: &str, now: DateTime<Utc>) -> Result<RequestEvent> {
    info!(
        "{:<12} --> 입찰 수락 처리 시작: request={} bid={}",
        "Command", request.id, bid_id
    );

    ensure_status(request, RequestStatus::Bidding, "Request is not in bidding state")?;
    if request.find_bid(bid_id).is_none() {
        return Err(ProcurementError::not_found("Bid not found"));
    }

    let mut rejected_bid_ids = Vec::new();
    for bid in request.bids.iter_mut() {
        if bid.id == bid_id {
            bid.status = BidStatus::Accepted;
        } else {
            bid.status = BidStatus::Rejected;
            rejected_bid_ids.push(bid.id.clone());
        }
        bid.updated_at = now;
    }
    request.status = RequestStatus::PaymentPending;
    request.touch(now);

    Ok(RequestEvent::BidAccepted {
        request_id: request.id.clone(),
        bid_id: bid_id.to_string(),
        rejected_bid_ids,
        timestamp: now,
    })
}

/// 5. 결제 확인
pub fn confirm_payment(request: &mut Request, now: DateTime<Utc>) -> Result<RequestEvent> {
    info!("{:<12} --> 결제 확인 처리 시작: {}", "Command", request.id);

    ensure_status(
        request,
        RequestStatus::PaymentPending,
        "Request is not in payment pending state",
    )?;

    request.status = RequestStatus::Awarded;
    request.payment_confirmed = true;
    request.touch(now);

    Ok(RequestEvent::PaymentConfirmed {
        request_id: request.id.clone(),
        timestamp: now,
    })
}

/// 6. 발주서 생성
/// 반환된 발주서는 호출자가 원장에 추가한다.
pub fn create_purchase_order(
    request: &mut Request,
    cmd: &CreatePurchaseOrderCommand,
    now: DateTime<Utc>,
) -> Result<(PurchaseOrder, RequestEvent)> {
    info!("{:<12} --> 발주서 생성 처리 시작: {:?}", "Command", cmd);

    ensure_status(request, RequestStatus::Awarded, "Request is not in awarded state")?;
    if !request.payment_confirmed {
        return Err(ProcurementError::illegal_state(
            "Payment has not been confirmed",
        ));
    }
    if cmd.contest_id.trim().is_empty() {
        return Err(ProcurementError::validation("Contest id is required"));
    }
    let bid = match request.find_bid(&cmd.bid_id) {
        Some(bid) if bid.status == BidStatus::Accepted => bid,
        Some(_) => {
            return Err(ProcurementError::illegal_state(
                "Bid has not been accepted",
            ))
        }
        None => return Err(ProcurementError::not_found("Accepted bid not found")),
    };

    let product = request.product_info.as_ref();
    let purchase_order = PurchaseOrder {
        id: prefixed_upper_id("PO-", 6),
        request_id: request.id.clone(),
        seller_id: bid.seller_id.clone(),
        seller_name: bid.seller_name().unwrap_or("Unknown Supplier").to_string(),
        product_id: product.map(|p| p.id.clone()).unwrap_or_default(),
        product_name: request
            .product_name()
            .unwrap_or(&request.description)
            .to_string(),
        sku: product
            .map(|p| p.sku.clone())
            .unwrap_or_else(|| prefixed_upper_id("SKU-", 6)),
        quantity: bid.quantity,
        unit_price: bid.price,
        total_price: bid.price * f64::from(bid.quantity),
        expected_delivery_date: bid.estimated_delivery_date,
        status: PurchaseOrderStatus::Pending,
        created_at: now,
    };

    request.status = RequestStatus::Fulfilled;
    request.contest_id = Some(cmd.contest_id.clone());
    request.touch(now);

    let event = RequestEvent::PurchaseOrderCreated {
        request_id: request.id.clone(),
        purchase_order_id: purchase_order.id.clone(),
        bid_id: cmd.bid_id.clone(),
        contest_id: cmd.contest_id.clone(),
        total_price: purchase_order.total_price,
        timestamp: now,
    };
    Ok((purchase_order, event))
}
// endregion: --- Commands

// region:    --- Guards
/// 인증이 없으므로 고객 id만 받으며, 생략 시 데모 고객으로 처리
fn resolve_customer(customer_id: Option<String>) -> Customer {
    let demo = demo_customer();
    match customer_id.filter(|id| !id.trim().is_empty()) {
        Some(id) if id != demo.id => Customer {
            name: id.clone(),
            id,
            email: String::new(),
        },
        _ => demo,
    }
}

fn ensure_status(request: &Request, expected: RequestStatus, message: &str) -> Result<()> {
    if request.status == expected {
        Ok(())
    } else {
        Err(ProcurementError::illegal_state(format!(
            "{} (current: {})",
            message,
            request.status.as_str()
        )))
    }
}

fn positive_quantity(quantity: i64, message: &str) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| ProcurementError::validation(message))
}

/// 벌크 구매 검증
/// 이메일이 비어 있는 참여자는 제외한 뒤 인원을 센다.
fn validate_bulk_buy(
    organizer_name: Option<&str>,
    organizer_phone: Option<&str>,
    participants: Vec<Participant>,
) -> Result<BulkBuy> {
    let organizer_name = organizer_name.map(str::trim).unwrap_or_default();
    if organizer_name.is_empty() {
        return Err(ProcurementError::validation(
            "Organizer name is required for Bulk Buy",
        ));
    }
    let organizer_phone = organizer_phone.map(str::trim).unwrap_or_default();
    if organizer_phone.is_empty() {
        return Err(ProcurementError::validation(
            "Organizer phone is required for Bulk Buy",
        ));
    }

    let participants: Vec<Participant> = participants
        .into_iter()
        .filter(|p| !p.email.trim().is_empty())
        .collect();
    if participants.len() < MIN_BULK_PARTICIPANTS {
        return Err(ProcurementError::validation(
            "At least 3 participants with valid emails are required",
        ));
    }
    if participants.len() > MAX_BULK_PARTICIPANTS {
        return Err(ProcurementError::validation(
            "You can add a maximum of 15 participants to a Bulk Buy request",
        ));
    }

    Ok(BulkBuy {
        organizer_name: organizer_name.to_string(),
        organizer_phone: organizer_phone.to_string(),
        participants,
    })
}

/// 구간 가격 검증
/// 구간 간 가격 순서는 검사하지 않는다.
fn validate_tiers(tiers: Option<Vec<TieredPricing>>) -> Result<Option<Vec<TieredPricing>>> {
    let Some(tiers) = tiers.filter(|tiers| !tiers.is_empty()) else {
        return Ok(None);
    };
    for tier in &tiers {
        if tier.min_quantity < 1 || !(tier.price.is_finite() && tier.price > 0.0) {
            return Err(ProcurementError::validation(
                "Tiered pricing entries need a minimum quantity of at least 1 and a positive price",
            ));
        }
    }
    Ok(Some(tiers))
}

/// 배송 예정일 파싱 (RFC 3339 또는 YYYY-MM-DD)
pub fn parse_delivery_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
// endregion: --- Guards
