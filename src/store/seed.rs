/// 데모 데이터
/// 진행 중 입찰 요청은 기동 시각 기준 25~40분 뒤에 입찰이 끝나도록 만든다.
use super::StoreState;
use crate::catalog::ProductCategory;
use crate::event_store::EventLog;
use crate::ledger::{InventoryItem, Ledger, PurchaseOrder, PurchaseOrderStatus};
use crate::request::commands::parse_delivery_date;
use crate::request::model::{
    demo_customer, demo_seller, Bid, BidStatus, BulkBuy, Customer, Participant,
    ParticipantStatus, ProductInfo, Request, RequestStatus, Seller, TieredPricing,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

pub fn demo_state(now: DateTime<Utc>) -> StoreState {
    let at = |raw: &str| parse_delivery_date(raw).unwrap_or(now);
    let day = |raw: &str| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();

    let jane = customer("cust_2", "Jane Smith", "jane.smith@example.com");
    let robert = customer("cust_3", "Robert Johnson", "robert.johnson@example.com");
    let enterprise = seller("seller_2", "Enterprise Solutions", "bids@enterprisesolutions.com");
    let furnish = seller("seller_3", "Office Furnish Pro", "sales@officefurnish.com");

    let laptops = Request {
        bidding_ends_at: Some(now + Duration::minutes(30)),
        bids: vec![
            Bid {
                notes: Some("Includes 3-year warranty and on-site support".to_string()),
                tiered_pricing: Some(tiers(&[(10, 1150.0), (20, 1100.0), (50, 1050.0)])),
                ..bid(
                    "bid_1",
                    "req_1234567890",
                    demo_seller(),
                    (1150.0, 10),
                    at("2023-12-10"),
                    at("2023-11-15"),
                    at("2023-11-02T14:30:00Z"),
                )
            },
            Bid {
                notes: Some("Expedited shipping included".to_string()),
                ..bid(
                    "bid_2",
                    "req_1234567890",
                    enterprise,
                    (1199.0, 10),
                    at("2023-12-05"),
                    at("2023-11-15"),
                    at("2023-11-03T09:15:00Z"),
                )
            },
        ],
        ..request(
            "req_1234567890",
            demo_customer(),
            product(
                "prod_1",
                "LPT-DEV-001",
                "Developer Laptop",
                "High-performance laptop for software development",
                1299.0,
                ProductCategory::Electronics,
            ),
            "High-performance laptops for development team",
            (10, 1200.0),
            day("2023-12-15"),
            RequestStatus::Bidding,
            at("2023-11-01T10:00:00Z"),
        )
    };

    let chairs = Request {
        updated_at: at("2023-10-25T14:30:00Z"),
        payment_confirmed: true,
        bids: vec![Bid {
            status: BidStatus::Accepted,
            notes: Some("Includes assembly service".to_string()),
            tiered_pricing: Some(tiers(&[(50, 189.0), (100, 179.0)])),
            updated_at: at("2023-10-25T14:30:00Z"),
            ..bid(
                "bid_3",
                "req_0987654321",
                furnish.clone(),
                (189.0, 50),
                at("2023-12-20"),
                at("2023-11-15"),
                at("2023-10-18T11:20:00Z"),
            )
        }],
        ..request(
            "req_0987654321",
            demo_customer(),
            product(
                "prod_2",
                "CHR-OFF-002",
                "Ergonomic Office Chair",
                "Comfortable ergonomic chair for office use",
                249.0,
                ProductCategory::Furniture,
            ),
            "Office chairs for new headquarters",
            (50, 200.0),
            day("2023-12-30"),
            RequestStatus::Awarded,
            at("2023-10-15T08:00:00Z"),
        )
    };

    let keyboards = Request {
        updated_at: at("2023-10-20T16:45:00Z"),
        payment_confirmed: true,
        contest_id: Some("hdfc".to_string()),
        bids: vec![Bid {
            status: BidStatus::Accepted,
            updated_at: at("2023-10-07T11:30:00Z"),
            ..bid(
                "bid_4",
                "req_5678901234",
                demo_seller(),
                (85.0, 15),
                at("2023-10-15"),
                at("2023-10-10"),
                at("2023-10-06T10:15:00Z"),
            )
        }],
        ..request(
            "req_5678901234",
            jane.clone(),
            product(
                "prod_3",
                "KBM-WRL-003",
                "Wireless Keyboard and Mouse",
                "Wireless keyboard and mouse combo with long battery life",
                89.0,
                ProductCategory::Electronics,
            ),
            "Wireless keyboards and mice for the marketing team",
            (15, 100.0),
            None,
            RequestStatus::Fulfilled,
            at("2023-10-05T09:30:00Z"),
        )
    };

    let monitors = Request {
        bidding_ends_at: Some(now + Duration::minutes(40)),
        ..request(
            "req_2468013579",
            demo_customer(),
            product(
                "prod_4",
                "MON-4K-004",
                "27-inch 4K Monitor",
                "Ultra HD 4K monitor with wide color gamut for professional use",
                399.0,
                ProductCategory::Electronics,
            ),
            "27-inch 4K monitors for the design team",
            (8, 450.0),
            day("2023-12-01"),
            RequestStatus::Bidding,
            at("2023-11-05T14:20:00Z"),
        )
    };

    let desks = Request {
        bidding_ends_at: Some(now + Duration::minutes(35)),
        bids: vec![Bid {
            notes: Some("Includes installation and cable management".to_string()),
            ..bid(
                "bid_5",
                "req_1357924680",
                furnish,
                (520.0, 12),
                at("2023-12-15"),
                at("2023-11-20"),
                at("2023-11-09T10:30:00Z"),
            )
        }],
        ..request(
            "req_1357924680",
            robert,
            product(
                "prod_5",
                "DSK-STD-005",
                "Adjustable Standing Desk",
                "Electric height-adjustable standing desk with memory settings",
                549.0,
                ProductCategory::Furniture,
            ),
            "Standing desks for the engineering department",
            (12, 600.0),
            day("2023-12-20"),
            RequestStatus::Bidding,
            at("2023-11-08T09:45:00Z"),
        )
    };

    let participants = (1..=5)
        .map(|n| Participant {
            email: format!("participant{}@example.com", n),
            name: Some(format!("Participant {}", n)),
            status: if n <= 3 {
                ParticipantStatus::Confirmed
            } else {
                ParticipantStatus::Invited
            },
        })
        .collect();
    let headphones = Request {
        bidding_ends_at: Some(now + Duration::minutes(25)),
        bulk_buy: Some(BulkBuy {
            organizer_name: jane.name.clone(),
            organizer_phone: "555-123-4567".to_string(),
            participants,
        }),
        bids: vec![Bid {
            tiered_pricing: Some(tiers(&[(25, 185.0), (50, 175.0)])),
            ..bid(
                "bid_6",
                "req_9876543210",
                demo_seller(),
                (185.0, 25),
                at("2023-12-01"),
                at("2023-11-25"),
                at("2023-11-11T09:20:00Z"),
            )
        }],
        ..request(
            "req_9876543210",
            jane,
            product(
                "prod_6",
                "HPH-NC-006",
                "Wireless Headphones",
                "Noise-cancelling wireless headphones with 30-hour battery life",
                199.0,
                ProductCategory::Electronics,
            ),
            "Noise-cancelling headphones for open office",
            (25, 220.0),
            None,
            RequestStatus::Bidding,
            at("2023-11-10T11:15:00Z"),
        )
    };

    let supplier = demo_seller();
    let mut ledger = Ledger::with_inventory(demo_inventory(&at));
    ledger.append(PurchaseOrder {
        id: "PO-123456".to_string(),
        request_id: "req_5678901234".to_string(),
        seller_id: supplier.id,
        seller_name: supplier.name,
        product_id: "prod_3".to_string(),
        product_name: "Wireless Keyboard and Mouse".to_string(),
        sku: "KBM-WRL-003".to_string(),
        quantity: 15,
        unit_price: 85.0,
        total_price: 1275.0,
        expected_delivery_date: at("2023-10-15"),
        status: PurchaseOrderStatus::Delivered,
        created_at: at("2023-10-07T11:30:00Z"),
    });

    StoreState {
        requests: vec![laptops, chairs, keyboards, monitors, desks, headphones],
        ledger,
        events: EventLog::new(),
    }
}

fn demo_inventory(at: &impl Fn(&str) -> DateTime<Utc>) -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(
            "inv_1",
            "LPT-DEV-001",
            "Developer Laptop",
            "High-performance laptop for software development",
            "electronics",
            25,
            10,
            at("2023-11-01T10:00:00Z"),
        ),
        InventoryItem::new(
            "inv_2",
            "CHR-OFF-002",
            "Ergonomic Office Chair",
            "Comfortable ergonomic chair for office use",
            "furniture",
            100,
            50,
            at("2023-10-15T08:00:00Z"),
        ),
        InventoryItem::new(
            "inv_3",
            "KBM-WRL-003",
            "Wireless Keyboard and Mouse",
            "Wireless keyboard and mouse combo with long battery life",
            "electronics",
            50,
            15,
            at("2023-10-05T09:30:00Z"),
        ),
        InventoryItem::new(
            "inv_4",
            "MON-4K-004",
            "27-inch 4K Monitor",
            "Ultra HD 4K monitor with wide color gamut for professional use",
            "electronics",
            20,
            8,
            at("2023-11-05T14:20:00Z"),
        ),
        InventoryItem::new(
            "inv_5",
            "DSK-STD-005",
            "Adjustable Standing Desk",
            "Electric height-adjustable standing desk with memory settings",
            "furniture",
            30,
            12,
            at("2023-11-08T09:45:00Z"),
        ),
        InventoryItem::new(
            "inv_6",
            "HPH-NC-006",
            "Wireless Headphones",
            "Noise-cancelling wireless headphones with 30-hour battery life",
            "electronics",
            40,
            25,
            at("2023-11-10T11:15:00Z"),
        ),
    ]
}

// region:    --- Builders
fn customer(id: &str, name: &str, email: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn seller(id: &str, name: &str, email: &str) -> Seller {
    Seller {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn product(
    id: &str,
    sku: &str,
    name: &str,
    description: &str,
    price: f64,
    category: ProductCategory,
) -> ProductInfo {
    ProductInfo {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        image_url: None,
    }
}

fn tiers(pairs: &[(u32, f64)]) -> Vec<TieredPricing> {
    pairs
        .iter()
        .map(|&(min_quantity, price)| TieredPricing { min_quantity, price })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn request(
    id: &str,
    customer: Customer,
    product_info: ProductInfo,
    description: &str,
    (quantity, budget): (u32, f64),
    required_by: Option<NaiveDate>,
    status: RequestStatus,
    created_at: DateTime<Utc>,
) -> Request {
    Request {
        id: id.to_string(),
        customer_id: customer.id.clone(),
        customer_info: customer,
        product_info: Some(product_info),
        description: description.to_string(),
        quantity,
        budget: Some(budget),
        required_by,
        status,
        created_at,
        updated_at: created_at,
        bidding_ends_at: None,
        payment_auth_id: None,
        payment_confirmed: false,
        accept_alternatives: false,
        bids: Vec::new(),
        bulk_buy: None,
        contest_id: None,
    }
}

fn bid(
    id: &str,
    request_id: &str,
    seller: Seller,
    (price, quantity): (f64, u32),
    estimated_delivery_date: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> Bid {
    Bid {
        id: id.to_string(),
        request_id: request_id.to_string(),
        seller_id: seller.id.clone(),
        seller_info: Some(seller),
        price,
        quantity,
        estimated_delivery_date,
        expires_at,
        status: BidStatus::Pending,
        notes: None,
        tiered_pricing: None,
        created_at,
        updated_at: created_at,
    }
}
// endregion: --- Builders
