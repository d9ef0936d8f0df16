/// 발주서 / 재고 원장
/// 발주서는 추가만 가능하고, 재고는 조회 전용 데이터로만 사용한다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// region:    --- Purchase Order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Pending,
    Shipped,
    Delivered,
}

/// 발주서 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub request_id: String,
    pub seller_id: String,
    pub seller_name: String,
    pub product_id: String,
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub expected_delivery_date: DateTime<Utc>,
    pub status: PurchaseOrderStatus,
    pub created_at: DateTime<Utc>,
}
// endregion: --- Purchase Order

// region:    --- Inventory
/// 재고 항목 (조회 전용)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: u32,
    pub reserved: u32,
    pub available: u32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        sku: &str,
        name: &str,
        description: &str,
        category: &str,
        quantity: u32,
        reserved: u32,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            sku: sku.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            quantity,
            reserved,
            available: quantity.saturating_sub(reserved),
            last_updated,
        }
    }
}
// endregion: --- Inventory

// region:    --- Ledger
/// 발주서 원장
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    purchase_orders: Vec<PurchaseOrder>,
    inventory: Vec<InventoryItem>,
}

impl Ledger {
    pub fn with_inventory(inventory: Vec<InventoryItem>) -> Self {
        Self {
            purchase_orders: Vec::new(),
            inventory,
        }
    }

    pub fn append(&mut self, purchase_order: PurchaseOrder) {
        self.purchase_orders.push(purchase_order);
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        &self.purchase_orders
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }
}
// endregion: --- Ledger
