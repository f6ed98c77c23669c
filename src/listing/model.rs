// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing;

// endregion: --- Imports

// region:    --- Product

/// 상품 판매 상태
/// 전이는 ACTIVE -> SOLD 단방향뿐이다. (제거는 상태 전이가 아니라 삭제)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Sold,
}

// 상품 모델
// sold_price와 sold_at은 status가 SOLD일 때만 채워진다. (전이 경로는 store 한 곳뿐)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub original_price: f64,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub seller_name: String,
    pub status: ProductStatus,
    pub sold_price: Option<f64>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl Product {
    /// 판매 중 여부
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

// endregion: --- Product

// region:    --- Cart / Transaction

// 장바구니 항목 모델
// 담는 시점의 하락 가격을 고정 보관하며, 이후 시간이 지나도 다시 하락하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub price_at_addition: f64,
    pub added_at: DateTime<Utc>,
}

// 거래 내역 모델 (결제 확정 시 한 번 생성되고 이후 변경되지 않는다)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub payment_method: String,
    pub payment_reference: String,
}

// endregion: --- Cart / Transaction

// region:    --- Views

/// 조회용 상품 뷰
/// 진열 가격과 진열 일차는 저장하지 않고 요청 시점마다 created_at에서 유도한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub original_price: f64,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub seller_name: String,
    pub status: ProductStatus,
    pub sold_price: Option<f64>,
    pub sold_at: Option<DateTime<Utc>>,
    pub current_price: f64,
    pub day_number: i64,
}

impl ProductView {
    /// 기준 시점의 진열 가격을 계산해 뷰 생성
    /// 판매 완료 상품은 판매 시점에 고정된 가격을 그대로 보여 준다.
    pub fn from_product(product: &Product, now: DateTime<Utc>) -> Self {
        let current_price = match (product.status, product.sold_price) {
            (ProductStatus::Sold, Some(sold_price)) => sold_price,
            _ => pricing::current_price_at(product.original_price, product.created_at, now),
        };

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            original_price: product.original_price,
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            created_at: product.created_at,
            seller_name: product.seller_name.clone(),
            status: product.status,
            sold_price: product.sold_price,
            sold_at: product.sold_at,
            current_price,
            day_number: pricing::day_number_at(product.created_at, now),
        }
    }
}

/// 장바구니 조회 뷰 (합계는 고정 가격의 합)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: f64,
}

/// 재고 현황 요약 뷰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    pub active_count: usize,
    pub sold_count: usize,
    pub total_revenue: f64,
}

// endregion: --- Views
