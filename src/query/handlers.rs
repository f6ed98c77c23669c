// region:    --- Imports
use chrono::Utc;
use tracing::info;

use crate::listing::model::{CartView, InventorySummary, ProductView, Transaction};
use crate::store::StoreManager;

// endregion: --- Imports

// region:    --- Query Handlers

/// 전체 상품 조회
/// 진열 가격과 진열 일차는 요청 시점 기준으로 유도한다.
pub async fn get_all_products(store: &StoreManager) -> Vec<ProductView> {
    info!("{:<12} --> 전체 상품 조회", "Query");
    let now = Utc::now();
    store
        .all_products()
        .await
        .iter()
        .map(|product| ProductView::from_product(product, now))
        .collect()
}

/// 상품 조회
pub async fn get_product(store: &StoreManager, product_id: &str) -> Option<ProductView> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", product_id);
    store
        .product(product_id)
        .await
        .map(|product| ProductView::from_product(&product, Utc::now()))
}

/// 상품 현재 가격 조회
pub async fn get_product_current_price(store: &StoreManager, product_id: &str) -> Option<f64> {
    info!(
        "{:<12} --> 상품 현재 가격 조회 id: {}",
        "Query", product_id
    );
    store
        .product(product_id)
        .await
        .map(|product| ProductView::from_product(&product, Utc::now()).current_price)
}

/// 판매 중 상품 조회
pub async fn get_active_products(store: &StoreManager) -> Vec<ProductView> {
    info!("{:<12} --> 판매 중 상품 조회", "Query");
    let now = Utc::now();
    store
        .active_products()
        .await
        .iter()
        .map(|product| ProductView::from_product(product, now))
        .collect()
}

/// 판매 완료 상품 조회
pub async fn get_sold_products(store: &StoreManager) -> Vec<ProductView> {
    info!("{:<12} --> 판매 완료 상품 조회", "Query");
    let now = Utc::now();
    store
        .sold_products()
        .await
        .iter()
        .map(|product| ProductView::from_product(product, now))
        .collect()
}

/// 재고 현황 요약 조회 (판매 중 수, 판매 완료 수, 총수익)
pub async fn get_inventory_summary(store: &StoreManager) -> InventorySummary {
    info!("{:<12} --> 재고 현황 요약 조회", "Query");
    InventorySummary {
        active_count: store.active_products().await.len(),
        sold_count: store.sold_products().await.len(),
        total_revenue: store.total_revenue().await,
    }
}

/// 장바구니 조회
pub async fn get_cart(store: &StoreManager) -> CartView {
    info!("{:<12} --> 장바구니 조회", "Query");
    CartView {
        lines: store.cart_lines().await,
        total: store.cart_total().await,
    }
}

/// 거래 내역 조회
pub async fn get_transactions(store: &StoreManager) -> Vec<Transaction> {
    info!("{:<12} --> 거래 내역 조회", "Query");
    store.transactions().await
}

// endregion: --- Query Handlers
