/// 인메모리 상점 상태 관리자
/// 상품, 장바구니, 거래 내역을 한 곳에서 소유하고, 모든 상태 변경은
/// 이 관리자의 메서드를 통해서만 일어난다. 프로세스가 종료되면 상태도 사라진다.
// region:    --- Imports
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::listing::model::{CartLine, Product, ProductStatus, Transaction};
use crate::pricing;

// endregion: --- Imports

// region:    --- Store Error

/// 상태 변경 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    ProductNotFound,
    AlreadySold,
    AlreadyInCart,
    EmptyCart,
}

impl StoreError {
    /// 응답용 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::ProductNotFound => "PRODUCT_NOT_FOUND",
            StoreError::AlreadySold => "ALREADY_SOLD",
            StoreError::AlreadyInCart => "ALREADY_IN_CART",
            StoreError::EmptyCart => "EMPTY_CART",
        }
    }

    /// 응답용 오류 메시지
    pub fn message(&self) -> &'static str {
        match self {
            StoreError::ProductNotFound => "상품을 찾을 수 없습니다.",
            StoreError::AlreadySold => "이미 판매 완료된 상품입니다.",
            StoreError::AlreadyInCart => "이미 장바구니에 담긴 상품입니다.",
            StoreError::EmptyCart => "장바구니가 비어 있어 결제할 수 없습니다.",
        }
    }
}

// endregion: --- Store Error

// region:    --- Store Manager

/// 상점 내부 상태 (전체가 하나의 잠금 아래 있어 커맨드 단위로 원자적이다)
#[derive(Default)]
struct StoreState {
    products: HashMap<String, Product>,
    cart: Vec<CartLine>,
    transactions: Vec<Transaction>,
}

/// 상점 상태 관리자
pub struct StoreManager {
    state: RwLock<StoreState>,
}

impl StoreManager {
    /// 빈 상점 상태로 관리자 생성
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// 상품 등록
    pub async fn insert_product(&self, product: Product) -> Product {
        let mut state = self.state.write().await;
        state.products.insert(product.id.clone(), product.clone());
        product
    }

    /// 상품 제거 (흔적 없이 삭제, 장바구니의 사본은 건드리지 않는다)
    pub async fn remove_product(&self, product_id: &str) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        state
            .products
            .remove(product_id)
            .ok_or(StoreError::ProductNotFound)
    }

    /// 판매 완료 처리
    /// 판매가는 호출자가 주는 값이 아니라 처리 시점의 하락 가격으로 여기서 고정한다.
    pub async fn mark_sold(
        &self,
        product_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .get_mut(product_id)
            .ok_or(StoreError::ProductNotFound)?;

        if product.status == ProductStatus::Sold {
            return Err(StoreError::AlreadySold);
        }

        let sold_price =
            pricing::current_price_at(product.original_price, product.created_at, now);
        product.status = ProductStatus::Sold;
        product.sold_price = Some(sold_price);
        product.sold_at = Some(now);

        Ok(product.clone())
    }

    /// 장바구니 담기
    /// 담는 시점의 하락 가격을 고정 보관한다. 단일 수량 재고이므로 중복 담기는 거부한다.
    pub async fn add_to_cart(
        &self,
        product_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CartLine, StoreError> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .get(product_id)
            .cloned()
            .ok_or(StoreError::ProductNotFound)?;

        if product.status == ProductStatus::Sold {
            return Err(StoreError::AlreadySold);
        }
        if state.cart.iter().any(|line| line.product.id == product.id) {
            return Err(StoreError::AlreadyInCart);
        }

        let line = CartLine {
            price_at_addition: pricing::current_price_at(
                product.original_price,
                product.created_at,
                now,
            ),
            added_at: now,
            product,
        };
        state.cart.push(line.clone());

        Ok(line)
    }

    /// 장바구니 항목 제거
    pub async fn remove_cart_line(&self, product_id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let before = state.cart.len();
        state.cart.retain(|line| line.product.id != product_id);

        if state.cart.len() == before {
            Err(StoreError::ProductNotFound)
        } else {
            Ok(())
        }
    }

    /// 결제 확정
    /// 거래 내역을 생성하고, 아직 판매 중인 담긴 상품을 고정 가격 그대로 판매 완료로
    /// 전이시킨 뒤 장바구니를 비운다. 빈 장바구니는 거래를 만들지 않고 거부한다.
    pub async fn checkout(
        &self,
        transaction_id: String,
        payment_method: String,
        payment_reference: String,
        now: DateTime<Utc>,
    ) -> Result<Transaction, StoreError> {
        let mut state = self.state.write().await;
        if state.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let lines = std::mem::take(&mut state.cart);
        let total: f64 = lines.iter().map(|line| line.price_at_addition).sum();

        // 결제된 상품을 고정 가격으로 판매 완료 처리
        // (체크아웃 전에 재고에서 제거된 상품은 결제만 되고 전이할 대상이 없다)
        for line in &lines {
            if let Some(product) = state.products.get_mut(&line.product.id) {
                if product.status == ProductStatus::Active {
                    product.status = ProductStatus::Sold;
                    product.sold_price = Some(line.price_at_addition);
                    product.sold_at = Some(now);
                }
            }
        }

        let transaction = Transaction {
            id: transaction_id,
            date: now,
            items: lines,
            total,
            payment_method,
            payment_reference,
        };
        state.transactions.push(transaction.clone());

        Ok(transaction)
    }

    /// 전체 상품 조회 (등록 최신순)
    pub async fn all_products(&self) -> Vec<Product> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }

    /// 상품 조회
    pub async fn product(&self, product_id: &str) -> Option<Product> {
        let state = self.state.read().await;
        state.products.get(product_id).cloned()
    }

    /// 판매 중 상품 조회 (등록 최신순)
    pub async fn active_products(&self) -> Vec<Product> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.is_active())
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }

    /// 판매 완료 상품 조회 (판매 최신순)
    pub async fn sold_products(&self) -> Vec<Product> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.status == ProductStatus::Sold)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));
        products
    }

    /// 판매 완료 총수익 (판매가의 합)
    pub async fn total_revenue(&self) -> f64 {
        let state = self.state.read().await;
        state
            .products
            .values()
            .filter(|p| p.status == ProductStatus::Sold)
            .map(|p| p.sold_price.unwrap_or(0.0))
            .sum()
    }

    /// 장바구니 항목 조회 (담은 순서)
    pub async fn cart_lines(&self) -> Vec<CartLine> {
        let state = self.state.read().await;
        state.cart.clone()
    }

    /// 장바구니 합계 (고정 가격의 합)
    pub async fn cart_total(&self) -> f64 {
        let state = self.state.read().await;
        state.cart.iter().map(|line| line.price_at_addition).sum()
    }

    /// 거래 내역 조회 (최신순)
    pub async fn transactions(&self) -> Vec<Transaction> {
        let state = self.state.read().await;
        let mut transactions = state.transactions.clone();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }
}

impl Default for StoreManager {
    fn default() -> Self {
        Self::new()
    }
}

// endregion: --- Store Manager
