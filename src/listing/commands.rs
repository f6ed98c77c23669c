/// 상점 상태 변경 커맨드 처리
/// 1. 상품 등록
/// 2. 상품 제거
/// 3. 판매 완료 처리
/// 4. 장바구니 담기 / 빼기
/// 5. 결제 확정
// region:    --- Imports
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::listing::model::{CartLine, Product, ProductStatus, Transaction};
use crate::payment::PaymentProcessor;
use crate::store::{StoreError, StoreManager};

// endregion: --- Imports

// region:    --- Commands

/// 판매자 이름이 비어 있을 때 쓰는 기본값
pub const DEFAULT_SELLER_NAME: &str = "익명";

/// 이미지가 없을 때 쓰는 자리 표시 이미지
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/400/400";

/// 허용되는 결제 수단
pub const PAYMENT_METHODS: [&str; 3] = ["card", "paypal", "apple"];

/// 상품 등록 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub original_price: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub seller_name: Option<String>,
}

/// 상품 제거 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveProductCommand {
    pub product_id: String,
}

/// 판매 완료 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct MarkSoldCommand {
    pub product_id: String,
}

/// 장바구니 담기 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct AddToCartCommand {
    pub product_id: String,
}

/// 장바구니 빼기 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveFromCartCommand {
    pub product_id: String,
}

/// 결제 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutCommand {
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "card".to_string()
}

/// 상태 변경 오류를 응답 본문으로 변환
fn store_error_json(e: StoreError) -> serde_json::Value {
    serde_json::json!({ "error": e.message(), "code": e.code() })
}

/// 1. 상품 등록
pub async fn handle_create_product(
    cmd: CreateProductCommand,
    store: &StoreManager,
) -> Result<Product, serde_json::Value> {
    info!(
        "{:<12} --> 상품 등록 요청 처리 시작: {}",
        "Command", cmd.name
    );

    // 원가 검증: 양수인 금액만 허용
    if !cmd.original_price.is_finite() || cmd.original_price <= 0.0 {
        return Err(serde_json::json!({
            "error": "원가는 0보다 큰 금액이어야 합니다.",
            "code": "INVALID_PRICE",
            "original_price": cmd.original_price,
        }));
    }

    // 이름 검증: 빈 이름은 거부
    if cmd.name.trim().is_empty() {
        return Err(serde_json::json!({
            "error": "상품 이름은 비워 둘 수 없습니다.",
            "code": "INVALID_NAME"
        }));
    }

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: cmd.name.trim().to_string(),
        description: cmd.description,
        original_price: cmd.original_price,
        category: cmd.category,
        image_url: if cmd.image_url.is_empty() {
            DEFAULT_IMAGE_URL.to_string()
        } else {
            cmd.image_url
        },
        created_at: now,
        seller_name: match cmd.seller_name {
            Some(seller) if !seller.trim().is_empty() => seller,
            _ => DEFAULT_SELLER_NAME.to_string(),
        },
        status: ProductStatus::Active,
        sold_price: None,
        sold_at: None,
    };

    Ok(store.insert_product(product).await)
}

/// 2. 상품 제거
pub async fn handle_remove_product(
    cmd: RemoveProductCommand,
    store: &StoreManager,
) -> Result<Product, serde_json::Value> {
    info!("{:<12} --> 상품 제거 요청 처리 시작: {:?}", "Command", cmd);

    store.remove_product(&cmd.product_id).await.map_err(|e| {
        warn!("{:<12} --> 상품 제거 실패: {:?}", "Command", e);
        store_error_json(e)
    })
}

/// 3. 판매 완료 처리
/// 판매가는 처리 시점의 하락 가격으로 고정된다.
pub async fn handle_mark_sold(
    cmd: MarkSoldCommand,
    store: &StoreManager,
) -> Result<Product, serde_json::Value> {
    info!(
        "{:<12} --> 판매 완료 요청 처리 시작: {:?}",
        "Command", cmd
    );

    store.mark_sold(&cmd.product_id, Utc::now()).await.map_err(|e| {
        warn!("{:<12} --> 판매 완료 처리 실패: {:?}", "Command", e);
        store_error_json(e)
    })
}

/// 4-1. 장바구니 담기
pub async fn handle_add_to_cart(
    cmd: AddToCartCommand,
    store: &StoreManager,
) -> Result<CartLine, serde_json::Value> {
    info!(
        "{:<12} --> 장바구니 담기 요청 처리 시작: {:?}",
        "Command", cmd
    );

    store.add_to_cart(&cmd.product_id, Utc::now()).await.map_err(|e| {
        warn!("{:<12} --> 장바구니 담기 실패: {:?}", "Command", e);
        store_error_json(e)
    })
}

/// 4-2. 장바구니 빼기
pub async fn handle_remove_from_cart(
    cmd: RemoveFromCartCommand,
    store: &StoreManager,
) -> Result<(), serde_json::Value> {
    info!(
        "{:<12} --> 장바구니 빼기 요청 처리 시작: {:?}",
        "Command", cmd
    );

    store.remove_cart_line(&cmd.product_id).await.map_err(|e| {
        warn!("{:<12} --> 장바구니 빼기 실패: {:?}", "Command", e);
        store_error_json(e)
    })
}

/// 5. 결제 확정
/// 빈 장바구니는 결제 없이 거부하고, 그 외에는 모의 결제 승인을 기다린 뒤
/// 거래 내역 생성과 판매 완료 전이를 한 번에 처리한다.
pub async fn handle_checkout(
    cmd: CheckoutCommand,
    store: &StoreManager,
    payment: &impl PaymentProcessor,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 결제 요청 처리 시작: {:?}", "Command", cmd);

    // 결제 수단 검증: 허용된 수단만 거래 내역에 기록된다
    if !PAYMENT_METHODS.contains(&cmd.payment_method.as_str()) {
        return Err(serde_json::json!({
            "error": "지원하지 않는 결제 수단입니다.",
            "code": "INVALID_PAYMENT_METHOD",
            "payment_method": cmd.payment_method,
        }));
    }

    // 빈 장바구니 검증 (결제 호출 전에 거른다)
    let lines = store.cart_lines().await;
    if lines.is_empty() {
        return Err(store_error_json(StoreError::EmptyCart));
    }

    let total: f64 = lines.iter().map(|line| line.price_at_addition).sum();

    // 모의 결제 승인 대기
    let confirmation = payment.confirm(total, &cmd.payment_method).await;

    store
        .checkout(
            Uuid::new_v4().to_string(),
            cmd.payment_method,
            confirmation.reference,
            Utc::now(),
        )
        .await
        .map_err(|e| {
            warn!("{:<12} --> 결제 확정 실패: {:?}", "Command", e);
            store_error_json(e)
        })
}

// endregion: --- Commands
