// region:    --- Imports
use crate::listing::commands::{
    handle_add_to_cart, handle_checkout as command_handle_checkout,
    handle_create_product as command_handle_create_product,
    handle_mark_sold as command_handle_mark_sold, handle_remove_from_cart, handle_remove_product,
    AddToCartCommand, CheckoutCommand, CreateProductCommand, MarkSoldCommand,
    RemoveFromCartCommand, RemoveProductCommand,
};
use crate::listing::model::ProductView;
use crate::payment::SimulatedPaymentProcessor;
use crate::query;
use crate::store::StoreManager;
use crate::suggest::{GeminiClient, SuggestionRequest, SuggestionService};
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- Router

/// 라우터 설정
pub fn routes(store: Arc<StoreManager>, gemini: Arc<GeminiClient>) -> Router {
    // 프론트엔드 연동을 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/products",
            post(handle_create_product).get(handle_get_products),
        )
        .route("/products/active", get(handle_get_active_products))
        .route(
            "/products/:id",
            get(handle_get_product).delete(handle_delete_product),
        )
        .route("/products/:id/sold", post(handle_mark_sold))
        .route("/products/:id/price", get(handle_get_product_price))
        .route("/suggest", post(handle_suggest))
        .route("/sales", get(handle_get_sales))
        .route("/summary", get(handle_get_summary))
        .route("/cart", get(handle_get_cart))
        .route("/cart/items", post(handle_add_cart_item))
        .route("/cart/items/:id", delete(handle_delete_cart_item))
        .route("/checkout", post(handle_checkout))
        .route("/transactions", get(handle_get_transactions))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 20)) // base64 이미지 업로드를 위한 바디 사이즈 증가(20MB)
        .with_state((store, gemini))
}

/// 오류 코드에 따른 상태 코드 매핑
fn error_status(e: &serde_json::Value) -> axum::http::StatusCode {
    if e["code"] == "PRODUCT_NOT_FOUND" {
        axum::http::StatusCode::NOT_FOUND
    } else {
        axum::http::StatusCode::BAD_REQUEST
    }
}

// endregion: --- Router

// region:    --- Command Handlers

/// 상품 등록 요청 처리
pub async fn handle_create_product(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Json(cmd): Json<CreateProductCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 등록 요청 수신: {}", "Command", cmd.name);

    match command_handle_create_product(cmd, &store).await {
        Ok(product) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "상품이 등록되었습니다.",
                "product": ProductView::from_product(&product, Utc::now()),
            })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 상품 제거 요청 처리
pub async fn handle_delete_product(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 제거 요청 수신 id: {}", "Command", product_id);

    match handle_remove_product(RemoveProductCommand { product_id }, &store).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({ "message": "상품이 제거되었습니다." })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 판매 완료 요청 처리
/// 판매가는 클라이언트가 보내지 않는다. 처리 시점의 할인가로 서버가 확정한다.
pub async fn handle_mark_sold(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매 완료 요청 수신 id: {}",
        "Command", product_id
    );

    match command_handle_mark_sold(MarkSoldCommand { product_id }, &store).await {
        Ok(product) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "message": "판매 완료 처리되었습니다.",
                "product": ProductView::from_product(&product, Utc::now()),
            })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 장바구니 담기 요청 처리
pub async fn handle_add_cart_item(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Json(cmd): Json<AddToCartCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 장바구니 담기 요청 수신: {:?}", "Command", cmd);

    match handle_add_to_cart(cmd, &store).await {
        Ok(line) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "message": "장바구니에 담았습니다.",
                "line": line,
            })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 장바구니 빼기 요청 처리
pub async fn handle_delete_cart_item(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 장바구니 빼기 요청 수신 id: {}",
        "Command", product_id
    );

    match handle_remove_from_cart(RemoveFromCartCommand { product_id }, &store).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({ "message": "장바구니에서 뺐습니다." })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 결제 요청 처리
pub async fn handle_checkout(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Json(cmd): Json<CheckoutCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 결제 요청 수신: {:?}", "Command", cmd);

    let payment = SimulatedPaymentProcessor::new();
    match command_handle_checkout(cmd, &store, &payment).await {
        Ok(transaction) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "message": "결제가 완료되었습니다.",
                "transaction": transaction,
            })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 상품 정보 추천 요청 처리
/// 추천 실패도 200으로 응답한다. source 필드로 대체 여부를 구분한다.
pub async fn handle_suggest(
    State((_, gemini)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Json(req): Json<SuggestionRequest>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 정보 추천 요청 수신", "Command");

    let outcome = gemini
        .suggest(&req.image_base64, req.hint.as_deref())
        .await;
    let source = if outcome.is_fallback() {
        "fallback"
    } else {
        "gemini"
    };
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "source": source,
            "suggestion": outcome.into_suggestion(),
        })),
    )
        .into_response()
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 전체 상품 조회
pub async fn handle_get_products(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 전체 상품 조회", "HandlerQuery");
    Json(query::handlers::get_all_products(&store).await).into_response()
}

/// 판매 중 상품 조회
pub async fn handle_get_active_products(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 판매 중 상품 조회", "HandlerQuery");
    Json(query::handlers::get_active_products(&store).await).into_response()
}

/// 상품 조회
pub async fn handle_get_product(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", product_id);
    match query::handlers::get_product(&store, &product_id).await {
        Some(product) => Json(product).into_response(),
        None => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "상품을 찾을 수 없습니다.",
                "code": "PRODUCT_NOT_FOUND"
            })),
        )
            .into_response(),
    }
}

/// 상품 현재 가격 조회
pub async fn handle_get_product_price(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 현재 가격 조회 id: {}",
        "HandlerQuery", product_id
    );
    match query::handlers::get_product_current_price(&store, &product_id).await {
        Some(price) => Json(serde_json::json!({ "current_price": price })).into_response(),
        None => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "상품을 찾을 수 없습니다.",
                "code": "PRODUCT_NOT_FOUND"
            })),
        )
            .into_response(),
    }
}

/// 판매 완료 상품 조회
pub async fn handle_get_sales(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 판매 완료 상품 조회", "HandlerQuery");
    Json(query::handlers::get_sold_products(&store).await).into_response()
}

/// 재고 현황 요약 조회
pub async fn handle_get_summary(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 재고 현황 요약 조회", "HandlerQuery");
    Json(query::handlers::get_inventory_summary(&store).await).into_response()
}

/// 장바구니 조회
pub async fn handle_get_cart(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 장바구니 조회", "HandlerQuery");
    Json(query::handlers::get_cart(&store).await).into_response()
}

/// 거래 내역 조회
pub async fn handle_get_transactions(
    State((store, _)): State<(Arc<StoreManager>, Arc<GeminiClient>)>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 내역 조회", "HandlerQuery");
    Json(query::handlers::get_transactions(&store).await).into_response()
}

// endregion: --- Query Handlers
