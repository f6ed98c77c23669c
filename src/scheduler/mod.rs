/// 진열 가격 갱신 스케줄러
/// 가격은 등록 시각과 현재 시각으로부터 조회 시점에 계산되므로 저장된 상태를
/// 고칠 필요가 없다. 스케줄러는 주기적으로 진열 가격을 다시 계산해 보여주기만
/// 하고 상품 데이터는 절대 수정하지 않는다.
// region:    --- Imports
use crate::listing::model::ProductView;
use crate::store::StoreManager;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::debug;

// endregion: --- Imports

// region:    --- Price Refresh Scheduler

/// 진열 가격 재계산 주기 (초)
const REFRESH_INTERVAL_SECS: u64 = 60;

/// 진열 가격 갱신 스케줄러
pub struct PriceRefreshScheduler {
    store: Arc<StoreManager>,
}

impl PriceRefreshScheduler {
    pub fn new(store: Arc<StoreManager>) -> Self {
        Self { store }
    }

    /// 스케줄러 시작
    pub async fn start(&self) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
            loop {
                interval.tick().await;
                refresh_price_board(&store).await;
            }
        });
    }
}

/// 판매 중 상품의 진열 가격 재계산
/// 읽기 전용: 계산 결과를 돌려줄 뿐 상품 상태는 바꾸지 않는다.
pub async fn refresh_price_board(store: &StoreManager) -> Vec<ProductView> {
    let now = Utc::now();
    let views: Vec<ProductView> = store
        .active_products()
        .await
        .iter()
        .map(|product| ProductView::from_product(product, now))
        .collect();

    debug!(
        "{:<12} --> 진열 가격 재계산 완료: {}개 상품",
        "Scheduler",
        views.len()
    );

    views
}

// endregion: --- Price Refresh Scheduler
