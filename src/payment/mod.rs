/// 결제 처리
/// 실제 PG 연동 대신 고정 지연 후 항상 승인되는 시뮬레이션 구현을 쓴다.
/// 결제 실패 경로는 모델링하지 않는다.
// region:    --- Imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Payment Types

/// 결제 승인 내역
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub reference: String,
    pub amount: f64,
    pub method: String,
    pub processed_at: DateTime<Utc>,
}

/// 결제 처리기 트레이트
#[async_trait]
pub trait PaymentProcessor {
    async fn confirm(&self, amount: f64, method: &str) -> PaymentConfirmation;
}

// endregion: --- Payment Types

// region:    --- Simulated Processor

/// 시뮬레이션 결제의 처리 지연 (밀리초)
const CONFIRMATION_DELAY_MS: u64 = 2000;

/// 시뮬레이션 결제 처리기
pub struct SimulatedPaymentProcessor {
    delay: Duration,
}

impl SimulatedPaymentProcessor {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(CONFIRMATION_DELAY_MS),
        }
    }

    /// 지연 시간을 지정해 생성 (테스트용)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedPaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentProcessor {
    /// 고정 지연 후 승인 내역 반환
    async fn confirm(&self, amount: f64, method: &str) -> PaymentConfirmation {
        info!(
            "{:<12} --> 결제 요청: {}원 ({})",
            "Payment", amount, method
        );
        tokio::time::sleep(self.delay).await;

        let confirmation = PaymentConfirmation {
            reference: format!("PAY-{}", Uuid::new_v4()),
            amount,
            method: method.to_string(),
            processed_at: Utc::now(),
        };
        info!(
            "{:<12} --> 결제 승인: {}",
            "Payment", confirmation.reference
        );
        confirmation
    }
}

// endregion: --- Simulated Processor
