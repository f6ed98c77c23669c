// region:    --- Imports
use binstore_service::handlers;
use binstore_service::scheduler::PriceRefreshScheduler;
use binstore_service::store::StoreManager;
use binstore_service::suggest::GeminiClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 재고 저장소 생성 (모든 상태는 메모리에만 존재, 재시작 시 초기화)
    let store = Arc::new(StoreManager::new());
    info!("{:<12} --> 재고 저장소 초기화 성공", "Main");

    // Gemini 클라이언트 생성 (키가 없어도 서버는 뜨고 추천만 기본값으로 대체)
    let gemini = Arc::new(GeminiClient::from_env());

    // 진열 가격 갱신 스케줄러 시작
    let scheduler = PriceRefreshScheduler::new(Arc::clone(&store));
    scheduler.start().await;

    // 라우터 설정
    let routes_all = handlers::routes(Arc::clone(&store), gemini);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr().unwrap()
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
