// region:    --- Imports
use procurement_service::catalog::Catalog;
use procurement_service::config::AppConfig;
use procurement_service::handlers::{self, AppState};
use procurement_service::intent::{RemoteIntentExtractor, ResilientExtractor};
use procurement_service::store::RequestStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
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

    // 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> 설정 로드 성공", "Main");

    // 카탈로그 로드
    let catalog = Arc::new(Catalog::builtin()?);
    info!(
        "{:<12} --> 카탈로그 로드 성공: {}개 상품",
        "Main",
        catalog.products().len()
    );

    // 의도 추출기 (원격 실패 시 폴백)
    if config.llm.api_key.is_none() {
        warn!(
            "{:<12} --> GROQ_API_KEY 미설정, 모든 분석은 폴백으로 처리됩니다",
            "Main"
        );
    }
    let remote = RemoteIntentExtractor::new(config.llm.clone())?;
    let intent = ResilientExtractor::new(Arc::new(remote), config.llm.timeout);

    // 요청 저장소
    let store = if config.seed_demo_data {
        RequestStore::with_demo_data(Arc::clone(&catalog), config.bidding_window)
    } else {
        RequestStore::new(Arc::clone(&catalog), config.bidding_window)
    };

    let routes_all = handlers::router(AppState {
        store: Arc::new(store),
        catalog,
        intent,
    });

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
