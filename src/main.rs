// region:    --- Imports
use axum::extract::DefaultBodyLimit;
use movie_auction_service::account::PostgresAccountStore;
use movie_auction_service::article::ArticleStore;
use movie_auction_service::config::Config;
use movie_auction_service::database::DatabaseManager;
use movie_auction_service::handlers::{self, AppState};
use movie_auction_service::session::SessionResolver;
use movie_auction_service::tmdb::TmdbClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
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

    let config = Config::from_env().inspect_err(|e| {
        error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
    })?;

    // DatabaseManager 생성
    let db_manager = Arc::new(
        DatabaseManager::connect(&config.database_url, config.database_max_connections).await?,
    );

    // 스키마 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    let movies = Arc::new(TmdbClient::from_config(&config));
    let port = config.port;
    let state = Arc::new(AppState {
        articles: ArticleStore::new(Arc::clone(&db_manager), movies),
        sessions: SessionResolver::new(PostgresAccountStore::new(Arc::clone(&db_manager))),
        config,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = handlers::routes(state)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 2));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
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
