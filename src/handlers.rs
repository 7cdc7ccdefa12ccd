// region:    --- Imports
use crate::account::PostgresAccountStore;
use crate::article::{Article, ArticleStore, NewArticle, Pagination, SEARCH_ALL};
use crate::config::Config;
use crate::cookie::{session_cookie, set_cookie};
use crate::error::AppError;
use crate::session::{extract_token, SessionResolver};
use crate::tmdb::TmdbClient;
use crate::util::{date_diff, DateDiff};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- State
pub struct AppState {
    pub config: Config,
    pub articles: ArticleStore<TmdbClient>,
    pub sessions: SessionResolver<PostgresAccountStore>,
}

pub type SharedState = Arc<AppState>;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/articles", get(handle_get_articles).post(handle_create_article))
        .route("/articles/most-bids", get(handle_most_bids))
        .route(
            "/articles/:id",
            get(handle_get_article).delete(handle_delete_article),
        )
        .route("/articles/:id/poster", get(handle_get_poster))
        .route("/articles/:id/liked", get(handle_is_liked))
        .with_state(state)
}
// endregion: --- State

// region:    --- Views
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// 남은 경매 시간을 포함한 게시글
#[derive(Debug, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub time_left: DateDiff,
}

/// 세션 쿠키 갱신 헤더
fn refreshed_session(headers: &HeaderMap, config: &Config) -> Result<HeaderMap, AppError> {
    let token = extract_token(headers)?;
    let mut response_headers = HeaderMap::new();
    set_cookie(&mut response_headers, &session_cookie(&token, config))?;
    Ok(response_headers)
}
// endregion: --- Views

// region:    --- Query Handlers

/// 게시글 목록 / 검색
pub async fn handle_get_articles(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let search = params.search.as_deref().unwrap_or(SEARCH_ALL);
    info!("{:<12} --> 게시글 검색: {:?}", "HandlerQuery", search);
    let articles = state.articles.get_by_search(search, page).await?;
    Ok(Json(articles))
}

/// 입찰 많은 게시글
pub async fn handle_most_bids(
    State(state): State<SharedState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 입찰 많은 게시글", "HandlerQuery");
    let articles = state.articles.most_bids(page).await?;
    Ok(Json(articles))
}

/// 게시글 조회
pub async fn handle_get_article(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 게시글 조회 id: {}", "HandlerQuery", id);
    let article = state.articles.get(id).await?;
    let time_left = date_diff(article.auction_end, Utc::now());
    Ok(Json(ArticleView { article, time_left }))
}

/// 포스터 조회 (게시글이 없으면 기본 이미지)
pub async fn handle_get_poster(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 포스터 조회 id: {}", "HandlerQuery", id);
    let article = state.articles.get_or_fallback(id).await?;
    let poster = state.articles.get_poster(&article).await;
    Ok(Json(serde_json::json!({ "poster": poster })))
}

/// 구매자 관심 등록 여부
pub async fn handle_is_liked(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let buyer = state.sessions.resolve_buyer(&headers).await?;
    info!(
        "{:<12} --> 관심 여부 조회 id: {}, buyer: {}",
        "HandlerQuery", id, buyer.id
    );
    let article = state.articles.get(id).await?;
    let liked = state.articles.is_liked_by(&article, &buyer).await?;
    let response_headers = refreshed_session(&headers, &state.config)?;
    Ok((response_headers, Json(serde_json::json!({ "liked": liked }))))
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 게시글 등록 (업체 전용)
pub async fn handle_create_article(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(new): Json<NewArticle>,
) -> Result<impl IntoResponse, AppError> {
    let company = state.sessions.resolve_company(&headers).await?;
    info!(
        "{:<12} --> 게시글 등록 요청, company: {}",
        "Command", company.id
    );
    let article = state.articles.create(new, company.id).await?;
    let response_headers = refreshed_session(&headers, &state.config)?;
    Ok((StatusCode::CREATED, response_headers, Json(article)))
}

/// 게시글 삭제 (등록한 업체만)
pub async fn handle_delete_article(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let company = state.sessions.resolve_company(&headers).await?;
    info!(
        "{:<12} --> 게시글 삭제 요청 id: {}, company: {}",
        "Command", id, company.id
    );
    let article = state.articles.get(id).await?;
    if article.company_id() != Some(company.id) {
        return Err(AppError::NotArticleOwner(id));
    }

    state.articles.delete(&article).await?;
    let response_headers = refreshed_session(&headers, &state.config)?;
    Ok((StatusCode::NO_CONTENT, response_headers))
}

// endregion: --- Command Handlers
