// region:    --- Imports
use super::model::{Article, ArticleRow, NewArticle, Pagination, PLACEHOLDER_IMAGE};
use super::queries;
use crate::account::Buyer;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::tmdb::MovieProvider;
use sqlx::postgres::PgExecutor;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

/// 전체 조회를 뜻하는 검색어
pub const SEARCH_ALL: &str = "@all";

/// 외부 제공자에 요청하는 포스터 크기
pub const POSTER_SIZE: &str = "w500";

/// 게시글 이미지 조회
async fn fetch_images<'e, E>(executor: E, art_id: i64) -> Result<Vec<String>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(queries::GET_ARTICLE_IMAGES)
        .bind(art_id)
        .fetch_all(executor)
        .await
}

fn persisted_id(article: &Article) -> Result<i64, AppError> {
    article.id().ok_or_else(|| {
        AppError::UnexpectedState("fallback article is not stored".to_string())
    })
}

// region:    --- Article Store
pub struct ArticleStore<M: MovieProvider> {
    db_manager: Arc<DatabaseManager>,
    movies: Arc<M>,
}

impl<M: MovieProvider> ArticleStore<M> {
    pub fn new(db_manager: Arc<DatabaseManager>, movies: Arc<M>) -> Self {
        Self { db_manager, movies }
    }

    /// 행 -> 게시글 (이미지 조회 포함)
    async fn map_row(&self, row: ArticleRow) -> Result<Article, AppError> {
        let images = fetch_images(self.db_manager.pool(), row.art_id).await?;
        Ok(Article::from_row(row, images))
    }

    async fn map_rows(&self, rows: Vec<ArticleRow>) -> Result<Vec<Article>, AppError> {
        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            articles.push(self.map_row(row).await?);
        }
        Ok(articles)
    }

    /// 게시글 조회
    pub async fn get(&self, id: i64) -> Result<Article, AppError> {
        info!("{:<12} --> 게시글 조회 id: {}", "Article", id);
        let row = sqlx::query_as::<_, ArticleRow>(queries::GET_ARTICLE)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?
            .ok_or(AppError::ArticleNotFound(id))?;

        self.map_row(row).await
    }

    /// 게시글 조회, 없으면 대체 게시글
    pub async fn get_or_fallback(&self, id: i64) -> Result<Article, AppError> {
        match self.get(id).await {
            Err(AppError::ArticleNotFound(_)) => Ok(self.get_fallback(id)),
            result => result,
        }
    }

    /// 게시글 등록
    /// 영화, 게시글, 이미지는 하나의 트랜잭션으로 저장된다.
    pub async fn create(&self, new: NewArticle, company_id: i64) -> Result<Article, AppError> {
        info!(
            "{:<12} --> 게시글 등록: {} (movie {}, company {})",
            "Article", new.name, new.movie_id, company_id
        );
        let movie = self.movies.get_movie(new.movie_id).await?;

        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    sqlx::query(queries::INSERT_MOVIE)
                        .bind(new.movie_id)
                        .bind(&movie.title)
                        .execute(&mut **tx)
                        .await?;

                    let row = sqlx::query_as::<_, ArticleRow>(queries::INSERT_ARTICLE)
                        .bind(&new.name)
                        .bind(&new.description)
                        .bind(new.price)
                        .bind(new.min_bid)
                        .bind(new.auction_start)
                        .bind(new.auction_end)
                        .bind(new.movie_id)
                        .bind(company_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    for path in &new.images {
                        sqlx::query(queries::INSERT_ARTICLE_IMAGE)
                            .bind(row.art_id)
                            .bind(path)
                            .execute(&mut **tx)
                            .await?;
                    }

                    let images = fetch_images(&mut **tx, row.art_id).await?;
                    Ok::<Article, AppError>(Article::from_row(row, images))
                })
            })
            .await
    }

    /// 모든 게시글 조회
    pub async fn get_all(&self) -> Result<Vec<Article>, AppError> {
        info!("{:<12} --> 모든 게시글 조회", "Article");
        let rows = sqlx::query_as::<_, ArticleRow>(queries::GET_ALL_ARTICLES)
            .fetch_all(self.db_manager.pool())
            .await?;

        self.map_rows(rows).await
    }

    /// 게시글 검색
    /// `@all`은 페이지 없이 전체를 돌려준다.
    pub async fn get_by_search(
        &self,
        search: &str,
        page: Pagination,
    ) -> Result<Vec<Article>, AppError> {
        if search == SEARCH_ALL {
            return self.get_all().await;
        }
        let page = page.validate()?;

        info!(
            "{:<12} --> 게시글 검색: {:?} (limit {}, offset {})",
            "Article", search, page.limit, page.offset
        );
        let rows = sqlx::query_as::<_, ArticleRow>(queries::SEARCH_ARTICLES)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.db_manager.pool())
            .await?;

        self.map_rows(rows).await
    }

    /// 입찰 수 많은 순 조회
    pub async fn most_bids(&self, page: Pagination) -> Result<Vec<Article>, AppError> {
        let page = page.validate()?;
        info!(
            "{:<12} --> 입찰 많은 게시글 조회 (limit {}, offset {})",
            "Article", page.limit, page.offset
        );
        let rows = sqlx::query_as::<_, ArticleRow>(queries::GET_MOST_BIDS)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.db_manager.pool())
            .await?;

        self.map_rows(rows).await
    }

    /// 구매자의 관심 등록 여부
    pub async fn is_liked_by(&self, article: &Article, buyer: &Buyer) -> Result<bool, AppError> {
        let id = persisted_id(article)?;
        let liked = sqlx::query_scalar::<_, bool>(queries::IS_LIKED_BY)
            .bind(id)
            .bind(buyer.id)
            .fetch_one(self.db_manager.pool())
            .await?;
        Ok(liked)
    }

    /// 게시글 삭제
    /// 게시글과 이미지는 각각 별도 쿼리로 삭제된다 (트랜잭션 아님).
    pub async fn delete(&self, article: &Article) -> Result<(), AppError> {
        let id = persisted_id(article)?;
        info!("{:<12} --> 게시글 삭제 id: {}", "Article", id);

        sqlx::query(queries::DELETE_ARTICLE)
            .bind(id)
            .execute(self.db_manager.pool())
            .await?;
        sqlx::query(queries::DELETE_ARTICLE_IMAGES)
            .bind(id)
            .execute(self.db_manager.pool())
            .await?;
        Ok(())
    }

    pub fn get_fallback(&self, id: i64) -> Article {
        Article::fallback(id)
    }

    /// 포스터 경로
    /// 첫 번째 이미지, 없으면 영화 포스터, 그것도 실패하면 기본 이미지
    pub async fn get_poster(&self, article: &Article) -> String {
        if let Some(first) = article.images.first() {
            return first.clone();
        }

        let Some(movie_id) = article.movie_id() else {
            return PLACEHOLDER_IMAGE.to_string();
        };

        match self.movies.get_movie_poster_url(movie_id, POSTER_SIZE).await {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    "{:<12} --> 포스터 조회 실패 (movie {}): {}",
                    "Article", movie_id, e
                );
                PLACEHOLDER_IMAGE.to_string()
            }
        }
    }
}
// endregion: --- Article Store

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::model::ArticleOrigin;
    use crate::tmdb::Movie;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use sqlx::postgres::PgPoolOptions;

    /// 포스터 URL 고정 응답 또는 실패
    struct StubMovies {
        poster: Option<&'static str>,
    }

    #[async_trait]
    impl MovieProvider for StubMovies {
        async fn get_movie(&self, movie_id: i64) -> Result<Movie, AppError> {
            Ok(Movie {
                id: movie_id,
                title: "Stub".to_string(),
                poster_path: self.poster.map(str::to_string),
            })
        }

        async fn get_movie_poster_url(&self, movie_id: i64, size: &str) -> Result<String, AppError> {
            self.poster
                .map(|path| format!("https://img.test/{size}{path}"))
                .ok_or_else(|| AppError::MovieProvider(format!("no poster for {movie_id}")))
        }
    }

    /// 연결하지 않는 풀 (포스터 조회는 DB를 쓰지 않음)
    fn store(poster: Option<&'static str>) -> ArticleStore<StubMovies> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        ArticleStore::new(
            Arc::new(DatabaseManager::from_pool(pool)),
            Arc::new(StubMovies { poster }),
        )
    }

    fn article(images: Vec<&str>) -> Article {
        Article {
            origin: ArticleOrigin::Persisted {
                id: 1,
                movie_id: 603,
                company_id: 2,
            },
            name: "Neo's sunglasses".to_string(),
            description: "Worn on set".to_string(),
            price: 1000,
            min_bid: 50,
            auction_start: DateTime::<Utc>::UNIX_EPOCH,
            auction_end: DateTime::<Utc>::UNIX_EPOCH,
            images: images.into_iter().map(str::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn poster_prefers_first_image() {
        let store = store(Some("/matrix.jpg"));
        let poster = store.get_poster(&article(vec!["/img/1.jpg", "/img/2.jpg"])).await;
        assert_eq!(poster, "/img/1.jpg");
    }

    #[tokio::test]
    async fn poster_falls_back_to_movie_provider() {
        let store = store(Some("/matrix.jpg"));
        let poster = store.get_poster(&article(vec![])).await;
        assert_eq!(poster, "https://img.test/w500/matrix.jpg");
    }

    #[tokio::test]
    async fn poster_uses_placeholder_when_provider_fails() {
        let store = store(None);
        let poster = store.get_poster(&article(vec![])).await;
        assert_eq!(poster, "/img/article/placeholder.jpg");
    }

    #[tokio::test]
    async fn fallback_poster_is_placeholder() {
        let store = store(Some("/matrix.jpg"));
        let fallback = store.get_fallback(5);
        assert_eq!(store.get_poster(&fallback).await, PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn negative_pagination_is_rejected_before_query() {
        let store = store(None);
        let page = Pagination {
            limit: -1,
            offset: 0,
        };

        assert!(matches!(
            store.most_bids(page).await,
            Err(AppError::InvalidPagination(_))
        ));
        assert!(matches!(
            store.get_by_search("hoverboard", page).await,
            Err(AppError::InvalidPagination(_))
        ));
    }

    #[tokio::test]
    async fn fallback_cannot_be_deleted_or_liked() {
        let store = store(None);
        let fallback = store.get_fallback(5);
        let buyer = Buyer {
            id: 1,
            account_id: 1,
        };

        assert!(matches!(
            store.delete(&fallback).await,
            Err(AppError::UnexpectedState(_))
        ));
        assert!(matches!(
            store.is_liked_by(&fallback, &buyer).await,
            Err(AppError::UnexpectedState(_))
        ));
    }
}
