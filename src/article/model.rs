use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 포스터를 구할 수 없을 때 사용하는 이미지
pub const PLACEHOLDER_IMAGE: &str = "/img/article/placeholder.jpg";

// region:    --- Article
/// 저장된 게시글인지, 찾지 못한 게시글을 대신하는 값인지
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum ArticleOrigin {
    Persisted {
        id: i64,
        movie_id: i64,
        company_id: i64,
    },
    Fallback {
        requested_id: i64,
    },
}

/// 경매 게시글
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    #[serde(flatten)]
    pub origin: ArticleOrigin,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub min_bid: i64,
    pub auction_start: DateTime<Utc>,
    pub auction_end: DateTime<Utc>,
    pub images: Vec<String>,
}

impl Article {
    /// 저장소에 없는 게시글 자리에 쓰는 값
    pub fn fallback(requested_id: i64) -> Self {
        Self {
            origin: ArticleOrigin::Fallback { requested_id },
            name: String::new(),
            description: String::new(),
            price: 0,
            min_bid: 0,
            auction_start: DateTime::<Utc>::UNIX_EPOCH,
            auction_end: DateTime::<Utc>::UNIX_EPOCH,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
        }
    }

    pub(crate) fn from_row(row: ArticleRow, images: Vec<String>) -> Self {
        Self {
            origin: ArticleOrigin::Persisted {
                id: row.art_id,
                movie_id: row.m_id,
                company_id: row.c_id,
            },
            name: row.art_name,
            description: row.art_description,
            price: row.art_price,
            min_bid: row.art_min_bidding,
            auction_start: row.art_auction_start,
            auction_end: row.art_auction_end,
            images,
        }
    }

    /// 저장된 게시글의 id, 대체 게시글이면 None
    pub fn id(&self) -> Option<i64> {
        match self.origin {
            ArticleOrigin::Persisted { id, .. } => Some(id),
            ArticleOrigin::Fallback { .. } => None,
        }
    }

    pub fn movie_id(&self) -> Option<i64> {
        match self.origin {
            ArticleOrigin::Persisted { movie_id, .. } => Some(movie_id),
            ArticleOrigin::Fallback { .. } => None,
        }
    }

    pub fn company_id(&self) -> Option<i64> {
        match self.origin {
            ArticleOrigin::Persisted { company_id, .. } => Some(company_id),
            ArticleOrigin::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ArticleOrigin::Fallback { .. })
    }
}
// endregion: --- Article

// region:    --- Rows & Commands
/// article 테이블 행
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ArticleRow {
    pub art_id: i64,
    pub art_name: String,
    pub art_description: String,
    pub art_price: i64,
    pub art_min_bidding: i64,
    pub art_auction_start: DateTime<Utc>,
    pub art_auction_end: DateTime<Utc>,
    pub m_id: i64,
    pub c_id: i64,
}

/// 게시글 생성 명령
#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub min_bid: i64,
    pub auction_start: DateTime<Utc>,
    pub auction_end: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    pub movie_id: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Pagination {
    /// 음수 limit / offset 거부
    pub fn validate(self) -> Result<Self, AppError> {
        if self.limit < 0 {
            return Err(AppError::InvalidPagination(format!(
                "limit must not be negative: {}",
                self.limit
            )));
        }
        if self.offset < 0 {
            return Err(AppError::InvalidPagination(format!(
                "offset must not be negative: {}",
                self.offset
            )));
        }
        Ok(self)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
// endregion: --- Rows & Commands
