// region:    --- Imports
use crate::config::Config;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;
// endregion: --- Imports

/// 영화 메타데이터
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
}

/// 외부 영화 정보 제공자
#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn get_movie(&self, movie_id: i64) -> Result<Movie, AppError>;

    async fn get_movie_poster_url(&self, movie_id: i64, size: &str) -> Result<String, AppError>;
}

// region:    --- TMDB Client
pub struct TmdbClient {
    client: Client,
    api_url: String,
    image_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_url: &str, image_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.tmdb_api_url,
            &config.tmdb_image_url,
            &config.tmdb_api_key,
        )
    }

    fn poster_url(&self, size: &str, poster_path: &str) -> String {
        format!("{}/{}{}", self.image_url, size, poster_path)
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn get_movie(&self, movie_id: i64) -> Result<Movie, AppError> {
        info!("{:<12} --> 영화 정보 조회 id: {}", "Tmdb", movie_id);
        let movie = self
            .client
            .get(format!("{}/movie/{}", self.api_url, movie_id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<Movie>()
            .await?;
        Ok(movie)
    }

    async fn get_movie_poster_url(&self, movie_id: i64, size: &str) -> Result<String, AppError> {
        let movie = self.get_movie(movie_id).await?;
        let poster_path = movie
            .poster_path
            .ok_or_else(|| AppError::MovieProvider(format!("movie {movie_id} has no poster")))?;
        Ok(self.poster_url(size, &poster_path))
    }
}
// endregion: --- TMDB Client
