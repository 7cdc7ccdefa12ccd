// region:    --- Imports
use crate::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;
// endregion: --- Imports

pub const DEFAULT_TMDB_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_URL: &str = "https://image.tmdb.org/t/p";

// region:    --- Config
/// 환경 변수 기반 서비스 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub tmdb_api_key: String,
    pub tmdb_api_url: String,
    pub tmdb_image_url: String,
    pub port: u16,
    /// 세션 쿠키 Max-Age (초)
    pub session_max_age: i64,
    pub cookie_secure: bool,
}

impl Config {
    /// 환경 변수에서 설정 로드 (.env 파일이 있으면 먼저 읽는다)
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("{:<12} --> .env 로드: {}", "Config", path.display());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            tmdb_api_key: required("TMDB_API_KEY")?,
            tmdb_api_url: try_load("TMDB_API_URL", DEFAULT_TMDB_API_URL)?,
            tmdb_image_url: try_load("TMDB_IMAGE_URL", DEFAULT_TMDB_IMAGE_URL)?,
            port: try_load("PORT", "3000")?,
            session_max_age: try_load("SESSION_MAX_AGE", "604800")?,
            cookie_secure: try_load("COOKIE_SECURE", "true")?,
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{key} must be set")))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{:<12} --> {} 미설정, 기본값 사용: {}", "Config", key, default);
        default.to_string()
    });

    raw.parse()
        .map_err(|e| AppError::Config(format!("invalid {key} value {raw:?}: {e}")))
}
// endregion: --- Config

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset() {
        let port: u16 = try_load("MOVIE_AUCTION_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn rejects_unparsable_default() {
        let result: Result<u16, _> = try_load("MOVIE_AUCTION_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_required_is_config_error() {
        let result = required("MOVIE_AUCTION_TEST_MISSING_REQUIRED");
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
