//! 요청 쿠키의 세션 토큰으로 호출자 계정 확인
// region:    --- Imports
use crate::account::{Account, AccountStore, Buyer, Company};
use crate::cookie::SESSION_COOKIE;
use crate::error::AppError;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use tracing::info;
// endregion: --- Imports

/// cookie 헤더에서 첫 번째 `token=` 값 추출
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::SessionTokenInvalid)?;

    let mut cookies = raw.to_string();
    if !cookies.ends_with(';') {
        cookies.push(';');
    }

    cookies
        .split(';')
        .filter_map(|pair| pair.trim_start().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::SessionTokenInvalid)
}

// region:    --- Session Resolver
pub struct SessionResolver<A: AccountStore> {
    accounts: A,
}

impl<A: AccountStore> SessionResolver<A> {
    pub fn new(accounts: A) -> Self {
        Self { accounts }
    }

    pub async fn resolve_account(&self, headers: &HeaderMap) -> Result<Account, AppError> {
        let token = extract_token(headers)?;
        let account = self.accounts.get_by_session(&token).await?;
        info!("{:<12} --> 계정 확인 id: {}", "Session", account.id);
        Ok(account)
    }

    pub async fn resolve_buyer(&self, headers: &HeaderMap) -> Result<Buyer, AppError> {
        let account = self.resolve_account(headers).await?;
        Buyer::from_account(&account)
    }

    pub async fn resolve_company(&self, headers: &HeaderMap) -> Result<Company, AppError> {
        let account = self.resolve_account(headers).await?;
        Company::from_account(&account)
    }
}
// endregion: --- Session Resolver
