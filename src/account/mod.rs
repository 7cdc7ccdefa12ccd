// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Account Model
/// 계정의 역할: 구매자 또는 업체 중 정확히 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AccountRole {
    Buyer(i64),
    Company(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: i64,
    #[serde(skip)]
    pub session_token: String,
    pub role: AccountRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Buyer {
    pub id: i64,
    pub account_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: i64,
    pub account_id: i64,
}

impl Buyer {
    pub fn from_account(account: &Account) -> Result<Self, AppError> {
        match account.role {
            AccountRole::Buyer(id) => Ok(Self {
                id,
                account_id: account.id,
            }),
            AccountRole::Company(_) => Err(AppError::AccountTypeMismatch { expected: "buyer" }),
        }
    }
}

impl Company {
    pub fn from_account(account: &Account) -> Result<Self, AppError> {
        match account.role {
            AccountRole::Company(id) => Ok(Self {
                id,
                account_id: account.id,
            }),
            AccountRole::Buyer(_) => Err(AppError::AccountTypeMismatch {
                expected: "company",
            }),
        }
    }
}
// endregion: --- Account Model

// region:    --- Account Store
/// 세션 토큰으로 계정 조회
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get_by_session(&self, token: &str) -> Result<Account, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    a_id: i64,
    a_session_token: String,
    b_id: Option<i64>,
    c_id: Option<i64>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, AppError> {
        let role = match (self.b_id, self.c_id) {
            (Some(b_id), None) => AccountRole::Buyer(b_id),
            (None, Some(c_id)) => AccountRole::Company(c_id),
            (b_id, c_id) => {
                return Err(AppError::UnexpectedState(format!(
                    "account {} has buyer {:?} and company {:?}",
                    self.a_id, b_id, c_id
                )))
            }
        };

        Ok(Account {
            id: self.a_id,
            session_token: self.a_session_token,
            role,
        })
    }
}

/// 조회 행 -> 계정
/// 서로 다른 계정이 둘 이상이면 토큰 충돌, 한 계정의 행이 여러 개면 역할 데이터 이상
fn account_from_rows(mut rows: Vec<AccountRow>) -> Result<Account, AppError> {
    let mut account_ids: Vec<i64> = rows.iter().map(|row| row.a_id).collect();
    account_ids.sort_unstable();
    account_ids.dedup();

    match (account_ids.len(), rows.len()) {
        (0, _) => Err(AppError::SessionTokenInvalid),
        (1, 1) => rows.remove(0).into_account(),
        (1, n) => Err(AppError::UnexpectedState(format!(
            "account {} has {} role rows",
            account_ids[0], n
        ))),
        (n, _) => {
            warn!("{:<12} --> 세션 토큰이 계정 {}개에 매칭됨", "Account", n);
            Err(AppError::CaCestVraimentPasDeBol)
        }
    }
}

const GET_ACCOUNT_BY_SESSION: &str = r#"
    SELECT a.a_id, a.a_session_token, b.b_id, c.c_id
    FROM account a
    LEFT JOIN buyer b ON b.a_id = a.a_id
    LEFT JOIN company c ON c.a_id = a.a_id
    WHERE a.a_session_token = $1
"#;

/// PostgreSQL 계정 저장소
pub struct PostgresAccountStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresAccountStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn get_by_session(&self, token: &str) -> Result<Account, AppError> {
        info!("{:<12} --> 세션으로 계정 조회", "Account");
        let rows = sqlx::query_as::<_, AccountRow>(GET_ACCOUNT_BY_SESSION)
            .bind(token)
            .fetch_all(self.db_manager.pool())
            .await?;

        account_from_rows(rows)
    }
}
// endregion: --- Account Store

#[cfg(test)]
mod tests {
    use super::*;

    fn row(b_id: Option<i64>, c_id: Option<i64>) -> AccountRow {
        AccountRow {
            a_id: 1,
            a_session_token: "abc".to_string(),
            b_id,
            c_id,
        }
    }

    #[test]
    fn row_with_single_role_maps_to_account() {
        let account = row(Some(4), None).into_account().unwrap();
        assert_eq!(account.role, AccountRole::Buyer(4));

        let account = row(None, Some(9)).into_account().unwrap();
        assert_eq!(account.role, AccountRole::Company(9));
    }

    #[test]
    fn row_with_both_or_no_role_is_unexpected() {
        assert!(matches!(
            row(Some(1), Some(2)).into_account(),
            Err(AppError::UnexpectedState(_))
        ));
        assert!(matches!(
            row(None, None).into_account(),
            Err(AppError::UnexpectedState(_))
        ));
    }

    fn row_for(a_id: i64, b_id: Option<i64>, c_id: Option<i64>) -> AccountRow {
        AccountRow {
            a_id,
            ..row(b_id, c_id)
        }
    }

    #[test]
    fn no_rows_is_invalid_session() {
        assert!(matches!(
            account_from_rows(vec![]),
            Err(AppError::SessionTokenInvalid)
        ));
    }

    #[test]
    fn token_shared_by_two_accounts_is_collision() {
        let rows = vec![row_for(1, Some(4), None), row_for(2, None, Some(9))];
        assert!(matches!(
            account_from_rows(rows),
            Err(AppError::CaCestVraimentPasDeBol)
        ));
    }

    #[test]
    fn one_account_with_two_role_rows_is_unexpected() {
        // 구매자 행이 두 개인 계정 하나
        let rows = vec![row_for(1, Some(4), None), row_for(1, Some(5), None)];
        assert!(matches!(
            account_from_rows(rows),
            Err(AppError::UnexpectedState(_))
        ));
    }

    #[test]
    fn single_row_resolves_account() {
        let account = account_from_rows(vec![row_for(3, None, Some(9))]).unwrap();
        assert_eq!(account.id, 3);
        assert_eq!(account.role, AccountRole::Company(9));
    }

    #[test]
    fn narrowing_to_wrong_role_is_type_mismatch() {
        let buyer_account = row(Some(4), None).into_account().unwrap();
        assert_eq!(
            Buyer::from_account(&buyer_account).unwrap(),
            Buyer {
                id: 4,
                account_id: 1
            }
        );
        assert!(matches!(
            Company::from_account(&buyer_account),
            Err(AppError::AccountTypeMismatch { expected: "company" })
        ));

        let company_account = row(None, Some(9)).into_account().unwrap();
        assert!(matches!(
            Buyer::from_account(&company_account),
            Err(AppError::AccountTypeMismatch { expected: "buyer" })
        ));
    }
}
