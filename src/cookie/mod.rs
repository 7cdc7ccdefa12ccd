// region:    --- Imports
use crate::config::Config;
use crate::error::AppError;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
// endregion: --- Imports

/// 세션 토큰 쿠키 이름
pub const SESSION_COOKIE: &str = "token";

/// Set-Cookie 헤더로 내보낼 쿠키
///
/// 이름과 값은 이스케이프하지 않으므로 호출하는 쪽에서 정제해야 한다.
#[derive(Debug, Clone, Default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub max_age: Option<i64>,
    pub secure: Option<bool>,
    pub path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// `name=value;` 뒤에 Max-Age, Secure, Path 순서
pub fn format_set_cookie(cookie: &Cookie) -> String {
    let mut header = format!("{}={};", cookie.name, cookie.value);
    if let Some(max_age) = cookie.max_age {
        header.push_str(&format!(" Max-Age={max_age};"));
    }
    if cookie.secure == Some(true) {
        header.push_str(" Secure;");
    }
    if let Some(path) = &cookie.path {
        header.push_str(&format!(" Path={path};"));
    }
    header
}

/// Set-Cookie 항목 추가 (기존 항목은 유지)
pub fn set_cookie(headers: &mut HeaderMap, cookie: &Cookie) -> Result<(), AppError> {
    let value = HeaderValue::from_str(&format_set_cookie(cookie))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

/// 인증된 응답마다 갱신하는 세션 쿠키
pub fn session_cookie(token: &str, config: &Config) -> Cookie {
    Cookie {
        name: SESSION_COOKIE.to_string(),
        value: token.to_string(),
        max_age: Some(config.session_max_age),
        secure: Some(config.cookie_secure),
        path: Some("/".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_value_only() {
        assert_eq!(format_set_cookie(&Cookie::new("token", "abc")), "token=abc;");
    }

    #[test]
    fn optional_fields_keep_fixed_order() {
        let all = Cookie {
            max_age: Some(3600),
            secure: Some(true),
            path: Some("/".into()),
            ..Cookie::new("token", "abc")
        };
        assert_eq!(
            format_set_cookie(&all),
            "token=abc; Max-Age=3600; Secure; Path=/;"
        );

        let path_and_age = Cookie {
            path: Some("/app".into()),
            max_age: Some(0),
            ..Cookie::new("a", "b")
        };
        assert_eq!(format_set_cookie(&path_and_age), "a=b; Max-Age=0; Path=/app;");

        let secure_only = Cookie {
            secure: Some(true),
            ..Cookie::new("a", "b")
        };
        assert_eq!(format_set_cookie(&secure_only), "a=b; Secure;");
    }

    #[test]
    fn secure_false_is_omitted() {
        let cookie = Cookie {
            secure: Some(false),
            ..Cookie::new("a", "b")
        };
        assert_eq!(format_set_cookie(&cookie), "a=b;");
    }

    #[test]
    fn set_cookie_appends_entries() {
        let mut headers = HeaderMap::new();
        set_cookie(&mut headers, &Cookie::new("a", "1")).unwrap();
        set_cookie(&mut headers, &Cookie::new("b", "2")).unwrap();

        let values: Vec<_> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["a=1;", "b=2;"]);
    }

    #[test]
    fn set_cookie_rejects_control_characters() {
        let mut headers = HeaderMap::new();
        let result = set_cookie(&mut headers, &Cookie::new("a", "line\nbreak"));
        assert!(matches!(result, Err(AppError::InvalidHeader(_))));
        assert!(headers.is_empty());
    }
}
