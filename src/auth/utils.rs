//! # 认证工具函数

use axum::http::{HeaderMap, header};

/// 认证工具类
pub struct AuthUtils;

impl AuthUtils {
    /// `从HTTP头中提取Authorization头的值`
    #[must_use]
    pub fn extract_authorization_header(headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    /// `从Authorization头中提取Bearer` token
    ///
    /// # 参数
    /// - `auth_header`: Authorization头的完整值，如 "Bearer eyJ..."
    ///
    /// # 返回
    /// - `Some(String)`: Bearer token部分
    /// - `None`: 不是Bearer类型的认证头
    #[must_use]
    pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    /// 从请求头直接取出 Bearer token
    #[must_use]
    pub fn bearer_token_from_headers(headers: &HeaderMap) -> Option<String> {
        Self::extract_authorization_header(headers)
            .as_deref()
            .and_then(Self::extract_bearer_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def", Some("abc.def"))]
    #[case("Bearer   padded  ", Some("padded"))]
    #[case("Bearer ", None)]
    #[case("Basic abc", None)]
    #[case("abc", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            AuthUtils::extract_bearer_token(header),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn test_bearer_token_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(AuthUtils::bearer_token_from_headers(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(
            AuthUtils::bearer_token_from_headers(&headers),
            Some("tok".to_string())
        );
    }
}
