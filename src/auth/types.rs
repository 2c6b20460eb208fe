//! # 认证类型定义
//!
//! 定义认证相关的数据结构

use chrono::Utc;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::auth::permissions::UserRole;
use crate::error::{InventoryError, Result};
use entity::users;

/// 认证失败时统一返回给客户端的消息
pub const INVALID_CREDENTIALS: &str = "Invalid authentication credentials";

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT 密钥
    pub jwt_secret: String,
    /// 签名算法，仅支持 HMAC 系列
    pub jwt_algorithm: String,
    /// 本地签发令牌的过期时间（秒）
    pub jwt_expires_in: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_algorithm: "HS256".to_string(),
            jwt_expires_in: 3600, // 1 小时
        }
    }
}

impl AuthConfig {
    /// 解析配置中的签名算法
    pub fn algorithm(&self) -> Result<Algorithm> {
        let algorithm: Algorithm = self.jwt_algorithm.parse().map_err(|e| {
            InventoryError::config_with_source(
                format!("不支持的 JWT 算法: {}", self.jwt_algorithm),
                e,
            )
        })?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(InventoryError::config(format!(
                "JWT 算法必须为 HMAC 系列，当前为 {other:?}"
            ))),
        }
    }
}

/// JWT 载荷
///
/// `sub` 是一个 JSON 字符串，内容为 [`SubjectClaims`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// 主体
    pub sub: String,
    /// 过期时间，外部签发的令牌可以不带；存在时校验
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// 签发时间
    #[serde(default)]
    pub iat: i64,
}

impl JwtClaims {
    /// 创建新的 JWT 载荷
    pub fn new(subject: &SubjectClaims, expires_in_seconds: i64) -> Result<Self> {
        let now = Utc::now().timestamp();
        let exp = now.checked_add(expires_in_seconds).ok_or_else(|| {
            InventoryError::validation_field(
                format!("token lifetime out of range: {expires_in_seconds}"),
                "expires_in",
            )
        })?;
        Ok(Self {
            sub: serde_json::to_string(subject)?,
            iat: now,
            exp: Some(exp),
        })
    }

    /// 解析主体
    pub fn subject(&self) -> Result<SubjectClaims> {
        Ok(serde_json::from_str(&self.sub)?)
    }
}

/// 令牌主体：用户 ID 与角色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectClaims {
    pub id: i32,
    pub role: UserRole,
}

/// 通过认证的请求上下文
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// 当前用户
    pub user: users::Model,
    /// 令牌中携带的角色
    pub role: UserRole,
}

impl AuthContext {
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_round_trip_through_sub() {
        let subject = SubjectClaims {
            id: 5,
            role: UserRole::Admin,
        };
        let claims = JwtClaims::new(&subject, 60).unwrap();
        assert_eq!(claims.sub, r#"{"id":5,"role":"admin"}"#);
        assert_eq!(claims.subject().unwrap(), subject);
        assert_eq!(claims.exp, Some(claims.iat + 60));
    }

    #[test]
    fn test_subject_fails_closed() {
        let bad = [
            r#"{"id":"5","role":"user"}"#,
            r#"{"id":5}"#,
            r#"{"role":"user"}"#,
            r#"{"id":5,"role":7}"#,
            "5",
        ];
        for sub in bad {
            let claims = JwtClaims {
                sub: sub.to_string(),
                exp: None,
                iat: 0,
            };
            assert!(claims.subject().is_err(), "accepted {sub}");
        }
    }

    #[test]
    fn test_subject_keeps_unknown_role() {
        let claims = JwtClaims {
            sub: r#"{"id":5,"role":"guest"}"#.to_string(),
            exp: None,
            iat: 0,
        };
        let subject = claims.subject().unwrap();
        assert_eq!(subject.role, UserRole::Other("guest".to_string()));
        assert!(!subject.role.is_admin());
    }

    #[test]
    fn test_lifetime_overflow_rejected() {
        let subject = SubjectClaims {
            id: 5,
            role: UserRole::User,
        };
        let err = JwtClaims::new(&subject, i64::MAX).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Validation { field: Some(ref f), .. } if f == "expires_in"
        ));
    }

    #[test]
    fn test_algorithm_parsing() {
        let mut config = AuthConfig::default();
        assert_eq!(config.algorithm().unwrap(), Algorithm::HS256);

        config.jwt_algorithm = "HS512".to_string();
        assert_eq!(config.algorithm().unwrap(), Algorithm::HS512);

        config.jwt_algorithm = "ES256".to_string();
        assert!(config.algorithm().is_err());

        config.jwt_algorithm = "nope".to_string();
        assert!(config.algorithm().is_err());
    }
}
