//! # 用户角色定义
//!
//! 令牌主体中携带的角色。只有 `admin` 有特殊含义，
//! 其余角色由外部签发方决定，原样保留。

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

/// 用户角色枚举
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// 管理员
    Admin,
    /// 普通用户
    User,
    /// 外部签发方定义的其它角色，按普通用户对待
    Other(String),
}

impl UserRole {
    /// 获取角色的字符串表示
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(role) => role,
        }
    }

    /// 从字符串解析角色，未知角色归入 [`UserRole::Other`]
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "user" => Self::User,
            other => Self::Other(other.to_string()),
        }
    }

    /// 检查是否为管理员
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for UserRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Other(role),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
