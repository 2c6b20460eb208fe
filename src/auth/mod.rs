//! # 认证授权模块
//!
//! JWT 令牌的签发与校验，以及基于令牌主体的用户/管理员守卫

pub mod guard;
pub mod jwt;
pub mod permissions;
pub mod types;
pub mod utils;

pub use guard::AuthGuard;
pub use permissions::UserRole;
pub use types::{AuthConfig, AuthContext, SubjectClaims};
pub use utils::AuthUtils;
