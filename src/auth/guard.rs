//! # 认证守卫
//!
//! 校验 Bearer 令牌并加载对应用户。任何失败都以统一的 401 返回，
//! 具体原因只记录在日志里。

use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use tracing::warn;

use crate::auth::jwt::JwtManager;
use crate::auth::types::{AuthConfig, AuthContext, INVALID_CREDENTIALS};
use crate::error::{Context, InventoryError, Result};
use entity::users::Entity as Users;

/// 认证守卫
pub struct AuthGuard {
    jwt_manager: JwtManager,
}

impl AuthGuard {
    pub fn new(config: Arc<AuthConfig>) -> Result<Self> {
        Ok(Self {
            jwt_manager: JwtManager::new(config)?,
        })
    }

    #[must_use]
    pub const fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// 令牌有效且主体对应的用户存在
    pub async fn validate_current_user(
        &self,
        db: &DatabaseConnection,
        token: Option<&str>,
    ) -> Result<AuthContext> {
        let Some(token) = token else {
            return Err(reject("missing or malformed Authorization header"));
        };

        let subject = self
            .jwt_manager
            .validate_subject(token)
            .map_err(|e| reject(&e.to_string()))?;

        let user = Users::find_by_id(subject.id)
            .one(db)
            .await
            .context("Failed to load authenticated user")?
            .ok_or_else(|| reject(&format!("user {} does not exist", subject.id)))?;

        Ok(AuthContext {
            user,
            role: subject.role,
        })
    }

    /// 在 [`Self::validate_current_user`] 基础上要求角色为管理员
    pub async fn validate_current_admin(
        &self,
        db: &DatabaseConnection,
        token: Option<&str>,
    ) -> Result<AuthContext> {
        let context = self.validate_current_user(db, token).await?;
        if !context.role.is_admin() {
            return Err(reject(&format!(
                "user {} with role {} attempted an admin operation",
                context.user.id, context.role
            )));
        }
        Ok(context)
    }
}

fn reject(reason: &str) -> InventoryError {
    warn!(reason, "authentication rejected");
    InventoryError::authentication(INVALID_CREDENTIALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::UserRole;
    use crate::auth::types::SubjectClaims;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use entity::users;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};

    async fn setup() -> (DatabaseConnection, AuthGuard) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        users::ActiveModel {
            id: Set(1),
            username: Set("alice".to_string()),
            full_name: Set(Some("Alice".to_string())),
        }
        .insert(&db)
        .await
        .unwrap();

        let guard = AuthGuard::new(Arc::new(AuthConfig {
            jwt_secret: "guard-test-secret".to_string(),
            ..AuthConfig::default()
        }))
        .unwrap();

        (db, guard)
    }

    fn token(guard: &AuthGuard, id: i32, role: UserRole) -> String {
        guard
            .jwt_manager()
            .generate_token(&SubjectClaims { id, role }, None)
            .unwrap()
    }

    fn assert_uniform_rejection(result: Result<AuthContext>) {
        match result {
            Err(InventoryError::Authentication { message, .. }) => {
                assert_eq!(message, INVALID_CREDENTIALS);
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_user_token_accepted() {
        let (db, guard) = setup().await;
        let token = token(&guard, 1, UserRole::User);

        let context = guard
            .validate_current_user(&db, Some(&token))
            .await
            .unwrap();
        assert_eq!(context.user.username, "alice");
        assert_eq!(context.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_admin_check_rejects_user_role() {
        let (db, guard) = setup().await;
        let token = token(&guard, 1, UserRole::User);

        assert!(guard.validate_current_user(&db, Some(&token)).await.is_ok());
        assert_uniform_rejection(guard.validate_current_admin(&db, Some(&token)).await);
    }

    #[tokio::test]
    async fn test_admin_token_accepted() {
        let (db, guard) = setup().await;
        let token = token(&guard, 1, UserRole::Admin);

        let context = guard
            .validate_current_admin(&db, Some(&token))
            .await
            .unwrap();
        assert!(context.role.is_admin());
    }

    fn raw_token(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"guard-test-secret"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_external_role_accepted_for_user_routes() {
        let (db, guard) = setup().await;
        let token = token(&guard, 1, UserRole::parse("guest"));

        let context = guard
            .validate_current_user(&db, Some(&token))
            .await
            .unwrap();
        assert_eq!(context.role, UserRole::Other("guest".to_string()));
        assert_uniform_rejection(guard.validate_current_admin(&db, Some(&token)).await);
    }

    #[tokio::test]
    async fn test_token_without_exp_accepted() {
        let (db, guard) = setup().await;
        let token = raw_token(&serde_json::json!({"sub": r#"{"id":1,"role":"user"}"#}));

        let context = guard
            .validate_current_user(&db, Some(&token))
            .await
            .unwrap();
        assert_eq!(context.user_id(), 1);
    }

    #[tokio::test]
    async fn test_mistyped_subject_rejected() {
        let (db, guard) = setup().await;
        for sub in [r#"{"id":"1","role":"user"}"#, r#"{"role":"admin"}"#, r#"{"id":1}"#] {
            let token = raw_token(&serde_json::json!({"sub": sub}));
            assert_uniform_rejection(guard.validate_current_user(&db, Some(&token)).await);
        }
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let (db, guard) = setup().await;
        let token = token(&guard, 99, UserRole::Admin);

        assert_uniform_rejection(guard.validate_current_user(&db, Some(&token)).await);
    }

    #[tokio::test]
    async fn test_missing_and_garbage_tokens_rejected() {
        let (db, guard) = setup().await;

        assert_uniform_rejection(guard.validate_current_user(&db, None).await);
        assert_uniform_rejection(
            guard
                .validate_current_user(&db, Some("not-a-jwt"))
                .await,
        );
    }
}
