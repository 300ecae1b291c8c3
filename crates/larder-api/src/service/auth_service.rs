//! 认证服务
//!
//! 注册、登录（签发 access + refresh 双 Token）、刷新 access token

use std::sync::Arc;

use larder_shared::observability::metrics::record_auth_event;
use tracing::{info, instrument, warn};

use crate::auth::{
    Claims, IssuedToken, JwtManager, hash_password, verify_dummy_password, verify_password,
};
use crate::dto::{LoginRequest, SignUpRequest, UserDto};
use crate::error::{ApiError, Result};
use crate::models::NewUser;
use crate::repository::UserRepositoryTrait;

use super::required_text;

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserDto,
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

pub struct AuthService<U: UserRepositoryTrait> {
    users: Arc<U>,
    access: JwtManager,
    refresh: JwtManager,
}

impl<U: UserRepositoryTrait> AuthService<U> {
    pub fn new(users: Arc<U>, access: JwtManager, refresh: JwtManager) -> Self {
        Self {
            users,
            access,
            refresh,
        }
    }

    /// 校验 access token（供认证中间件使用）
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.access.verify_token(token)
    }

    pub fn access_expires_in_secs(&self) -> i64 {
        self.access.expires_in_secs()
    }

    pub fn refresh_expires_in_secs(&self) -> i64 {
        self.refresh.expires_in_secs()
    }

    /// 自助注册；新用户不带任何角色
    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn sign_up(&self, req: SignUpRequest) -> Result<UserDto> {
        let result = async {
            let name = required_text(&req.name, "name")?;
            if self.users.find_by_name(&name).await?.is_some() {
                return Err(ApiError::AlreadyExists(format!("用户名 {} 已被占用", name)));
            }

            self.users
                .create(NewUser {
                    name,
                    password_hash: hash_password(&req.password)?,
                    role_ids: Vec::new(),
                })
                .await
        }
        .await;
        record_auth_event("sign_up", outcome(&result));

        let user = result?;
        info!(user_id = user.id, "User signed up");
        Ok(UserDto::from_model(user, Vec::new()))
    }

    /// 登录
    ///
    /// 用户不存在与密码错误返回同一个错误
    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn login(&self, req: LoginRequest) -> Result<LoginOutcome> {
        let result = self.authenticate(req).await;
        record_auth_event("login", outcome(&result));

        match &result {
            Ok(login) => info!(user_id = login.user.id, "User logged in"),
            Err(ApiError::InvalidCredentials) => warn!("Login rejected: invalid credentials"),
            Err(_) => {}
        }
        result
    }

    async fn authenticate(&self, req: LoginRequest) -> Result<LoginOutcome> {
        let Some(user) = self.users.find_by_name(req.name.trim()).await? else {
            verify_dummy_password(&req.password);
            return Err(ApiError::InvalidCredentials);
        };

        if !verify_password(&req.password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let roles = self.users.find_roles(user.id).await?;
        let role_names: Vec<String> = roles.iter().map(|r| r.name.clone()).collect();

        let access = self
            .access
            .generate_token(user.id, &user.name, role_names.clone())?;
        let refresh = self.refresh.generate_token(user.id, &user.name, role_names)?;

        Ok(LoginOutcome {
            user: UserDto::from_model(user, roles),
            access,
            refresh,
        })
    }

    /// 用 refresh token 换取新的 access token，载荷保持不变
    ///
    /// 用户已被删除时拒绝刷新
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken> {
        let result = async {
            let claims = self.refresh.verify_token(refresh_token)?;
            let user_id = claims.user_id()?;

            if self.users.find_by_id(user_id).await?.is_none() {
                return Err(ApiError::Unauthorized("用户不存在或已被删除".to_string()));
            }

            self.access.reissue(&claims)
        }
        .await;
        record_auth_event("refresh", outcome(&result));
        result
    }

    /// 当前登录用户
    #[instrument(skip(self, claims), fields(user_id = %claims.sub))]
    pub async fn current_user(&self, claims: &Claims) -> Result<UserDto> {
        let user_id = claims.user_id()?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("用户不存在或已被删除".to_string()))?;

        let roles = self.users.find_roles(user.id).await?;
        Ok(UserDto::from_model(user, roles))
    }
}

fn outcome<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.error_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, TokenKind};
    use crate::models::{Role, User};
    use crate::repository::MockUserRepositoryTrait;
    use crate::service::test_support::ts;
    use larder_shared::config::AuthConfig;
    use mockall::predicate::eq;

    fn managers() -> (JwtManager, JwtManager) {
        let auth = AuthConfig::default();
        (
            JwtManager::new(JwtConfig::access(&auth)),
            JwtManager::new(JwtConfig::refresh(&auth)),
        )
    }

    fn service(users: MockUserRepositoryTrait) -> AuthService<MockUserRepositoryTrait> {
        let (access, refresh) = managers();
        AuthService::new(Arc::new(users), access, refresh)
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 1,
            name: "alice".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn admin_role() -> Role {
        Role {
            id: 1,
            name: "admin".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_existing_name_is_conflict() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_name()
            .returning(|_| Ok(Some(stored_user("whatever"))));
        users.expect_create().never();

        let err = service(users)
            .sign_up(SignUpRequest {
                name: "alice".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_without_roles() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_find_by_name().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| {
                u.name == "bob" && u.role_ids.is_empty() && u.password_hash.starts_with("$2")
            })
            .returning(|u| {
                Ok(User {
                    id: 2,
                    name: u.name,
                    password_hash: u.password_hash,
                    created_at: ts(),
                    updated_at: ts(),
                })
            });

        let dto = service(users)
            .sign_up(SignUpRequest {
                name: "bob".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(dto.id, 2);
        assert!(dto.roles.is_empty());
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_name()
            .withf(|name| name == "alice")
            .returning(|_| Ok(Some(stored_user("correct-horse"))));
        users
            .expect_find_roles()
            .with(eq(1))
            .returning(|_| Ok(vec![admin_role()]));

        let svc = service(users);
        let login = svc
            .login(LoginRequest {
                name: "alice".to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();

        let claims = svc.verify_access_token(&login.access.token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.roles, vec!["admin"]);
        assert_eq!(claims.kind, TokenKind::Access);

        // refresh token 不能当作 access token 使用
        assert!(svc.verify_access_token(&login.refresh.token).is_err());
        assert!(login.refresh.expires_at > login.access.expires_at);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user_look_the_same() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_name()
            .withf(|name| name == "alice")
            .returning(|_| Ok(Some(stored_user("correct-horse"))));
        users
            .expect_find_by_name()
            .withf(|name| name == "mallory")
            .returning(|_| Ok(None));
        users.expect_find_roles().never();

        let svc = service(users);
        let wrong_password = svc
            .login(LoginRequest {
                name: "alice".to_string(),
                password: "battery-staple".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = svc
            .login(LoginRequest {
                name: "mallory".to_string(),
                password: "battery-staple".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ApiError::InvalidCredentials));
        assert!(matches!(unknown_user, ApiError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_refresh_reissues_access_token() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_user("x"))));

        let (_, refresh) = managers();
        let refresh_token = refresh
            .generate_token(1, "alice", vec!["user".to_string()])
            .unwrap();

        let svc = service(users);
        let issued = svc.refresh(&refresh_token.token).await.unwrap();
        let claims = svc.verify_access_token(&issued.token).unwrap();
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.roles, vec!["user"]);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let users = MockUserRepositoryTrait::new();
        let (access, _) = managers();
        let access_token = access.generate_token(1, "alice", vec![]).unwrap();

        let err = service(users).refresh(&access_token.token).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_user_is_unauthorized() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let (_, refresh) = managers();
        let token = refresh.generate_token(1, "alice", vec![]).unwrap();

        let err = service(users).refresh(&token.token).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_current_user_reads_roles() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_user("x"))));
        users
            .expect_find_roles()
            .returning(|_| Ok(vec![admin_role()]));

        let (access, _) = managers();
        let token = access.generate_token(1, "alice", vec![]).unwrap();
        let svc = service(users);
        let claims = svc.verify_access_token(&token.token).unwrap();

        let me = svc.current_user(&claims).await.unwrap();
        assert_eq!(me.name, "alice");
        assert_eq!(me.roles, vec!["admin"]);
    }
}
