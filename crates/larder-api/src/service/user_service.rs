//! 用户服务
//!
//! 管理员维护用户及其角色；自助注册走 `AuthService`

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::auth::hash_password;
use crate::dto::{CreateUserRequest, ListResponse, NameFilter, RoleDto, UpdateUserRequest, UserDto};
use crate::error::{ApiError, Result};
use crate::models::{NewUser, User};
use crate::repository::{RoleRepositoryTrait, UserRepositoryTrait};

const ENTITY: &str = "user";

pub struct UserService<U: UserRepositoryTrait, R: RoleRepositoryTrait> {
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U: UserRepositoryTrait, R: RoleRepositoryTrait> UserService<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>) -> Self {
        Self { users, roles }
    }

    async fn load(&self, id: i64) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    async fn to_dto(&self, user: User) -> Result<UserDto> {
        let roles = self.users.find_roles(user.id).await?;
        Ok(UserDto::from_model(user, roles))
    }

    #[instrument(skip(self))]
    pub async fn find_users(&self, filter: NameFilter) -> Result<ListResponse<UserDto>> {
        let query = filter.into_query();
        let users = self.users.find_many(&query).await?;
        let count = self.users.count(&query).await?;

        let mut items = Vec::with_capacity(users.len());
        for user in users {
            items.push(self.to_dto(user).await?);
        }

        Ok(ListResponse::new(items, count, query.limit, query.offset))
    }

    #[instrument(skip(self))]
    pub async fn find_user(&self, id: i64) -> Result<UserDto> {
        let user = self.load(id).await?;
        self.to_dto(user).await
    }

    #[instrument(skip(self, req), fields(name = %req.name, roles = req.roles.len()))]
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<UserDto> {
        let result = async {
            let new_user = NewUser {
                name: required_text(&req.name, "name")?,
                password_hash: hash_password(&req.password)?,
                role_ids: req.roles,
            };
            self.users.create(new_user).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let user = result?;
        info!(user_id = user.id, name = %user.name, "User created");
        self.to_dto(user).await
    }

    #[instrument(skip(self, req))]
    pub async fn update_user(&self, id: i64, req: UpdateUserRequest) -> Result<UserDto> {
        let result = async {
            let mut user = self.load(id).await?;
            merge_text(&mut user.name, req.name);
            self.users.update(&user).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        self.to_dto(result?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let result = require_hit(self.users.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);

        if result.is_ok() {
            info!(user_id = id, "User soft-deleted");
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn restore_user(&self, id: i64) -> Result<()> {
        let result = require_hit(self.users.restore(id).await, ENTITY, id);
        record_outcome(ENTITY, "restore", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn find_user_roles(&self, id: i64) -> Result<Vec<RoleDto>> {
        self.load(id).await?;
        let roles = self.users.find_roles(id).await?;
        Ok(roles.into_iter().map(RoleDto::from).collect())
    }

    /// 为用户分配角色，返回分配后的角色列表；重复分配是幂等的
    #[instrument(skip(self))]
    pub async fn add_user_role(&self, id: i64, role_id: i64) -> Result<Vec<RoleDto>> {
        let result = async {
            self.load(id).await?;
            self.roles
                .find_by_id(role_id)
                .await?
                .ok_or_else(|| ApiError::not_found("role", role_id))?;
            self.users.add_role(id, role_id).await
        }
        .await;
        record_outcome("user_role", "create", &result);

        if result? {
            info!(user_id = id, role_id, "Role assigned to user");
        }
        self.find_user_roles(id).await
    }

    #[instrument(skip(self))]
    pub async fn remove_user_role(&self, id: i64, role_id: i64) -> Result<()> {
        let result = async {
            self.load(id).await?;
            require_hit(self.users.remove_role(id, role_id).await, "user role", role_id)
        }
        .await;
        record_outcome("user_role", "delete", &result);

        if result.is_ok() {
            info!(user_id = id, role_id, "Role removed from user");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::models::Role;
    use crate::repository::{MockRoleRepositoryTrait, MockUserRepositoryTrait};
    use crate::service::test_support::ts;
    use fake::Fake;
    use fake::faker::internet::en::Username;
    use mockall::predicate::eq;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            password_hash: "$2b$12$stored".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn role(id: i64, name: &str) -> Role {
        Role {
            id,
            name: name.to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn service(
        users: MockUserRepositoryTrait,
        roles: MockRoleRepositoryTrait,
    ) -> UserService<MockUserRepositoryTrait, MockRoleRepositoryTrait> {
        UserService::new(Arc::new(users), Arc::new(roles))
    }

    #[tokio::test]
    async fn test_find_user_includes_role_names() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(user(1, "alice"))));
        users
            .expect_find_roles()
            .with(eq(1))
            .returning(|_| Ok(vec![role(1, "admin"), role(2, "user")]));

        let dto = service(users, MockRoleRepositoryTrait::new())
            .find_user(1)
            .await
            .unwrap();
        assert_eq!(dto.roles, vec!["admin", "user"]);
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_passes_roles() {
        let name: String = Username().fake();
        let expected = name.clone();

        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_create()
            .withf(move |u| {
                u.name == expected
                    && u.role_ids == vec![2]
                    && u.password_hash != "secret-pass"
                    && verify_password("secret-pass", &u.password_hash).unwrap_or(false)
            })
            .returning(|u| Ok(user(10, &u.name)));
        users
            .expect_find_roles()
            .returning(|_| Ok(vec![role(2, "user")]));

        let dto = service(users, MockRoleRepositoryTrait::new())
            .create_user(CreateUserRequest {
                name,
                password: "secret-pass".to_string(),
                roles: vec![2],
            })
            .await
            .unwrap();
        assert_eq!(dto.id, 10);
        assert_eq!(dto.roles, vec!["user"]);
    }

    #[tokio::test]
    async fn test_update_user_merges_name() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "alice"))));
        users
            .expect_update()
            .withf(|u| u.name == "alicia" && u.password_hash == "$2b$12$stored")
            .returning(|u| Ok(u.clone()));
        users.expect_find_roles().returning(|_| Ok(vec![]));

        let dto = service(users, MockRoleRepositoryTrait::new())
            .update_user(
                4,
                UpdateUserRequest {
                    name: Some("alicia".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(dto.name, "alicia");
    }

    #[tokio::test]
    async fn test_add_user_role_unknown_role_is_not_found() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "alice"))));
        users.expect_add_role().never();

        let mut roles = MockRoleRepositoryTrait::new();
        roles.expect_find_by_id().with(eq(99)).returning(|_| Ok(None));

        let err = service(users, roles).add_user_role(1, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "role", .. }));
    }

    #[tokio::test]
    async fn test_add_user_role_returns_current_roles() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "alice"))));
        users
            .expect_add_role()
            .with(eq(1), eq(2))
            .returning(|_, _| Ok(true));
        users
            .expect_find_roles()
            .returning(|_| Ok(vec![role(2, "user")]));

        let mut roles = MockRoleRepositoryTrait::new();
        roles
            .expect_find_by_id()
            .returning(|id| Ok(Some(role(id, "user"))));

        let assigned = service(users, roles).add_user_role(1, 2).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].name, "user");
    }

    #[tokio::test]
    async fn test_remove_unassigned_role_is_not_found() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "alice"))));
        users.expect_remove_role().returning(|_, _| Ok(false));

        let err = service(users, MockRoleRepositoryTrait::new())
            .remove_user_role(1, 2)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_find_user_roles_requires_user() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users.expect_find_roles().never();

        let err = service(users, MockRoleRepositoryTrait::new())
            .find_user_roles(3)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "user", .. }));
    }
}
