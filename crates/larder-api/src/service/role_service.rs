//! 角色服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{CreateRoleRequest, ListResponse, NameFilter, RoleDto, UpdateRoleRequest};
use crate::error::{ApiError, Result};
use crate::repository::RoleRepositoryTrait;

const ENTITY: &str = "role";

pub struct RoleService<R: RoleRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: RoleRepositoryTrait> RoleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn find_roles(&self, filter: NameFilter) -> Result<ListResponse<RoleDto>> {
        let query = filter.into_query();
        let roles = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            roles.into_iter().map(RoleDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_role(&self, id: i64) -> Result<RoleDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(RoleDto::from)
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, req))]
    pub async fn create_role(&self, req: CreateRoleRequest) -> Result<RoleDto> {
        let result = async {
            let name = required_text(&req.name, "name")?;
            self.repo.create(&name).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let role = result?;
        info!(role_id = role.id, name = %role.name, "Role created");
        Ok(role.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_role(&self, id: i64, req: UpdateRoleRequest) -> Result<RoleDto> {
        let result = async {
            let mut role = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

            merge_text(&mut role.name, req.name);
            self.repo.update(&role).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);

        if result.is_ok() {
            info!(role_id = id, "Role soft-deleted");
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn restore_role(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.restore(id).await, ENTITY, id);
        record_outcome(ENTITY, "restore", &result);
        result
    }
}
