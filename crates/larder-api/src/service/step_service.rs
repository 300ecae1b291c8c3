//! 步骤服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{CreateStepRequest, ListResponse, NameFilter, StepDto, UpdateStepRequest};
use crate::error::{ApiError, Result};
use crate::repository::StepRepositoryTrait;

const ENTITY: &str = "step";

pub struct StepService<R: StepRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: StepRepositoryTrait> StepService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn find_steps(&self, filter: NameFilter) -> Result<ListResponse<StepDto>> {
        let query = filter.into_query();
        let steps = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            steps.into_iter().map(StepDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_step(&self, id: i64) -> Result<StepDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(StepDto::from)
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, req))]
    pub async fn create_step(&self, req: CreateStepRequest) -> Result<StepDto> {
        let result = async {
            let name = required_text(&req.name, "name")?;
            self.repo.create(&name).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let step = result?;
        info!(step_id = step.id, "Step created");
        Ok(step.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_step(&self, id: i64, req: UpdateStepRequest) -> Result<StepDto> {
        let result = async {
            let mut step = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

            merge_text(&mut step.name, req.name);
            self.repo.update(&step).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        Ok(result?.into())
    }

    /// 被菜谱引用的步骤删除时返回 400
    #[instrument(skip(self))]
    pub async fn delete_step(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;
    use crate::repository::MockStepRepositoryTrait;
    use crate::service::test_support::ts;

    #[tokio::test]
    async fn test_find_steps_page() {
        let mut mock = MockStepRepositoryTrait::new();
        mock.expect_find_many()
            .withf(|q| q.limit == 2 && q.search.is_empty())
            .returning(|_| {
                Ok(vec![
                    Step { id: 1, name: "Mix".to_string(), created_at: ts() },
                    Step { id: 2, name: "Bake".to_string(), created_at: ts() },
                ])
            });
        mock.expect_count().returning(|_| Ok(5));

        let page = StepService::new(Arc::new(mock))
            .find_steps(NameFilter {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.count, 5);
        assert_eq!(page.limit, 2);
    }

    #[tokio::test]
    async fn test_update_step_missing() {
        let mut mock = MockStepRepositoryTrait::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        mock.expect_update().never();

        let err = StepService::new(Arc::new(mock))
            .update_step(1, UpdateStepRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "step", .. }));
    }
}
