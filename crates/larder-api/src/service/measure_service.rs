//! 计量单位服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{CreateMeasureRequest, ListResponse, MeasureDto, NameFilter, UpdateMeasureRequest};
use crate::error::{ApiError, Result};
use crate::repository::MeasureRepositoryTrait;

const ENTITY: &str = "measure";

pub struct MeasureService<R: MeasureRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: MeasureRepositoryTrait> MeasureService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn find_measures(&self, filter: NameFilter) -> Result<ListResponse<MeasureDto>> {
        let query = filter.into_query();
        let measures = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            measures.into_iter().map(MeasureDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_measure(&self, id: i64) -> Result<MeasureDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(MeasureDto::from)
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, req))]
    pub async fn create_measure(&self, req: CreateMeasureRequest) -> Result<MeasureDto> {
        let result = async {
            let name = required_text(&req.name, "name")?;
            self.repo.create(&name).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let measure = result?;
        info!(measure_id = measure.id, name = %measure.name, "Measure created");
        Ok(measure.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_measure(&self, id: i64, req: UpdateMeasureRequest) -> Result<MeasureDto> {
        let result = async {
            let mut measure = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

            merge_text(&mut measure.name, req.name);
            self.repo.update(&measure).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_measure(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measure;
    use crate::repository::MockMeasureRepositoryTrait;
    use crate::service::test_support::ts;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_and_update_measure() {
        let mut mock = MockMeasureRepositoryTrait::new();
        mock.expect_create().withf(|name| name == "gram").returning(|name| {
            Ok(Measure {
                id: 1,
                name: name.to_string(),
                created_at: ts(),
            })
        });
        mock.expect_find_by_id().with(eq(1)).returning(|id| {
            Ok(Some(Measure {
                id,
                name: "gram".to_string(),
                created_at: ts(),
            }))
        });
        mock.expect_update()
            .withf(|m| m.name == "kilogram")
            .returning(|m| Ok(m.clone()));

        let svc = MeasureService::new(Arc::new(mock));
        let created = svc
            .create_measure(CreateMeasureRequest {
                name: "gram".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "gram");

        let updated = svc
            .update_measure(
                1,
                UpdateMeasureRequest {
                    name: Some("kilogram".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "kilogram");
    }

    #[tokio::test]
    async fn test_delete_missing_measure() {
        let mut mock = MockMeasureRepositoryTrait::new();
        mock.expect_delete().returning(|_| Ok(false));

        let err = MeasureService::new(Arc::new(mock))
            .delete_measure(9)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "measure", .. }));
    }
}
