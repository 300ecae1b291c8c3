//! 提示服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{CreateTipRequest, ListResponse, TipDto, TipFilter, UpdateTipRequest};
use crate::error::{ApiError, Result};
use crate::repository::TipRepositoryTrait;

const ENTITY: &str = "tip";

pub struct TipService<R: TipRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: TipRepositoryTrait> TipService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn find_tips(&self, filter: TipFilter) -> Result<ListResponse<TipDto>> {
        let query = filter.into_query();
        let tips = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            tips.into_iter().map(TipDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_tip(&self, id: i64) -> Result<TipDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(TipDto::from)
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, req))]
    pub async fn create_tip(&self, req: CreateTipRequest) -> Result<TipDto> {
        let result = async {
            let description = required_text(&req.description, "description")?;
            self.repo.create(&description).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let tip = result?;
        info!(tip_id = tip.id, "Tip created");
        Ok(tip.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_tip(&self, id: i64, req: UpdateTipRequest) -> Result<TipDto> {
        let result = async {
            let mut tip = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

            merge_text(&mut tip.description, req.description);
            self.repo.update(&tip).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_tip(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn restore_tip(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.restore(id).await, ENTITY, id);
        record_outcome(ENTITY, "restore", &result);
        result
    }
}
