//! Extra service endpoints.

use reqwest::Method;

use super::{ApiClient, CacheTag, MutationResult};
use crate::errors::AppError;
use crate::models::{ExtraService, ExtraServiceInput};

impl ApiClient {
    /// GET /extra-service
    pub async fn get_extras(&self) -> Result<Vec<ExtraService>, AppError> {
        let envelope = self
            .query::<Vec<ExtraService>>("/extra-service", &[CacheTag::Extra])
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// POST /extra-service
    pub async fn create_extra(&self, input: &ExtraServiceInput) -> MutationResult {
        let builder = self.request(Method::POST, "/extra-service").json(input);
        self.mutate(builder, &[CacheTag::Extra]).await
    }

    /// PATCH /extra-service/:id
    pub async fn update_extra(&self, id: &str, input: &ExtraServiceInput) -> MutationResult {
        let builder = self
            .request(Method::PATCH, &format!("/extra-service/{}", id))
            .json(input);
        self.mutate(builder, &[CacheTag::Extra]).await
    }

    /// DELETE /extra-service/:id
    pub async fn delete_extra(&self, id: &str) -> MutationResult {
        let builder = self.request(Method::DELETE, &format!("/extra-service/{}", id));
        self.mutate(builder, &[CacheTag::Extra]).await
    }
}
