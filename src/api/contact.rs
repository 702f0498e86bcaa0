//! Contact endpoints.

use reqwest::Method;

use super::{ApiClient, CacheTag, MutationResult};
use crate::errors::AppError;
use crate::models::{ContactMessage, ContactSettings, Paged};

impl ApiClient {
    /// GET /company-cms/contact
    pub async fn get_contact(&self) -> Result<ContactSettings, AppError> {
        let envelope = self
            .query::<ContactSettings>("/company-cms/contact", &[CacheTag::Contact])
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// PATCH /company-cms/contact
    pub async fn update_contact(&self, settings: &ContactSettings) -> MutationResult {
        let builder = self
            .request(Method::PATCH, "/company-cms/contact")
            .json(settings);
        self.mutate(builder, &[CacheTag::Contact]).await
    }

    /// GET /contact?page=&limit= - Messages left through the public contact form.
    pub async fn get_contact_list(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paged<ContactMessage>, AppError> {
        let path = format!("/contact?page={}&limit={}", page, limit);
        let envelope = self
            .query::<Vec<ContactMessage>>(&path, &[CacheTag::Contact])
            .await?;
        Ok(Paged {
            items: envelope.data.unwrap_or_default(),
            meta: envelope.meta,
        })
    }
}
