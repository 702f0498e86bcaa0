//! Team endpoints.
//!
//! Create and update take a multipart body: a `data` part with the member as
//! JSON and an optional `image` part.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::{ApiClient, CacheTag, MutationResult};
use crate::errors::AppError;
use crate::models::{ImageUpload, TeamMember, TeamMemberPayload};

impl ApiClient {
    /// GET /team
    pub async fn get_team(&self) -> Result<Vec<TeamMember>, AppError> {
        let envelope = self
            .query::<Vec<TeamMember>>("/team", &[CacheTag::Team])
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// POST /team
    pub async fn create_team(
        &self,
        payload: &TeamMemberPayload,
        image: Option<&ImageUpload>,
    ) -> MutationResult {
        let form = team_form(payload, image)?;
        let builder = self.request(Method::POST, "/team").multipart(form);
        self.mutate(builder, &[CacheTag::Team]).await
    }

    /// PATCH /team/:id
    pub async fn update_team(
        &self,
        id: &str,
        payload: &TeamMemberPayload,
        image: Option<&ImageUpload>,
    ) -> MutationResult {
        let form = team_form(payload, image)?;
        let builder = self
            .request(Method::PATCH, &format!("/team/{}", id))
            .multipart(form);
        self.mutate(builder, &[CacheTag::Team]).await
    }

    /// DELETE /team/:id
    pub async fn delete_team(&self, id: &str) -> MutationResult {
        let builder = self.request(Method::DELETE, &format!("/team/{}", id));
        self.mutate(builder, &[CacheTag::Team]).await
    }
}

fn team_form(payload: &TeamMemberPayload, image: Option<&ImageUpload>) -> Result<Form, AppError> {
    let mut form = Form::new().text("data", serde_json::to_string(payload)?);

    if let Some(image) = image {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(mime) = image.mime_type.as_deref() {
            part = part.mime_str(mime)?;
        }
        form = form.part("image", part);
    }

    Ok(form)
}
