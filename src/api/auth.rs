//! Auth endpoints.

use reqwest::Method;

use super::{ApiClient, MutationResult};
use crate::errors::AppError;
use crate::models::{ChangePasswordRequest, LoginRequest};

impl ApiClient {
    /// POST /auth/login - Exchange credentials for an access token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AppError> {
        let builder = self.request(Method::POST, "/auth/login").json(request);
        let envelope = self.send::<String>(builder).await?;
        envelope
            .data
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Decode("Login reply carried no token".to_string()))
    }

    /// POST /auth/change-password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> MutationResult {
        let builder = self
            .request(Method::POST, "/auth/change-password")
            .json(request);
        self.mutate(builder, &[]).await
    }
}
