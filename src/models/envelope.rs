//! Response envelope shared by every endpoint.

use serde::Deserialize;

use super::PageMeta;

/// `{ success, message?, data? }` wrapper around every API reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default, alias = "pagination")]
    pub meta: Option<PageMeta>,
}

/// A page of list data with its pagination block.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}
