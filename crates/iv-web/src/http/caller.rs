//! Who is calling, and in which language.
//!
//! Authentication happens in front of this service; the caller id header
//! is trusted as-is.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use iv_core::ports::UserDirectoryPort;
use iv_core::TourError;
use serde::Deserialize;
use tracing::warn;

use super::error::ApiError;
use crate::bootstrap::AppRuntime;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Any authenticated user.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
}

impl FromRequestParts<Arc<AppRuntime>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _runtime: &Arc<AppRuntime>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self {
            user_id: user_id.to_string(),
        })
    }
}

/// A caller in the admin group.
#[derive(Debug, Clone)]
pub struct AdminCaller {
    pub user_id: String,
}

impl FromRequestParts<Arc<AppRuntime>> for AdminCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        runtime: &Arc<AppRuntime>,
    ) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, runtime).await?;

        let groups = runtime
            .deps
            .user_directory
            .groups_for_user(&caller.user_id)
            .await
            .map_err(TourError::from)?;

        if !groups.iter().any(|g| g == runtime.admin_group()) {
            warn!(user_id = %caller.user_id, path = %parts.uri.path(), "admin route refused");
            return Err(ApiError::forbidden());
        }

        Ok(Self {
            user_id: caller.user_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

/// `?lang=`, else the first `Accept-Language` tag, else the instance default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLanguage(pub String);

impl FromRequestParts<Arc<AppRuntime>> for RequestLanguage {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        runtime: &Arc<AppRuntime>,
    ) -> Result<Self, Self::Rejection> {
        let from_query = Query::<LanguageQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang)
            .filter(|lang| !lang.trim().is_empty());

        let from_header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(preferred_language);

        Ok(Self(
            from_query
                .or(from_header)
                .unwrap_or_else(|| runtime.default_language().to_string()),
        ))
    }
}

/// First concrete tag of an `Accept-Language` header.
fn preferred_language(header: &str) -> Option<String> {
    header
        .split(',')
        .map(|part| part.split(';').next().unwrap_or_default().trim())
        .find(|tag| !tag.is_empty() && *tag != "*")
        .map(str::to_string)
}
