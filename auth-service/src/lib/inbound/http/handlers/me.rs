use auth::Principal;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// Echo the authenticated principal, or nulls when unauthenticated.
///
/// Answered entirely from the verified token claims; the user directory
/// is not consulted.
pub async fn me(principal: Option<Principal>) -> ApiSuccess<MeResponseData> {
    let data = match principal {
        Some(principal) => MeResponseData {
            authorities: Some(vec![principal.authority().to_string()]),
            principal: Some(PrincipalData {
                user_id: principal.user_id.to_string(),
                email: principal.email,
                role: principal.role.as_str().to_string(),
            }),
        },
        None => MeResponseData {
            principal: None,
            authorities: None,
        },
    };

    ApiSuccess::new(StatusCode::OK, data)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub principal: Option<PrincipalData>,
    pub authorities: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub user_id: String,
    pub email: String,
    pub role: String,
}
