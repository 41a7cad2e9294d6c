use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use squadsplit_core::partition::PartitionError;
use squadsplit_core::player::PlayerError;
use squadsplit_core::session::SessionError;
use squadsplit_core::swap::SwapError;

use crate::roster_store::StoreError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) | Self::Internal(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<PlayerError> for AppError {
    fn from(e: PlayerError) -> Self {
        match e {
            PlayerError::NotFound(_) => Self::NotFound(e.to_string()),
            _ => Self::BadRequest(e.to_string()),
        }
    }
}

impl From<PartitionError> for AppError {
    fn from(e: PartitionError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<SwapError> for AppError {
    fn from(e: SwapError) -> Self {
        Self::NotFound(e.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NoTeams => Self::Conflict(e.to_string()),
            SessionError::Partition(e) => e.into(),
            SessionError::Swap(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Player(e) => e.into(),
            StoreError::Full(_) => Self::Conflict(e.to_string()),
            StoreError::Persist(_) => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadsplit_core::partition::PartitionMode;
    use squadsplit_core::swap::TeamSide;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn core_errors_map_to_app_errors() {
        let not_partitionable = PartitionError::NotPartitionable {
            count: 3,
            mode: PartitionMode::SnakeDraft,
        };
        assert!(matches!(
            AppError::from(not_partitionable),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(SessionError::NoTeams),
            AppError::Conflict(_)
        ));
        let missing = SwapError::PlayerNotFound {
            id: "p9".into(),
            team: TeamSide::One,
        };
        assert!(matches!(
            AppError::from(SessionError::Swap(missing)),
            AppError::NotFound(m) if m.contains("p9")
        ));
        assert!(matches!(
            AppError::from(PlayerError::EmptyName),
            AppError::BadRequest(_)
        ));
    }
}
