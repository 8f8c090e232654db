use axum::http::Request;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
    GovernorError, GovernorLayer,
};
use uuid::Uuid;

use crate::domain::Identity;

/// Keys requests by the user id `auth_middleware` attached
#[derive(Debug, Clone, Copy)]
pub struct UserIdExtractor;

impl KeyExtractor for UserIdExtractor {
    type Key = Uuid;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        req.extensions()
            .get::<Identity>()
            .map(|identity| identity.user_id)
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

pub type UserGovernorLayer = GovernorLayer<
    UserIdExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    axum::body::Body,
>;

/// Per-user limit on authenticated routes: 100 requests per minute
pub fn create_user_governor() -> UserGovernorLayer {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(600)
            .burst_size(100)
            .key_extractor(UserIdExtractor)
            .finish()
            .expect("rate limit period and burst must be non-zero"),
    );

    GovernorLayer::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_identity_user_id() {
        let user_id = Uuid::new_v4();
        let mut request = Request::new(());
        request.extensions_mut().insert(Identity {
            user_id,
            email: "renter@example.com".to_string(),
        });

        assert_eq!(UserIdExtractor.extract(&request).unwrap(), user_id);
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let request = Request::new(());
        assert!(UserIdExtractor.extract(&request).is_err());
    }
}
