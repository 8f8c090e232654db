use std::sync::Arc;

use crate::domain::{Identity, Profile, ProfileUpdate};
use crate::error::AppResult;
use crate::gateway::BackendGateway;

#[derive(Clone)]
pub struct ProfileService {
    gateway: Arc<dyn BackendGateway>,
}

impl ProfileService {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// The caller's profile, created empty on first access.
    pub async fn fetch(&self, identity: &Identity) -> AppResult<Profile> {
        if let Some(profile) = self.gateway.get_profile(identity.user_id).await? {
            return Ok(profile);
        }

        tracing::debug!(user_id = %identity.user_id, "Creating empty profile");
        Ok(self
            .gateway
            .upsert_profile(Profile::empty(identity.user_id))
            .await?)
    }

    /// Applies a partial edit to the caller's profile.
    pub async fn update(&self, identity: &Identity, update: ProfileUpdate) -> AppResult<Profile> {
        let current = self.fetch(identity).await?;
        if update.is_empty() {
            return Ok(current);
        }

        let profile = self.gateway.upsert_profile(update.apply(current)).await?;
        tracing::info!(user_id = %identity.user_id, "Profile updated");

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::gateway::memory::InMemoryGateway;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "renter@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_creates_empty_profile_once() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = ProfileService::new(gateway.clone());
        let user = identity();

        let profile = service.fetch(&user).await.unwrap();

        assert_eq!(profile, Profile::empty(user.user_id));
        assert_eq!(
            gateway.get_profile(user.user_id).await.unwrap(),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn test_partial_updates_accumulate() {
        let service = ProfileService::new(Arc::new(InMemoryGateway::new()));
        let user = identity();

        service
            .update(
                &user,
                ProfileUpdate {
                    full_name: Some("Grace Hopper".to_string()),
                    address: Some("1 Navy Way".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = service
            .update(
                &user,
                ProfileUpdate {
                    phone: Some("+1 555 0100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(profile.address.as_deref(), Some("1 Navy Way"));
        assert_eq!(profile.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(profile.license_number, None);
        assert_eq!(service.fetch(&user).await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_profiles_are_per_user() {
        let service = ProfileService::new(Arc::new(InMemoryGateway::new()));
        let alice = identity();
        let bob = identity();

        service
            .update(
                &alice,
                ProfileUpdate {
                    license_number: Some("D1234567".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(service.fetch(&bob).await.unwrap().license_number, None);
    }
}
