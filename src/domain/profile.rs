use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact and licence details keyed by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
}

impl Profile {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            id: user_id,
            full_name: None,
            phone: None,
            address: None,
            license_number: None,
        }
    }
}

/// Partial profile edit. Absent fields keep their stored value.
///
/// Phone and licence numbers are stored as typed; no format check is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.license_number.is_none()
    }

    pub fn apply(self, mut profile: Profile) -> Profile {
        if let Some(full_name) = self.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(phone) = self.phone {
            profile.phone = Some(phone);
        }
        if let Some(address) = self.address {
            profile.address = Some(address);
        }
        if let Some(license_number) = self.license_number {
            profile.license_number = Some(license_number);
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_provided_fields() {
        let mut profile = Profile::empty(Uuid::new_v4());
        profile.full_name = Some("Ada Lovelace".to_string());
        profile.phone = Some("555-0100".to_string());

        let updated = ProfileUpdate {
            phone: Some("555-0199".to_string()),
            license_number: Some("not-a-real-format".to_string()),
            ..Default::default()
        }
        .apply(profile.clone());

        assert_eq!(updated.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(updated.phone.as_deref(), Some("555-0199"));
        assert_eq!(updated.address, None);
        assert_eq!(updated.license_number.as_deref(), Some("not-a-real-format"));
        assert_eq!(updated.id, profile.id);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let profile = Profile::empty(Uuid::new_v4());
        let update = ProfileUpdate::default();

        assert!(update.is_empty());
        assert_eq!(update.apply(profile.clone()), profile);
    }
}
