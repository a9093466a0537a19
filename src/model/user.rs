use serde::{Deserialize, Serialize};

/// Storage-generated identity of a user row.
pub type UserId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    #[sqlx(rename = "firstName")]
    pub first_name: String,

    #[sqlx(rename = "lastName")]
    pub last_name: String,

    pub age: i32,

    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub email: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            email: email.into(),
        }
    }
}

/// Fields to overwrite on an existing user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.email.is_none()
    }

    /// Merge the supplied fields into `user`. The id is never touched.
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}

#[cfg(test)]
impl UserPatch {
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            age: 30,
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_empty_patch_leaves_user_unchanged() {
        let mut user = sample_user();
        let patch = UserPatch::default();
        assert!(patch.is_empty());

        patch.apply(&mut user);
        assert_eq!(user, sample_user());
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let mut user = sample_user();
        UserPatch::default().with_age(31).apply(&mut user);

        assert_eq!(user.age, 31);
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "B");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.id, 7);
    }

    #[test]
    fn test_full_patch() {
        let mut user = sample_user();
        let patch = UserPatch::default()
            .with_first_name("C")
            .with_last_name("D")
            .with_age(40)
            .with_email("c@d.com");
        assert!(!patch.is_empty());

        patch.apply(&mut user);
        assert_eq!(
            user,
            User {
                id: 7,
                first_name: "C".to_string(),
                last_name: "D".to_string(),
                age: 40,
                email: "c@d.com".to_string(),
            }
        );
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["firstName"], "A");
        assert_eq!(json["lastName"], "B");
        assert_eq!(json["age"], 30);
    }
}
