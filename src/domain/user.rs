use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// A registered author.
///
/// Recipes only refer to users; they never own them. Username and password are
/// write-only: neither appears in the serialized form, and the password is
/// also kept out of `Display` and `Debug`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    id: Option<UserId>,
    #[serde(skip_serializing)]
    username: String,
    #[serde(skip_serializing)]
    password: String,
    display_name: Option<String>,
}

impl AppUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        display_name: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            display_name: display_name.map(str::to_string),
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Id-based when both sides are saved, username-based otherwise.
impl PartialEq for AppUser {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self.username == other.username,
        }
    }
}

impl fmt::Debug for AppUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl fmt::Display for AppUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AppUser{{id={}, username='{}', displayName='{}'}}",
            self.id.map_or_else(|| "null".to_string(), |id| id.0.to_string()),
            self.username,
            self.display_name.as_deref().unwrap_or("null"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_users_compare_by_id() {
        let a = AppUser::new("john", "pass1", Some("John")).with_id(UserId(1));
        let b = AppUser::new("johnny", "pass2", None).with_id(UserId(1));
        let c = AppUser::new("john", "pass1", Some("John")).with_id(UserId(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unsaved_users_compare_by_username() {
        let a = AppUser::new("john", "pass1", Some("John"));
        let b = AppUser::new("john", "pass2", Some("Johnny"));
        let c = AppUser::new("jane", "pass1", Some("John"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        // One side saved, the other not: falls back to username.
        assert_eq!(a, b.with_id(UserId(7)));
    }

    #[test]
    fn test_display_hides_password() {
        let user = AppUser::new("john_doe", "secret", Some("John Doe")).with_id(UserId(1));
        let shown = user.to_string();
        assert!(shown.contains("id=1"));
        assert!(shown.contains("username='john_doe'"));
        assert!(shown.contains("displayName='John Doe'"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_display_handles_missing_values() {
        let shown = AppUser::new("", "", None).to_string();
        assert!(shown.contains("id=null"));
        assert!(shown.contains("displayName='null'"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let shown = format!("{:?}", AppUser::new("john", "secret", None));
        assert!(shown.contains("john"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_credentials_are_write_only() {
        let user = AppUser::new("john", "secret", Some("John")).with_id(UserId(5));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 5, "displayName": "John" }));
    }
}
