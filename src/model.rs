//! Backend Data Model
//!
//! Records as returned by the backend's user-listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::growth::AccountRecord;

/// One account as listed by `GET /Auth/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// First and last name joined with a space, trimmed when either is missing
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn role_name(&self) -> &str {
        self.role.as_deref().unwrap_or("")
    }
}

impl AccountRecord for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Backend user identifier
///
/// The backend sends either a number or a string (e.g. a GUID); both are kept
/// verbatim and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    /// Whether this id matches what a user typed on the command line
    pub fn matches(&self, input: &str) -> bool {
        match self {
            UserId::Number(n) => input.trim().parse::<i64>().map(|i| i == *n).unwrap_or(false),
            UserId::Text(s) => s.eq_ignore_ascii_case(input.trim()),
        }
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Backend timestamps, with or without a UTC offset
///
/// Values without an offset (`2024-01-05T08:30:00.1234567`) are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| {
                chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(s) if s.trim().is_empty() => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "userId": 7,
        "firstName": "Lan",
        "lastName": "Nguyen",
        "email": "lan@example.com",
        "phoneNumber": null,
        "dateOfBirth": "1995-04-12T00:00:00Z",
        "role": "Admin",
        "isActive": true,
        "isEmailVerified": false,
        "createdAt": "2024-01-05T08:30:00Z",
        "lastLoginAt": "2024-03-01T10:15:00Z"
    }"#;

    #[test]
    fn test_deserialize_backend_record() {
        let user: User = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(user.user_id, UserId::Number(7));
        assert_eq!(user.full_name(), "Lan Nguyen");
        assert_eq!(user.phone_number, None);
        assert_eq!(user.role_name(), "Admin");
        assert!(user.is_active);
        assert!(!user.is_email_verified);
        assert_eq!(user.created_at.to_rfc3339(), "2024-01-05T08:30:00+00:00");
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "userId": "a1b2",
            "email": "x@example.com",
            "isActive": false,
            "createdAt": "2023-12-31T23:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, UserId::Text("a1b2".to_string()));
        assert_eq!(user.full_name(), "");
        assert_eq!(user.role_name(), "");
        assert!(user.date_of_birth.is_none());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_timestamps_without_offset_are_utc() {
        let json = r#"{
            "userId": 1,
            "email": "y@example.com",
            "isActive": true,
            "dateOfBirth": "2000-02-29",
            "createdAt": "2024-02-01T00:15:00.1234567",
            "lastLoginAt": ""
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.created_at.to_rfc3339(), "2024-02-01T00:15:00.123456700+00:00");
        assert_eq!(
            user.date_of_birth.map(|d| d.date_naive().to_string()),
            Some("2000-02-29".to_string())
        );
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let json = r#"{"userId": 1, "email": "z", "isActive": true, "createdAt": "yesterday"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_user_id_matches() {
        assert!(UserId::Number(42).matches("42"));
        assert!(UserId::Number(42).matches(" 42 "));
        assert!(!UserId::Number(42).matches("x42"));
        assert!(UserId::Text("AbC-1".to_string()).matches("abc-1"));
        assert_eq!(UserId::Text("abc".to_string()).to_string(), "abc");
    }
}
