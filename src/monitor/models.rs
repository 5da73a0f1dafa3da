use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shown in the user column when a record carries no usable user object.
pub const NO_USER_INFORMATION: &str = "No user information";

/// Record identifier as served by the monitor backend. Older deployments send
/// database object ids as strings, others send numbers. Numbers outside the
/// `i64` range and non-integers keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => RecordId::Number(i),
                None => RecordId::Text(n.to_string()),
            }),
            Value::String(s) => Ok(RecordId::Text(s)),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or string id, found {other}"
            ))),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_user")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub screenshot_path: Option<String>,
}

impl PullRequestRecord {
    pub fn user_display(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.login.as_str())
            .unwrap_or(NO_USER_INFORMATION)
    }

    pub fn has_screenshot(&self) -> bool {
        self.screenshot_path.is_some()
    }

    /// The backend stores the pull request's html_url as the title.
    pub fn title_url(&self) -> Option<&str> {
        let title = self.title.trim();
        (title.starts_with("https://") || title.starts_with("http://")).then_some(title)
    }
}

// The user field arrives as an object, null, or an empty string.
fn lenient_user<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<User>(v).ok()))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty()))
}
