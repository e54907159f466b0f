//! Member records and the one-shot data source that supplies them.
//!
//! Records come either from the public members URL (a JSON array fetched once
//! at startup) or from a local JSON file with the same shape.
//!
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::{Context, HttpStatusError, Result, report};

/// Static member list used when no other source is configured.
pub const DEFAULT_MEMBERS_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// One row of the admin table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Editable text fields of a [`Member`], in column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberField {
    Name,
    Email,
    Role,
}

impl MemberField {
    pub const ALL: [MemberField; 3] = [MemberField::Name, MemberField::Email, MemberField::Role];

    pub fn next(self) -> Self {
        match self {
            MemberField::Name => MemberField::Email,
            MemberField::Email => MemberField::Role,
            MemberField::Role => MemberField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MemberField::Name => MemberField::Role,
            MemberField::Email => MemberField::Name,
            MemberField::Role => MemberField::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberField::Name => "Name",
            MemberField::Email => "Email",
            MemberField::Role => "Role",
        }
    }
}

impl Member {
    pub fn field(&self, field: MemberField) -> &str {
        match field {
            MemberField::Name => &self.name,
            MemberField::Email => &self.email,
            MemberField::Role => &self.role,
        }
    }

    pub fn field_mut(&mut self, field: MemberField) -> &mut String {
        match field {
            MemberField::Name => &mut self.name,
            MemberField::Email => &mut self.email,
            MemberField::Role => &mut self.role,
        }
    }
}

// The published data set encodes ids as strings ("1"), other feeds use numbers.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid member id {s:?}"))),
    }
}

/// Where the member list is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberSource {
    Url(String),
    File(PathBuf),
}

impl Default for MemberSource {
    fn default() -> Self {
        MemberSource::Url(DEFAULT_MEMBERS_URL.to_string())
    }
}

impl Display for MemberSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberSource::Url(url) => f.write_str(url),
            MemberSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl MemberSource {
    /// Load the complete member list from this source.
    pub fn load(&self) -> Result<Vec<Member>> {
        match self {
            MemberSource::Url(url) => fetch_members(url),
            MemberSource::File(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_ctx(|| format!("read {}", path.display()))?;
                parse_members(&contents)
            }
        }
    }
}

/// Decode a JSON array of member records.
pub fn parse_members(json: &str) -> Result<Vec<Member>> {
    serde_json::from_str(json).with_ctx(|| "decode member list")
}

/// Fetch the member list with a single GET request. Non-2xx responses are errors.
pub fn fetch_members(url: &str) -> Result<Vec<Member>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .with_ctx(|| "build http client")?;
    debug!(%url, "fetching members");
    let response = client.get(url).send().with_ctx(|| format!("GET {url}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(Box::new(HttpStatusError {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason(),
        }));
    }
    let body = response
        .text()
        .with_ctx(|| format!("read response body of {url}"))?;
    parse_members(&body)
}

/// Load members, logging a failure and falling back to an empty list.
///
/// The second element is a message for the status bar when loading failed.
pub fn load_or_empty(source: &MemberSource) -> (Vec<Member>, Option<String>) {
    match source.load() {
        Ok(members) => {
            info!(count = members.len(), %source, "loaded members");
            (members, None)
        }
        Err(err) => {
            let message = report(&*err);
            error!(%source, error = %message, "error fetching members");
            (Vec::new(), Some(format!("Error fetching data: {message}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_ids() {
        let json = r#"[
            {"id": "1", "name": "Aaron Miles", "email": "aaron@mailinator.com", "role": "member"},
            {"id": 2, "name": "Aishwarya Naik", "email": "aishwarya@mailinator.com", "role": "admin"}
        ]"#;
        let members = parse_members(json).expect("parse");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, 1);
        assert_eq!(members[1].id, 2);
        assert_eq!(members[1].role, "admin");
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"[{"id": 7, "name": "n", "email": "e", "role": "r", "team": "x"}]"#;
        let members = parse_members(json).expect("parse");
        assert_eq!(members[0].id, 7);
    }

    #[test]
    fn rejects_non_numeric_id() {
        let json = r#"[{"id": "abc", "name": "n", "email": "e", "role": "r"}]"#;
        let err = parse_members(json).unwrap_err();
        assert!(err.to_string().contains("decode member list"));
    }

    #[test]
    fn field_cycle_visits_every_column() {
        let mut f = MemberField::Name;
        for expected in [MemberField::Email, MemberField::Role, MemberField::Name] {
            f = f.next();
            assert_eq!(f, expected);
        }
        assert_eq!(MemberField::Name.prev(), MemberField::Role);
    }

    #[test]
    fn load_or_empty_reports_missing_file() {
        let source = MemberSource::File(PathBuf::from("/nonexistent/member-admin/members.json"));
        let (members, status) = load_or_empty(&source);
        assert!(members.is_empty());
        let status = status.expect("status");
        assert!(status.starts_with("Error fetching data: read /nonexistent"));
        // the io cause follows the action
        assert!(status.matches(": ").count() >= 2, "status was {status}");
    }
}
