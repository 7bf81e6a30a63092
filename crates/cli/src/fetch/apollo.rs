//! Apollo people-search adapter.
//!
//! Search:  POST /v1/mixed_people/api_search
//! Reveal:  POST /v1/people/bulk_match
//!
//! Both authenticate with the `X-Api-Key` header. Search asks for verified
//! emails only and takes the first page of 100 people; selection happens
//! client-side in the ranker.

#[cfg(test)]
use std::time::Duration;

use rolescout_config::settings::DEFAULT_API_BASE;
use rolescout_ranker::{ContactSource, RawContact, RevealedContact, SourceError};

use super::common::FetchClient;

pub const API_KEY_ENV: &str = "ROLESCOUT_API_KEY";

const SEARCH_PATH: &str = "/v1/mixed_people/api_search";
const REVEAL_PATH: &str = "/v1/people/bulk_match";
const PER_PAGE: u32 = 100;

pub struct ApolloClient {
    client: FetchClient,
    api_key: String,
    base_url: String,
}

impl ApolloClient {
    pub fn new(api_key: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: FetchClient::new("Apollo", extract_apollo_error)?,
            api_key: api_key.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[cfg(test)]
    pub fn with_backoff(mut self, initial: Duration) -> Self {
        self.client = self.client.with_backoff(initial);
        self
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        self.client.request_with_retry(|http| {
            http.post(&url)
                .header("X-Api-Key", &self.api_key)
                .header("Cache-Control", "no-cache")
                .json(body)
        })
    }
}

impl ContactSource for ApolloClient {
    fn search(&self, domain: &str, title_filters: &[String]) -> Result<Vec<RawContact>, SourceError> {
        let body = serde_json::json!({
            "q_organization_domains": domain,
            "contact_email_status": ["verified"],
            "person_titles": title_filters,
            "page": 1,
            "per_page": PER_PAGE,
        });
        let resp = self.post(SEARCH_PATH, &body)?;
        let people = parse_people(&resp)?;
        log::debug!("{domain}: Apollo returned {} people", people.len());
        Ok(people)
    }

    fn reveal(&self, id: &str) -> Result<RevealedContact, SourceError> {
        let body = serde_json::json!({
            "details": [{ "id": id }],
            "reveal_personal_emails": true,
        });
        let resp = self.post(REVEAL_PATH, &body)?;
        Ok(parse_reveal(&resp))
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Non-empty string field, or None for missing / null / non-string values.
fn str_field(item: &serde_json::Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn parse_person(item: &serde_json::Value) -> RawContact {
    RawContact {
        id: str_field(item, "id"),
        first_name: str_field(item, "first_name"),
        last_name: str_field(item, "last_name"),
        name: str_field(item, "name"),
        label: str_field(item, "label"),
        title: str_field(item, "title"),
        email: str_field(item, "email"),
        email_status: str_field(item, "email_status"),
    }
}

/// `people` array of a search response. A missing array means no results.
pub(crate) fn parse_people(resp: &serde_json::Value) -> Result<Vec<RawContact>, SourceError> {
    match resp.get("people") {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => Ok(items.iter().map(parse_person).collect()),
        Some(other) => Err(SourceError::Parse(format!(
            "expected 'people' array, got {}",
            json_type(other)
        ))),
    }
}

/// First element of `matches`. Email precedence: `email`, `email_address`,
/// `sanitized_email`; display name is `name`, then `label`. No match (or a
/// null first match) yields an empty contact.
pub(crate) fn parse_reveal(resp: &serde_json::Value) -> RevealedContact {
    let Some(m) = resp
        .get("matches")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .filter(|m| m.is_object())
    else {
        return RevealedContact::default();
    };

    RevealedContact {
        email: str_field(m, "email")
            .or_else(|| str_field(m, "email_address"))
            .or_else(|| str_field(m, "sanitized_email")),
        first_name: str_field(m, "first_name"),
        last_name: str_field(m, "last_name"),
        display_name: str_field(m, "name").or_else(|| str_field(m, "label")),
    }
}

fn json_type(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Apollo error bodies carry `error` or `message`.
fn extract_apollo_error(body: &serde_json::Value, status: u16) -> String {
    body.get("error")
        .and_then(|v| v.as_str())
        .or_else(|| body.get("message").and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

// ── Tests ───────────────────────────────────────────────────────────
