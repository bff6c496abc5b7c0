//! Firestore REST documents for the `users` collection.
//!
//! Firestore wraps every field in a typed value (`{"stringValue": "..."}`).
//! Integers travel as strings, timestamps as RFC 3339.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::FirebaseSettings;
use crate::identity::{ServiceError, ServiceResult, codes};
use crate::profile::{AccountId, ProfileDocument, Role};

const USERS_COLLECTION: &str = "users";

/// A Firestore typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    TimestampValue(String),
    NullValue(()),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// A Firestore document body. Metadata fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

fn string_array(values: &[String]) -> Value {
    Value::ArrayValue(ArrayValue {
        values: values.iter().cloned().map(Value::StringValue).collect(),
    })
}

/// Encodes a profile into Firestore fields. Absent fields are not written.
pub fn encode(doc: &ProfileDocument) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("email".to_string(), Value::StringValue(doc.email.clone()));
    fields.insert(
        "username".to_string(),
        Value::StringValue(doc.username.clone()),
    );
    fields.insert(
        "role".to_string(),
        Value::StringValue(doc.role.as_str().to_string()),
    );
    fields.insert(
        "createdAt".to_string(),
        Value::TimestampValue(doc.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    if let Some(count) = doc.follower_count {
        fields.insert(
            "followerCount".to_string(),
            Value::IntegerValue(count.to_string()),
        );
    }
    if let Some(list) = &doc.following_list {
        let ids: Vec<String> = list.iter().map(|id| id.as_str().to_string()).collect();
        fields.insert("followingList".to_string(), string_array(&ids));
    }
    if let Some(list) = &doc.release_list {
        fields.insert("releaseList".to_string(), string_array(list));
    }
    Document { fields }
}

fn malformed(field: &str) -> ServiceError {
    ServiceError::internal(format!("Malformed profile document: field `{field}`"))
}

fn get_string(fields: &BTreeMap<String, Value>, key: &str) -> ServiceResult<String> {
    match fields.get(key) {
        Some(Value::StringValue(s)) => Ok(s.clone()),
        _ => Err(malformed(key)),
    }
}

fn get_strings(fields: &BTreeMap<String, Value>, key: &str) -> ServiceResult<Option<Vec<String>>> {
    match fields.get(key) {
        None | Some(Value::NullValue(())) => Ok(None),
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .map(|v| match v {
                Value::StringValue(s) => Ok(s.clone()),
                _ => Err(malformed(key)),
            })
            .collect::<ServiceResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(malformed(key)),
    }
}

fn get_count(fields: &BTreeMap<String, Value>, key: &str) -> ServiceResult<Option<u64>> {
    match fields.get(key) {
        None | Some(Value::NullValue(())) => Ok(None),
        Some(Value::IntegerValue(s)) => s.parse().ok().map(Some).ok_or_else(|| malformed(key)),
        Some(_) => Err(malformed(key)),
    }
}

fn get_timestamp(fields: &BTreeMap<String, Value>, key: &str) -> ServiceResult<DateTime<Utc>> {
    match fields.get(key) {
        Some(Value::TimestampValue(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc))
            .ok_or_else(|| malformed(key)),
        _ => Err(malformed(key)),
    }
}

/// Decodes Firestore fields into a profile.
pub fn decode(doc: &Document) -> ServiceResult<ProfileDocument> {
    let fields = &doc.fields;
    let role = Role::parse(&get_string(fields, "role")?).ok_or_else(|| malformed("role"))?;
    Ok(ProfileDocument {
        email: get_string(fields, "email")?,
        username: get_string(fields, "username")?,
        role,
        created_at: get_timestamp(fields, "createdAt")?,
        follower_count: get_count(fields, "followerCount")?,
        following_list: get_strings(fields, "followingList")?
            .map(|ids| ids.into_iter().map(AccountId::new).collect()),
        release_list: get_strings(fields, "releaseList")?,
    })
}

fn document_url(settings: &FirebaseSettings, id: &AccountId) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents/{USERS_COLLECTION}/{}",
        settings.firestore_url,
        settings.project_id,
        id.as_str()
    )
}

/// Reads `users/{id}`. Returns `Ok(None)` when the document does not exist.
pub async fn get_profile(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    id_token: &str,
    id: &AccountId,
) -> ServiceResult<Option<ProfileDocument>> {
    let response = http
        .get(document_url(settings, id))
        .bearer_auth(id_token)
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("Profile read failed: {e}")))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status.as_u16(), &body));
    }

    let document: Document = response
        .json()
        .await
        .map_err(|e| ServiceError::internal(format!("Failed to parse document: {e}")))?;
    decode(&document).map(Some)
}

/// Creates or replaces `users/{id}`.
pub async fn set_profile(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    id_token: &str,
    id: &AccountId,
    doc: &ProfileDocument,
) -> ServiceResult<()> {
    let response = http
        .patch(document_url(settings, id))
        .bearer_auth(id_token)
        .json(&encode(doc))
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("Profile write failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status.as_u16(), &body));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

fn error_from_body(status: u16, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = match envelope.error.status.as_str() {
                "PERMISSION_DENIED" => codes::PERMISSION_DENIED.to_string(),
                "UNAUTHENTICATED" => codes::REQUIRES_RECENT_LOGIN.to_string(),
                "UNAVAILABLE" => codes::NETWORK.to_string(),
                "" => codes::INTERNAL.to_string(),
                other => format!("firestore/{}", other.to_lowercase().replace('_', "-")),
            };
            ServiceError::new(code, envelope.error.message)
        }
        Err(_) => ServiceError::internal(format!("HTTP {status}: {body}")),
    }
}
