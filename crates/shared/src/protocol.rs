use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Body returned by the signup and unregister endpoints. Success is decided
/// by the HTTP status, never by which field is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail: Option<String>,
}

impl MutationResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            detail: None,
        }
    }

    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            message: None,
            detail: Some(detail.into()),
        }
    }
}

// Validation failures carry a structured `detail` array; only plain strings
// are shown to the user.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Plain(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Text>::deserialize(deserializer)? {
        Some(Text::Plain(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Signup,
    Unregister,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MutationKind::Signup => "signup",
            MutationKind::Unregister => "unregister",
        }
    }
}

/// A decoded mutation reply together with the status class it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReply {
    pub status: u16,
    pub body: MutationResponse,
}

impl MutationReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bodies_with_unknown_or_missing_fields() {
        let ok: MutationResponse =
            serde_json::from_str(r#"{"message":"Signed up","extra":1}"#).expect("decode");
        assert_eq!(ok, MutationResponse::message("Signed up"));

        let empty: MutationResponse = serde_json::from_str("{}").expect("decode");
        assert_eq!(empty, MutationResponse::default());
    }

    #[test]
    fn structured_or_blank_detail_is_dropped() {
        let structured: MutationResponse =
            serde_json::from_str(r#"{"detail":[{"loc":["query","email"],"msg":"field required"}]}"#)
                .expect("decode");
        assert_eq!(structured.detail, None);

        let blank: MutationResponse =
            serde_json::from_str(r#"{"message":"","detail":null}"#).expect("decode");
        assert_eq!(blank, MutationResponse::default());
    }

    #[test]
    fn success_is_decided_by_status_class() {
        let reply = MutationReply {
            status: 204,
            body: MutationResponse::detail("ignored"),
        };
        assert!(reply.is_success());

        let reply = MutationReply {
            status: 400,
            body: MutationResponse::message("ignored"),
        };
        assert!(!reply.is_success());
    }
}
