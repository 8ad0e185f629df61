use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ActivityName, RosterSnapshot},
    protocol::{MutationKind, MutationReply, MutationResponse},
};
use tracing::debug;
use url::{form_urlencoded, Url};

pub mod error;

pub use error::RosterError;

pub type Result<T, E = RosterError> = std::result::Result<T, E>;

/// The three calls the roster page makes. One attempt per call: no retry,
/// no cancellation.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn fetch_roster(&self) -> Result<RosterSnapshot>;
    async fn signup(&self, activity: &ActivityName, email: &str) -> Result<MutationReply>;
    async fn unregister(&self, activity: &ActivityName, email: &str) -> Result<MutationReply>;
}

#[derive(Debug, Clone)]
pub struct HttpRosterClient {
    http: Client,
    base_url: Url,
}

impl HttpRosterClient {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_http_client(server_url, Client::new())
    }

    pub fn with_timeout(server_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(server_url, builder.build()?)
    }

    pub fn with_http_client(server_url: &str, http: Client) -> Result<Self> {
        let base_url = Url::parse(server_url).map_err(|source| RosterError::InvalidBaseUrl {
            url: server_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RosterError::OpaqueBaseUrl(server_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn activities_url(&self) -> Url {
        self.endpoint(&["activities"], None)
    }

    pub fn signup_url(&self, activity: &ActivityName, email: &str) -> Url {
        self.endpoint(&["activities", activity.as_str(), "signup"], Some(email))
    }

    pub fn unregister_url(&self, activity: &ActivityName, email: &str) -> Url {
        self.endpoint(
            &["activities", activity.as_str(), "participants"],
            Some(email),
        )
    }

    // Each segment is pushed whole, so a name containing `/` or `?` stays a
    // single percent-encoded path segment.
    fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(email) = email {
            url.set_query(Some(&format!("email={}", encode_query_value(email))));
        }
        url
    }

    async fn mutate(
        &self,
        kind: MutationKind,
        request: RequestBuilder,
        target: Url,
    ) -> Result<MutationReply> {
        debug!(mutation = kind.as_str(), %target, "roster: sending mutation");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body: MutationResponse = decode_body(response, &target).await?;
        debug!(mutation = kind.as_str(), status, "roster: mutation answered");
        Ok(MutationReply { status, body })
    }
}

// Percent-encodes like `encodeURIComponent` for the characters an email can
// hold: form encoding is kept except that a space becomes `%20`, not `+`.
fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response, target: &Url) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| RosterError::Decode {
        target: target.to_string(),
        source,
    })
}

#[async_trait]
impl RosterApi for HttpRosterClient {
    async fn fetch_roster(&self) -> Result<RosterSnapshot> {
        let target = self.activities_url();
        debug!(%target, "roster: fetching activities");
        let response = self.http.get(target.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::Status {
                status: status.as_u16(),
                target: target.to_string(),
            });
        }
        decode_body(response, &target).await
    }

    async fn signup(&self, activity: &ActivityName, email: &str) -> Result<MutationReply> {
        let target = self.signup_url(activity, email);
        let request = self.http.post(target.clone());
        self.mutate(MutationKind::Signup, request, target).await
    }

    async fn unregister(&self, activity: &ActivityName, email: &str) -> Result<MutationReply> {
        let target = self.unregister_url(activity, email);
        let request = self.http.delete(target.clone());
        self.mutate(MutationKind::Unregister, request, target).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
