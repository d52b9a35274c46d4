//! [`EntryStore`] over the management REST API.
//!
//! Endpoints, relative to `{base_url}/servicesNS/{owner}/{app}`:
//!
//! | operation        | request                                   |
//! |------------------|-------------------------------------------|
//! | list             | `GET {path}?output_mode=json&count=0`     |
//! | upsert           | `POST {path}/{name}` (form-encoded)       |
//! | delete           | `DELETE {path}/{name}`                    |
//! | complete setup   | `POST apps/local/{app}` `configured=true` |
//! | reload app       | `GET apps/local/{app_name}/_reload`       |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

use super::entry::{Entry, FieldValue, Properties};
use super::error::StoreError;
use super::EntryStore;
use crate::config::{AppConfig, Credentials, Namespace, ServerConfig};

const JSON_OUTPUT: [(&str, &str); 1] = [("output_mode", "json")];

pub struct RestEntryStore {
    client: Client,
    base_url: Url,
    namespace: Namespace,
    collection: Vec<String>,
    credentials: Option<Credentials>,
}

impl RestEntryStore {
    /// Build a client for the collection described by `app` on `server`.
    pub fn new(server: &ServerConfig, app: &AppConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&server.base_url).map_err(|e| {
            StoreError::Message(format!("Invalid base URL '{}': {}", server.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(server.timeout_seconds)))
            .danger_accept_invalid_certs(!server.verify_tls)
            .build()?;

        if !server.verify_tls {
            tracing::warn!(base_url = %base_url, "TLS certificate verification is disabled");
        }

        Ok(Self {
            client,
            base_url,
            namespace: app.namespace(),
            collection: app
                .path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            credentials: server.credentials(),
        })
    }

    /// Namespaced endpoint URL with each segment percent-encoded.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                StoreError::Message(format!(
                    "Base URL '{}' cannot be used as an API root",
                    self.base_url
                ))
            })?;
            path.pop_if_empty()
                .push("servicesNS")
                .push(&self.namespace.owner)
                .push(&self.namespace.app)
                .extend(segments);
        }
        Ok(url)
    }

    fn collection_url(&self) -> Result<Url, StoreError> {
        self.endpoint(self.collection.iter().map(String::as_str))
    }

    fn entry_url(&self, name: &str) -> Result<Url, StoreError> {
        self.endpoint(
            self.collection
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(name)),
        )
    }

    fn app_url(&self, app_name: &str, action: Option<&str>) -> Result<Url, StoreError> {
        self.endpoint(["apps", "local", app_name].into_iter().chain(action))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url).query(&JSON_OUTPUT);
        match &self.credentials {
            Some(Credentials::Basic { username, password }) => {
                request.basic_auth(username, Some(password.expose()))
            }
            Some(Credentials::Token(token)) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// Send and return the body of a successful response.
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<String, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(operation, status = status.as_u16(), "store request completed");

        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_string),
                body: (!body.is_empty()).then_some(body),
            });
        }
        Ok(body)
    }
}

/// Extract the `entry` list of a collection response.
fn parse_entries(body: &str) -> Result<Vec<Entry>, StoreError> {
    let value: Value = serde_json::from_str(body)?;
    let items = value
        .get("entry")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Message("Response has no 'entry' list".to_string()))?;
    Ok(items.iter().filter_map(Entry::from_json).collect())
}

#[async_trait]
impl EntryStore for RestEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let request = self
            .request(Method::GET, self.collection_url()?)
            .query(&[("count", "0")]);
        let body = self.send("list", request).await?;
        parse_entries(&body)
    }

    async fn upsert(&self, name: &str, properties: &Properties) -> Result<Entry, StoreError> {
        let request = self
            .request(Method::POST, self.entry_url(name)?)
            .form(properties);
        let body = self.send("upsert", request).await?;

        let echoed = parse_entries(&body)?.into_iter().find(|entry| entry.name == name);
        Ok(echoed.unwrap_or_else(|| Entry {
            name: name.to_string(),
            content: properties
                .iter()
                .map(|(key, value)| (key.clone(), FieldValue::Str(value.clone())))
                .collect(),
        }))
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE, self.entry_url(name)?);
        self.send("delete", request).await?;
        Ok(())
    }

    async fn complete_setup(&self) -> Result<(), StoreError> {
        let request = self
            .request(Method::POST, self.app_url(&self.namespace.app, None)?)
            .form(&[("configured", "true")]);
        self.send("complete_setup", request).await?;
        Ok(())
    }

    async fn reload_app(&self, app_name: &str) -> Result<(), StoreError> {
        let request = self.request(Method::GET, self.app_url(app_name, Some("_reload"))?);
        self.send("reload_app", request).await?;
        Ok(())
    }
}
