//! HTTP-backed remote store.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::identity::UserId;
use crate::models::{Event, Link, Note, Profile};
use crate::util::{compact_text, normalize_text_option};

use super::wire::{
    event_from_record, event_to_upsert, link_from_record, link_to_upsert, note_from_record,
    note_to_upsert, profile_from_record, profile_to_upsert, EventRecord, LinkRecord, NoteRecord,
    ProfileRecord,
};
use super::RemoteStore;

/// JSON API client for a hosted workspace backend
#[derive(Clone)]
pub struct HttpRemoteStore {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            auth_token: normalize_text_option(auth_token),
            client: reqwest::Client::builder().build()?,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote(parse_api_error(status, &body)));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_links(&self, user: &UserId) -> Result<Vec<Link>> {
        let response = self
            .execute(self.request(Method::GET, &format!("/v1/users/{user}/links")))
            .await?;
        let records = response.json::<Vec<LinkRecord>>().await?;
        Ok(records.into_iter().map(link_from_record).collect())
    }

    async fn upsert_link(&self, user: &UserId, link: &Link) -> Result<()> {
        self.execute(
            self.request(Method::PUT, &format!("/v1/users/{user}/links"))
                .json(&link_to_upsert(link)),
        )
        .await?;
        Ok(())
    }

    async fn remove_link_by_url(&self, user: &UserId, url: &str) -> Result<()> {
        self.execute(
            self.request(Method::DELETE, &format!("/v1/users/{user}/links"))
                .query(&[("url", url)]),
        )
        .await?;
        Ok(())
    }

    async fn list_notes(&self, user: &UserId) -> Result<Vec<Note>> {
        let response = self
            .execute(self.request(Method::GET, &format!("/v1/users/{user}/notes")))
            .await?;
        let records = response.json::<Vec<NoteRecord>>().await?;
        Ok(records.into_iter().map(note_from_record).collect())
    }

    async fn add_note(&self, user: &UserId, note: &Note) -> Result<String> {
        let response = self
            .execute(
                self.request(Method::POST, &format!("/v1/users/{user}/notes"))
                    .json(&note_to_upsert(note)),
            )
            .await?;
        let created = response.json::<CreatedResponse>().await?;
        Ok(created.id)
    }

    async fn update_note(&self, user: &UserId, note: &Note) -> Result<()> {
        self.execute(
            self.request(
                Method::PATCH,
                &format!("/v1/users/{user}/notes/{}", note.id),
            )
            .json(&note_to_upsert(note)),
        )
        .await?;
        Ok(())
    }

    async fn remove_note(&self, user: &UserId, id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/v1/users/{user}/notes/{id}")))
            .await?;
        Ok(())
    }

    async fn list_events(&self, user: &UserId) -> Result<Vec<Event>> {
        let response = self
            .execute(self.request(Method::GET, &format!("/v1/users/{user}/events")))
            .await?;
        let records = response.json::<Vec<EventRecord>>().await?;
        Ok(records.into_iter().map(event_from_record).collect())
    }

    async fn add_event(&self, user: &UserId, event: &Event) -> Result<String> {
        let response = self
            .execute(
                self.request(Method::POST, &format!("/v1/users/{user}/events"))
                    .json(&event_to_upsert(event)),
            )
            .await?;
        let created = response.json::<CreatedResponse>().await?;
        Ok(created.id)
    }

    async fn update_event(&self, user: &UserId, event: &Event) -> Result<()> {
        self.execute(
            self.request(
                Method::PATCH,
                &format!("/v1/users/{user}/events/{}", event.id),
            )
            .json(&event_to_upsert(event)),
        )
        .await?;
        Ok(())
    }

    async fn remove_event(&self, user: &UserId, id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/v1/users/{user}/events/{id}")))
            .await?;
        Ok(())
    }

    async fn get_profile(&self, user: &UserId) -> Result<Option<Profile>> {
        let response = self
            .request(Method::GET, &format!("/v1/users/{user}/profile"))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote(parse_api_error(status, &body)));
        }
        let record = response.json::<ProfileRecord>().await?;
        Ok(Some(profile_from_record(record)))
    }

    async fn upsert_profile(&self, user: &UserId, profile: &Profile) -> Result<()> {
        self.execute(
            self.request(Method::PUT, &format!("/v1/users/{user}/profile"))
                .json(&profile_to_upsert(profile)),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let compacted = compact_text(body);
    if compacted.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compacted, status.as_u16())
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let base_url = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("remote base URL must not be empty".to_string()))?;
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "remote base URL must include http:// or https://".to_string(),
        ))
    }
}
