//! REST client for the remote `user_locations` document collection.
//!
//! Documents cross this boundary through a validated constructor: anything
//! with missing or out-of-range coordinates, a blank name, or a type mismatch
//! is rejected as `RepoError::Serialization` instead of leaking into the
//! domain as a half-formed record.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mishwar_domain::{
    Coordinates, LocationId, LocationName, SavedLocation, SavedLocationDraft, UserId,
};

use crate::infrastructure::ports::{LocationPatch, LocationRepo, RepoError};

/// Client for the Mishwar location-store REST API.
#[derive(Clone)]
pub struct RestLocationRepo {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestLocationRepo {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }
}

#[async_trait]
impl LocationRepo for RestLocationRepo {
    async fn fetch_all(&self, owner: UserId) -> Result<Vec<SavedLocation>, RepoError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/user_locations?userId={}", owner),
            )
            .send()
            .await
            .map_err(|e| RepoError::transport("fetch_all", e))?;

        if !response.status().is_success() {
            return Err(RepoError::store("fetch_all", response.status()));
        }

        let docs: Vec<LocationDoc> = response
            .json()
            .await
            .map_err(|e| RepoError::serialization(e))?;

        let mut locations = docs
            .into_iter()
            .map(LocationDoc::try_into_location)
            .collect::<Result<Vec<_>, _>>()?;
        // Creation order is the contract regardless of how the store returns them.
        locations.sort_by_key(|l| l.created_at);
        Ok(locations)
    }

    async fn create(&self, draft: &SavedLocationDraft) -> Result<LocationId, RepoError> {
        let response = self
            .request(reqwest::Method::POST, "/user_locations")
            .json(&DraftDoc::from(draft))
            .send()
            .await
            .map_err(|e| RepoError::transport("create", e))?;

        if !response.status().is_success() {
            return Err(RepoError::store("create", response.status()));
        }

        let created: CreatedDoc = response
            .json()
            .await
            .map_err(|e| RepoError::serialization(e))?;
        Ok(LocationId::from_uuid(created.id))
    }

    async fn update(&self, id: LocationId, patch: LocationPatch) -> Result<(), RepoError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("/user_locations/{}", id),
            )
            .json(&PatchDoc::from(patch))
            .send()
            .await
            .map_err(|e| RepoError::transport("update", e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(RepoError::not_found(id)),
            status => Err(RepoError::store("update", status)),
        }
    }

    async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/user_locations/{}", id),
            )
            .send()
            .await
            .map_err(|e| RepoError::transport("delete", e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(RepoError::not_found(id)),
            status => Err(RepoError::store("delete", status)),
        }
    }
}

// =============================================================================
// Wire documents
// =============================================================================

/// One document of the `user_locations` collection, as the store returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationDoc {
    id: Uuid,
    user_id: Uuid,
    name: String,
    latitude: f64,
    longitude: f64,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl LocationDoc {
    /// Validated promotion into the domain entity.
    fn try_into_location(self) -> Result<SavedLocation, RepoError> {
        let name = LocationName::new(self.name)
            .map_err(|e| RepoError::serialization(format!("document {}: {}", self.id, e)))?;
        let coordinates = Coordinates::new(self.latitude, self.longitude)
            .map_err(|e| RepoError::serialization(format!("document {}: {}", self.id, e)))?;
        Ok(SavedLocation::from_storage(
            LocationId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            name,
            coordinates,
            self.is_default,
            self.created_at,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftDoc {
    user_id: Uuid,
    name: String,
    latitude: f64,
    longitude: f64,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl From<&SavedLocationDraft> for DraftDoc {
    fn from(draft: &SavedLocationDraft) -> Self {
        Self {
            user_id: draft.owner.to_uuid(),
            name: draft.name.as_str().to_string(),
            latitude: draft.coordinates.latitude(),
            longitude: draft.coordinates.longitude(),
            is_default: draft.is_default,
            created_at: draft.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_default: Option<bool>,
}

impl From<LocationPatch> for PatchDoc {
    fn from(patch: LocationPatch) -> Self {
        Self {
            name: patch.name.map(|n| n.as_str().to_string()),
            is_default: patch.is_default,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedDoc {
    id: Uuid,
}
