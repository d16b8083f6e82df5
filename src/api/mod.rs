//! Typed client for the remote closer REST API. All persistence, vote
//! tallying, and signature verification happen server-side; this layer only
//! shapes requests and decodes responses.

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::errors::AppError;
use crate::proposal::types::{Proposal, UserProfile, Vote};

/// Body of `POST /proposals/:id/promote`. Promotion is a dedicated endpoint
/// rather than a generic patch because opening the voting window has
/// server-side side effects beyond a field update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteRequest {
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub signature_hash: String,
    pub author_address: String,
    pub author_signature: String,
}

/// Mongo-style date window for charge aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct DateWindow {
    #[serde(rename = "$gte", skip_serializing_if = "Option::is_none")]
    pub gte: Option<DateTime<Utc>>,
    #[serde(rename = "$lte")]
    pub lte: DateTime<Utc>,
}

/// Filter for `GET /sum/charge/amount.total.val`.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeQuery {
    #[serde(rename = "type")]
    pub charge_type: &'static str,
    pub status: &'static str,
    pub date: DateWindow,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(ApiClient {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Map a non-success response to `AppError::Api`, carrying whatever body
    /// text the server sent.
    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// GET a resource, mapping 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        let response = self.request(Method::GET, path).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::expect_success(response).await?;
        Ok(Some(response.json::<T>().await?))
    }

    /// `GET /proposal/:slug`
    pub async fn get_proposal(&self, slug: &str) -> Result<Option<Proposal>, AppError> {
        self.get_optional(&format!("/proposal/{slug}")).await
    }

    /// `GET /user/:id`
    pub async fn get_user(&self, id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_optional(&format!("/user/{id}")).await
    }

    /// Partial proposal update through the generic data layer. The response
    /// body is ignored on purpose: callers re-fetch the canonical object
    /// instead of trusting their own optimistic shape.
    pub async fn patch_proposal(
        &self,
        id: &str,
        body: &serde_json::Value,
    ) -> Result<(), AppError> {
        let response = self
            .request(Method::PATCH, &format!("/proposal/{id}"))
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// `POST /proposals/:id/promote`
    pub async fn promote_proposal(
        &self,
        id: &str,
        request: &PromoteRequest,
    ) -> Result<(), AppError> {
        let response = self
            .request(Method::POST, &format!("/proposals/{id}/promote"))
            .json(request)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// Submit a vote record through the generic data layer.
    pub async fn post_vote(&self, vote: &Vote) -> Result<(), AppError> {
        let response = self
            .request(Method::POST, "/vote")
            .json(vote)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// `GET /sum/charge/amount.total.val?where=<filter>` — scalar sum of
    /// paid charges matching the filter.
    pub async fn sum_charge_amount(&self, query: &ChargeQuery) -> Result<f64, AppError> {
        let filter = serde_json::to_string(query)?;
        let response = self
            .request(Method::GET, "/sum/charge/amount.total.val")
            .query(&[("where", filter)])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json::<f64>().await?)
    }
}
