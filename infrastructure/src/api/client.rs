//! Thin reqwest wrapper over the chat server's REST endpoints.

use crate::api::error::{ApiError, Result};
use crate::api::protocol::{
    ChatRequestBody, ConversationMessagesResponse, HistoryResponse, KnowledgeBaseSummary,
    NewConversationResponse, RenameRequestBody,
};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Client for the chat server.
///
/// Owns a connection pool; cheap to clone per reqwest's own semantics.
/// Request lifetimes are bounded by cancellation rather than an overall
/// timeout — only connection establishment is time-limited, so a long
/// streamed reply is never cut off by the client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_connect_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_connect_timeout(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))
    }

    /// `POST /api/chat` — returns the raw streaming response; the caller
    /// consumes its body as an event stream.
    pub async fn chat_stream(&self, body: &ChatRequestBody) -> Result<reqwest::Response> {
        let url = self.url("/api/chat")?;
        debug!(%url, scenario = %body.scenario, "Starting chat request");
        let response = self.http.post(url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    /// `GET /api/history?scenario=&knowledge_base_id=`
    pub async fn history(
        &self,
        scenario: &str,
        knowledge_base_id: Option<&str>,
    ) -> Result<HistoryResponse> {
        let mut url = self.url("/api/history")?;
        url.query_pairs_mut()
            .append_pair("scenario", scenario)
            .append_pair("knowledge_base_id", knowledge_base_id.unwrap_or(""));
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET /api/conversation/{id}`
    pub async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationMessagesResponse> {
        let url = self.url(&format!("/api/conversation/{conversation_id}"))?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /api/conversation/new` (form-encoded, matching the server)
    pub async fn create_conversation(
        &self,
        scenario: &str,
        knowledge_base_id: Option<&str>,
    ) -> Result<NewConversationResponse> {
        let url = self.url("/api/conversation/new")?;
        let mut form = vec![("scenario", scenario.to_string())];
        if let Some(kb) = knowledge_base_id {
            form.push(("knowledge_base_id", kb.to_string()));
        }
        let response = self.http.post(url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /api/conversation/{id}/rename`
    pub async fn rename_conversation(&self, conversation_id: &str, title: &str) -> Result<()> {
        let url = self.url(&format!("/api/conversation/{conversation_id}/rename"))?;
        let body = RenameRequestBody {
            title: title.to_string(),
        };
        let response = self.http.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(())
    }

    /// `DELETE /api/conversation/{id}`
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        let url = self.url(&format!("/api/conversation/{conversation_id}"))?;
        let response = self.http.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(())
    }

    /// `GET /api/knowledge-bases/`
    pub async fn knowledge_bases(&self) -> Result<Vec<KnowledgeBaseSummary>> {
        let url = self.url("/api/knowledge-bases/")?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
