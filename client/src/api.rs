use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    ClearAllResponse, CreateEntryRequest, CurrentUser, DataEnvelope, DeleteEntryResponse, ErrorBody, FinancialEntry,
    FinancialStats, MessageResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
    UpdateEntryRequest, UpdateProfileRequest, UserProfile,
};
use tracing::debug;

use crate::errors::{ClientError, ClientResult};
use crate::session::Session;
use crate::store::{AccountStore, EntryStore};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// API client for communicating with the entry store
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match session {
            Some(session) => builder.bearer_auth(&session.access_token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transient(format!("Failed to reach the server: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Transient(format!("Failed to parse response: {}", e)));
        }

        let body = response.json::<ErrorBody>().await.ok();
        Err(ClientError::from_status(status.as_u16(), body))
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let envelope: DataEnvelope<T> = self.send(request).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl EntryStore for ApiClient {
    async fn list(&self, session: &Session) -> ClientResult<Vec<FinancialEntry>> {
        self.data(self.request(Method::GET, "/financial/all", Some(session))).await
    }

    async fn stats(&self, session: &Session) -> ClientResult<FinancialStats> {
        self.data(self.request(Method::GET, "/financial/stats", Some(session))).await
    }

    async fn titles(&self, session: &Session) -> ClientResult<Vec<String>> {
        self.data(self.request(Method::GET, "/financial/titles", Some(session))).await
    }

    async fn get(&self, session: &Session, id: &str) -> ClientResult<FinancialEntry> {
        let path = format!("/financial/{}", id);
        self.data(self.request(Method::GET, &path, Some(session))).await
    }

    async fn create(&self, session: &Session, request: &CreateEntryRequest) -> ClientResult<FinancialEntry> {
        self.data(self.request(Method::POST, "/financial", Some(session)).json(request))
            .await
    }

    async fn update(&self, session: &Session, id: &str, request: &UpdateEntryRequest) -> ClientResult<FinancialEntry> {
        let path = format!("/financial/{}", id);
        self.data(self.request(Method::PUT, &path, Some(session)).json(request)).await
    }

    async fn delete(&self, session: &Session, id: &str) -> ClientResult<bool> {
        let path = format!("/financial/{}", id);
        let response: DeleteEntryResponse = self.send(self.request(Method::DELETE, &path, Some(session))).await?;
        Ok(response.deleted)
    }

    async fn clear_all(&self, session: &Session) -> ClientResult<u64> {
        let response: ClearAllResponse = self
            .send(self.request(Method::DELETE, "/financial/clear-all", Some(session)))
            .await?;
        Ok(response.deleted_count)
    }
}

#[async_trait]
impl AccountStore for ApiClient {
    async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<CurrentUser> {
        let response: SignUpResponse = self
            .send(self.request(Method::POST, "/auth/signup", None).json(request))
            .await?;
        Ok(response.user)
    }

    async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session> {
        let response: SignInResponse = self
            .send(self.request(Method::POST, "/auth/signin", None).json(request))
            .await?;
        Ok(Session {
            access_token: response.session.access_token,
            user_id: response.user.id,
            email: response.user.email,
            expires_at: response.session.expires_at,
        })
    }

    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        let _: MessageResponse = self
            .send(self.request(Method::POST, "/auth/signout", Some(session)))
            .await?;
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> ClientResult<CurrentUser> {
        self.data(self.request(Method::GET, "/auth/me", Some(session))).await
    }

    async fn profile(&self, session: &Session) -> ClientResult<UserProfile> {
        self.data(self.request(Method::GET, "/user/profile", Some(session))).await
    }

    async fn update_profile(&self, session: &Session, request: &UpdateProfileRequest) -> ClientResult<UserProfile> {
        self.data(self.request(Method::PUT, "/user/profile", Some(session)).json(request))
            .await
    }

    async fn delete_account(&self, session: &Session) -> ClientResult<u64> {
        let response: ClearAllResponse = self
            .send(self.request(Method::DELETE, "/user/delete-account", Some(session)))
            .await?;
        Ok(response.deleted_count)
    }
}
