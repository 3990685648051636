use crate::supabase::{AuthErrorBody, AuthTokenResponse, MatchRow, NewMatchRow};
use crate::{AuthSession, Match, MatchCandidate, Role};
use reqwest::{Client, RequestBuilder, Response};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const REST_MATCHES: &str = "/rest/v1/matches";
const AUTH_TOKEN: &str = "/auth/v1/token?grant_type=password";
/// PostgREST refuses an unfiltered DELETE, so "delete everything" is spelled
/// as a filter no row can match.
const DELETE_ALL_FILTER: &str = "id=neq.00000000-0000-0000-0000-000000000000";

/// Remote store/auth client backed by a Supabase project.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The auth service rejected the credentials; carries its message.
    Auth(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Auth(msg) => write!(f, "Auth rejected: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("campa/0.1 (tournament engine)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Build a client from `CAMPA_SUPABASE_URL` and `CAMPA_SUPABASE_ANON_KEY`.
    pub fn from_env() -> ApiResult<Self> {
        let url = std::env::var("CAMPA_SUPABASE_URL")
            .map_err(|_| ApiError::Other("CAMPA_SUPABASE_URL is not set".into()))?;
        let key = std::env::var("CAMPA_SUPABASE_ANON_KEY")
            .map_err(|_| ApiError::Other("CAMPA_SUPABASE_ANON_KEY is not set".into()))?;
        Ok(Self::new(url, key))
    }

    /// Fetch every recorded match, newest first.
    pub async fn fetch_matches(&self) -> ApiResult<Vec<Match>> {
        let url = format!(
            "{}{REST_MATCHES}?select=*&order=created_at.desc",
            self.base_url
        );
        let rows: Vec<MatchRow> = self.send_json(self.client.get(&url), &url).await?;
        Ok(rows.into_iter().map(MatchRow::into_match).collect())
    }

    /// Write a new match and return the stored row (server-assigned id and
    /// timestamp included).
    pub async fn insert_match(&self, candidate: &MatchCandidate) -> ApiResult<Match> {
        let url = format!("{}{REST_MATCHES}", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .header(reqwest::header::ACCEPT, "application/vnd.pgrst.object+json")
            .json(&NewMatchRow::from_candidate(candidate));
        let row: MatchRow = self.send_json(request, &url).await?;
        Ok(row.into_match())
    }

    /// Delete every match row.
    pub async fn delete_all_matches(&self) -> ApiResult<()> {
        let url = format!("{}{REST_MATCHES}?{DELETE_ALL_FILTER}", self.base_url);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    /// Exchange a principal + password for a session token. A 4xx from the
    /// auth service becomes `ApiError::Auth` with the service's message.
    pub async fn sign_in(&self, principal: &str, password: &str) -> ApiResult<AuthSession> {
        let url = format!("{}{AUTH_TOKEN}", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "email": principal, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if response.status().is_client_error() {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            return Err(ApiError::Auth(body.message()));
        }

        match response.error_for_status() {
            Ok(res) => {
                let token: AuthTokenResponse =
                    res.json().await.map_err(|e| ApiError::Parsing(e, url))?;
                Ok(AuthSession {
                    access_token: token.access_token,
                    expires_in: token.expires_in,
                })
            }
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> ApiResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

/// Login identifier for a role + numeric id. Must match the accounts
/// provisioned in the auth service: one admin account and one account per
/// base.
pub fn derive_principal(role: Role, id: u32) -> String {
    match role {
        Role::Admin => "admin@example.com".to_owned(),
        Role::Base => format!("base{id}@example.com"),
    }
}
