use std::path::Path;

use log::info;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;

use crate::domain::value_objects::ListSource;
use crate::infrastructure::config::MalConfig;
use crate::infrastructure::external::common::{CommonHttpHandler, USER_AGENT};
use crate::shared::errors::{AppError, AppResult};

use super::code_listener;
use super::token::{OAuthToken, TokenStore};

const OAUTH_BASE_URL: &str = "https://myanimelist.net/v1/oauth2";

/// MyAnimeList OAuth2 manager: authorization-code flow for a public
/// client with PKCE. MAL only supports the `plain` challenge method, so
/// the verifier doubles as the challenge.
pub struct MalAuth {
    http: Client,
    config: MalConfig,
    store: TokenStore,
    token: Option<OAuthToken>,
}

impl MalAuth {
    pub fn new(config: &MalConfig, config_dir: &Path) -> AppResult<Self> {
        Ok(Self {
            http: CommonHttpHandler::create_http_client(30, USER_AGENT)?,
            config: config.clone(),
            store: TokenStore::new(config_dir, ListSource::MyAnimeList),
            token: None,
        })
    }

    pub async fn login(&mut self) -> AppResult<()> {
        match self.store.load()? {
            Some(token) if token.is_valid() => {
                self.token = Some(token);
            }
            Some(token) if token.refresh_token.is_some() => {
                info!("MyAnimeList token expired, refreshing...");
                self.token = Some(token);
                self.refresh().await?;
            }
            _ => {
                info!("MyAnimeList not authorized, starting login flow...");
                self.request_authorization().await?;
            }
        }
        Ok(())
    }

    pub fn authorization(&self) -> AppResult<String> {
        self.token
            .as_ref()
            .map(OAuthToken::authorization)
            .ok_or_else(|| AppError::Unauthorized("MyAnimeList is not logged in".to_string()))
    }

    fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/", self.config.port)
    }

    // PKCE verifier: 128 unreserved characters.
    fn generate_code_verifier() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(128)
            .map(char::from)
            .collect()
    }

    fn authorize_url(&self, code_challenge: &str) -> String {
        format!(
            "{}/authorize?response_type=code&client_id={}&code_challenge={}&code_challenge_method=plain&redirect_uri={}",
            OAUTH_BASE_URL,
            self.config.client_id,
            code_challenge,
            urlencoding::encode(&self.redirect_uri()),
        )
    }

    async fn request_authorization(&mut self) -> AppResult<()> {
        let verifier = Self::generate_code_verifier();

        info!("Open this link in your browser to authorize:");
        info!("{}", self.authorize_url(&verifier));
        let code = code_listener::wait_for_code(self.config.port).await?;
        info!("Authorization code received");

        let token = self
            .token_request(&[
                ("grant_type", "authorization_code".to_string()),
                ("client_id", self.config.client_id.clone()),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", self.redirect_uri()),
            ])
            .await?;
        self.store.save(&token)?;
        self.token = Some(token);
        Ok(())
    }

    async fn refresh(&mut self) -> AppResult<()> {
        let refresh_token = self
            .token
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
            .ok_or_else(|| {
                AppError::Unauthorized("No MyAnimeList refresh token available".to_string())
            })?;

        let token = self
            .token_request(&[
                ("grant_type", "refresh_token".to_string()),
                ("client_id", self.config.client_id.clone()),
                ("refresh_token", refresh_token),
            ])
            .await?;
        self.store.save(&token)?;
        self.token = Some(token);
        Ok(())
    }

    async fn token_request(&self, params: &[(&str, String)]) -> AppResult<OAuthToken> {
        let response = self
            .http
            .post(format!("{}/token", OAUTH_BASE_URL))
            .form(params)
            .send()
            .await?;
        CommonHttpHandler::handle_response_status(response.status(), "MyAnimeList")?;
        // MAL omits created_at; stamp receipt time so expiry checks work.
        let mut token: OAuthToken = response.json().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse MyAnimeList token: {}", e))
        })?;
        token.stamp();
        Ok(token)
    }
}
