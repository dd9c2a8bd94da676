use std::path::Path;

use log::info;
use reqwest::Client;

use crate::domain::value_objects::ListSource;
use crate::infrastructure::config::ShikimoriConfig;
use crate::infrastructure::external::common::CommonHttpHandler;
use crate::shared::errors::{AppError, AppResult};

use super::code_listener;
use super::token::{OAuthToken, TokenStore};

/// Shikimori OAuth2 manager: authorization-code flow with a confidential
/// client. Shikimori requires the registered app name as User-Agent on
/// every request, token endpoints included.
pub struct ShikimoriAuth {
    http: Client,
    config: ShikimoriConfig,
    store: TokenStore,
    token: Option<OAuthToken>,
}

impl ShikimoriAuth {
    pub fn new(config: &ShikimoriConfig, config_dir: &Path) -> AppResult<Self> {
        Ok(Self {
            http: CommonHttpHandler::create_http_client(30, &config.app_name)?,
            config: config.clone(),
            store: TokenStore::new(config_dir, ListSource::Shikimori),
            token: None,
        })
    }

    /// Ensure a usable access token: reuse a persisted one, refresh it
    /// when expired, or run the browser authorization flow.
    pub async fn login(&mut self) -> AppResult<()> {
        match self.store.load()? {
            Some(token) if token.is_valid() => {
                self.token = Some(token);
            }
            Some(token) if token.refresh_token.is_some() => {
                info!("Shikimori token expired, refreshing...");
                self.token = Some(token);
                self.refresh().await?;
            }
            _ => {
                info!("Shikimori not authorized, starting login flow...");
                self.request_authorization().await?;
            }
        }
        Ok(())
    }

    /// `Authorization` header value for API calls.
    pub fn authorization(&self) -> AppResult<String> {
        self.token
            .as_ref()
            .map(OAuthToken::authorization)
            .ok_or_else(|| AppError::Unauthorized("Shikimori is not logged in".to_string()))
    }

    fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/", self.config.port)
    }

    fn authorize_url(&self) -> String {
        format!(
            "{}/oauth/authorize?client_id={}&redirect_uri={}&response_type=code&scope=user_rates",
            self.config.site_url(),
            self.config.client_id,
            urlencoding::encode(&self.redirect_uri()),
        )
    }

    async fn request_authorization(&mut self) -> AppResult<()> {
        info!("Open this link in your browser to authorize:");
        info!("{}", self.authorize_url());
        let code = code_listener::wait_for_code(self.config.port).await?;
        info!("Authorization code received");

        let token = self
            .token_request(&[
                ("grant_type", "authorization_code".to_string()),
                ("client_id", self.config.client_id.clone()),
                ("client_secret", self.config.client_secret.clone()),
                ("code", code),
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
                AppError::Unauthorized("No Shikimori refresh token available".to_string())
            })?;

        let token = self
            .token_request(&[
                ("grant_type", "refresh_token".to_string()),
                ("client_id", self.config.client_id.clone()),
                ("client_secret", self.config.client_secret.clone()),
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
            .post(format!("{}/oauth/token", self.config.site_url()))
            .form(params)
            .send()
            .await?;
        CommonHttpHandler::handle_response_status(response.status(), "Shikimori")?;
        let mut token: OAuthToken = response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse Shikimori token: {}", e)))?;
        token.stamp();
        Ok(token)
    }
}
