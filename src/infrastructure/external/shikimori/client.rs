use std::path::Path;

use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::TitleList;
use crate::infrastructure::auth::ShikimoriAuth;
use crate::infrastructure::config::ShikimoriConfig;
use crate::infrastructure::external::common::CommonHttpHandler;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RateLimiter;

use super::dto::{ShikimoriUser, ShikimoriUserRate};
use super::mapper::ShikimoriMapper;

// Maximum page size the rates endpoints accept; a short page ends the loop.
const PAGE_LIMIT: usize = 5000;

pub struct ShikimoriClient {
    http: Client,
    base_url: String,
    auth: ShikimoriAuth,
    rate_limiter: RateLimiter,
    user: Option<ShikimoriUser>,
}

impl ShikimoriClient {
    pub fn new(config: &ShikimoriConfig, config_dir: &Path) -> AppResult<Self> {
        Ok(Self {
            // Shikimori requires the registered app name as User-Agent.
            http: CommonHttpHandler::create_http_client(30, &config.app_name)?,
            base_url: format!("{}/api", config.site_url()),
            auth: ShikimoriAuth::new(config, config_dir)?,
            rate_limiter: RateLimiter::new(5.0), // 5 rps documented limit
            user: None,
        })
    }

    /// Log in and resolve the current user (the rates endpoints are keyed
    /// by user id).
    pub async fn login(&mut self) -> AppResult<()> {
        self.auth.login().await?;
        let user = self.whoami().await?;
        info!(
            "Logged into Shikimori as {} (id {})",
            user.nickname.as_deref().unwrap_or("?"),
            user.id
        );
        self.user = Some(user);
        Ok(())
    }

    pub async fn whoami(&self) -> AppResult<ShikimoriUser> {
        self.get_json("/users/whoami", &[]).await
    }

    /// Fetch the complete anime+manga list as one normalized TitleList.
    pub async fn fetch_list(&self) -> AppResult<TitleList> {
        let user_id = self
            .user
            .as_ref()
            .map(|user| user.id)
            .ok_or_else(|| AppError::Unauthorized("Shikimori is not logged in".to_string()))?;

        let mut list = ShikimoriMapper::to_title_list(self.fetch_rates(user_id, "anime").await?)?;
        list.update(ShikimoriMapper::to_title_list(
            self.fetch_rates(user_id, "manga").await?,
        )?);
        info!("Fetched {} titles from Shikimori", list.len());
        Ok(list)
    }

    async fn fetch_rates(&self, user_id: i64, kind: &str) -> AppResult<Vec<ShikimoriUserRate>> {
        let path = format!("/users/{}/{}_rates", user_id, kind);
        let mut rates = Vec::new();
        let mut page = 1usize;
        loop {
            let batch: Vec<ShikimoriUserRate> = self
                .get_json(
                    &path,
                    &[
                        ("limit", PAGE_LIMIT.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            debug!("Shikimori {}_rates page {}: {} entries", kind, page, batch.len());
            let last_page = batch.len() < PAGE_LIMIT;
            rates.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }
        Ok(rates)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.rate_limiter.wait().await;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .header(reqwest::header::AUTHORIZATION, self.auth.authorization()?)
            .send()
            .await?;
        CommonHttpHandler::handle_response_status(response.status(), "Shikimori")?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse Shikimori response: {}", e)))
    }
}
