use std::path::Path;

use log::{debug, info};
use reqwest::Client;

use crate::domain::value_objects::TitleType;
use crate::domain::TitleList;
use crate::infrastructure::auth::MalAuth;
use crate::infrastructure::config::MalConfig;
use crate::infrastructure::external::common::{CommonHttpHandler, USER_AGENT};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RateLimiter;

use super::dto::{MalListEntry, MalListResponse};
use super::mapper::MalMapper;

const PAGE_LIMIT: usize = 1000;

pub struct MalClient {
    http: Client,
    base_url: String,
    auth: MalAuth,
    rate_limiter: RateLimiter,
}

impl MalClient {
    pub fn new(config: &MalConfig, config_dir: &Path) -> AppResult<Self> {
        Ok(Self {
            http: CommonHttpHandler::create_http_client(30, USER_AGENT)?,
            base_url: "https://api.myanimelist.net/v2".to_string(),
            auth: MalAuth::new(config, config_dir)?,
            rate_limiter: RateLimiter::new(1.0), // MAL throttles aggressively
        })
    }

    pub async fn login(&mut self) -> AppResult<()> {
        self.auth.login().await?;
        info!("Logged into MyAnimeList");
        Ok(())
    }

    /// Fetch the complete anime+manga list as one normalized TitleList.
    pub async fn fetch_list(&self) -> AppResult<TitleList> {
        let anime_url = format!(
            "{}/users/@me/animelist?fields=list_status,media_type&limit={}&nsfw=true",
            self.base_url, PAGE_LIMIT
        );
        let mut list =
            MalMapper::to_title_list(self.fetch_pages(anime_url).await?, TitleType::Anime)?;

        let manga_url = format!(
            "{}/users/@me/mangalist?fields=list_status,media_type&limit={}&nsfw=true",
            self.base_url, PAGE_LIMIT
        );
        list.update(MalMapper::to_title_list(
            self.fetch_pages(manga_url).await?,
            TitleType::Manga,
        )?);

        info!("Fetched {} titles from MyAnimeList", list.len());
        Ok(list)
    }

    // Follows paging.next until the API stops handing one out.
    async fn fetch_pages(&self, first_url: String) -> AppResult<Vec<MalListEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(first_url);
        while let Some(url) = next {
            self.rate_limiter.wait().await;
            let response = self
                .http
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, self.auth.authorization()?)
                .send()
                .await?;
            CommonHttpHandler::handle_response_status(response.status(), "MyAnimeList")?;
            let page: MalListResponse = response.json().await.map_err(|e| {
                AppError::ApiError(format!("Failed to parse MyAnimeList response: {}", e))
            })?;
            debug!("MyAnimeList page: {} entries", page.data.len());
            entries.extend(page.data);
            next = page.paging.and_then(|paging| paging.next);
        }
        Ok(entries)
    }
}
