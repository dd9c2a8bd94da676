use std::path::Path;

use log::info;

use crate::domain::value_objects::ListSource;
use crate::domain::TitleList;
use crate::infrastructure::config::Config;
use crate::infrastructure::external::myanimelist::MalClient;
use crate::infrastructure::external::shikimori::ShikimoriClient;
use crate::shared::errors::AppResult;

/// Wires the two source clients together and drives one reconciliation
/// run: fetch a single list, or fetch both and hand them to the pure
/// delta algorithm.
pub struct SyncService {
    shikimori: ShikimoriClient,
    myanimelist: MalClient,
}

impl SyncService {
    pub fn new(config: &Config, config_dir: &Path) -> AppResult<Self> {
        Ok(Self {
            shikimori: ShikimoriClient::new(&config.shikimori, config_dir)?,
            myanimelist: MalClient::new(&config.myanimelist, config_dir)?,
        })
    }

    /// Log in to one source and fetch its complete normalized list.
    pub async fn fetch(&mut self, source: ListSource) -> AppResult<TitleList> {
        match source {
            ListSource::Shikimori => {
                self.shikimori.login().await?;
                self.shikimori.fetch_list().await
            }
            ListSource::MyAnimeList => {
                self.myanimelist.login().await?;
                self.myanimelist.fetch_list().await
            }
        }
    }

    /// Reconcile both sources with `base` as the `self` side of the
    /// delta. Both lists are fully materialized (pagination exhausted)
    /// before the comparison runs; the two fetches are independent and
    /// run concurrently.
    pub async fn delta(&mut self, base: ListSource) -> AppResult<TitleList> {
        self.shikimori.login().await?;
        self.myanimelist.login().await?;

        let (shikimori_list, myanimelist_list) = tokio::try_join!(
            self.shikimori.fetch_list(),
            self.myanimelist.fetch_list(),
        )?;

        let delta = match base {
            ListSource::Shikimori => shikimori_list.delta(&myanimelist_list),
            ListSource::MyAnimeList => myanimelist_list.delta(&shikimori_list),
        };
        info!(
            "Delta {} -> {}: {} titles differ",
            base,
            base.other(),
            delta.len()
        );
        Ok(delta)
    }
}
