use async_trait::async_trait;
use futures::future::try_join_all;
use log::info;

use crate::error::StitchResult;
use crate::project::{GameEntry, SourceProject};

#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Short label for logs (e.g. "http", "local").
    fn name(&self) -> &str;

    /// Retrieve one game with all of its files.
    async fn fetch(&self, entry: &GameEntry) -> StitchResult<SourceProject>;
}

/// Retrieve every game concurrently. Results keep the order of `games`;
/// the first failure fails the whole batch.
pub async fn fetch_all(source: &dyn ProjectSource, games: &[GameEntry]) -> StitchResult<Vec<SourceProject>> {
    info!("fetching {} games from {}", games.len(), source.name());
    try_join_all(games.iter().map(|entry| source.fetch(entry))).await
}
