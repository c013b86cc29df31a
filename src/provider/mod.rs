//! Collaborator contracts for data retrieval and image assets.
//!
//! Providers are synchronous: the host fetches asynchronously, then hands a
//! complete dataset to the store before any binder runs.

mod assets;
mod store;
mod team_matches;

use serde::{Deserialize, Serialize};

use crate::core::{BallEvent, Partnership};
use crate::error::VizResult;

pub use assets::{AssetCatalog, AssetLookup, DEFAULT_FLAG, DEFAULT_PHOTO};
pub use store::InMemoryMatchStore;
pub use team_matches::{
    GroupedMatch, RawGroupedMatch, RawTeamMatches, TeamMatches, decode_team_matches,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Typed retrieval of match data.
///
/// Failures surface as [`VizError::DataProvider`](crate::VizError::DataProvider)
/// and are propagated unchanged; nothing here retries.
pub trait MatchDataProvider {
    fn fetch_match(&self, match_id: u32) -> VizResult<Vec<BallEvent>>;

    fn fetch_team_matches(&self, team: &str) -> VizResult<TeamMatches>;

    fn fetch_partnerships(&self, match_id: u32) -> VizResult<Vec<Partnership>>;

    fn fetch_players(&self) -> VizResult<Vec<Player>>;

    fn fetch_players_by_team(&self, team: &str) -> VizResult<Vec<Player>> {
        Ok(self
            .fetch_players()?
            .into_iter()
            .filter(|player| player.team == team)
            .collect())
    }
}
