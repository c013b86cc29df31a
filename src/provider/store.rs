use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BallEvent, Partnership, decode_balls, decode_partnerships};
use crate::error::{VizError, VizResult};
use crate::provider::{MatchDataProvider, Player, TeamMatches, decode_team_matches};

/// Match data held in memory, loaded from JSON documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryMatchStore {
    matches: BTreeMap<u32, Vec<BallEvent>>,
    partnerships: BTreeMap<u32, Vec<Partnership>>,
    team_matches: BTreeMap<String, TeamMatches>,
    players: Vec<Player>,
}

impl InMemoryMatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a match's balls.
    pub fn insert_match(&mut self, match_id: u32, balls: Vec<BallEvent>) {
        self.matches.insert(match_id, balls);
    }

    /// Loads a ball array spanning any number of matches, grouped by the
    /// `game` field. Returns the number of matches touched.
    pub fn load_balls_json(&mut self, json: &str) -> VizResult<usize> {
        let balls = decode_balls(json)?;
        let mut grouped: BTreeMap<u32, Vec<BallEvent>> = BTreeMap::new();
        for ball in balls {
            grouped.entry(ball.match_id).or_default().push(ball);
        }
        let touched = grouped.len();
        for (match_id, balls) in grouped {
            debug!(match_id, balls = balls.len(), "loaded match balls");
            self.matches.insert(match_id, balls);
        }
        Ok(touched)
    }

    pub fn load_partnerships_json(&mut self, match_id: u32, json: &str) -> VizResult<usize> {
        let records = decode_partnerships(json)?;
        let count = records.len();
        self.partnerships.insert(match_id, records);
        Ok(count)
    }

    pub fn load_team_matches_json(&mut self, team: &str, json: &str) -> VizResult<()> {
        let matches = decode_team_matches(json)?;
        debug!(
            team,
            batting = matches.batting.len(),
            bowling = matches.bowling.len(),
            "loaded team matches"
        );
        self.team_matches.insert(team.to_owned(), matches);
        Ok(())
    }

    pub fn load_players_json(&mut self, json: &str) -> VizResult<usize> {
        let players: Vec<Player> = serde_json::from_str(json)
            .map_err(|e| VizError::malformed("players", format!("is not a player array: {e}")))?;
        let count = players.len();
        self.players = players;
        Ok(count)
    }

    #[must_use]
    pub fn match_ids(&self) -> Vec<u32> {
        self.matches.keys().copied().collect()
    }
}

impl MatchDataProvider for InMemoryMatchStore {
    fn fetch_match(&self, match_id: u32) -> VizResult<Vec<BallEvent>> {
        self.matches
            .get(&match_id)
            .cloned()
            .ok_or_else(|| VizError::DataProvider(format!("match {match_id} not found")))
    }

    fn fetch_team_matches(&self, team: &str) -> VizResult<TeamMatches> {
        self.team_matches
            .get(team)
            .cloned()
            .ok_or_else(|| VizError::DataProvider(format!("no matches for team `{team}`")))
    }

    fn fetch_partnerships(&self, match_id: u32) -> VizResult<Vec<Partnership>> {
        self.partnerships
            .get(&match_id)
            .cloned()
            .ok_or_else(|| {
                VizError::DataProvider(format!("partnerships for match {match_id} not found"))
            })
    }

    fn fetch_players(&self) -> VizResult<Vec<Player>> {
        Ok(self.players.clone())
    }
}
