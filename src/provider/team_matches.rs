use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::{BallEvent, Inning, RawBallRecord, decode_ball_records};
use crate::error::{VizError, VizResult};

/// One match's deliveries from a single team's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedMatch {
    pub key: String,
    pub balls: Vec<BallEvent>,
    /// Calendar day of the match, when the source date parses.
    pub date: Option<NaiveDate>,
    /// First whitespace-separated token of the source date.
    pub date_label: String,
    pub opponent: String,
    pub winning_team: String,
}

impl GroupedMatch {
    #[must_use]
    pub fn won_by(&self, team: &str) -> bool {
        self.winning_team == team
    }

    /// Inning of the first ball; the team bats first when this is inning 1.
    #[must_use]
    pub fn inning(&self) -> Option<Inning> {
        self.balls.first().map(|ball| ball.inning)
    }
}

/// A team's tournament: balls it faced and balls it bowled, per match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamMatches {
    pub batting: Vec<GroupedMatch>,
    pub bowling: Vec<GroupedMatch>,
}

impl TeamMatches {
    /// Bowling group for the same match key as `batting`.
    #[must_use]
    pub fn bowling_for(&self, key: &str) -> Option<&GroupedMatch> {
        self.bowling.iter().find(|group| group.key == key)
    }

    pub fn all_groups(&self) -> impl Iterator<Item = &GroupedMatch> {
        self.batting.iter().chain(self.bowling.iter())
    }
}

/// Per-match group as served by the team endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGroupedMatch {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub values: Vec<RawBallRecord>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub winning_team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTeamMatches {
    #[serde(default)]
    pub batting_balls: Vec<RawGroupedMatch>,
    #[serde(default)]
    pub bowling_balls: Vec<RawGroupedMatch>,
}

impl TryFrom<&RawGroupedMatch> for GroupedMatch {
    type Error = VizError;

    fn try_from(raw: &RawGroupedMatch) -> VizResult<Self> {
        let key = match &raw.key {
            Value::String(text) if !text.trim().is_empty() => text.trim().to_owned(),
            Value::Number(number) => number.to_string(),
            _ => return Err(VizError::malformed("key", "must be a match id")),
        };
        let date_label = raw
            .date
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_owned();
        let date = NaiveDate::parse_from_str(&date_label, "%Y-%m-%d").ok();
        if date.is_none() {
            warn!(key = %key, date = %raw.date, "unparsed match date");
        }

        Ok(Self {
            balls: decode_ball_records(&raw.values)?,
            key,
            date,
            date_label,
            opponent: raw.opponent.trim().to_owned(),
            winning_team: raw.winning_team.trim().to_owned(),
        })
    }
}

impl TryFrom<&RawTeamMatches> for TeamMatches {
    type Error = VizError;

    fn try_from(raw: &RawTeamMatches) -> VizResult<Self> {
        Ok(Self {
            batting: raw
                .batting_balls
                .iter()
                .map(GroupedMatch::try_from)
                .collect::<VizResult<_>>()?,
            bowling: raw
                .bowling_balls
                .iter()
                .map(GroupedMatch::try_from)
                .collect::<VizResult<_>>()?,
        })
    }
}

/// Decodes a `{ batting_balls, bowling_balls }` document.
pub fn decode_team_matches(json: &str) -> VizResult<TeamMatches> {
    let raw: RawTeamMatches = serde_json::from_str(json)
        .map_err(|e| VizError::malformed("team_matches", format!("is not a team document: {e}")))?;
    TeamMatches::try_from(&raw)
}
