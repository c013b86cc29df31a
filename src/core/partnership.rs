use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ball::{count_field, required_text};
use crate::error::{VizError, VizResult};

/// Runs jointly accumulated by two batsmen while both were at the wicket.
///
/// `position` is the wicket position: 1 for the opening stand, 2 after the
/// first wicket fell, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub match_id: Option<u32>,
    pub team: String,
    pub position: u32,
    pub batsman_1: String,
    pub batsman_2: String,
    pub batsman_1_score: u32,
    pub batsman_2_score: u32,
    pub score: u32,
}

impl Partnership {
    #[must_use]
    pub fn involves(&self, player: &str) -> bool {
        self.batsman_1 == player || self.batsman_2 == player
    }

    #[must_use]
    pub fn pair(&self) -> (&str, &str) {
        (&self.batsman_1, &self.batsman_2)
    }

    /// Runs not credited to either batsman (extras during the stand).
    #[must_use]
    pub fn extras(&self) -> u32 {
        self.score
            .saturating_sub(self.batsman_1_score + self.batsman_2_score)
    }

    #[must_use]
    pub fn tooltip(&self) -> String {
        format!(
            "{} and {}: {} runs",
            self.batsman_1, self.batsman_2, self.score
        )
    }
}

/// Partnership record as served by the match API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPartnershipRecord {
    #[serde(default)]
    pub game: Value,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub position: Value,
    #[serde(default)]
    pub batsman_1: String,
    #[serde(default)]
    pub batsman_2: String,
    #[serde(default)]
    pub batsman_1_score: Value,
    #[serde(default)]
    pub batsman_2_score: Value,
    #[serde(default)]
    pub score: Value,
}

impl TryFrom<&RawPartnershipRecord> for Partnership {
    type Error = VizError;

    fn try_from(raw: &RawPartnershipRecord) -> VizResult<Self> {
        let match_id = match &raw.game {
            Value::Null => None,
            other => Some(count_field("game", other)?),
        };
        let position = count_field("position", &raw.position)?;
        if position == 0 {
            return Err(VizError::malformed("position", "must be >= 1"));
        }
        let batsman_1 = required_text("batsman_1", &raw.batsman_1)?;
        let batsman_2 = required_text("batsman_2", &raw.batsman_2)?;
        if batsman_1 == batsman_2 {
            return Err(VizError::malformed(
                "batsman_2",
                format!("must differ from batsman_1 (`{batsman_1}`)"),
            ));
        }

        Ok(Self {
            match_id,
            team: required_text("team", &raw.team)?,
            position,
            batsman_1,
            batsman_2,
            batsman_1_score: count_field("batsman_1_score", &raw.batsman_1_score)?,
            batsman_2_score: count_field("batsman_2_score", &raw.batsman_2_score)?,
            score: count_field("score", &raw.score)?,
        })
    }
}

/// Decodes a JSON array of partnership records.
pub fn decode_partnerships(json: &str) -> VizResult<Vec<Partnership>> {
    let records: Vec<RawPartnershipRecord> = serde_json::from_str(json).map_err(|e| {
        VizError::malformed("partnerships", format!("is not a record array: {e}"))
    })?;
    records.iter().map(Partnership::try_from).collect()
}
