//! Canonical ball-event model and raw delivery decoding.
//!
//! Raw delivery records arrive as loosely-typed JSON objects. Decoding is
//! strict: every numeric field must hold a number (or a numeric string) and
//! `inning` must be 1 or 2. Nothing is coerced silently.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{VizError, VizResult};

/// One team's batting turn. Matches have exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Inning {
    First,
    Second,
}

impl Inning {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    pub fn from_number(number: u8) -> VizResult<Self> {
        match number {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(VizError::malformed(
                "inning",
                format!("must be 1 or 2, got {other}"),
            )),
        }
    }
}

impl fmt::Display for Inning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Extras category of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtrasType {
    #[default]
    None,
    Wide,
    NoBall,
    LegBye,
    Bye,
}

impl ExtrasType {
    /// Parses the dataset's extras code (`""`, `Wd`, `Nb`, `Lb`, `B`).
    pub fn from_code(code: &str) -> VizResult<Self> {
        match code.trim() {
            "" => Ok(Self::None),
            "Wd" => Ok(Self::Wide),
            "Nb" => Ok(Self::NoBall),
            "Lb" => Ok(Self::LegBye),
            "B" => Ok(Self::Bye),
            other => Err(VizError::malformed(
                "extras_type",
                format!("has unknown code `{other}`"),
            )),
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Wide => "Wd",
            Self::NoBall => "Nb",
            Self::LegBye => "Lb",
            Self::Bye => "B",
        }
    }

    /// Wides and no-balls never count toward the displayed wicket tally.
    #[must_use]
    pub const fn voids_wicket(self) -> bool {
        matches!(self, Self::Wide | Self::NoBall)
    }

    #[must_use]
    pub const fn is_extra(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Runs label used in ball tooltips.
    #[must_use]
    pub const fn runs_label(self) -> &'static str {
        match self {
            Self::None => "Runs",
            Self::Wide => "Wides",
            Self::NoBall => "No Ball",
            Self::LegBye => "Leg byes",
            Self::Bye => "Byes",
        }
    }
}

/// Highest over index accepted from raw records; charts draw 50 overs.
pub const MAX_OVER_INDEX: u32 = 99;

/// Exact split of the `ovr` field (`12.3` is over index 12, ball 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverNotation {
    pub over: u32,
    pub ball: u32,
}

impl OverNotation {
    pub fn parse(ovr: f64) -> VizResult<Self> {
        if !ovr.is_finite() || ovr < 0.0 {
            return Err(VizError::malformed(
                "ovr",
                format!("must be finite and >= 0, got {ovr}"),
            ));
        }
        let decimal = Decimal::from_f64(ovr)
            .ok_or_else(|| VizError::malformed("ovr", format!("cannot represent {ovr}")))?
            .round_dp(1);
        let whole = decimal.trunc();
        let tenth = (decimal - whole) * Decimal::TEN;
        let over = whole
            .to_u32()
            .filter(|over| *over <= MAX_OVER_INDEX)
            .ok_or_else(|| VizError::malformed("ovr", format!("over out of range: {ovr}")))?;
        let ball = tenth
            .to_u32()
            .ok_or_else(|| VizError::malformed("ovr", format!("ball out of range: {ovr}")))?;
        Ok(Self { over, ball })
    }

    /// Zero-based bucket index, `floor(ovr)`.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.over
    }

    /// One-based over shown on axes and used by range filtering, `ceil(ovr)`.
    #[must_use]
    pub const fn display_over(self) -> u32 {
        if self.ball == 0 {
            self.over
        } else {
            self.over + 1
        }
    }
}

/// Stable identity of one delivery inside a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallKey {
    pub inning: Inning,
    pub over: u32,
    pub ball: u32,
    pub ball_within_over: u32,
}

/// One delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallEvent {
    pub match_id: u32,
    pub inning: Inning,
    pub ovr: f64,
    pub notation: OverNotation,
    pub ball_within_over: u32,
    pub batting_team: String,
    pub bowling_team: String,
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
    pub runs_batter: u32,
    pub runs_w_extras: u32,
    pub extras: ExtrasType,
    pub wicket: bool,
    pub who_out: Option<String>,
    pub wicket_method: Option<String>,
    pub cumul_runs: u32,
}

impl BallEvent {
    #[must_use]
    pub fn key(&self) -> BallKey {
        BallKey {
            inning: self.inning,
            over: self.notation.over,
            ball: self.notation.ball,
            ball_within_over: self.ball_within_over,
        }
    }

    #[must_use]
    pub fn over_index(&self) -> u32 {
        self.notation.index()
    }

    #[must_use]
    pub fn display_over(&self) -> u32 {
        self.notation.display_over()
    }

    /// `true` for a wicket that counts toward the displayed tally.
    #[must_use]
    pub fn is_counted_wicket(&self) -> bool {
        self.wicket && !self.extras.voids_wicket()
    }

    /// `true` when the player faced or bowled this delivery.
    #[must_use]
    pub fn involves(&self, player: &str) -> bool {
        self.striker == player || self.bowler == player
    }

    #[must_use]
    pub fn describe(&self) -> BallDescription {
        BallDescription {
            title: format!(
                "Over {}, Ball {}",
                self.display_over(),
                self.notation.ball
            ),
            runs_line: format!(
                "{}: {} {}",
                self.striker,
                self.runs_w_extras,
                self.extras.runs_label()
            ),
            bowler_line: format!("Bowled by {}", self.bowler),
            wicket_line: self.is_counted_wicket().then(|| {
                format!(
                    "Wicket- {} ({})",
                    self.who_out.as_deref().unwrap_or(&self.striker),
                    self.wicket_method.as_deref().unwrap_or("unknown")
                )
            }),
        }
    }
}

/// Tooltip-level description of one delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallDescription {
    pub title: String,
    pub runs_line: String,
    pub bowler_line: String,
    pub wicket_line: Option<String>,
}

impl BallDescription {
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![
            self.title.as_str(),
            self.runs_line.as_str(),
            self.bowler_line.as_str(),
        ];
        if let Some(wicket) = &self.wicket_line {
            lines.push(wicket.as_str());
        }
        lines
    }
}

/// Delivery record as stored by the match API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBallRecord {
    #[serde(default)]
    pub game: Value,
    #[serde(default)]
    pub inning: Value,
    #[serde(default)]
    pub ovr: Value,
    #[serde(default)]
    pub ball_within_over: Value,
    #[serde(default)]
    pub batting_team: String,
    #[serde(default)]
    pub bowling_team: String,
    #[serde(default)]
    pub batsman_name: String,
    #[serde(default)]
    pub non_striker: String,
    #[serde(default)]
    pub bowler_name: String,
    #[serde(default)]
    pub runs_batter: Value,
    #[serde(default)]
    pub runs_w_extras: Value,
    #[serde(default)]
    pub extras_type: Option<String>,
    #[serde(default)]
    pub wicket: Value,
    #[serde(default)]
    pub who_out: Option<String>,
    #[serde(default)]
    pub wicket_method: Option<String>,
    #[serde(default)]
    pub cumul_runs: Value,
}

impl TryFrom<&RawBallRecord> for BallEvent {
    type Error = VizError;

    fn try_from(raw: &RawBallRecord) -> VizResult<Self> {
        let inning_number = count_field("inning", &raw.inning)?;
        let inning = u8::try_from(inning_number)
            .map_err(|_| {
                VizError::malformed("inning", format!("must be 1 or 2, got {inning_number}"))
            })
            .and_then(Inning::from_number)?;
        let ovr = numeric_field("ovr", &raw.ovr)?;
        let notation = OverNotation::parse(ovr)?;

        Ok(Self {
            match_id: count_field("game", &raw.game)?,
            inning,
            ovr,
            notation,
            ball_within_over: count_field("ball_within_over", &raw.ball_within_over)?,
            batting_team: required_text("batting_team", &raw.batting_team)?,
            bowling_team: required_text("bowling_team", &raw.bowling_team)?,
            striker: required_text("batsman_name", &raw.batsman_name)?,
            non_striker: required_text("non_striker", &raw.non_striker)?,
            bowler: required_text("bowler_name", &raw.bowler_name)?,
            runs_batter: count_field("runs_batter", &raw.runs_batter)?,
            runs_w_extras: count_field("runs_w_extras", &raw.runs_w_extras)?,
            extras: ExtrasType::from_code(raw.extras_type.as_deref().unwrap_or(""))?,
            wicket: flag_field("wicket", &raw.wicket)?,
            who_out: optional_text(raw.who_out.as_deref()),
            wicket_method: optional_text(raw.wicket_method.as_deref()),
            cumul_runs: count_field("cumul_runs", &raw.cumul_runs)?,
        })
    }
}

impl TryFrom<RawBallRecord> for BallEvent {
    type Error = VizError;

    fn try_from(raw: RawBallRecord) -> VizResult<Self> {
        Self::try_from(&raw)
    }
}

/// Decodes a JSON array of delivery records.
pub fn decode_balls(json: &str) -> VizResult<Vec<BallEvent>> {
    let records: Vec<RawBallRecord> = serde_json::from_str(json)
        .map_err(|e| VizError::malformed("balls", format!("is not a record array: {e}")))?;
    decode_ball_records(&records)
}

pub fn decode_ball_records(records: &[RawBallRecord]) -> VizResult<Vec<BallEvent>> {
    records.iter().map(BallEvent::try_from).collect()
}

pub(crate) fn numeric_field(field: &str, value: &Value) -> VizResult<f64> {
    let number = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| VizError::malformed(field, "is not representable as f64"))?,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| VizError::malformed(field, format!("is not numeric: `{text}`")))?,
        Value::Null => return Err(VizError::malformed(field, "is missing")),
        other => {
            return Err(VizError::malformed(
                field,
                format!("is not numeric: {other}"),
            ));
        }
    };
    if !number.is_finite() {
        return Err(VizError::malformed(field, "must be finite"));
    }
    Ok(number)
}

pub(crate) fn count_field(field: &str, value: &Value) -> VizResult<u32> {
    let number = numeric_field(field, value)?;
    if number < 0.0 || number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(VizError::malformed(
            field,
            format!("must be a non-negative integer, got {number}"),
        ));
    }
    Ok(number as u32)
}

fn flag_field(field: &str, value: &Value) -> VizResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Null => Ok(false),
        Value::Number(_) => match count_field(field, value)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(VizError::malformed(
                field,
                format!("must be 0 or 1, got {other}"),
            )),
        },
        Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(VizError::malformed(
            field,
            format!("is not a boolean: {other}"),
        )),
    }
}

pub(crate) fn required_text(field: &str, value: &str) -> VizResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VizError::malformed(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
