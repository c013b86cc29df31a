//! Shared interactive state consumed by every chart binder.
//!
//! The presentation layer owns one `SelectionState` per open match/inning
//! view and mutates it only from user input. Binders read it; they never
//! write to it.

mod range_filter;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BallEvent, BallKey, Inning, Partnership};

pub use range_filter::{
    ActiveBatsmen, Emphasis, EmphasisInput, PlayerFilter, RangeFilter, resolve_emphases,
};

pub const FIRST_OVER: u32 = 1;
pub const LAST_OVER: u32 = 50;

/// Inclusive range of displayed overs, always within `1..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverRange {
    min: u32,
    max: u32,
}

impl Default for OverRange {
    fn default() -> Self {
        Self::full()
    }
}

impl OverRange {
    /// Builds a range, clamping both ends into `1..=50` and swapping them
    /// when given in reverse order.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: low.clamp(FIRST_OVER, LAST_OVER),
            max: high.clamp(FIRST_OVER, LAST_OVER),
        }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self {
            min: FIRST_OVER,
            max: LAST_OVER,
        }
    }

    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.min == FIRST_OVER && self.max == LAST_OVER
    }

    #[must_use]
    pub const fn contains(self, display_over: u32) -> bool {
        self.min <= display_over && display_over <= self.max
    }

    #[must_use]
    pub const fn covers(self, other: OverRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

/// Entity currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverTarget {
    Ball(BallKey),
    Player(String),
    /// Displayed (one-based) over of a summary bar.
    Over(u32),
    Team(String),
}

impl HoverTarget {
    #[must_use]
    pub fn matches_ball(&self, ball: &BallEvent) -> bool {
        match self {
            Self::Ball(key) => *key == ball.key(),
            Self::Player(name) => ball.involves(name),
            Self::Over(over) => *over == ball.display_over(),
            Self::Team(team) => *team == ball.batting_team,
        }
    }

    #[must_use]
    pub fn matches_partnership(&self, partnership: &Partnership) -> bool {
        match self {
            Self::Player(name) => partnership.involves(name),
            Self::Team(team) => *team == partnership.team,
            Self::Ball(_) | Self::Over(_) => false,
        }
    }

    #[must_use]
    pub fn matches_over(&self, display_over: u32) -> bool {
        matches!(self, Self::Over(over) if *over == display_over)
    }

    #[must_use]
    pub fn matches_team(&self, team: &str) -> bool {
        matches!(self, Self::Team(hovered) if hovered == team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    BallByBall,
    OverSummary,
    Timeline,
    PartnershipMatrix,
    PartnershipBars,
}

/// Ephemeral selection for one match/inning view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    match_id: Option<u32>,
    inning: Option<Inning>,
    range: OverRange,
    selected_players: BTreeSet<String>,
    hover: Option<HoverTarget>,
    view_mode: ViewMode,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_view(match_id: u32, inning: Inning) -> Self {
        Self {
            match_id: Some(match_id),
            inning: Some(inning),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn match_id(&self) -> Option<u32> {
        self.match_id
    }

    #[must_use]
    pub fn inning(&self) -> Option<Inning> {
        self.inning
    }

    #[must_use]
    pub fn range(&self) -> OverRange {
        self.range
    }

    #[must_use]
    pub fn selected_players(&self) -> &BTreeSet<String> {
        &self.selected_players
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Restores defaults when the viewed match or inning changes.
    ///
    /// View mode survives the reset. Returns `true` when a reset happened.
    pub fn reset_for(&mut self, match_id: u32, inning: Inning) -> bool {
        if self.match_id == Some(match_id) && self.inning == Some(inning) {
            return false;
        }
        debug!(match_id, inning = inning.number(), "reset selection state");
        *self = Self {
            view_mode: self.view_mode,
            ..Self::for_view(match_id, inning)
        };
        true
    }

    /// Sets the over range, clamping into `1..=50`. Returns the stored range.
    pub fn set_range(&mut self, min: u32, max: u32) -> OverRange {
        let range = OverRange::new(min, max);
        if (range.min(), range.max()) != (min, max) {
            debug!(
                requested_min = min,
                requested_max = max,
                min = range.min(),
                max = range.max(),
                "clamped over range"
            );
        }
        self.range = range;
        range
    }

    /// Adds the player when absent, removes them when present.
    ///
    /// Returns `true` when the player is selected afterwards.
    pub fn toggle_player(&mut self, player: impl Into<String>) -> bool {
        let player = player.into();
        if self.selected_players.remove(&player) {
            false
        } else {
            self.selected_players.insert(player);
            true
        }
    }

    pub fn clear_players(&mut self) {
        self.selected_players.clear();
    }

    pub fn set_hover(&mut self, hover: Option<HoverTarget>) {
        self.hover = hover;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    #[must_use]
    pub fn range_filter(&self) -> RangeFilter {
        RangeFilter::new(self.range)
    }

    #[must_use]
    pub fn player_filter(&self) -> PlayerFilter<'_> {
        PlayerFilter::new(&self.selected_players)
    }
}
