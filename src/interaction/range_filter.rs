use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::{BallEvent, Partnership};
use crate::interaction::OverRange;

/// The single over-range predicate every binder evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    range: OverRange,
}

impl RangeFilter {
    #[must_use]
    pub const fn new(range: OverRange) -> Self {
        Self { range }
    }

    #[must_use]
    pub const fn range(self) -> OverRange {
        self.range
    }

    #[must_use]
    pub const fn contains_over(self, display_over: u32) -> bool {
        self.range.contains(display_over)
    }

    /// A ball is in range iff `min <= ceil(ovr) <= max`.
    #[must_use]
    pub fn contains_ball(self, ball: &BallEvent) -> bool {
        self.contains_over(ball.display_over())
    }

    /// A span between two displayed overs is in range only when both ends are.
    #[must_use]
    pub const fn contains_span(self, from_over: u32, to_over: u32) -> bool {
        self.range.min() <= from_over && to_over <= self.range.max()
    }

    /// Batsmen who were at the crease for at least one in-range ball.
    #[must_use]
    pub fn active_batsmen<'a>(self, balls: &'a [BallEvent]) -> ActiveBatsmen<'a> {
        let names = balls
            .iter()
            .filter(|ball| self.contains_ball(ball))
            .flat_map(|ball| [ball.striker.as_str(), ball.non_striker.as_str()])
            .collect();
        ActiveBatsmen { names }
    }
}

/// Derived from the in-range balls; rebuilt whenever the range changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveBatsmen<'a> {
    names: HashSet<&'a str>,
}

impl ActiveBatsmen<'_> {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Both batsmen must have batted inside the range.
    #[must_use]
    pub fn admits(&self, partnership: &Partnership) -> bool {
        self.contains(&partnership.batsman_1) && self.contains(&partnership.batsman_2)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An empty selection admits everything.
#[derive(Debug, Clone, Copy)]
pub struct PlayerFilter<'a> {
    selected: &'a BTreeSet<String>,
}

impl<'a> PlayerFilter<'a> {
    #[must_use]
    pub fn new(selected: &'a BTreeSet<String>) -> Self {
        Self { selected }
    }

    #[must_use]
    pub fn is_all(self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn admits_player(self, player: &str) -> bool {
        self.is_all() || self.selected.contains(player)
    }

    /// Striker or bowler must be selected.
    #[must_use]
    pub fn admits_ball(self, ball: &BallEvent) -> bool {
        self.is_all()
            || self
                .selected
                .iter()
                .any(|player| ball.involves(player))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emphasis {
    Full,
    Dimmed,
}

impl Emphasis {
    #[must_use]
    pub fn opacity(self, dimmed_opacity: f64) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Dimmed => dimmed_opacity,
        }
    }

    #[must_use]
    pub const fn is_dimmed(self) -> bool {
        matches!(self, Self::Dimmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmphasisInput {
    pub in_range: bool,
    pub hovered: bool,
}

/// Resolves emphasis for one chart's elements, in input order.
///
/// Out-of-range elements are always dimmed. Hover takes effect only when it
/// matches at least one in-range element; then every other element dims.
#[must_use]
pub fn resolve_emphases(inputs: &[EmphasisInput]) -> Vec<Emphasis> {
    let hover_engaged = inputs.iter().any(|input| input.in_range && input.hovered);
    inputs
        .iter()
        .map(|input| {
            if !input.in_range || (hover_engaged && !input.hovered) {
                Emphasis::Dimmed
            } else {
                Emphasis::Full
            }
        })
        .collect()
}
