//! Pure aggregation over ball-event sequences.
//!
//! Every function here borrows its input and returns freshly built values;
//! calling one twice on the same slice yields identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{BallEvent, Inning, Partnership};
use crate::error::{VizError, VizResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InningStats {
    pub total_runs: u32,
    pub total_wickets: u32,
}

impl InningStats {
    /// Scoreboard form, e.g. `287-6`.
    #[must_use]
    pub fn scoreline(self) -> String {
        format!("{}-{}", self.total_runs, self.total_wickets)
    }
}

/// Batter runs and counted wickets inside one over.
///
/// `over_index` is zero-based (`floor(ovr)`); the displayed over is
/// `over_index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverSummary {
    pub over_index: u32,
    pub runs: u32,
    pub wickets: u32,
}

impl OverSummary {
    #[must_use]
    pub fn display_over(self) -> u32 {
        self.over_index + 1
    }

    /// Tooltip lines; zero runs or zero wickets are left out.
    #[must_use]
    pub fn describe(self) -> Vec<String> {
        let mut lines = vec![format!("Over {}", self.display_over())];
        if self.runs != 0 {
            lines.push(format!("Runs Scored: {}", self.runs));
        }
        if self.wickets != 0 {
            lines.push(format!("Wickets Taken: {}", self.wickets));
        }
        lines
    }
}

/// Everything the inning view derives from one inning's balls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningData {
    pub inning: Inning,
    pub balls: Vec<BallEvent>,
    pub stats: InningStats,
    pub batting_team: String,
    pub over_summaries: Vec<OverSummary>,
}

/// Highest cumulative score and counted wickets within one displayed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverProgress {
    pub over: u32,
    pub max_score: u32,
    pub wickets: SmallVec<[BallEvent; 2]>,
}

/// Totals for one inning.
///
/// `total_runs` is the last ball's cumulative score; wickets exclude
/// wides and no-balls even when the wicket flag is set.
pub fn compute_inning_stats(balls: &[BallEvent]) -> VizResult<InningStats> {
    let (first, last) = match (balls.first(), balls.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(VizError::EmptyInning),
    };
    if let Some(other) = balls.iter().find(|ball| ball.inning != first.inning) {
        return Err(VizError::MixedInnings {
            first: first.inning.number(),
            found: other.inning.number(),
        });
    }

    Ok(InningStats {
        total_runs: last.cumul_runs,
        total_wickets: count_wickets(balls),
    })
}

fn count_wickets(balls: &[BallEvent]) -> u32 {
    balls.iter().filter(|ball| ball.is_counted_wicket()).count() as u32
}

/// Buckets balls by `floor(ovr)`.
///
/// For a sequence sorted by over the result has `floor(last ovr) + 1`
/// entries; overs without balls stay at zero. Runs are batter-credited only.
#[must_use]
pub fn compute_over_summaries(balls: &[BallEvent]) -> Vec<OverSummary> {
    let Some(highest) = balls.iter().map(BallEvent::over_index).max() else {
        return Vec::new();
    };
    let len = highest as usize + 1;

    let mut summaries: Vec<OverSummary> = (0..len)
        .map(|index| OverSummary {
            over_index: index as u32,
            ..OverSummary::default()
        })
        .collect();

    for ball in balls {
        let summary = &mut summaries[ball.over_index() as usize];
        summary.runs = summary.runs.saturating_add(ball.runs_batter);
        if ball.is_counted_wicket() {
            summary.wickets = summary.wickets.saturating_add(1);
        }
    }

    summaries
}

/// Filters `all_balls` to one inning and derives its view data.
///
/// Returns `None` when the inning has no balls yet; that is an expected
/// state, not a fault.
#[must_use]
pub fn compute_inning_data(all_balls: &[BallEvent], inning: Inning) -> Option<InningData> {
    let balls: Vec<BallEvent> = all_balls
        .iter()
        .filter(|ball| ball.inning == inning)
        .cloned()
        .collect();
    let first = balls.first()?;
    let last = balls.last()?;

    let stats = InningStats {
        total_runs: last.cumul_runs,
        total_wickets: count_wickets(&balls),
    };
    let batting_team = first.batting_team.clone();
    let over_summaries = compute_over_summaries(&balls);
    trace!(
        inning = inning.number(),
        balls = balls.len(),
        overs = over_summaries.len(),
        "computed inning data"
    );

    Some(InningData {
        inning,
        balls,
        stats,
        batting_team,
        over_summaries,
    })
}

/// Batsmen of one inning in order of first appearance at the crease.
#[must_use]
pub fn batting_order(balls: &[BallEvent]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for ball in balls {
        for name in [&ball.striker, &ball.non_striker] {
            if !order.iter().any(|seen| seen == name) {
                order.push(name.clone());
            }
        }
    }
    order
}

/// A record belongs to an inning when both batsmen are in its batting order
/// and the second-named batsman comes after the first.
#[must_use]
pub fn belongs_to_inning(partnership: &Partnership, batting_order: &[String]) -> bool {
    match (
        order_position(batting_order, &partnership.batsman_1),
        order_position(batting_order, &partnership.batsman_2),
    ) {
        (Some(first), Some(second)) => second > first,
        _ => false,
    }
}

/// Orders partnerships by the earlier batsman's batting position, ties
/// broken by the other batsman's position. Names missing from the order
/// sort last; the sort is stable.
#[must_use]
pub fn compute_partnership_order(
    partnerships: &[Partnership],
    batting_order: &[String],
) -> Vec<Partnership> {
    let mut ordered = partnerships.to_vec();
    ordered.sort_by_key(|partnership| {
        let a = order_position(batting_order, &partnership.batsman_1).unwrap_or(usize::MAX);
        let b = order_position(batting_order, &partnership.batsman_2).unwrap_or(usize::MAX);
        (a.min(b), a.max(b))
    });
    ordered
}

/// Selects the records of one inning from a match-wide pool and orders them.
#[must_use]
pub fn partnerships_for_inning(
    pool: &[Partnership],
    batting_team: &str,
    batting_order: &[String],
) -> Vec<Partnership> {
    let members: Vec<Partnership> = pool
        .iter()
        .filter(|partnership| partnership.team == batting_team)
        .filter(|partnership| belongs_to_inning(partnership, batting_order))
        .cloned()
        .collect();
    compute_partnership_order(&members, batting_order)
}

fn order_position(batting_order: &[String], name: &str) -> Option<usize> {
    batting_order.iter().position(|candidate| candidate == name)
}

/// Groups balls by displayed over (`ceil(ovr)`), ascending.
#[must_use]
pub fn over_score_progression(balls: &[BallEvent]) -> Vec<OverProgress> {
    let mut overs: BTreeMap<u32, OverProgress> = BTreeMap::new();
    for ball in balls {
        let over = ball.display_over();
        let progress = overs.entry(over).or_insert_with(|| OverProgress {
            over,
            max_score: ball.cumul_runs,
            wickets: SmallVec::new(),
        });
        progress.max_score = progress.max_score.max(ball.cumul_runs);
        if ball.is_counted_wicket() {
            progress.wickets.push(ball.clone());
        }
    }
    overs.into_values().collect()
}
