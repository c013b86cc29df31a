use std::collections::BTreeMap;

use chrono::NaiveDate;
#[cfg(feature = "parallel-overview")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::{
    AxisTick, BLACK, ChartSeries, StackedBlock, SummaryLayer, WHITE, over_slot, over_ticks,
};
use crate::core::category::WICKET_COLOR;
use crate::core::{
    BallCategory, BallEvent, BallKey, BandScale, Inning, LinearScale, Viewport, classify,
    color_for, team_color,
};
use crate::error::{VizError, VizResult};
use crate::interaction::{
    Emphasis, HoverTarget, PlayerFilter, RangeFilter, SelectionState, ViewMode,
};
use crate::provider::{GroupedMatch, TeamMatches};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub const CANVAS_WIDTH: f64 = 1075.0;
pub const CANVAS_HEIGHT: f64 = 830.0;
pub const MATCH_SLOTS: usize = 9;

const OVER_COUNT: u32 = 50;
const FIRST_INNING_RANGE: (f64, f64) = (370.0, 40.0);
const SECOND_INNING_RANGE: (f64, f64) = (460.0, 800.0);
const COLUMNS_LEFT: f64 = 50.0;
const COLUMNS_RIGHT: f64 = CANVAS_WIDTH - 10.0;
const COLUMN_PADDING: f64 = 0.05;
const BACKGROUND_TOP: f64 = 20.0;
const BACKGROUND_HEIGHT: f64 = 790.0;
const BACKGROUND_OPACITY: f64 = 0.3;
const LOST_MATCH_COLOR: Color = Color::rgb8(0xFF, 0x50, 0x50);
const CANCELLED_COLOR: Color = Color::rgb8(0xD8, 0x2E, 0x08);
const HIGHLIGHT_STROKE: Color = Color::rgb8(0xFF, 0xA5, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStage {
    Group,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl MatchStage {
    /// Stage of the fixture in column `slot`, given how many leading slots
    /// belong to the group stage.
    #[must_use]
    pub fn for_slot(slot: usize, group_stage_slots: usize) -> Self {
        if slot < group_stage_slots {
            Self::Group
        } else if slot == group_stage_slots {
            Self::QuarterFinal
        } else if slot == group_stage_slots + 1 {
            Self::SemiFinal
        } else {
            Self::Final
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::QuarterFinal => "Quarter-Final",
            Self::SemiFinal => "Semi-Final",
            Self::Final => "Final",
        }
    }
}

/// A fixture that was scheduled but not played; it keeps its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledFixture {
    pub slot: usize,
    pub opponent: String,
    pub date_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentOverviewOptions {
    #[serde(default = "default_group_stage_slots")]
    pub group_stage_slots: usize,
    #[serde(default)]
    pub cancelled: Vec<CancelledFixture>,
}

impl Default for TournamentOverviewOptions {
    fn default() -> Self {
        Self {
            group_stage_slots: default_group_stage_slots(),
            cancelled: Vec::new(),
        }
    }
}

impl TournamentOverviewOptions {
    #[must_use]
    pub fn with_cancelled(
        mut self,
        slot: usize,
        opponent: impl Into<String>,
        date_label: impl Into<String>,
    ) -> Self {
        self.cancelled.push(CancelledFixture {
            slot,
            opponent: opponent.into(),
            date_label: date_label.into(),
        });
        self
    }
}

fn default_group_stage_slots() -> usize {
    6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallCell {
    pub key: BallKey,
    pub striker: String,
    pub bowler: String,
    pub category: BallCategory,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `false` when a player selection or the over range excludes the ball.
    pub active: bool,
    /// The hovered player faced or bowled this ball.
    pub highlighted: bool,
}

impl BallCell {
    #[must_use]
    pub fn emphasis(&self) -> Emphasis {
        if self.active {
            Emphasis::Full
        } else {
            Emphasis::Dimmed
        }
    }
}

/// One stacked runs/wickets bar of an over, laid out horizontally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub inning: Inning,
    pub display_over: u32,
    pub x: f64,
    pub block: StackedBlock,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchColumn {
    pub slot: usize,
    pub key: Option<String>,
    pub opponent: String,
    pub date: Option<NaiveDate>,
    pub date_label: String,
    pub stage: MatchStage,
    /// `None` for cancelled fixtures.
    pub batted_first: Option<bool>,
    pub won: bool,
    pub x: f64,
    pub width: f64,
    pub cells: Vec<BallCell>,
    pub summary: Vec<SummaryBlock>,
}

impl MatchColumn {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.key.is_none()
    }

    #[must_use]
    pub fn background(&self) -> Color {
        if self.won { WHITE } else { LOST_MATCH_COLOR }
    }

    #[must_use]
    pub fn batting_label(&self) -> &'static str {
        match self.batted_first {
            Some(true) => "First to Bat",
            Some(false) => "Second to Bat",
            None => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentOverviewSeries {
    pub team: String,
    pub view_mode: ViewMode,
    pub dimmed_opacity: f64,
    pub ball_width: f64,
    pub columns: Vec<MatchColumn>,
    pub first_inning_ticks: Vec<AxisTick>,
    pub second_inning_ticks: Vec<AxisTick>,
}

struct ColumnPlan<'a> {
    slot: usize,
    batting: &'a GroupedMatch,
    bowling: Option<&'a GroupedMatch>,
}

struct OverviewContext<'a> {
    team: &'a str,
    group_stage_slots: usize,
    columns: BandScale,
    first_inning: BandScale,
    second_inning: BandScale,
    stack_scale: LinearScale,
    ball_width: f64,
    range: RangeFilter,
    players: PlayerFilter<'a>,
    hover: Option<&'a HoverTarget>,
}

/// Binds a team's tournament to one column per fixture.
///
/// Balls the team faced and bowled share their match's column, placed by
/// displayed over and ball within the over. With a non-empty player
/// selection, balls whose striker and bowler are both unselected are
/// inactive. `ViewMode::OverSummary` draws stacked runs/wickets per over.
pub fn bind_tournament_overview(
    matches: &TeamMatches,
    team: &str,
    selection: &SelectionState,
    options: &TournamentOverviewOptions,
    dimmed_opacity: f64,
) -> VizResult<TournamentOverviewSeries> {
    let columns = BandScale::with_padding(
        MATCH_SLOTS,
        (COLUMNS_LEFT, COLUMNS_RIGHT),
        COLUMN_PADDING,
    )?;
    let first_inning = BandScale::new(OVER_COUNT as usize, FIRST_INNING_RANGE)?;
    let second_inning = BandScale::new(OVER_COUNT as usize, SECOND_INNING_RANGE)?;

    if !dimmed_opacity.is_finite() || !(0.0..=1.0).contains(&dimmed_opacity) {
        return Err(VizError::InvalidData(
            "dimmed opacity must be in [0, 1]".to_owned(),
        ));
    }
    let balls_per_over = matches
        .all_groups()
        .map(|group| longest_over(&group.balls))
        .max()
        .unwrap_or(0)
        .max(1);
    let ball_width = columns.bandwidth() / balls_per_over as f64;

    let tallest_summary = matches
        .all_groups()
        .flat_map(|group| over_totals(&group.balls).into_values())
        .map(|(runs, wickets)| runs + wickets)
        .max()
        .unwrap_or(0)
        .max(1);
    let stack_scale = LinearScale::new(
        (0.0, f64::from(tallest_summary)),
        (0.0, columns.bandwidth()),
    )?;

    let context = OverviewContext {
        team,
        group_stage_slots: options.group_stage_slots,
        columns,
        first_inning,
        second_inning,
        stack_scale,
        ball_width,
        range: selection.range_filter(),
        players: selection.player_filter(),
        hover: selection.hover(),
    };

    let plans = plan_columns(matches, options);

    #[cfg(feature = "parallel-overview")]
    let mut projected: Vec<MatchColumn> = plans
        .par_iter()
        .map(|plan| project_column(plan, &context))
        .collect();

    #[cfg(not(feature = "parallel-overview"))]
    let mut projected: Vec<MatchColumn> = plans
        .iter()
        .map(|plan| project_column(plan, &context))
        .collect();

    for fixture in &options.cancelled {
        let Some(x) = columns.band(fixture.slot) else {
            warn!(slot = fixture.slot, "cancelled fixture outside the match columns");
            continue;
        };
        projected.push(MatchColumn {
            slot: fixture.slot,
            key: None,
            opponent: fixture.opponent.clone(),
            date: NaiveDate::parse_from_str(&fixture.date_label, "%Y-%m-%d").ok(),
            date_label: fixture.date_label.clone(),
            stage: MatchStage::for_slot(fixture.slot, options.group_stage_slots),
            batted_first: None,
            won: true,
            x,
            width: columns.bandwidth(),
            cells: Vec::new(),
            summary: Vec::new(),
        });
    }
    projected.sort_by_key(|column| column.slot);

    debug!(
        team,
        columns = projected.len(),
        balls_per_over,
        tallest_summary,
        view_mode = ?selection.view_mode(),
        "bound tournament overview"
    );

    Ok(TournamentOverviewSeries {
        team: team.to_owned(),
        view_mode: selection.view_mode(),
        dimmed_opacity,
        ball_width,
        columns: projected,
        first_inning_ticks: over_ticks(first_inning),
        second_inning_ticks: over_ticks(second_inning),
    })
}

/// Batting groups take the free slots in order; a bowling group joins the
/// column with the same match key.
fn plan_columns<'a>(
    matches: &'a TeamMatches,
    options: &TournamentOverviewOptions,
) -> Vec<ColumnPlan<'a>> {
    let mut free_slots =
        (0..MATCH_SLOTS).filter(|slot| !options.cancelled.iter().any(|c| c.slot == *slot));
    let mut plans = Vec::with_capacity(matches.batting.len());
    for batting in &matches.batting {
        let Some(slot) = free_slots.next() else {
            warn!(key = %batting.key, "more matches than overview columns");
            break;
        };
        plans.push(ColumnPlan {
            slot,
            batting,
            bowling: matches.bowling_for(&batting.key),
        });
    }
    plans
}

fn project_column(plan: &ColumnPlan<'_>, context: &OverviewContext<'_>) -> MatchColumn {
    let x = context.columns.band(plan.slot).unwrap_or_default();
    let groups = std::iter::once(plan.batting).chain(plan.bowling);

    let mut cells = Vec::new();
    let mut summary = Vec::new();
    for group in groups {
        for ball in &group.balls {
            if let Some(cell) = project_ball(ball, x, context) {
                cells.push(cell);
            }
        }
        summary.extend(project_summary(&group.balls, x, context));
    }

    MatchColumn {
        slot: plan.slot,
        key: Some(plan.batting.key.clone()),
        opponent: plan.batting.opponent.clone(),
        date: plan.batting.date,
        date_label: plan.batting.date_label.clone(),
        stage: MatchStage::for_slot(plan.slot, context.group_stage_slots),
        batted_first: plan.batting.inning().map(|inning| inning == Inning::First),
        won: plan.batting.won_by(context.team),
        x,
        width: context.columns.bandwidth(),
        cells,
        summary,
    }
}

fn inning_scale(context: &OverviewContext<'_>, inning: Inning) -> BandScale {
    match inning {
        Inning::First => context.first_inning,
        Inning::Second => context.second_inning,
    }
}

fn project_ball(
    ball: &BallEvent,
    column_x: f64,
    context: &OverviewContext<'_>,
) -> Option<BallCell> {
    let slot = over_slot(ball, OVER_COUNT, "tournament_overview")?;
    let scale = inning_scale(context, ball.inning);
    let y = scale.band(slot)?;
    let category = classify(ball);
    let within_over = ball.ball_within_over.saturating_sub(1);

    Some(BallCell {
        key: ball.key(),
        striker: ball.striker.clone(),
        bowler: ball.bowler.clone(),
        category,
        color: color_for(category),
        x: column_x + f64::from(within_over) * context.ball_width,
        y,
        width: context.ball_width,
        height: scale.bandwidth(),
        active: context.players.admits_ball(ball) && context.range.contains_ball(ball),
        highlighted: matches!(
            context.hover,
            Some(HoverTarget::Player(name)) if ball.involves(name)
        ),
    })
}

/// Runs and wickets stacked left to right per displayed over. Second-inning
/// stacks mirror the first-inning axis about the canvas' horizontal center.
fn project_summary(
    balls: &[BallEvent],
    column_x: f64,
    context: &OverviewContext<'_>,
) -> Vec<SummaryBlock> {
    let Some(inning) = balls.first().map(|ball| ball.inning) else {
        return Vec::new();
    };
    let height = context.first_inning.bandwidth();
    let runs_color = team_color(context.team);
    let mut blocks = Vec::new();

    for (display_over, (runs, wickets)) in over_totals(balls) {
        if display_over == 0 || display_over > OVER_COUNT {
            continue;
        }
        let Some(axis_y) = context.first_inning.band(display_over as usize - 1) else {
            continue;
        };
        let y = match inning {
            Inning::First => axis_y,
            Inning::Second => CANVAS_HEIGHT - axis_y - height,
        };
        let runs_width = context.stack_scale.map(f64::from(runs));
        for (layer, value, offset, width, color) in [
            (SummaryLayer::Runs, runs, 0.0, runs_width, runs_color),
            (
                SummaryLayer::Wickets,
                wickets,
                runs_width,
                context.stack_scale.map(f64::from(wickets)),
                WICKET_COLOR,
            ),
        ] {
            if value == 0 {
                continue;
            }
            blocks.push(SummaryBlock {
                inning,
                display_over,
                x: column_x + offset,
                width,
                block: StackedBlock {
                    layer,
                    value,
                    y,
                    height,
                    color,
                },
            });
        }
    }
    blocks
}

/// Most balls bowled in any single over (`floor(ovr)` bucket).
fn longest_over(balls: &[BallEvent]) -> usize {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for ball in balls {
        *counts.entry(ball.over_index()).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// `(runs_batter, counted wickets)` per displayed over.
fn over_totals(balls: &[BallEvent]) -> BTreeMap<u32, (u32, u32)> {
    let mut totals: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for ball in balls {
        let entry = totals.entry(ball.display_over()).or_default();
        entry.0 = entry.0.saturating_add(ball.runs_batter);
        if ball.is_counted_wicket() {
            entry.1 = entry.1.saturating_add(1);
        }
    }
    totals
}

impl TournamentOverviewSeries {
    #[must_use]
    pub fn column(&self, slot: usize) -> Option<&MatchColumn> {
        self.columns.iter().find(|column| column.slot == slot)
    }

    pub fn cells(&self) -> impl Iterator<Item = &BallCell> {
        self.columns.iter().flat_map(|column| column.cells.iter())
    }
}

impl ChartSeries for TournamentOverviewSeries {
    fn viewport(&self) -> Viewport {
        Viewport::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn to_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport())
            .with_rect(
                RectPrimitive::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, WHITE)
                    .with_stroke(BLACK, 1.0),
            )
            .with_text(TextPrimitive::new(
                "Inning 1",
                45.0,
                30.0,
                10.0,
                BLACK,
                TextHAlign::Right,
            ))
            .with_text(TextPrimitive::new(
                "Inning 2",
                45.0,
                820.0,
                10.0,
                BLACK,
                TextHAlign::Right,
            ));

        for column in &self.columns {
            let center = column.x + column.width / 2.0;
            frame = frame
                .with_rect(
                    RectPrimitive::new(
                        column.x,
                        BACKGROUND_TOP,
                        column.width,
                        BACKGROUND_HEIGHT,
                        column.background(),
                    )
                    .with_opacity(BACKGROUND_OPACITY),
                )
                .with_text(TextPrimitive::new(
                    column.stage.label(),
                    center,
                    390.0,
                    12.0,
                    BLACK,
                    TextHAlign::Center,
                ));
            if !column.opponent.is_empty() {
                frame = frame.with_text(
                    TextPrimitive::new(
                        column.opponent.clone(),
                        center,
                        35.0,
                        11.0,
                        BLACK,
                        TextHAlign::Center,
                    )
                    .bold(),
                );
            }
            if !column.date_label.is_empty() {
                frame = frame.with_text(TextPrimitive::new(
                    column.date_label.clone(),
                    center,
                    420.0,
                    12.0,
                    BLACK,
                    TextHAlign::Center,
                ));
            }
            let batting_label = TextPrimitive::new(
                column.batting_label(),
                center,
                450.0,
                12.0,
                if column.is_cancelled() { CANCELLED_COLOR } else { BLACK },
                TextHAlign::Center,
            );
            frame = frame.with_text(if column.is_cancelled() {
                batting_label.bold()
            } else {
                batting_label
            });

            match self.view_mode {
                ViewMode::OverSummary => {
                    for block in &column.summary {
                        frame = frame.with_rect(RectPrimitive::new(
                            block.x,
                            block.block.y,
                            block.width,
                            block.block.height,
                            block.block.color,
                        ));
                    }
                }
                _ => {
                    for cell in &column.cells {
                        let (stroke, stroke_width) = if cell.highlighted {
                            (HIGHLIGHT_STROKE, 3.0)
                        } else {
                            (WHITE, 1.0)
                        };
                        frame = frame.with_rect(
                            RectPrimitive::new(cell.x, cell.y, cell.width, cell.height, cell.color)
                                .with_stroke(stroke, stroke_width)
                                .with_opacity(cell.emphasis().opacity(self.dimmed_opacity)),
                        );
                    }
                }
            }
        }

        for divider in [FIRST_INNING_RANGE.0, SECOND_INNING_RANGE.0] {
            frame = frame.with_line(LinePrimitive::new(
                COLUMNS_LEFT,
                divider,
                COLUMNS_RIGHT,
                divider,
                1.0,
                BLACK,
            ));
        }
        for tick in self.first_inning_ticks.iter().chain(&self.second_inning_ticks) {
            frame = frame
                .with_line(LinePrimitive::new(
                    COLUMNS_LEFT - 6.0,
                    tick.position,
                    COLUMNS_LEFT,
                    tick.position,
                    1.0,
                    BLACK,
                ))
                .with_text(TextPrimitive::new(
                    tick.label.clone(),
                    COLUMNS_LEFT - 8.0,
                    tick.position + 3.0,
                    10.0,
                    BLACK,
                    TextHAlign::Right,
                ));
        }
        frame
    }
}
