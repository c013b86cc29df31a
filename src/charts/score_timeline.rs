use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{AxisTick, BLACK, ChartLayout, ChartSeries, WHITE};
use crate::core::{
    BallEvent, BallKey, Inning, LinearScale, Viewport, ball_color, display_team_name,
    over_score_progression, team_color,
};
use crate::error::VizResult;
use crate::interaction::{
    Emphasis, EmphasisInput, HoverTarget, SelectionState, resolve_emphases,
};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const MARGIN: f64 = 20.0;
const PLOT_INSET: f64 = 20.0;
const OVER_AXIS_LEFT: f64 = 40.0;
const OVER_AXIS_RIGHT: f64 = 150.0;
const LINE_WIDTH: f64 = 2.0;
const WICKET_RADIUS: f64 = 3.0;
const WICKET_STACK_STEP: f64 = 7.0;
const LEGEND_LEFT: f64 = 160.0;
const LEGEND_ROW: f64 = 30.0;
const LEGEND_RADIUS: f64 = 8.0;
const LEGEND_FONT: f64 = 18.0;
const MAX_SCORE_TICKS: u32 = 10;

/// Highest cumulative score reached in one displayed over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub over: u32,
    pub max_score: u32,
    pub x: f64,
    pub y: f64,
}

/// Line between two consecutive points of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub from_over: u32,
    pub to_over: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WicketMarker {
    pub key: BallKey,
    pub display_over: u32,
    pub who_out: Option<String>,
    pub color: Color,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub emphasis: Emphasis,
}

/// One team's innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    pub inning: Inning,
    pub team: String,
    pub color: Color,
    pub points: Vec<TimelinePoint>,
    pub segments: Vec<TimelineSegment>,
    pub wickets: Vec<WicketMarker>,
    /// Dimmed when another team is hovered in the legend.
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLegendEntry {
    pub team: String,
    pub label: String,
    pub color: Color,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTimelineSeries {
    pub layout: ChartLayout,
    pub max_score: u32,
    pub series: Vec<TimelineSeries>,
    pub legend: Vec<TimelineLegendEntry>,
    pub over_ticks: Vec<AxisTick>,
    pub score_ticks: Vec<AxisTick>,
}

/// Binds a match's balls (either or both innings) to the running-score chart.
///
/// Series are keyed by inning and batting team in first-appearance order.
/// Wicket markers stack away from the line: upward for the first inning,
/// downward for the second.
pub fn bind_score_timeline(
    balls: &[BallEvent],
    selection: &SelectionState,
    layout: &ChartLayout,
) -> VizResult<ScoreTimelineSeries> {
    layout.validate()?;
    let margin = layout.units(MARGIN);
    let width = layout.width_px();
    let height = layout.height_px;

    let max_score = balls.iter().map(|ball| ball.cumul_runs).max().unwrap_or(0);
    let run_scale = LinearScale::new(
        (0.0, f64::from(max_score.max(1))),
        (
            height - margin - layout.units(PLOT_INSET),
            margin + layout.units(PLOT_INSET),
        ),
    )?;
    // A single-over axis still needs a non-empty domain.
    let over_scale = LinearScale::new(
        (1.0, f64::from(layout.over_count.max(2))),
        (
            margin + layout.units(OVER_AXIS_LEFT),
            width - margin - layout.units(OVER_AXIS_RIGHT),
        ),
    )?;

    let mut grouped: IndexMap<(Inning, &str), Vec<BallEvent>> = IndexMap::new();
    for ball in balls {
        grouped
            .entry((ball.inning, ball.batting_team.as_str()))
            .or_default()
            .push(ball.clone());
    }

    let filter = selection.range_filter();
    let hover = selection.hover();
    let mut series = Vec::with_capacity(grouped.len());
    let mut marker_inputs = Vec::new();
    for ((inning, team), team_balls) in &grouped {
        let progression = over_score_progression(team_balls);
        let points: Vec<TimelinePoint> = progression
            .iter()
            .map(|progress| TimelinePoint {
                over: progress.over,
                max_score: progress.max_score,
                x: over_scale.map(f64::from(progress.over)),
                y: run_scale.map(f64::from(progress.max_score)),
            })
            .collect();

        let segments = points
            .windows(2)
            .map(|pair| TimelineSegment {
                from_over: pair[0].over,
                to_over: pair[1].over,
                x1: pair[0].x,
                y1: pair[0].y,
                x2: pair[1].x,
                y2: pair[1].y,
                emphasis: range_emphasis(filter.contains_span(pair[0].over, pair[1].over)),
            })
            .collect();

        let direction = match inning {
            Inning::First => -1.0,
            Inning::Second => 1.0,
        };
        let wickets = progression
            .iter()
            .zip(&points)
            .flat_map(|(progress, point)| {
                progress
                    .wickets
                    .iter()
                    .enumerate()
                    .map(move |(stack, ball)| WicketMarker {
                        key: ball.key(),
                        display_over: ball.display_over(),
                        who_out: ball.who_out.clone(),
                        color: ball_color(ball),
                        cx: point.x,
                        cy: point.y + direction * stack as f64 * layout.units(WICKET_STACK_STEP),
                        radius: layout.units(WICKET_RADIUS),
                        emphasis: Emphasis::Full,
                    })
            })
            .collect();
        for ball in progression.iter().flat_map(|progress| &progress.wickets) {
            marker_inputs.push(EmphasisInput {
                in_range: filter.contains_ball(ball),
                hovered: hover.is_some_and(|target| marker_hovered(target, ball)),
            });
        }

        series.push(TimelineSeries {
            inning: *inning,
            team: (*team).to_owned(),
            color: team_color(team),
            points,
            segments,
            wickets,
            emphasis: Emphasis::Full,
        });
    }

    let team_inputs: Vec<EmphasisInput> = series
        .iter()
        .map(|entry| EmphasisInput {
            in_range: true,
            hovered: hover.is_some_and(|target| target.matches_team(&entry.team)),
        })
        .collect();
    for (entry, emphasis) in series.iter_mut().zip(resolve_emphases(&team_inputs)) {
        entry.emphasis = emphasis;
    }

    let mut marker_emphases = resolve_emphases(&marker_inputs).into_iter();
    for marker in series.iter_mut().flat_map(|entry| entry.wickets.iter_mut()) {
        marker.emphasis = marker_emphases.next().unwrap_or(Emphasis::Dimmed);
    }

    let legend = legend_entries(&series, layout);
    debug!(
        balls = balls.len(),
        series = series.len(),
        max_score,
        min = filter.range().min(),
        max = filter.range().max(),
        "bound score timeline"
    );

    Ok(ScoreTimelineSeries {
        layout: *layout,
        max_score,
        legend,
        over_ticks: over_axis_ticks(over_scale, layout.over_count),
        score_ticks: score_axis_ticks(run_scale, max_score),
        series,
    })
}

fn range_emphasis(in_range: bool) -> Emphasis {
    if in_range {
        Emphasis::Full
    } else {
        Emphasis::Dimmed
    }
}

/// Team hover fades whole series instead of single markers.
fn marker_hovered(target: &HoverTarget, ball: &BallEvent) -> bool {
    !matches!(target, HoverTarget::Team(_)) && target.matches_ball(ball)
}

fn legend_entries(series: &[TimelineSeries], layout: &ChartLayout) -> Vec<TimelineLegendEntry> {
    let mut teams: Vec<&TimelineSeries> = Vec::new();
    for entry in series {
        if !teams.iter().any(|seen| seen.team == entry.team) {
            teams.push(entry);
        }
    }
    teams
        .into_iter()
        .enumerate()
        .map(|(row, entry)| TimelineLegendEntry {
            team: entry.team.clone(),
            label: display_team_name(&entry.team).to_owned(),
            color: entry.color,
            x: layout.width_px() - layout.units(LEGEND_LEFT),
            y: layout.units(MARGIN) + row as f64 * layout.units(LEGEND_ROW),
        })
        .collect()
}

fn over_axis_ticks(scale: LinearScale, over_count: u32) -> Vec<AxisTick> {
    (5..=over_count)
        .step_by(5)
        .map(|over| AxisTick {
            label: over.to_string(),
            position: scale.map(f64::from(over)),
        })
        .collect()
}

fn score_axis_ticks(scale: LinearScale, max_score: u32) -> Vec<AxisTick> {
    let step = [10, 20, 25, 50, 100, 200, 250, 500]
        .into_iter()
        .find(|step| max_score / step <= MAX_SCORE_TICKS)
        .unwrap_or(1000);
    (0..=max_score)
        .step_by(step as usize)
        .map(|score| AxisTick {
            label: score.to_string(),
            position: scale.map(f64::from(score)),
        })
        .collect()
}

impl ScoreTimelineSeries {
    #[must_use]
    pub fn series_for(&self, inning: Inning) -> impl Iterator<Item = &TimelineSeries> {
        self.series.iter().filter(move |entry| entry.inning == inning)
    }
}

impl ChartSeries for ScoreTimelineSeries {
    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    fn to_render_frame(&self) -> RenderFrame {
        let layout = self.layout;
        let viewport = self.viewport();
        let margin = layout.units(MARGIN);
        let faded = layout.faded_opacity;
        let font = layout.font_size_px;

        let mut frame = RenderFrame::new(viewport).with_rect(
            RectPrimitive::new(0.0, 0.0, viewport.width, viewport.height, WHITE)
                .with_stroke(BLACK, 1.0),
        );

        let x_axis = viewport.height - (margin + 10.0);
        let y_axis = margin + 20.0;
        frame = frame
            .with_line(LinePrimitive::new(
                layout.units(MARGIN + OVER_AXIS_LEFT),
                x_axis,
                viewport.width - layout.units(MARGIN + OVER_AXIS_RIGHT),
                x_axis,
                1.0,
                BLACK,
            ))
            .with_line(LinePrimitive::new(
                y_axis,
                margin + layout.units(PLOT_INSET),
                y_axis,
                viewport.height - margin - layout.units(PLOT_INSET),
                1.0,
                BLACK,
            ));
        for tick in &self.over_ticks {
            frame = frame.with_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    tick.position,
                    x_axis + 6.0 + font,
                    font,
                    BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }
        for tick in &self.score_ticks {
            frame = frame.with_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    y_axis - 6.0,
                    tick.position + font * 0.35,
                    font,
                    BLACK,
                    TextHAlign::Right,
                )
                .bold(),
            );
        }

        for entry in &self.series {
            let series_opacity = entry.emphasis.opacity(faded);
            for segment in &entry.segments {
                frame = frame.with_line(
                    LinePrimitive::new(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        LINE_WIDTH,
                        entry.color,
                    )
                    .with_opacity(series_opacity * segment.emphasis.opacity(faded)),
                );
            }
            for marker in &entry.wickets {
                frame = frame.with_circle(
                    CirclePrimitive::new(marker.cx, marker.cy, marker.radius, marker.color)
                        .with_opacity(series_opacity * marker.emphasis.opacity(faded)),
                );
            }
        }

        for entry in &self.legend {
            frame = frame
                .with_circle(CirclePrimitive::new(
                    entry.x + layout.units(25.0),
                    entry.y + layout.units(12.0),
                    layout.units(LEGEND_RADIUS),
                    entry.color,
                ))
                .with_text(TextPrimitive::new(
                    entry.label.clone(),
                    entry.x + layout.units(40.0),
                    entry.y + layout.units(16.0),
                    layout.units(LEGEND_FONT),
                    BLACK,
                    TextHAlign::Left,
                ));
        }

        frame
            .with_text(TextPrimitive::new(
                "Score",
                layout.units(15.0),
                layout.units(25.0),
                font,
                BLACK,
                TextHAlign::Left,
            ))
            .with_text(TextPrimitive::new(
                "Over",
                viewport.width - layout.units(85.0),
                viewport.height - layout.units(10.0),
                font,
                BLACK,
                TextHAlign::Right,
            ))
    }
}
