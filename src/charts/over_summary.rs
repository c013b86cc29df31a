use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::charts::{
    AxisTick, BLACK, ChartLayout, ChartSeries, WHITE, over_ticks, push_bottom_axis,
    single_inning,
};
use crate::core::category::{FALLBACK_TEAM_COLOR, WICKET_COLOR};
use crate::core::{BallEvent, BandScale, Inning, Viewport, compute_over_summaries, team_color};
use crate::error::VizResult;
use crate::interaction::{Emphasis, EmphasisInput, SelectionState, resolve_emphases};
use crate::render::{Color, RectPrimitive, RenderFrame};

const STACK_UNIT: f64 = 12.0;
const MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryLayer {
    Runs,
    Wickets,
}

/// One layer of a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedBlock {
    pub layer: SummaryLayer,
    pub value: u32,
    pub y: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverSummaryBar {
    pub display_over: u32,
    pub runs: u32,
    pub wickets: u32,
    pub x: f64,
    pub width: f64,
    /// Runs first, wickets stacked on top; zero layers are omitted.
    pub blocks: SmallVec<[StackedBlock; 2]>,
    pub emphasis: Emphasis,
    pub tooltip: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverSummarySeries {
    pub layout: ChartLayout,
    pub inning: Option<Inning>,
    pub batting_team: Option<String>,
    pub bars: Vec<OverSummaryBar>,
    pub ticks: Vec<AxisTick>,
}

/// Binds one inning's balls to the stacked runs/wickets chart.
///
/// Runs take the batting team's color and wickets the wicket color; both
/// grow by the same unit per run or wicket.
pub fn bind_over_summary(
    balls: &[BallEvent],
    selection: &SelectionState,
    layout: &ChartLayout,
) -> VizResult<OverSummarySeries> {
    layout.validate()?;
    let inning = single_inning(balls)?;
    let batting_team = balls.first().map(|ball| ball.batting_team.clone());
    let runs_color = batting_team
        .as_deref()
        .map_or(FALLBACK_TEAM_COLOR, team_color);

    let margin = layout.units(MARGIN);
    let unit = layout.units(STACK_UNIT);
    let baseline = layout.height_px - margin;
    let band = BandScale::new(layout.over_count as usize, (margin, layout.width_px() - margin))?;

    let filter = selection.range_filter();
    let hover = selection.hover();
    let mut bars = Vec::new();
    let mut inputs = Vec::new();

    for summary in compute_over_summaries(balls) {
        let display_over = summary.display_over();
        let Some(x) = band.band(summary.over_index as usize) else {
            warn!(display_over, "skipping over outside the over axis");
            continue;
        };

        let mut blocks = SmallVec::new();
        let runs_top = baseline - unit * f64::from(summary.runs);
        if summary.runs > 0 {
            blocks.push(StackedBlock {
                layer: SummaryLayer::Runs,
                value: summary.runs,
                y: runs_top,
                height: baseline - runs_top,
                color: runs_color,
            });
        }
        if summary.wickets > 0 {
            let height = unit * f64::from(summary.wickets);
            blocks.push(StackedBlock {
                layer: SummaryLayer::Wickets,
                value: summary.wickets,
                y: runs_top - height,
                height,
                color: WICKET_COLOR,
            });
        }

        inputs.push(EmphasisInput {
            in_range: filter.contains_over(display_over),
            hovered: hover.is_some_and(|target| target.matches_over(display_over)),
        });
        bars.push(OverSummaryBar {
            display_over,
            runs: summary.runs,
            wickets: summary.wickets,
            x,
            width: band.bandwidth(),
            blocks,
            emphasis: Emphasis::Full,
            tooltip: summary.describe(),
        });
    }

    for (bar, emphasis) in bars.iter_mut().zip(resolve_emphases(&inputs)) {
        bar.emphasis = emphasis;
    }

    debug!(
        inning = inning.map(Inning::number),
        overs = bars.len(),
        min = filter.range().min(),
        max = filter.range().max(),
        "bound over summary"
    );

    Ok(OverSummarySeries {
        layout: *layout,
        inning,
        batting_team,
        bars,
        ticks: over_ticks(band),
    })
}

impl OverSummarySeries {
    #[must_use]
    pub fn bar(&self, display_over: u32) -> Option<&OverSummaryBar> {
        self.bars.iter().find(|bar| bar.display_over == display_over)
    }
}

impl ChartSeries for OverSummarySeries {
    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    fn to_render_frame(&self) -> RenderFrame {
        let viewport = self.viewport();
        let margin = self.layout.units(MARGIN);

        let mut frame = RenderFrame::new(viewport).with_rect(
            RectPrimitive::new(0.0, 0.0, viewport.width, viewport.height, WHITE)
                .with_stroke(BLACK, 1.0),
        );
        for bar in &self.bars {
            let opacity = bar.emphasis.opacity(self.layout.dimmed_opacity);
            for block in &bar.blocks {
                frame = frame.with_rect(
                    RectPrimitive::new(bar.x, block.y, bar.width, block.height, block.color)
                        .with_opacity(opacity),
                );
            }
        }
        push_bottom_axis(
            frame,
            &self.ticks,
            (margin, viewport.width - margin),
            viewport.height - margin,
            self.layout.font_size_px,
        )
    }
}
