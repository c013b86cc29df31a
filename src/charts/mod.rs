//! Chart data binders.
//!
//! Each binder is a pure function of already-fetched data, the shared
//! [`SelectionState`](crate::interaction::SelectionState) and a layout. It
//! returns a typed series describing what to draw; `ChartSeries` lowers that
//! series into a backend-agnostic [`RenderFrame`].

pub mod layout;
pub mod over_skyline;
pub mod over_summary;
pub mod partnership_bars;
pub mod partnership_matrix;
pub mod score_timeline;
pub mod tournament_overview;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BallEvent, BandScale, Inning, Viewport};
use crate::error::{VizError, VizResult};
use crate::render::{Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

pub use layout::ChartLayout;
pub use over_skyline::{OverSkylineSeries, SkylineSegment, bind_over_skyline};
pub use over_summary::{
    OverSummaryBar, OverSummarySeries, StackedBlock, SummaryLayer, bind_over_summary,
};
pub use partnership_bars::{PartnershipBarRow, PartnershipBarsSeries, bind_partnership_bars};
pub use partnership_matrix::{
    MATRIX_PALETTE, MatrixCell, MatrixCellKind, PartnershipMatrixSeries, bind_partnership_matrix,
};
pub use score_timeline::{
    ScoreTimelineSeries, TimelineLegendEntry, TimelinePoint, TimelineSegment, TimelineSeries,
    WicketMarker, bind_score_timeline,
};
pub use tournament_overview::{
    BallCell, CancelledFixture, MatchColumn, MatchStage, SummaryBlock, TournamentOverviewOptions,
    TournamentOverviewSeries, bind_tournament_overview,
};

pub(crate) const BLACK: Color = Color::rgb8(0x00, 0x00, 0x00);
pub(crate) const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);

/// Labelled position along a chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    pub position: f64,
}

/// Any bound chart that can be lowered to draw commands.
pub trait ChartSeries {
    fn viewport(&self) -> Viewport;

    fn to_render_frame(&self) -> RenderFrame;
}

/// Lowers `series` and hands the frame to `renderer`.
pub fn render_series<S, R>(series: &S, renderer: &mut R) -> VizResult<()>
where
    S: ChartSeries + ?Sized,
    R: Renderer + ?Sized,
{
    let frame = series.to_render_frame();
    frame.validate()?;
    renderer.render(&frame)
}

/// Inning shared by every ball, or `None` for an empty slice.
pub(crate) fn single_inning(balls: &[BallEvent]) -> VizResult<Option<Inning>> {
    let Some(first) = balls.first() else {
        return Ok(None);
    };
    match balls.iter().find(|ball| ball.inning != first.inning) {
        Some(other) => Err(VizError::MixedInnings {
            first: first.inning.number(),
            found: other.inning.number(),
        }),
        None => Ok(Some(first.inning)),
    }
}

/// Zero-based band slot of a displayed over, or `None` (logged) when the
/// over falls outside the chart.
pub(crate) fn over_slot(ball: &BallEvent, over_count: u32, chart: &'static str) -> Option<usize> {
    let over = ball.display_over();
    if over == 0 || over > over_count {
        warn!(
            chart,
            ovr = ball.ovr,
            over_count,
            "skipping ball outside the over axis"
        );
        return None;
    }
    Some(over as usize - 1)
}

/// Ticks every five overs along a band axis.
pub(crate) fn over_ticks(band: BandScale) -> Vec<AxisTick> {
    (5..=band.count())
        .step_by(5)
        .filter_map(|over| {
            band.center(over - 1).map(|position| AxisTick {
                label: over.to_string(),
                position,
            })
        })
        .collect()
}

/// Axis baseline plus tick marks and bold labels below it.
pub(crate) fn push_bottom_axis(
    mut frame: RenderFrame,
    ticks: &[AxisTick],
    x_range: (f64, f64),
    baseline: f64,
    font_size_px: f64,
) -> RenderFrame {
    frame = frame.with_line(LinePrimitive::new(
        x_range.0, baseline, x_range.1, baseline, 1.0, BLACK,
    ));
    for tick in ticks {
        frame = frame
            .with_line(LinePrimitive::new(
                tick.position,
                baseline,
                tick.position,
                baseline + 6.0,
                1.0,
                BLACK,
            ))
            .with_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    tick.position,
                    baseline + 6.0 + font_size_px,
                    font_size_px,
                    BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
    }
    frame
}
