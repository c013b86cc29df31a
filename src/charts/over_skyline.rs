use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{
    AxisTick, BLACK, ChartLayout, ChartSeries, WHITE, over_slot, over_ticks, push_bottom_axis,
    single_inning,
};
use crate::core::{
    BallCategory, BallDescription, BallEvent, BallKey, BandScale, Inning, Viewport, classify,
    color_for,
};
use crate::error::VizResult;
use crate::interaction::{Emphasis, EmphasisInput, SelectionState, resolve_emphases};
use crate::render::{Color, RectPrimitive, RenderFrame};

const SEGMENT_UNIT: f64 = 12.0;
const BALL_BUFFER: f64 = 2.0;
const MARGIN: f64 = 20.0;
const CORNER_RADIUS: f64 = 4.0;
const SEGMENT_STROKE: Color = Color::rgb8(0xCC, 0xCC, 0xCC);

/// One ball drawn as a block of its over's column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkylineSegment {
    pub key: BallKey,
    pub display_over: u32,
    pub category: BallCategory,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub emphasis: Emphasis,
    pub description: BallDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverSkylineSeries {
    pub layout: ChartLayout,
    pub inning: Option<Inning>,
    pub segments: Vec<SkylineSegment>,
    pub ticks: Vec<AxisTick>,
    pub skipped: usize,
}

/// Binds one inning's balls to the over skyline.
///
/// Each over is a column of segments stacked bottom-up in ball order. A
/// segment's height grows with `max(1, runs_w_extras)`.
pub fn bind_over_skyline(
    balls: &[BallEvent],
    selection: &SelectionState,
    layout: &ChartLayout,
) -> VizResult<OverSkylineSeries> {
    layout.validate()?;
    let inning = single_inning(balls)?;

    let margin = layout.units(MARGIN);
    let buffer = layout.units(BALL_BUFFER);
    let width = layout.width_px();
    let band = BandScale::new(layout.over_count as usize, (margin, width - margin))?;
    let mut bottoms = vec![layout.height_px - margin - buffer; layout.over_count as usize];

    let filter = selection.range_filter();
    let hover = selection.hover();
    let mut placed = Vec::with_capacity(balls.len());
    let mut inputs = Vec::with_capacity(balls.len());
    let mut skipped = 0;

    for ball in balls {
        let Some(slot) = over_slot(ball, layout.over_count, "over_skyline") else {
            skipped += 1;
            continue;
        };
        let Some(x) = band.band(slot) else {
            skipped += 1;
            continue;
        };
        let height = layout.units(SEGMENT_UNIT * f64::from(ball.runs_w_extras.max(1)));
        let y = bottoms[slot] - height + buffer;
        bottoms[slot] -= height + buffer;

        let category = classify(ball);
        inputs.push(EmphasisInput {
            in_range: filter.contains_ball(ball),
            hovered: hover.is_some_and(|target| target.matches_ball(ball)),
        });
        placed.push(SkylineSegment {
            key: ball.key(),
            display_over: ball.display_over(),
            category,
            color: color_for(category),
            x,
            y,
            width: band.bandwidth(),
            height,
            emphasis: Emphasis::Full,
            description: ball.describe(),
        });
    }

    for (segment, emphasis) in placed.iter_mut().zip(resolve_emphases(&inputs)) {
        segment.emphasis = emphasis;
    }

    debug!(
        inning = inning.map(Inning::number),
        balls = balls.len(),
        segments = placed.len(),
        skipped,
        min = filter.range().min(),
        max = filter.range().max(),
        "bound over skyline"
    );

    Ok(OverSkylineSeries {
        layout: *layout,
        inning,
        segments: placed,
        ticks: over_ticks(band),
        skipped,
    })
}

impl OverSkylineSeries {
    /// Stacked height of one displayed over, buffers included.
    #[must_use]
    pub fn column_height(&self, display_over: u32) -> f64 {
        let buffer = self.layout.units(BALL_BUFFER);
        self.segments
            .iter()
            .filter(|segment| segment.display_over == display_over)
            .map(|segment| segment.height + buffer)
            .sum()
    }
}

impl ChartSeries for OverSkylineSeries {
    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    fn to_render_frame(&self) -> RenderFrame {
        let viewport = self.viewport();
        let margin = self.layout.units(MARGIN);
        let radius = self.layout.units(CORNER_RADIUS);

        let mut frame = RenderFrame::new(viewport).with_rect(
            RectPrimitive::new(0.0, 0.0, viewport.width, viewport.height, WHITE)
                .with_stroke(BLACK, 1.0),
        );
        for segment in &self.segments {
            frame = frame.with_rect(
                RectPrimitive::new(
                    segment.x,
                    segment.y,
                    segment.width,
                    segment.height,
                    segment.color,
                )
                .with_stroke(SEGMENT_STROKE, 1.0)
                .with_corner_radius(radius)
                .with_opacity(segment.emphasis.opacity(self.layout.dimmed_opacity)),
            );
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
