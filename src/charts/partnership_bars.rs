use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{BLACK, ChartLayout, ChartSeries, WHITE};
use crate::core::{
    BallEvent, LinearScale, Partnership, Viewport, abbreviate_name, team_color,
    team_secondary_color,
};
use crate::error::VizResult;
use crate::interaction::{Emphasis, EmphasisInput, SelectionState, resolve_emphases};
use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

const MARGIN: f64 = 7.0;
/// Space reserved beside each bar for the batsman label.
const LABEL_GUTTER: f64 = 181.25;
const SCORE_FONT_PX: f64 = 13.0;

/// One partnership split around the chart's center line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipBarRow {
    pub position: u32,
    pub partnership: Partnership,
    pub top: f64,
    pub row_height: f64,
    /// `(x, width)` of the first batsman's bar, growing leftward.
    pub left_bar: (f64, f64),
    /// `(x, width)` of the second batsman's bar, growing rightward.
    pub right_bar: (f64, f64),
    pub bar_y: f64,
    pub bar_height: f64,
    pub left_color: Color,
    pub right_color: Color,
    pub left_label: String,
    pub right_label: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipBarsSeries {
    pub layout: ChartLayout,
    pub max_contribution: u32,
    pub rows: Vec<PartnershipBarRow>,
}

/// Binds an inning's partnerships to mirrored horizontal bars, one row per
/// wicket position.
pub fn bind_partnership_bars(
    partnerships: &[Partnership],
    balls: &[BallEvent],
    selection: &SelectionState,
    layout: &ChartLayout,
) -> VizResult<PartnershipBarsSeries> {
    layout.validate()?;
    let width = layout.width_px();
    let margin = layout.units(MARGIN);
    let center = width / 2.0;
    let gutter = layout.units(LABEL_GUTTER);

    let mut ordered = partnerships.to_vec();
    ordered.sort_by_key(|partnership| partnership.position);

    let max_contribution = ordered
        .iter()
        .flat_map(|p| [p.batsman_1_score, p.batsman_2_score])
        .max()
        .unwrap_or(0);
    let domain_max = f64::from(max_contribution.max(1));
    let left_scale = LinearScale::new((domain_max, 0.0), (margin + gutter, center))?;
    let right_scale = LinearScale::new((0.0, domain_max), (center, width - margin - gutter))?;

    let row_height = if ordered.is_empty() {
        0.0
    } else {
        (layout.height_px - 2.0 * margin) / ordered.len() as f64
    };
    let bar_height = row_height / 2.0;

    let active = selection.range_filter().active_batsmen(balls);
    let hover = selection.hover();
    let inputs: Vec<EmphasisInput> = ordered
        .iter()
        .map(|partnership| EmphasisInput {
            in_range: active.admits(partnership),
            hovered: hover.is_some_and(|target| target.matches_partnership(partnership)),
        })
        .collect();

    let rows: Vec<PartnershipBarRow> = ordered
        .into_iter()
        .zip(resolve_emphases(&inputs))
        .enumerate()
        .map(|(row, (partnership, emphasis))| {
            let left_x = left_scale.map(f64::from(partnership.batsman_1_score));
            let right_end = right_scale.map(f64::from(partnership.batsman_2_score));
            PartnershipBarRow {
                position: partnership.position,
                top: margin + row as f64 * row_height,
                row_height,
                left_bar: (left_x.min(center), (center - left_x).max(0.0)),
                right_bar: (center, (right_end - center).max(0.0)),
                bar_y: margin + row as f64 * row_height + bar_height,
                bar_height,
                left_color: team_color(&partnership.team),
                right_color: team_secondary_color(&partnership.team),
                left_label: format!(
                    "{} ({})",
                    abbreviate_name(&partnership.batsman_1),
                    partnership.batsman_1_score
                ),
                right_label: format!(
                    "({}) {}",
                    partnership.batsman_2_score,
                    abbreviate_name(&partnership.batsman_2)
                ),
                emphasis,
                partnership,
            }
        })
        .collect();

    debug!(
        partnerships = rows.len(),
        max_contribution,
        active_batsmen = active.len(),
        "bound partnership bars"
    );

    Ok(PartnershipBarsSeries {
        layout: *layout,
        max_contribution,
        rows,
    })
}

impl ChartSeries for PartnershipBarsSeries {
    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    fn to_render_frame(&self) -> RenderFrame {
        let viewport = self.viewport();
        let margin = self.layout.units(MARGIN);
        let center = viewport.width / 2.0;
        let font = self.layout.font_size_px;

        let mut frame = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
            WHITE,
        ));
        for row in &self.rows {
            let opacity = row.emphasis.opacity(self.layout.dimmed_opacity);
            frame = frame
                .with_rect(
                    RectPrimitive::new(
                        row.left_bar.0,
                        row.bar_y,
                        row.left_bar.1,
                        row.bar_height,
                        row.left_color,
                    )
                    .with_opacity(opacity),
                )
                .with_rect(
                    RectPrimitive::new(
                        row.right_bar.0,
                        row.bar_y,
                        row.right_bar.1,
                        row.bar_height,
                        row.right_color,
                    )
                    .with_opacity(opacity),
                )
                .with_text(TextPrimitive::new(
                    row.partnership.score.to_string(),
                    center,
                    row.top + row.row_height / 4.0 + 5.0,
                    SCORE_FONT_PX,
                    BLACK,
                    TextHAlign::Center,
                ))
                .with_text(
                    TextPrimitive::new(
                        row.left_label.clone(),
                        margin,
                        row.top + margin + row.bar_height,
                        font,
                        BLACK,
                        TextHAlign::Left,
                    )
                    .bold(),
                )
                .with_text(
                    TextPrimitive::new(
                        row.right_label.clone(),
                        viewport.width - margin,
                        row.top + margin + row.bar_height,
                        font,
                        BLACK,
                        TextHAlign::Right,
                    )
                    .bold(),
                );
        }
        frame
    }
}
