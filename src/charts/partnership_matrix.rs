use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::{AxisTick, BLACK, ChartLayout, ChartSeries, WHITE};
use crate::core::{
    BallEvent, BandScale, Partnership, QuantileScale, Viewport, abbreviate_name,
};
use crate::error::VizResult;
use crate::interaction::{Emphasis, EmphasisInput, SelectionState, resolve_emphases};
use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// Light-to-dark partnership score bins.
pub const MATRIX_PALETTE: [Color; 7] = [
    Color::rgb8(0xAD, 0xCC, 0xFF),
    Color::rgb8(0x97, 0xBA, 0xF1),
    Color::rgb8(0x82, 0xAA, 0xE3),
    Color::rgb8(0x6B, 0x99, 0xD5),
    Color::rgb8(0x52, 0x87, 0xC7),
    Color::rgb8(0x37, 0x77, 0xB9),
    Color::rgb8(0x08, 0x68, 0xAC),
];

pub const INVALID_CELL_COLOR: Color = Color::rgb8(0x55, 0x55, 0x55);
const GRID_BACKGROUND: Color = Color::rgb8(0xBB, 0xBB, 0xBB);

const GRID_WIDTH: f64 = 420.0;
const GRID_HEIGHT: f64 = 260.0;
const GRID_TOP: f64 = 65.0;
const GRID_BOTTOM_MARGIN: f64 = 25.0;
const GRID_SHIFT_PX: f64 = 25.0;
const LABEL_FONT_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixCellKind {
    /// Diagonal or a pairing with no record.
    Invalid,
    Partnership { score: u32, bin: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// Index of the column batsman (first-named).
    pub column: usize,
    /// Index of the row batsman (second-named).
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: MatrixCellKind,
    pub color: Color,
    pub emphasis: Emphasis,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipMatrixSeries {
    pub layout: ChartLayout,
    pub batsmen: Vec<String>,
    /// Row-major, `batsmen.len()` squared.
    pub cells: Vec<MatrixCell>,
    pub column_labels: Vec<AxisTick>,
    pub row_labels: Vec<AxisTick>,
    pub grid: (f64, f64, f64, f64),
}

/// Binds an inning's partnerships to a batsman-by-batsman grid.
///
/// Cell `(column, row)` holds the record whose first batsman is the column
/// and second batsman the row, colored by a seven-step quantile scale over
/// the scores. Cells of partnerships whose batsmen did not both bat inside
/// the selected range are dimmed.
pub fn bind_partnership_matrix(
    partnerships: &[Partnership],
    batsmen: &[String],
    balls: &[BallEvent],
    selection: &SelectionState,
    layout: &ChartLayout,
) -> VizResult<PartnershipMatrixSeries> {
    layout.validate()?;
    let width = layout.width_px();
    let grid_width = layout.units(GRID_WIDTH);
    let grid_left = (width - grid_width) / 2.0 + GRID_SHIFT_PX;
    let grid_top = layout.units(GRID_TOP);
    let grid = (grid_left, grid_top, grid_width, layout.units(GRID_HEIGHT));

    if batsmen.is_empty() {
        debug!(partnerships = partnerships.len(), "no batsmen for partnership matrix");
        return Ok(PartnershipMatrixSeries {
            layout: *layout,
            batsmen: Vec::new(),
            cells: Vec::new(),
            column_labels: Vec::new(),
            row_labels: Vec::new(),
            grid,
        });
    }

    let columns = BandScale::new(batsmen.len(), (grid_left, grid_left + grid_width))?;
    let rows = BandScale::new(
        batsmen.len(),
        (grid_top, layout.height_px - layout.units(GRID_BOTTOM_MARGIN)),
    )?;

    let index: HashMap<&str, usize> = batsmen
        .iter()
        .enumerate()
        .map(|(position, name)| (name.as_str(), position))
        .collect();

    let bins = if partnerships.is_empty() {
        None
    } else {
        let low = partnerships.iter().map(|p| p.score).min().unwrap_or(0);
        let high = partnerships.iter().map(|p| p.score).max().unwrap_or(0);
        Some(QuantileScale::new(
            &[f64::from(low), f64::from(high)],
            MATRIX_PALETTE.len(),
        )?)
    };

    let mut by_cell: HashMap<(usize, usize), &Partnership> = HashMap::new();
    for partnership in partnerships {
        match (
            index.get(partnership.batsman_1.as_str()),
            index.get(partnership.batsman_2.as_str()),
        ) {
            (Some(&column), Some(&row)) if column != row => {
                by_cell.insert((column, row), partnership);
            }
            _ => warn!(
                batsman_1 = %partnership.batsman_1,
                batsman_2 = %partnership.batsman_2,
                "partnership batsmen missing from matrix axes"
            ),
        }
    }

    let active = selection.range_filter().active_batsmen(balls);
    let hover = selection.hover();
    let mut cells = Vec::with_capacity(batsmen.len() * batsmen.len());
    let mut scored = Vec::new();
    let mut inputs = Vec::new();

    for row in 0..batsmen.len() {
        for column in 0..batsmen.len() {
            let (Some(x), Some(y)) = (columns.band(column), rows.band(row)) else {
                continue;
            };
            let mut cell = MatrixCell {
                column,
                row,
                x,
                y,
                width: columns.bandwidth(),
                height: rows.bandwidth(),
                kind: MatrixCellKind::Invalid,
                color: INVALID_CELL_COLOR,
                emphasis: Emphasis::Full,
                tooltip: None,
            };
            if let (Some(partnership), Some(bins)) = (by_cell.get(&(column, row)), bins.as_ref()) {
                let bin = bins.bin(f64::from(partnership.score));
                cell.kind = MatrixCellKind::Partnership {
                    score: partnership.score,
                    bin,
                };
                cell.color = MATRIX_PALETTE[bin.min(MATRIX_PALETTE.len() - 1)];
                cell.tooltip = Some(partnership.tooltip());
                scored.push(cells.len());
                inputs.push(EmphasisInput {
                    in_range: active.admits(partnership),
                    hovered: hover.is_some_and(|target| target.matches_partnership(partnership)),
                });
            }
            cells.push(cell);
        }
    }

    for (position, emphasis) in scored.into_iter().zip(resolve_emphases(&inputs)) {
        cells[position].emphasis = emphasis;
    }

    let column_labels = batsmen
        .iter()
        .enumerate()
        .filter_map(|(position, name)| {
            columns.center(position).map(|center| AxisTick {
                label: abbreviate_name(name),
                position: center,
            })
        })
        .collect();
    let row_labels = batsmen
        .iter()
        .enumerate()
        .filter_map(|(position, name)| {
            rows.center(position).map(|center| AxisTick {
                label: abbreviate_name(name),
                position: center,
            })
        })
        .collect();

    debug!(
        batsmen = batsmen.len(),
        partnerships = by_cell.len(),
        active_batsmen = active.len(),
        "bound partnership matrix"
    );

    Ok(PartnershipMatrixSeries {
        layout: *layout,
        batsmen: batsmen.to_vec(),
        cells,
        column_labels,
        row_labels,
        grid,
    })
}

impl PartnershipMatrixSeries {
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&MatrixCell> {
        self.cells
            .iter()
            .find(|cell| cell.column == column && cell.row == row)
    }

    pub fn partnership_cells(&self) -> impl Iterator<Item = &MatrixCell> {
        self.cells
            .iter()
            .filter(|cell| matches!(cell.kind, MatrixCellKind::Partnership { .. }))
    }
}

impl ChartSeries for PartnershipMatrixSeries {
    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }

    fn to_render_frame(&self) -> RenderFrame {
        let viewport = self.viewport();
        let (grid_left, grid_top, grid_width, grid_height) = self.grid;

        let mut frame = RenderFrame::new(viewport)
            .with_rect(RectPrimitive::new(
                0.0,
                0.0,
                viewport.width,
                viewport.height,
                WHITE,
            ))
            .with_rect(
                RectPrimitive::new(grid_left, grid_top, grid_width, grid_height, GRID_BACKGROUND)
                    .with_stroke(GRID_BACKGROUND, 1.0),
            );
        for cell in &self.cells {
            frame = frame.with_rect(
                RectPrimitive::new(cell.x, cell.y, cell.width, cell.height, cell.color)
                    .with_stroke(BLACK, 1.0)
                    .with_opacity(cell.emphasis.opacity(self.layout.dimmed_opacity)),
            );
        }
        for label in &self.column_labels {
            frame = frame.with_text(
                TextPrimitive::new(
                    label.label.clone(),
                    label.position,
                    grid_top - 6.0,
                    LABEL_FONT_PX,
                    BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }
        for label in &self.row_labels {
            frame = frame.with_text(
                TextPrimitive::new(
                    label.label.clone(),
                    grid_left - 6.0,
                    label.position + LABEL_FONT_PX * 0.35,
                    LABEL_FONT_PX,
                    BLACK,
                    TextHAlign::Right,
                )
                .bold(),
            );
        }
        frame
    }
}
