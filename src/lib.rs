//! cricket-charts: ball-event aggregation and chart data binding for cricket
//! tournament dashboards.
//!
//! Raw delivery records are decoded into [`core::BallEvent`]s, aggregated per
//! inning and over, and bound to typed chart series under one shared
//! [`interaction::SelectionState`]. Series lower to backend-agnostic
//! [`render::RenderFrame`]s; drawing stays the host's concern.

pub mod charts;
pub mod core;
pub mod error;
pub mod interaction;
pub mod provider;
pub mod render;
pub mod telemetry;

pub use charts::{
    ChartLayout, ChartSeries, bind_over_skyline, bind_over_summary, bind_partnership_bars,
    bind_partnership_matrix, bind_score_timeline, bind_tournament_overview, render_series,
};
pub use error::{VizError, VizResult};
pub use interaction::{HoverTarget, OverRange, SelectionState, ViewMode};
