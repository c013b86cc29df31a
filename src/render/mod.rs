//! Pixel-space draw commands produced by the chart binders.

mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::VizResult;

/// Drawing backend fed by chart series.
///
/// A frame is complete when it arrives: emphasis is already resolved into
/// opacities and colors, so a backend only paints.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()>;
}
