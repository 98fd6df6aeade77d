//! Platform-independent core of the ambient renderer.
//!
//! Nothing in here touches the DOM: the host hands in viewport sizes, pointer
//! positions, rectangles and timestamps, and receives glyphs through
//! [`GlyphSink`]. This keeps every frame reproducible from a test.

pub mod compositor;
pub mod geom;
pub mod grid;
pub mod hash;
pub mod highlight;
pub mod leaves;
pub mod noise;
pub mod spotlight;
pub mod state;

pub use compositor::{ColorScheme, DimMask, GlyphSink, Tone};
pub use geom::Rect;
pub use grid::{Grid, Viewport};
pub use highlight::{
    BlockRasterizer, HighlightMask, HighlightRequest, HighlightState, MaskLayout, TextRasterizer,
};
pub use leaves::LeafField;
pub use noise::DapplePresence;
pub use spotlight::{PointerCapability, PointerState, Spotlight};
pub use state::RendererState;
