pub mod renderer;
pub mod style;

pub use renderer::{GameView, Renderer, ScreenLayout};
pub use style::{head_glyph, segment_shade, SegmentShade};
