//! Framework-free styling decisions for snake segments

use crate::game::Direction;

/// How light a snake segment is drawn; the snake darkens from head to tail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentShade {
    Light,
    Medium,
    Dark,
}

/// Shade of segment `index` (0 = head) in a snake of `len` segments
pub fn segment_shade(index: usize, len: usize) -> SegmentShade {
    if len <= 1 {
        return SegmentShade::Medium;
    }
    if index == 0 {
        return SegmentShade::Light;
    }
    if index >= len - 1 {
        return SegmentShade::Dark;
    }

    let position = index as f32 / (len - 1) as f32;
    if position < 0.33 {
        SegmentShade::Light
    } else if position < 0.66 {
        SegmentShade::Medium
    } else {
        SegmentShade::Dark
    }
}

/// Head glyph pointing where the snake is going
pub fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

/// Arrow shown on the on-screen control pad
pub fn arrow_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
        Direction::Left => "←",
        Direction::Right => "→",
    }
}
