use crate::game::Direction;

/// Turns drag gestures into directions.
///
/// The displacement is always measured from where the gesture began, so a
/// long drag keeps proposing the same direction on every move event. The
/// dominant axis wins; equal magnitudes count as vertical.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: i32, y: i32) {
        self.origin = Some((x, y));
    }

    /// Returns at most one proposed direction per move event
    pub fn update(&self, x: i32, y: i32) -> Option<Direction> {
        let (origin_x, origin_y) = self.origin?;
        swipe_direction(x - origin_x, y - origin_y)
    }

    pub fn end(&mut self) {
        self.origin = None;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}

/// Direction of a displacement; `None` when there is no movement
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if dy > 0 {
        Some(Direction::Down)
    } else if dy < 0 {
        Some(Direction::Up)
    } else {
        None
    }
}
