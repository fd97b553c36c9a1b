#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Fixed layout of the horizontal reel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelGeometry {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub card_spacing: f64,
    pub center_line_x: f64,
    pub center_y: f64,
}

impl Default for ReelGeometry {
    fn default() -> Self {
        Self {
            viewport_width: 900.0,
            viewport_height: 250.0,
            card_width: 200.0,
            card_height: 180.0,
            card_spacing: 10.0,
            center_line_x: 450.0,
            center_y: 125.0,
        }
    }
}

impl ReelGeometry {
    pub fn pitch(&self) -> f64 {
        self.card_width + self.card_spacing
    }

    /// Offset before the first frame: two cards off-screen to the left.
    pub fn start_offset(&self) -> f64 {
        -self.card_width * 2.0
    }

    /// Scroll offset that puts the centre of card `index` on the centre line.
    pub fn target_offset(&self, index: usize) -> f64 {
        index as f64 * self.pitch() + self.card_width / 2.0 - self.center_line_x
    }

    pub fn card_rect(&self, index: usize, offset: f64) -> Rect {
        Rect::new(
            index as f64 * self.pitch() - offset,
            self.center_y - self.card_height / 2.0,
            self.card_width,
            self.card_height,
        )
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        -self.card_width < rect.x && rect.x < self.viewport_width + self.card_width
    }

    /// Card indices worth drawing at `offset`, before the per-card visibility check.
    pub fn visible_range(&self, offset: f64, len: usize) -> std::ops::Range<usize> {
        let first = ((offset / self.pitch()).floor() as i64 - 2).max(0) as usize;
        let first = first.min(len);
        first..(first + 10).min(len)
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }
}
