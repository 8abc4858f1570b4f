use glam::Vec2;

/// Axis-aligned box: top-left corner plus size, Y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
    pub fn top(&self) -> f32 {
        self.pos.y
    }
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

/// Half-open rectangle intersection. Degenerate boxes never overlap anything.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
