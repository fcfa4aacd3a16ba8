use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinate space (origin top-left,
/// y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Vertical midpoint, used for block ordering and distance tests.
    pub fn y_center(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }

    /// True when the horizontal extents intersect. Blocks failing this
    /// test against a target sit in a different column.
    pub fn horizontally_overlaps(&self, other: &BoundingBox) -> bool {
        self.x1 >= other.x0 && self.x0 <= other.x1
    }

    /// Smallest box covering both rectangles.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A block of page text with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bbox: BoundingBox,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    pub fn y_center(&self) -> f32 {
        self.bbox.y_center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_center_is_vertical_midpoint() {
        let b = BoundingBox::new(0.0, 10.0, 100.0, 30.0);
        assert_eq!(b.y_center(), 20.0);
    }

    #[test]
    fn horizontal_overlap_detects_shared_column() {
        let target = BoundingBox::new(100.0, 0.0, 300.0, 50.0);
        let same_column = BoundingBox::new(150.0, 60.0, 250.0, 80.0);
        let touching = BoundingBox::new(300.0, 60.0, 400.0, 80.0);
        let other_column = BoundingBox::new(310.0, 60.0, 400.0, 80.0);

        assert!(same_column.horizontally_overlaps(&target));
        assert!(touching.horizontally_overlaps(&target));
        assert!(!other_column.horizontally_overlaps(&target));
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        let b = BoundingBox::new(5.0, 15.0, 25.0, 30.0);
        let u = a.union(&b);
        assert_eq!((u.x0, u.y0, u.x1, u.y1), (5.0, 10.0, 25.0, 30.0));
    }
}
