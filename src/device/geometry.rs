//! Screen geometry shared by the hierarchy parser and the unlock drivers

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left as f64 + self.width() as f64 / 2.0,
            self.top as f64 + self.height() as f64 / 2.0,
        )
    }

    /// Parse the uiautomator bounds format `[left,top][right,bottom]`.
    pub fn parse_bounds(raw: &str) -> Option<Self> {
        let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
        let (first, second) = inner.split_once("][")?;
        let (left, top) = first.split_once(',')?;
        let (right, bottom) = second.split_once(',')?;
        Some(Self::new(
            left.trim().parse().ok()?,
            top.trim().parse().ok()?,
            right.trim().parse().ok()?,
            bottom.trim().parse().ok()?,
        ))
    }
}

/// A sub-pixel screen position. Injection rounds to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to device pixels, clamping anything left of or above the origin.
    pub fn to_pixels(self) -> (u32, u32) {
        (self.x.round().max(0.0) as u32, self.y.round().max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            Rect::parse_bounds("[0,1200][1080,2100]"),
            Some(Rect::new(0, 1200, 1080, 2100))
        );
        assert_eq!(Rect::parse_bounds("[0,0][1080]"), None);
        assert_eq!(Rect::parse_bounds(""), None);
    }

    #[test]
    fn test_center_and_size() {
        let rect = Rect::new(100, 200, 400, 800);
        assert_eq!(rect.width(), 300);
        assert_eq!(rect.height(), 600);
        assert_eq!(rect.center(), Point::new(250.0, 500.0));
    }

    #[test]
    fn test_point_rounding() {
        assert_eq!(Point::new(49.6, 150.4).to_pixels(), (50, 150));
        assert_eq!(Point::new(-3.0, 2.0).to_pixels(), (0, 2));
    }
}
