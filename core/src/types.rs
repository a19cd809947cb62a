use serde::{Deserialize, Serialize};

/// Position on the surface, in surface pixels (or client pixels before mapping).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn distance_squared_to_segment(self, from: Point, to: Point) -> f32 {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len2 = dx * dx + dy * dy;
        let t = if len2 > 0.0 {
            (((self.x - from.x) * dx + (self.y - from.y) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cx = from.x + dx * t - self.x;
        let cy = from.y + dy * t - self.y;
        cx * cx + cy * cy
    }
}

/// Native pixel dimensions of a raster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Where the raster is displayed on screen, in client (viewport) pixels.
///
/// May differ from the native [`Size`] when the element is scaled by CSS.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

fn axis_scale(native: u32, displayed: f32) -> f32 {
    if displayed.is_finite() && displayed > 0.0 {
        native as f32 / displayed
    } else {
        1.0
    }
}

/// Translates a client point into surface pixels, compensating for CSS scaling per axis.
pub fn client_to_surface(client: Point, rect: DisplayRect, size: Size) -> Point {
    Point {
        x: (client.x - rect.left) * axis_scale(size.width, rect.width),
        y: (client.y - rect.top) * axis_scale(size.height, rect.height),
    }
}
