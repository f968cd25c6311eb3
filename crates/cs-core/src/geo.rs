//! Planar coordinates for the simulated service area.
//!
//! The service area is a flat square measured in metres.  Towers are fixed
//! points in it and users wander inside it.  Only the mobility generator and
//! the propagation model look at coordinates; the handover controller never
//! does.

/// A point in the service area, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_m(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Square service area `[0, size_m] × [0, size_m]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub size_m: f64,
}

impl Area {
    #[inline]
    pub fn new(size_m: f64) -> Self {
        Self { size_m }
    }

    /// `true` if `x` lies inside `[0, size_m]`.
    #[inline]
    pub fn contains_coord(self, v: f64) -> bool {
        (0.0..=self.size_m).contains(&v)
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        self.contains_coord(p.x) && self.contains_coord(p.y)
    }

    /// Clamp `p` onto the area boundary.
    #[inline]
    pub fn clamp(self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.size_m), p.y.clamp(0.0, self.size_m))
    }
}
