//! Planar geometry toolbox: `Vec2`, angles, Bezier curves, intersections.
//!
//! Everything here is a pure function of its inputs — no state, no I/O.
//! Positions use `f32` in map-plane metres.  At city scale (coordinates up
//! to a few tens of kilometres) f32 keeps sub-centimetre precision, which is
//! far below the lane-width tolerances the rest of the framework works with.

/// A point or direction in the map plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    // ── Metrics ───────────────────────────────────────────────────────────

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Squared distance — cheaper than [`distance`](Self::distance) for
    /// nearest-candidate comparisons.
    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).length_sq()
    }

    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross).  Sign tells which
    /// side of `self` the vector `other` lies on.
    #[inline]
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Left-hand perpendicular (rotate +90°).
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    // ── Directions and angles ─────────────────────────────────────────────

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(self.x / len, self.y / len))
    }

    /// Polar angle in radians, measured counter-clockwise from +x, in
    /// `(-π, π]`.
    #[inline]
    pub fn polar_angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Unit orientation vector for a polar angle (inverse of
    /// [`polar_angle`](Self::polar_angle)).
    #[inline]
    pub fn from_angle(radians: f32) -> Vec2 {
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Rotate counter-clockwise by `radians` around the origin.
    pub fn rotated(self, radians: f32) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate counter-clockwise by `radians` around `center`.
    pub fn rotated_around(self, center: Vec2, radians: f32) -> Vec2 {
        (self - center).rotated(radians) + center
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + (other - self) * t
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Segment intersection ──────────────────────────────────────────────────────

/// Intersection point of segments `a0→a1` and `b0→b1`, or `None` if the
/// segments are parallel or do not cross within both parameter ranges.
///
/// Endpoint touches count as intersections (t and u in `[0, 1]` inclusive).
pub fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    if denom.abs() <= f32::EPSILON {
        return None; // parallel or degenerate
    }
    let t = (b0 - a0).cross(s) / denom;
    let u = (b0 - a0).cross(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a0 + r * t)
    } else {
        None
    }
}

// ── Bezier curves ─────────────────────────────────────────────────────────────

/// Point on the quadratic Bezier `(p0, control, p1)` at parameter `t ∈ [0, 1]`.
pub fn quadratic_bezier(p0: Vec2, control: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    p0 * (inv * inv) + control * (2.0 * inv * t) + p1 * (t * t)
}

/// Point on the cubic Bezier `(p0, c0, c1, p1)` at parameter `t ∈ [0, 1]`.
pub fn cubic_bezier(p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    p0 * (inv * inv * inv)
        + c0 * (3.0 * inv * inv * t)
        + c1 * (3.0 * inv * t * t)
        + p1 * (t * t * t)
}

/// Arc length of the quadratic Bezier `(p0, control, p1)` by chord sampling.
///
/// `steps` chords; 16 is within 0.1 % of exact for the gentle curves road
/// geometry produces.  Monotonically approaches the true length from below
/// as `steps` grows.
pub fn quadratic_bezier_length(p0: Vec2, control: Vec2, p1: Vec2, steps: u32) -> f32 {
    let steps = steps.max(1);
    let mut length = 0.0;
    let mut prev = p0;
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let point = quadratic_bezier(p0, control, p1, t);
        length += prev.distance(point);
        prev = point;
    }
    length
}
