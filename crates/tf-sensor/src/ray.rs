//! Ray/primitive intersection math shared by the scene and vehicle index.

use tf_core::Vec2;
use tf_core::geom::segment_intersection;

/// Ray/segment hit: distance along the ray and the hit point.
///
/// `dir` must be a unit vector.
pub(crate) fn ray_segment(
    origin: Vec2,
    dir: Vec2,
    max: f32,
    a: Vec2,
    b: Vec2,
) -> Option<(f32, Vec2)> {
    let tip = origin + dir * max;
    let point = segment_intersection(origin, tip, a, b)?;
    Some((origin.distance(point), point))
}

/// Ray/disc hit.  A ray starting inside the disc sees nothing — matching
/// engine ray casts, which don't report colliders the origin is buried in.
///
/// `dir` must be a unit vector.
pub(crate) fn ray_disc(
    origin: Vec2,
    dir: Vec2,
    max: f32,
    center: Vec2,
    radius: f32,
) -> Option<(f32, Vec2)> {
    let oc = origin - center;
    let c = oc.length_sq() - radius * radius;
    if c <= 0.0 {
        return None; // origin inside the disc
    }
    let b = oc.dot(dir);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if (0.0..=max).contains(&t) {
        Some((t, origin + dir * t))
    } else {
        None
    }
}
