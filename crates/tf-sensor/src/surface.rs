//! The sensing contract: surfaces, hits, and the `SensorField` trait.

use tf_core::{Vec2, VehicleId};

/// A painted road boundary a side-looking ray can detect.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BoundaryLine {
    /// Outer edge of the paved road.
    HardShoulder,
    /// Dashed line between same-direction lanes.
    LaneLine,
    /// Line between opposing directions.
    CenterLine,
    /// Boundary of a public-transport lane.
    TransitLine,
}

/// What a ray hit.
///
/// A closed enum rather than a tag or name string: unknown surfaces cannot
/// exist, and a driver `match` that forgets a variant fails to compile.
#[derive(Clone, PartialEq, Debug)]
pub enum SensedSurface {
    /// Another vehicle.
    Vehicle(VehicleId),
    /// A map-boundary node zone.
    Limit(String),
    /// An intersection junction box.
    Intersection(String),
    /// An edge entry gate — crossing it means driving onto that edge.
    Edge(String),
    /// A painted lane boundary.
    Boundary(BoundaryLine),
}

impl SensedSurface {
    /// `true` for painted-line surfaces (the side-ray vocabulary).
    pub fn is_boundary(&self) -> bool {
        matches!(self, SensedSurface::Boundary(_))
    }
}

/// The result of one ray cast.
#[derive(Clone, PartialEq, Debug)]
pub struct RayHit {
    /// World-space point where the ray met the surface.
    pub point: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    pub surface: SensedSurface,
}

/// The abstract ray-cast service vehicles sense through.
///
/// The simulation supplies [`SceneView`][crate::SceneView]; an engine
/// integration would adapt its physics ray casts to this signature instead.
/// Implementations return the **nearest** hit within `max_distance`, or
/// `None` for a clear ray.
pub trait SensorField {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit>;
}
