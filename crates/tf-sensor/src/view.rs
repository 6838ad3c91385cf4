//! `SceneView` — the static scene and the live vehicle index composed into
//! one `SensorField`.

use tf_core::{Vec2, VehicleId};

use crate::index::VehicleIndex;
use crate::scene::Scene;
use crate::surface::{RayHit, SensedSurface, SensorField};

/// A per-tick sensing view: static geometry + this tick's vehicle index.
///
/// The simulation builds one view per vehicle per tick (it is two references
/// and an id — free to construct) so each vehicle's casts exclude its own
/// body.
#[derive(Copy, Clone)]
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub vehicles: &'a VehicleIndex,
    /// The casting vehicle — never reported as a hit.
    pub exclude: Option<VehicleId>,
}

impl SensorField for SceneView<'_> {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalized()?;

        let static_hit = self.scene.cast(origin, dir, max_distance);
        let vehicle_hit = self
            .vehicles
            .cast(origin, dir, max_distance, self.exclude)
            .map(|(distance, point, id)| RayHit {
                point,
                distance,
                surface: SensedSurface::Vehicle(id),
            });

        match (static_hit, vehicle_hit) {
            (Some(s), Some(v)) => Some(if v.distance < s.distance { v } else { s }),
            (hit, None) | (None, hit) => hit,
        }
    }
}
