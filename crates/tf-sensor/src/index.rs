//! Per-tick spatial index of vehicle positions.
//!
//! Rebuilt from scratch every tick by the simulation loop — an O(N log N)
//! bulk load over at most a few hundred vehicles — and consulted for two
//! queries: ray casts against vehicle bodies (collision avoidance) and the
//! spawn-point vacancy check.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tf_core::{Vec2, VehicleId};

use crate::ray::ray_disc;

/// One vehicle's footprint for sensing purposes: a disc.
#[derive(Copy, Clone, Debug)]
pub struct VehiclePoint {
    pub id: VehicleId,
    pub position: Vec2,
    /// Half the vehicle's length.
    pub radius: f32,
}

impl RTreeObject for VehiclePoint {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl PointDistance for VehiclePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over all live vehicles at one tick.
pub struct VehicleIndex {
    tree: RTree<VehiclePoint>,
    /// Largest footprint radius in the tree — widens envelope queries so a
    /// big vehicle is never culled early.
    max_radius: f32,
}

impl VehicleIndex {
    /// Bulk-load the index from the current vehicle population.
    pub fn build(vehicles: Vec<VehiclePoint>) -> Self {
        let max_radius = vehicles.iter().map(|v| v.radius).fold(0.0, f32::max);
        Self {
            tree: RTree::bulk_load(vehicles),
            max_radius,
        }
    }

    /// An index with no vehicles.
    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// `true` if no vehicle centre lies within `radius` of `point` — the
    /// spawn vacancy check.
    pub fn is_vacant(&self, point: Vec2, radius: f32) -> bool {
        self.tree
            .locate_within_distance([point.x, point.y], radius * radius)
            .next()
            .is_none()
    }

    /// Nearest vehicle-body hit along the ray, skipping `exclude` (the
    /// casting vehicle must not sense itself).
    ///
    /// `dir` must be a unit vector.
    pub(crate) fn cast(
        &self,
        origin: Vec2,
        dir: Vec2,
        max: f32,
        exclude: Option<VehicleId>,
    ) -> Option<(f32, Vec2, VehicleId)> {
        // Candidates: every vehicle whose centre is within reach of the ray
        // segment's midpoint.
        let mid = origin + dir * (max * 0.5);
        let reach = max * 0.5 + self.max_radius;

        let mut best: Option<(f32, Vec2, VehicleId)> = None;
        for v in self
            .tree
            .locate_within_distance([mid.x, mid.y], reach * reach)
        {
            if Some(v.id) == exclude {
                continue;
            }
            if let Some((t, point)) = ray_disc(origin, dir, max, v.position, v.radius) {
                if best.is_none_or(|(bt, _, _)| t < bt) {
                    best = Some((t, point, v.id));
                }
            }
        }
        best
    }
}
