//! Static sensing geometry derived from the road map.
//!
//! # Primitives
//!
//! The scene reduces the 3-D world to two primitive shapes in the map plane:
//!
//! - **Discs** for node zones: the junction box of an intersection (radius =
//!   intersection clearance) and the despawn zone of a limit node.
//! - **Segments** for everything painted or crossed: lane boundary lines
//!   along each direction, and an entry *gate* across each direction's lane
//!   group at its start — the surface a vehicle's front ray crosses when it
//!   drives onto the edge.
//!
//! Primitives live in an R-tree; a cast queries the ray's envelope and
//! intersects only the candidates.

use rstar::{RTree, RTreeObject, AABB};

use tf_core::Vec2;
use tf_guide::layout::direction_geometry;
use tf_map::{LaneKind, MapResult, NodeKind, RoadMap, RoadProfile};

use crate::ray::{ray_disc, ray_segment};
use crate::surface::{BoundaryLine, RayHit, SensedSurface};

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Shape {
    Segment { a: Vec2, b: Vec2 },
    Disc { center: Vec2, radius: f32 },
}

#[derive(Clone, Debug)]
struct Primitive {
    shape: Shape,
    surface: SensedSurface,
}

impl RTreeObject for Primitive {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        match self.shape {
            Shape::Segment { a, b } => AABB::from_corners(
                [a.x.min(b.x), a.y.min(b.y)],
                [a.x.max(b.x), a.y.max(b.y)],
            ),
            Shape::Disc { center, radius } => AABB::from_corners(
                [center.x - radius, center.y - radius],
                [center.x + radius, center.y + radius],
            ),
        }
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Immutable static sensing geometry.  Build once per map, share everywhere.
pub struct Scene {
    statics: RTree<Primitive>,
}

impl Scene {
    /// Derive the scene from `map` under `profile`.
    pub fn build(map: &RoadMap, profile: &RoadProfile) -> MapResult<Scene> {
        let mut prims: Vec<Primitive> = Vec::new();

        // Node zones.
        for id in map.node_ids() {
            let node = map.node(id)?;
            match node.kind {
                NodeKind::Intersection => prims.push(Primitive {
                    shape: Shape::Disc {
                        center: node.position,
                        radius: profile.intersection_clearance,
                    },
                    surface: SensedSurface::Intersection(id.clone()),
                }),
                NodeKind::Limit => prims.push(Primitive {
                    shape: Shape::Disc {
                        center: node.position,
                        radius: profile.lane_width,
                    },
                    surface: SensedSurface::Limit(id.clone()),
                }),
                NodeKind::Continuation => {} // curves are steered by paint, not zones
            }
        }

        // Edge gates and boundary paint.
        for edge_id in map.edge_ids() {
            let edge = map.edge(edge_id)?;

            let mut two_way = false;
            for from in [edge.source.clone(), edge.destination.clone()] {
                let Some(geo) = direction_geometry(map, edge, &from, profile)? else {
                    continue;
                };
                two_way = geo.two_way;
                let lane_count = geo.lanes.len();

                // Lateral extent of this direction's lane group.
                let inner = geo.lane_offset(profile, 0) - profile.lane_width * 0.5;
                let outer =
                    geo.lane_offset(profile, lane_count - 1) + profile.lane_width * 0.5;

                // Entry gate across the lane group at the direction's start.
                let gate_a = geo.start + geo.right * inner;
                let gate_b = geo.start + geo.right * outer;
                prims.push(Primitive {
                    shape: Shape::Segment { a: gate_a, b: gate_b },
                    surface: SensedSurface::Edge(edge_id.clone()),
                });

                // Outer shoulder.
                let (sa, sb) = geo.offset_line(outer);
                prims.push(Primitive {
                    shape: Shape::Segment { a: sa, b: sb },
                    surface: SensedSurface::Boundary(BoundaryLine::HardShoulder),
                });

                // One-way roads also have paint on their inner side; two-way
                // roads get the shared centre line below instead.
                if !geo.two_way {
                    let (ia, ib) = geo.offset_line(inner);
                    prims.push(Primitive {
                        shape: Shape::Segment { a: ia, b: ib },
                        surface: SensedSurface::Boundary(BoundaryLine::HardShoulder),
                    });
                }

                // Lines between adjacent lanes.  A pair with exactly one
                // public lane is the transit boundary.
                for i in 0..lane_count.saturating_sub(1) {
                    let offset = geo.lane_offset(profile, i) + profile.lane_width * 0.5;
                    let kind = match (
                        geo.lanes[i] == LaneKind::Public,
                        geo.lanes[i + 1] == LaneKind::Public,
                    ) {
                        (true, false) | (false, true) => BoundaryLine::TransitLine,
                        _ => BoundaryLine::LaneLine,
                    };
                    let (a, b) = geo.offset_line(offset);
                    prims.push(Primitive {
                        shape: Shape::Segment { a, b },
                        surface: SensedSurface::Boundary(kind),
                    });
                }
            }

            // Shared centre line between opposing directions, once per edge.
            if two_way {
                if let Some(geo) = direction_geometry(map, edge, &edge.source, profile)? {
                    let (a, b) = geo.offset_line(0.0);
                    prims.push(Primitive {
                        shape: Shape::Segment { a, b },
                        surface: SensedSurface::Boundary(BoundaryLine::CenterLine),
                    });
                }
            }
        }

        Ok(Scene {
            statics: RTree::bulk_load(prims),
        })
    }

    /// Number of static primitives.
    pub fn len(&self) -> usize {
        self.statics.size()
    }

    pub fn is_empty(&self) -> bool {
        self.statics.size() == 0
    }

    /// Nearest static hit along the ray, if any.
    ///
    /// `dir` must be a unit vector.
    pub(crate) fn cast(&self, origin: Vec2, dir: Vec2, max: f32) -> Option<RayHit> {
        let tip = origin + dir * max;
        let envelope = AABB::from_corners(
            [origin.x.min(tip.x), origin.y.min(tip.y)],
            [origin.x.max(tip.x), origin.y.max(tip.y)],
        );

        let mut best: Option<RayHit> = None;
        for prim in self.statics.locate_in_envelope_intersecting(&envelope) {
            let hit = match prim.shape {
                Shape::Segment { a, b } => ray_segment(origin, dir, max, a, b),
                Shape::Disc { center, radius } => ray_disc(origin, dir, max, center, radius),
            };
            if let Some((distance, point)) = hit {
                let nearer = best.as_ref().is_none_or(|b| distance < b.distance);
                if nearer {
                    best = Some(RayHit {
                        point,
                        distance,
                        surface: prim.surface.clone(),
                    });
                }
            }
        }
        best
    }
}
