//! Unit tests for tf-sensor.

#[cfg(test)]
mod helpers {
    use tf_map::{NodeKind, RoadMap, RoadProfile};

    use crate::Scene;

    /// Straight two-way road along +x:
    ///
    ///   west (Limit, 0,0) ── e0 "N"/"N" ── hub (Intersection, 200,0) ── e1 "N"/"N" ── east (Limit, 400,0)
    pub fn corridor() -> (RoadMap, RoadProfile, Scene) {
        let mut map = RoadMap::new();
        map.add_node("west", NodeKind::Limit, 0.0, 0.0);
        map.add_node("hub", NodeKind::Intersection, 200.0, 0.0);
        map.add_node("east", NodeKind::Limit, 400.0, 0.0);
        map.add_edge("e0", "west", "hub", "", "N", "N");
        map.add_edge("e1", "hub", "east", "", "N", "N");
        let profile = RoadProfile::default();
        let scene = Scene::build(&map, &profile).unwrap();
        (map, profile, scene)
    }
}

// ── Static scene casts ────────────────────────────────────────────────────────

#[cfg(test)]
mod statics {
    use tf_core::Vec2;

    use super::helpers::corridor;
    use crate::{BoundaryLine, SceneView, SensedSurface, SensorField, VehicleIndex};

    #[test]
    fn front_ray_sees_intersection_zone() {
        let (_, profile, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        // Eastbound on the right-hand lane of e0, approaching the hub.
        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let origin = Vec2::new(170.0, lane_y);
        let hit = view.cast(origin, Vec2::new(1.0, 0.0), 50.0).unwrap();
        assert_eq!(hit.surface, SensedSurface::Intersection("hub".into()));
        // Disc radius 8 around x=200: the ray enters at ~191.8 for this y.
        assert!(hit.distance > 20.0 && hit.distance < 30.0, "d={}", hit.distance);
    }

    #[test]
    fn front_ray_sees_limit_zone() {
        let (_, profile, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let origin = Vec2::new(390.0, lane_y);
        let hit = view.cast(origin, Vec2::new(1.0, 0.0), 20.0).unwrap();
        assert_eq!(hit.surface, SensedSurface::Limit("east".into()));
    }

    #[test]
    fn crossing_ray_sees_edge_gate() {
        let (_, profile, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        // e1's eastbound gate hangs at x = 208 (hub + clearance), below the
        // spine.  Cast across it from inside the junction box, aimed at the
        // lane, low enough to duck under the intersection disc... the disc
        // would win if nearer, so start past the disc's edge.
        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let origin = Vec2::new(200.0 + profile.intersection_clearance * 0.9, lane_y);
        let hit = view.cast(origin, Vec2::new(1.0, 0.0), 10.0).unwrap();
        assert_eq!(hit.surface, SensedSurface::Edge("e1".into()));
    }

    #[test]
    fn side_ray_sees_center_line() {
        let (_, profile, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        // Eastbound vehicle drifting left: its left-diagonal ray crosses the
        // centre line (y = 0).
        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let origin = Vec2::new(100.0, lane_y);
        let diag = Vec2::new(1.0, 1.0);
        let hit = view.cast(origin, diag, 10.0).unwrap();
        assert_eq!(
            hit.surface,
            SensedSurface::Boundary(BoundaryLine::CenterLine)
        );
    }

    #[test]
    fn side_ray_sees_hard_shoulder() {
        let (_, profile, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let origin = Vec2::new(100.0, lane_y);
        let diag = Vec2::new(1.0, -1.0); // right-diagonal, toward the kerb
        let hit = view.cast(origin, diag, 10.0).unwrap();
        assert_eq!(
            hit.surface,
            SensedSurface::Boundary(BoundaryLine::HardShoulder)
        );
    }

    #[test]
    fn clear_ray_sees_nothing() {
        let (_, _, scene) = corridor();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        // Far off the road, pointing away.
        let hit = view.cast(Vec2::new(0.0, 500.0), Vec2::new(0.0, 1.0), 50.0);
        assert!(hit.is_none());
    }

    #[test]
    fn transit_line_between_bus_and_normal_lane() {
        use tf_map::{NodeKind, RoadMap, RoadProfile};

        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, 0.0, 0.0);
        map.add_node("b", NodeKind::Limit, 100.0, 0.0);
        map.add_edge("e", "a", "b", "", "PN", "0");
        let profile = RoadProfile::default();
        let scene = crate::Scene::build(&map, &profile).unwrap();
        let vehicles = VehicleIndex::empty();
        let view = SceneView { scene: &scene, vehicles: &vehicles, exclude: None };

        // One-way pair centred on the spine: the P lane runs at y = +1.75,
        // the N lane at y = -1.75, and the P/N boundary is the spine itself.
        let origin = Vec2::new(50.0, 1.75);
        let hit = view.cast(origin, Vec2::new(1.0, -1.0), 6.0).unwrap();
        assert_eq!(
            hit.surface,
            SensedSurface::Boundary(BoundaryLine::TransitLine)
        );
    }
}

// ── Vehicle index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicles {
    use tf_core::{Vec2, VehicleId};

    use super::helpers::corridor;
    use crate::{SceneView, SensedSurface, SensorField, VehicleIndex, VehiclePoint};

    fn index_with(points: &[(u32, f32, f32)]) -> VehicleIndex {
        VehicleIndex::build(
            points
                .iter()
                .map(|&(id, x, y)| VehiclePoint {
                    id: VehicleId(id),
                    position: Vec2::new(x, y),
                    radius: 2.0,
                })
                .collect(),
        )
    }

    #[test]
    fn front_ray_sees_vehicle_ahead() {
        let (_, _, scene) = corridor();
        let idx = index_with(&[(7, 120.0, -2.0)]);
        let view = SceneView { scene: &scene, vehicles: &idx, exclude: Some(VehicleId(0)) };

        let hit = view
            .cast(Vec2::new(100.0, -2.0), Vec2::new(1.0, 0.0), 30.0)
            .unwrap();
        assert_eq!(hit.surface, SensedSurface::Vehicle(VehicleId(7)));
        // Disc radius 2 centred at 120 → surface at 118.
        assert!((hit.distance - 18.0).abs() < 1e-3);
    }

    #[test]
    fn caster_is_excluded() {
        let (_, _, scene) = corridor();
        let idx = index_with(&[(0, 103.0, -2.0)]);
        let view = SceneView { scene: &scene, vehicles: &idx, exclude: Some(VehicleId(0)) };

        let hit = view.cast(Vec2::new(100.0, -2.0), Vec2::new(1.0, 0.0), 5.0);
        assert!(hit.is_none(), "own body must not be sensed");
    }

    #[test]
    fn nearest_of_two_wins() {
        let (_, _, scene) = corridor();
        let idx = index_with(&[(1, 130.0, -2.0), (2, 115.0, -2.0)]);
        let view = SceneView { scene: &scene, vehicles: &idx, exclude: None };

        let hit = view
            .cast(Vec2::new(100.0, -2.0), Vec2::new(1.0, 0.0), 50.0)
            .unwrap();
        assert_eq!(hit.surface, SensedSurface::Vehicle(VehicleId(2)));
    }

    #[test]
    fn vacancy_query() {
        let idx = index_with(&[(0, 10.0, 0.0)]);
        assert!(!idx.is_vacant(Vec2::new(12.0, 0.0), 5.0));
        assert!(idx.is_vacant(Vec2::new(30.0, 0.0), 5.0));
        assert!(VehicleIndex::empty().is_vacant(Vec2::ZERO, 100.0));
    }

    #[test]
    fn vehicle_nearer_than_static_wins() {
        let (_, profile, scene) = corridor();
        // Vehicle between the caster and the hub's junction box.
        let lane_y = -(profile.separator_width * 0.5 + profile.lane_width * 0.5);
        let idx = index_with(&[(3, 180.0, lane_y)]);
        let view = SceneView { scene: &scene, vehicles: &idx, exclude: None };

        let hit = view
            .cast(Vec2::new(170.0, lane_y), Vec2::new(1.0, 0.0), 50.0)
            .unwrap();
        assert_eq!(hit.surface, SensedSurface::Vehicle(VehicleId(3)));
    }
}
