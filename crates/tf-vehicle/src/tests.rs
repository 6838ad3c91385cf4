//! Unit tests for tf-vehicle.
//!
//! Driver decisions are tested against a scripted sensor field so each rule
//! fires in isolation; targets come from a real map + guide network.

#[cfg(test)]
mod helpers {
    use std::cell::Cell;

    use tf_core::{Tick, TransportClass, Vec2, VehicleRng};
    use tf_guide::GuideNetwork;
    use tf_map::{NodeKind, RoadMap, RoadProfile};
    use tf_sensor::{RayHit, SensedSurface, SensorField};

    use crate::{DriveContext, SensorTuning, VehicleSpec, VehicleState};

    /// Returns the scripted hits in cast order: front, left, right.
    pub struct ScriptedField {
        hits: [Option<RayHit>; 3],
        next: Cell<usize>,
    }

    impl ScriptedField {
        pub fn new(
            front: Option<RayHit>,
            left: Option<RayHit>,
            right: Option<RayHit>,
        ) -> Self {
            Self { hits: [front, left, right], next: Cell::new(0) }
        }
    }

    impl SensorField for ScriptedField {
        fn cast(&self, _origin: Vec2, _dir: Vec2, _max: f32) -> Option<RayHit> {
            let i = self.next.get();
            self.next.set((i + 1) % 3);
            self.hits[i].clone()
        }
    }

    pub fn hit(surface: SensedSurface) -> Option<RayHit> {
        Some(RayHit { point: Vec2::ZERO, distance: 5.0, surface })
    }

    /// T-junction used by the turn tests:
    ///
    ///   a (Limit) ── in ── hub (Intersection) ── out ── b (Limit)
    ///                        └── side ── c (Limit)
    ///
    /// All edges "N"/"N".
    pub fn t_junction() -> (RoadMap, GuideNetwork, RoadProfile) {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, -100.0, 0.0);
        map.add_node("hub", NodeKind::Intersection, 0.0, 0.0);
        map.add_node("b", NodeKind::Limit, 100.0, 0.0);
        map.add_node("c", NodeKind::Limit, 0.0, 100.0);
        map.add_edge("in", "a", "hub", "", "N", "N");
        map.add_edge("out", "hub", "b", "", "N", "N");
        map.add_edge("side", "hub", "c", "", "N", "N");
        let profile = RoadProfile::default();
        let guide = GuideNetwork::generate(&map, &profile).unwrap();
        (map, guide, profile)
    }

    /// A vehicle eastbound on edge "in", just before the hub.
    pub fn approaching_vehicle(awaiting_exit: bool) -> VehicleState {
        let mut state = VehicleState::spawn(
            VehicleSpec::new("sedan", TransportClass::Private, 13.9, 2.6, 4.5),
            Vec2::new(-20.0, -2.0),
            Vec2::new(1.0, 0.0),
            "in",
            0,
            Tick::ZERO,
        );
        state.awaiting_exit = awaiting_exit;
        state
    }

    pub fn ctx<'a>(
        map: &'a RoadMap,
        guide: &'a GuideNetwork,
        field: &'a dyn SensorField,
        tuning: &'a SensorTuning,
    ) -> DriveContext<'a> {
        DriveContext {
            tick: Tick::ZERO,
            dt_secs: 0.05,
            map,
            guide,
            field,
            tuning,
        }
    }

    pub fn rng() -> VehicleRng {
        VehicleRng::new(42, 0)
    }
}

// ── Front-ray macro state ─────────────────────────────────────────────────────

#[cfg(test)]
mod front {
    use tf_core::VehicleId;
    use tf_sensor::SensedSurface;

    use super::helpers::*;
    use crate::{DespawnReason, DriverModel, Maneuver, SensorDriver, SensorTuning};

    #[test]
    fn limit_zone_despawns() {
        let (map, guide, _) = t_junction();
        let field = ScriptedField::new(hit(SensedSurface::Limit("b".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(false);

        let maneuvers = SensorDriver.steer(
            VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert_eq!(
            maneuvers,
            vec![Maneuver::Despawn { reason: DespawnReason::LeftMap }]
        );
    }

    #[test]
    fn vehicle_ahead_brakes() {
        let (map, guide, _) = t_junction();
        let field =
            ScriptedField::new(hit(SensedSurface::Vehicle(VehicleId(9))), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(true);

        let maneuvers = SensorDriver.steer(
            VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert_eq!(maneuvers, vec![Maneuver::HardBrake]);
    }

    #[test]
    fn edge_gate_enters_when_not_awaiting() {
        let (map, guide, _) = t_junction();
        let field = ScriptedField::new(hit(SensedSurface::Edge("out".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(false);

        let maneuvers = SensorDriver.steer(
            VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        let [Maneuver::EnterEdge { edge, target }] = maneuvers.as_slice() else {
            panic!("expected EnterEdge, got {maneuvers:?}");
        };
        assert_eq!(edge, "out");
        // The target is the waypoint after one of "out"'s lane starts, so
        // the entry heading points down the lane.
        let is_first_waypoint = guide
            .edge_lanes("out")
            .any(|l| guide.node(l.chain[1]).position == *target);
        assert!(is_first_waypoint);
    }

    #[test]
    fn edge_gate_ignored_while_awaiting_exit() {
        let (map, guide, _) = t_junction();
        let field = ScriptedField::new(hit(SensedSurface::Edge("out".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(true);

        let maneuvers = SensorDriver.steer(
            VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert!(maneuvers.is_empty());
    }

    #[test]
    fn intersection_picks_exit_excluding_arrival() {
        let (map, guide, _) = t_junction();
        let tuning = SensorTuning::default();
        let mut rng = rng();

        // Run the decision repeatedly; the choice is random per vehicle RNG
        // but must always avoid the arrival edge.
        for _ in 0..20 {
            let field =
                ScriptedField::new(hit(SensedSurface::Intersection("hub".into())), None, None);
            let state = approaching_vehicle(true);
            let maneuvers = SensorDriver.steer(
                tf_core::VehicleId(0),
                &state,
                &ctx(&map, &guide, &field, &tuning),
                &mut rng,
            );
            let [Maneuver::TurnOnto { edge, target }] = maneuvers.as_slice() else {
                panic!("expected TurnOnto, got {maneuvers:?}");
            };
            assert_ne!(edge, "in", "must not turn back onto the arrival edge");
            assert!(edge == "out" || edge == "side");
            let is_lane_start = guide
                .edge_lanes(edge)
                .any(|l| guide.node(l.start()).position == *target);
            assert!(is_lane_start);
        }
    }

    #[test]
    fn intersection_ignored_after_decision() {
        let (map, guide, _) = t_junction();
        let field =
            ScriptedField::new(hit(SensedSurface::Intersection("hub".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(false); // decision already made

        let maneuvers = SensorDriver.steer(
            tf_core::VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert!(maneuvers.is_empty());
    }

    #[test]
    fn dead_end_intersection_despawns() {
        use tf_map::{NodeKind, RoadMap, RoadProfile};

        // Only the arrival edge touches the hub.
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, -100.0, 0.0);
        map.add_node("hub", NodeKind::Intersection, 0.0, 0.0);
        map.add_edge("in", "a", "hub", "", "N", "N");
        let guide = tf_guide::GuideNetwork::generate(&map, &RoadProfile::default()).unwrap();

        let field =
            ScriptedField::new(hit(SensedSurface::Intersection("hub".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(true);

        let maneuvers = SensorDriver.steer(
            tf_core::VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert_eq!(
            maneuvers,
            vec![Maneuver::Despawn { reason: DespawnReason::NoExitPath }]
        );
    }

    #[test]
    fn exit_without_lane_starts_despawns() {
        use tf_map::{NodeKind, RoadMap, RoadProfile};

        // The only exit is a stub edge shorter than its endpoint clearances:
        // it admits the class on paper but generated no guide lanes.
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, -100.0, 0.0);
        map.add_node("hub", NodeKind::Intersection, 0.0, 0.0);
        map.add_node("stub", NodeKind::Intersection, 10.0, 0.0);
        map.add_edge("in", "a", "hub", "", "N", "N");
        map.add_edge("short", "hub", "stub", "", "N", "N");
        let guide = tf_guide::GuideNetwork::generate(&map, &RoadProfile::default()).unwrap();
        assert_eq!(guide.edge_lanes("short").count(), 0, "fixture: no guide lanes");

        let field =
            ScriptedField::new(hit(SensedSurface::Intersection("hub".into())), None, None);
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(true);

        let maneuvers = SensorDriver.steer(
            tf_core::VehicleId(0),
            &state,
            &ctx(&map, &guide, &field, &tuning),
            &mut rng(),
        );
        assert_eq!(
            maneuvers,
            vec![Maneuver::Despawn { reason: DespawnReason::NoLaneStart }]
        );
    }
}

// ── Side-ray corrections ──────────────────────────────────────────────────────

#[cfg(test)]
mod sides {
    use tf_core::TransportClass;
    use tf_sensor::{BoundaryLine, SensedSurface};

    use super::helpers::*;
    use crate::{DriverModel, Maneuver, SensorDriver, SensorTuning, VehicleSpec};

    fn yaw_for(
        left: Option<tf_sensor::RayHit>,
        right: Option<tf_sensor::RayHit>,
        class: TransportClass,
    ) -> Vec<f32> {
        let (map, guide, _) = t_junction();
        let field = ScriptedField::new(None, left, right);
        let tuning = SensorTuning::default();
        let mut state = approaching_vehicle(true);
        state.spec = VehicleSpec::new("probe", class, 13.9, 2.6, 4.5);

        SensorDriver
            .steer(
                tf_core::VehicleId(0),
                &state,
                &ctx(&map, &guide, &field, &tuning),
                &mut rng(),
            )
            .into_iter()
            .map(|m| match m {
                Maneuver::YawBy { radians } => radians,
                other => panic!("expected YawBy, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn left_boundary_steers_right() {
        let yaws = yaw_for(
            hit(SensedSurface::Boundary(BoundaryLine::LaneLine)),
            None,
            TransportClass::Private,
        );
        assert_eq!(yaws.len(), 1);
        assert!(yaws[0] < 0.0, "left hit must steer right (cw)");
    }

    #[test]
    fn right_boundary_steers_left() {
        let yaws = yaw_for(
            None,
            hit(SensedSurface::Boundary(BoundaryLine::HardShoulder)),
            TransportClass::Private,
        );
        assert_eq!(yaws.len(), 1);
        assert!(yaws[0] > 0.0, "right hit must steer left (ccw)");
    }

    #[test]
    fn both_sides_correct_independently() {
        let yaws = yaw_for(
            hit(SensedSurface::Boundary(BoundaryLine::CenterLine)),
            hit(SensedSurface::Boundary(BoundaryLine::HardShoulder)),
            TransportClass::Private,
        );
        assert_eq!(yaws.len(), 2);
        assert!(yaws[0] < 0.0 && yaws[1] > 0.0);
    }

    #[test]
    fn transit_line_attracts_public() {
        // Bus straddling the transit line on its left: turns toward it.
        let yaws = yaw_for(
            hit(SensedSurface::Boundary(BoundaryLine::TransitLine)),
            None,
            TransportClass::Public,
        );
        assert_eq!(yaws.len(), 1);
        assert!(yaws[0] > 0.0, "bus must turn toward the transit line");
    }

    #[test]
    fn transit_line_repels_private() {
        let yaws = yaw_for(
            hit(SensedSurface::Boundary(BoundaryLine::TransitLine)),
            None,
            TransportClass::Private,
        );
        assert_eq!(yaws.len(), 1);
        assert!(yaws[0] < 0.0, "car must turn away from the transit line");
    }

    #[test]
    fn non_boundary_side_hits_are_ignored() {
        let yaws = yaw_for(
            hit(SensedSurface::Edge("out".into())),
            hit(SensedSurface::Vehicle(tf_core::VehicleId(3))),
            TransportClass::Private,
        );
        assert!(yaws.is_empty());
    }
}

// ── Sweep geometry ────────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep {
    use std::cell::RefCell;

    use tf_core::Vec2;
    use tf_sensor::{RayHit, SensorField};

    use super::helpers::approaching_vehicle;
    use crate::{SensorSweep, SensorTuning};

    /// Records every cast it receives.
    struct RecordingField {
        casts: RefCell<Vec<(Vec2, Vec2, f32)>>,
    }

    impl SensorField for RecordingField {
        fn cast(&self, origin: Vec2, dir: Vec2, max: f32) -> Option<RayHit> {
            self.casts.borrow_mut().push((origin, dir, max));
            None
        }
    }

    #[test]
    fn three_rays_from_forward_offset() {
        let field = RecordingField { casts: RefCell::new(Vec::new()) };
        let tuning = SensorTuning::default();
        let state = approaching_vehicle(true);

        let sweep = SensorSweep::scan(&field, &state, &tuning);
        assert!(sweep.front.is_none() && sweep.left.is_none() && sweep.right.is_none());

        let casts = field.casts.borrow();
        assert_eq!(casts.len(), 3);

        let expected_origin = state.position + state.heading * tuning.forward_offset;
        for (origin, _, max) in casts.iter() {
            assert_eq!(*origin, expected_origin);
            assert_eq!(*max, tuning.sense_radius);
        }

        // Heading +x: left diagonal tilts +y, right diagonal -y.
        let (_, front_dir, _) = casts[0];
        let (_, left_dir, _) = casts[1];
        let (_, right_dir, _) = casts[2];
        assert_eq!(front_dir, state.heading);
        assert!(left_dir.y > 0.0);
        assert!(right_dir.y < 0.0);
    }
}
