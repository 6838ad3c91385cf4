//! Unit tests for tf-map.
//!
//! All tests build maps by hand (or from in-memory CSV) — no files needed.

#[cfg(test)]
mod helpers {
    use crate::{NodeKind, RoadMap};

    /// The small fixture from the map-format documentation:
    ///
    ///   n0 (Continuation, 500, 1000)
    ///   n1 (Limit,        1000, 1200)
    ///   n3 (Intersection, 500, 500)
    ///
    ///   a1: n0 → n3, src_des = "PN", des_src = "PNN"
    ///   a2: n1 → n3, src_des = "N",  des_src = "N"
    pub fn sample_map() -> RoadMap {
        let mut map = RoadMap::new();
        assert!(map.add_node("n0", NodeKind::Continuation, 500.0, 1000.0));
        assert!(map.add_node("n1", NodeKind::Limit, 1000.0, 1200.0));
        assert!(map.add_node("n3", NodeKind::Intersection, 500.0, 500.0));
        assert!(map.add_edge("a1", "n0", "n3", "High St", "PN", "PNN"));
        assert!(map.add_edge("a2", "n1", "n3", "Mill Rd", "N", "N"));
        map
    }
}

// ── Node and edge insertion ───────────────────────────────────────────────────

#[cfg(test)]
mod inserts {
    use super::helpers::sample_map;
    use crate::{IntersectionKind, NodeKind, RoadMap};

    #[test]
    fn node_count_tracks_unique_inserts() {
        let map = sample_map();
        assert_eq!(map.node_ids().len(), 3);
        assert_eq!(map.node_count(), 3);
    }

    #[test]
    fn duplicate_node_is_noop() {
        let mut map = sample_map();
        assert!(!map.add_node("n0", NodeKind::Limit, 0.0, 0.0));
        assert_eq!(map.node_count(), 3);
        // Original attributes untouched.
        assert_eq!(map.node("n0").unwrap().kind, NodeKind::Continuation);
    }

    #[test]
    fn edge_with_missing_endpoint_is_noop() {
        let mut map = sample_map();
        assert!(!map.add_edge("a9", "n0", "nowhere", "", "N", "N"));
        assert!(!map.add_edge("a9", "ghost", "n3", "", "N", "N"));
        assert_eq!(map.edge_count(), 2);
    }

    #[test]
    fn duplicate_edge_is_noop() {
        let mut map = sample_map();
        assert!(!map.add_edge("a1", "n1", "n3", "", "N", "N"));
        assert_eq!(map.edge_count(), 2);
        assert_eq!(map.edge("a1").unwrap().source, "n0");
    }

    #[test]
    fn invalid_lane_string_rejects_edge() {
        let mut map = sample_map();
        assert!(!map.add_edge("a9", "n0", "n1", "", "NX", "0"));
        assert_eq!(map.edge_count(), 2);
    }

    #[test]
    fn intersection_kind_updates() {
        let mut map = sample_map();
        assert!(map.set_intersection_kind("n3", IntersectionKind::Roundabout));
        assert_eq!(
            map.node("n3").unwrap().intersection_kind,
            IntersectionKind::Roundabout
        );
        // Not an intersection → no-op.
        assert!(!map.set_intersection_kind("n1", IntersectionKind::Roundabout));
        // Unknown id → no-op.
        assert!(!map.set_intersection_kind("ghost", IntersectionKind::Roundabout));
    }

    #[test]
    fn empty_map() {
        let map = RoadMap::new();
        assert!(map.is_empty());
        assert!(map.node("n0").is_err());
    }
}

// ── Lane accounting ───────────────────────────────────────────────────────────

#[cfg(test)]
mod lanes {
    use super::helpers::sample_map;
    use crate::lane::{LaneKind, parse_lane_string};
    use crate::{NodeKind, RoadMap};

    #[test]
    fn documented_example_counts_five() {
        let map = sample_map();
        // "PN" (2) + "PNN" (3)
        assert_eq!(map.lanes("a1").unwrap(), 5);
    }

    #[test]
    fn zero_string_is_zero_lanes() {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, 0.0, 0.0);
        map.add_node("b", NodeKind::Limit, 100.0, 0.0);
        map.add_edge("e", "a", "b", "", "0", "0");
        assert_eq!(map.lanes("e").unwrap(), 0);
    }

    #[test]
    fn one_way_counts_single_direction() {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, 0.0, 0.0);
        map.add_node("b", NodeKind::Limit, 100.0, 0.0);
        map.add_edge("e", "a", "b", "", "NN", "0");
        assert_eq!(map.lanes("e").unwrap(), 2);
    }

    #[test]
    fn unknown_edge_is_error() {
        let map = sample_map();
        assert!(map.lanes("ghost").is_err());
    }

    #[test]
    fn lane_string_parsing() {
        assert_eq!(parse_lane_string("0"), Some(vec![]));
        assert_eq!(
            parse_lane_string("NPRB"),
            Some(vec![
                LaneKind::Normal,
                LaneKind::Public,
                LaneKind::Parking,
                LaneKind::BusHov,
            ])
        );
        assert_eq!(parse_lane_string("NX"), None);
    }
}

// ── Entry nodes ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod entries {
    use tf_core::TransportFilter;

    use crate::{NodeKind, RoadMap};

    fn entry_map(outbound: &str) -> RoadMap {
        let mut map = RoadMap::new();
        map.add_node("gate", NodeKind::Limit, 0.0, 0.0);
        map.add_node("inner", NodeKind::Intersection, 100.0, 0.0);
        map.add_edge("e", "gate", "inner", "", outbound, "N");
        map
    }

    #[test]
    fn filter_follows_outbound_lane_mix() {
        assert_eq!(
            entry_map("PN").entry_filter("gate").unwrap(),
            Some(TransportFilter::PublicAndPrivate)
        );
        assert_eq!(
            entry_map("PP").entry_filter("gate").unwrap(),
            Some(TransportFilter::Public)
        );
        assert_eq!(
            entry_map("N").entry_filter("gate").unwrap(),
            Some(TransportFilter::Private)
        );
    }

    #[test]
    fn exit_only_limit_is_not_an_entry() {
        // No outbound lanes from the gate.
        assert_eq!(entry_map("0").entry_filter("gate").unwrap(), None);
    }

    #[test]
    fn non_limit_is_not_an_entry() {
        let map = entry_map("N");
        assert_eq!(map.entry_filter("inner").unwrap(), None);
    }

    #[test]
    fn orientation_points_into_map() {
        let map = entry_map("N");
        let dir = map.entry_orientation("gate").unwrap();
        assert!((dir.x - 1.0).abs() < 1e-6);
        assert!(dir.y.abs() < 1e-6);
    }

    #[test]
    fn orientation_requires_limit() {
        let map = entry_map("N");
        assert!(map.entry_orientation("inner").is_err());
        assert!(map.entry_orientation("ghost").is_err());
    }
}

// ── Exit selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod exits {
    use tf_core::TransportClass;

    use crate::{NodeKind, RoadMap};

    /// A four-way intersection:
    ///   west  ← "N"/"N"  → hub
    ///   north ← "P"/"P"  → hub   (bus-only both ways)
    ///   east  ← "PN"/"N" → hub
    ///   south ← "0"/"N"  → hub   (one-way toward hub only)
    fn crossroads() -> RoadMap {
        let mut map = RoadMap::new();
        map.add_node("hub", NodeKind::Intersection, 0.0, 0.0);
        map.add_node("west", NodeKind::Limit, -100.0, 0.0);
        map.add_node("north", NodeKind::Limit, 0.0, 100.0);
        map.add_node("east", NodeKind::Limit, 100.0, 0.0);
        map.add_node("south", NodeKind::Limit, 0.0, -100.0);
        map.add_edge("w", "hub", "west", "", "N", "N");
        map.add_edge("n", "hub", "north", "", "P", "P");
        map.add_edge("e", "hub", "east", "", "PN", "N");
        map.add_edge("s", "hub", "south", "", "0", "N");
        map
    }

    #[test]
    fn arrival_edge_is_excluded() {
        let map = crossroads();
        let exits = map
            .exit_paths("hub", "w", TransportClass::Private)
            .unwrap();
        assert!(!exits.contains(&"w"));
    }

    #[test]
    fn private_skips_bus_only_and_inbound_only() {
        let map = crossroads();
        let exits = map
            .exit_paths("hub", "w", TransportClass::Private)
            .unwrap();
        // "n" is bus-only, "s" has no lanes leaving the hub.
        assert_eq!(exits, vec!["e"]);
    }

    #[test]
    fn public_can_use_normal_and_bus_lanes() {
        let map = crossroads();
        let exits = map.exit_paths("hub", "s", TransportClass::Public).unwrap();
        assert_eq!(exits, vec!["w", "n", "e"]);
    }

    #[test]
    fn every_exit_admits_the_class() {
        let map = crossroads();
        for class in [TransportClass::Private, TransportClass::Public] {
            for exit in map.exit_paths("hub", "w", class).unwrap() {
                let edge = map.edge(exit).unwrap();
                assert!(edge.admits_from("hub", class), "{exit} should admit {class}");
            }
        }
    }

    #[test]
    fn unknown_intersection_is_error() {
        let map = crossroads();
        assert!(map.exit_paths("ghost", "w", TransportClass::Private).is_err());
    }
}

// ── Document loading ──────────────────────────────────────────────────────────

#[cfg(test)]
mod document {
    use std::io::Cursor;

    use tf_core::Vec2;

    use crate::document::{load_edges_reader, load_nodes_reader};
    use crate::{IntersectionKind, MapDocument, NodeKind, NodeRecord};

    const NODES_CSV: &str = "\
id,node_kind,intersection_kind,x,y
n0,2,0,500,1000
n1,1,0,1000,1200
n3,0,1,500,500
";

    const EDGES_CSV: &str = "\
id,source,destination,name,src_des,des_src
a1,n0,n3,High St,PN,PNN
a2,n1,n3,Mill Rd,N,N
";

    #[test]
    fn csv_roundtrip_reproduces_nodes() {
        let nodes = load_nodes_reader(Cursor::new(NODES_CSV)).unwrap();
        let edges = load_edges_reader(Cursor::new(EDGES_CSV)).unwrap();
        let doc = MapDocument { nodes: nodes.clone(), edges };
        let (map, report) = doc.build_map();

        assert_eq!(report.nodes_added, 3);
        assert_eq!(report.edges_added, 2);
        assert_eq!(report.nodes_rejected, 0);

        // Read-back reproduces the decoded node set exactly.
        assert_eq!(map.node_ids(), ["n0", "n1", "n3"]);
        for rec in &nodes {
            let pos = map.node_position(&rec.id).unwrap();
            assert_eq!(pos, Vec2::new(rec.x, rec.y));
        }
        assert_eq!(map.node("n0").unwrap().kind, NodeKind::Continuation);
        assert_eq!(
            map.node("n3").unwrap().intersection_kind,
            IntersectionKind::Roundabout
        );
        assert_eq!(map.lanes("a1").unwrap(), 5);
    }

    #[test]
    fn rejects_are_counted_not_fatal() {
        let doc = MapDocument {
            nodes: vec![
                NodeRecord { id: "a".into(), node_kind: 1, intersection_kind: 0, x: 0.0, y: 0.0 },
                NodeRecord { id: "a".into(), node_kind: 1, intersection_kind: 0, x: 9.0, y: 9.0 },
                NodeRecord { id: "b".into(), node_kind: 77, intersection_kind: 0, x: 0.0, y: 0.0 },
            ],
            edges: vec![],
        };
        let (map, report) = doc.build_map();
        assert_eq!(report.nodes_added, 1);
        assert_eq!(report.nodes_rejected, 2);
        assert_eq!(map.node_count(), 1);
    }

    #[test]
    fn missing_columns_take_defaults() {
        let csv = "id,source,destination\na1,x,y\n";
        let recs = load_edges_reader(Cursor::new(csv)).unwrap();
        assert_eq!(recs[0].name, "");
        assert_eq!(recs[0].src_des, "0");
        assert_eq!(recs[0].des_src, "0");
    }

    #[test]
    fn malformed_csv_is_parse_error() {
        let csv = "id,node_kind\nn0,notabyte\n";
        assert!(load_nodes_reader(Cursor::new(csv)).is_err());
    }
}

// ── Geometry-derived attributes ───────────────────────────────────────────────

#[cfg(test)]
mod derived {
    use crate::{NodeKind, RoadMap, RoadProfile};

    #[test]
    fn edge_length_subtracts_intersection_clearance() {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, 0.0, 0.0);
        map.add_node("b", NodeKind::Intersection, 100.0, 0.0);
        map.add_edge("e", "a", "b", "", "N", "N");

        let profile = RoadProfile::default();
        let len = map.edge_length("e", &profile).unwrap();
        assert!((len - (100.0 - profile.intersection_clearance)).abs() < 1e-4);
    }

    #[test]
    fn edge_length_never_negative() {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Intersection, 0.0, 0.0);
        map.add_node("b", NodeKind::Intersection, 1.0, 0.0);
        map.add_edge("e", "a", "b", "", "N", "N");
        assert_eq!(map.edge_length("e", &RoadProfile::default()).unwrap(), 0.0);
    }

    #[test]
    fn edge_width_counts_separator_once() {
        let mut map = RoadMap::new();
        map.add_node("a", NodeKind::Limit, 0.0, 0.0);
        map.add_node("b", NodeKind::Limit, 100.0, 0.0);
        map.add_edge("two_way", "a", "b", "", "N", "N");
        map.add_edge("one_way", "a", "b", "", "NN", "0");

        let p = RoadProfile::default();
        let two = map.edge("two_way").unwrap().width(&p);
        let one = map.edge("one_way").unwrap().width(&p);
        assert!((two - (2.0 * p.lane_width + p.separator_width)).abs() < 1e-5);
        assert!((one - 2.0 * p.lane_width).abs() < 1e-5);
    }
}
