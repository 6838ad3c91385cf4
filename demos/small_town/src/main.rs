//! small_town — runnable demo for the rust_tf traffic framework.
//!
//! Loads a hand-written small-town map (four gates, a roundabout, a bus
//! corridor), runs ten simulated minutes of sensor-driven traffic, records
//! the run to CSV, and prints a population summary.

mod map;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::LevelFilter;

use tf_core::SimConfig;
use tf_output::{CsvWriter, SimOutputObserver};
use tf_sim::{SimBuilder, SpawnConfig};
use tf_vehicle::SensorDriver;

use map::small_town;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 42;
const TICK_DURATION_MS: u32 = 50;   // 20 steps per simulated second
const SIM_MINUTES:      u64 = 10;
const MAX_VEHICLES:     usize = 24;
const PUBLIC_RATIO:     f32 = 0.25;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::builder().filter(None, LevelFilter::Info).init();

    println!("=== small_town — rust_tf traffic simulation ===");
    println!("Vehicles: {MAX_VEHICLES} max  |  Minutes: {SIM_MINUTES}  |  Seed: {SEED}");
    println!();

    // 1. Decode the map document into a road graph.
    let document = small_town();
    let (road_map, report) = document.build_map();
    println!(
        "Road map: {} nodes, {} edges ({} records rejected)",
        road_map.node_count(),
        road_map.edge_count(),
        report.nodes_rejected + report.edges_rejected,
    );

    // 2. Sim config.
    let config = SimConfig {
        start_unix_ms:         1_700_000_000_000, // fixed reference instant
        tick_duration_ms:      TICK_DURATION_MS,
        total_ticks:           SIM_MINUTES * 60 * 1_000 / TICK_DURATION_MS as u64,
        seed:                  SEED,
        output_interval_ticks: 20, // one snapshot per simulated second
    };
    println!(
        "Sim: {} ticks ({} min × 20 steps/s), snapshot every {} ticks",
        config.total_ticks, SIM_MINUTES, config.output_interval_ticks
    );

    // 3. Build the sim: guide network, scene, and spawner derive from the map.
    let mut sim = SimBuilder::new(config.clone(), road_map, SensorDriver)
        .spawning(SpawnConfig {
            max_vehicles: MAX_VEHICLES,
            public_ratio: PUBLIC_RATIO,
            ..Default::default()
        })
        .build()?;
    println!(
        "World: {} guide nodes, {} entry nodes",
        sim.guide.len(),
        sim.spawner.entries().len()
    );
    println!();

    // 4. Set up CSV output.
    std::fs::create_dir_all("output/small_town")?;
    let writer = CsvWriter::new(Path::new("output/small_town"))?;
    let mut observer = SimOutputObserver::new(writer, &config);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let spawn_stats = sim.spawner.stats();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  spawned            : {}", spawn_stats.spawned);
    println!("  blocked spawns     : {}", spawn_stats.blocked);
    println!("  left map           : {}", sim.stats.left_map);
    println!("  no exit path       : {}", sim.stats.no_exit_path);
    println!("  no lane start      : {}", sim.stats.no_lane_start);
    println!(
        "  live at end        : {} ({} private / {} public)",
        sim.registry.len(),
        sim.registry.counts().private,
        sim.registry.counts().public,
    );
    println!();

    // 7. Final vehicle table.
    println!(
        "{:<10} {:<10} {:<9} {:<10} {:>8}  {}",
        "Vehicle", "Archetype", "Class", "Location", "Speed", "Position"
    );
    println!("{}", "-".repeat(64));
    for (id, state) in sim.registry.iter() {
        let location = match &state.location {
            tf_vehicle::Location::Edge(e) => e.clone(),
            tf_vehicle::Location::Node(n) => n.clone(),
        };
        println!(
            "{:<10} {:<10} {:<9} {:<10} {:>6.1} m/s  {}",
            id.0, state.spec.name, state.spec.class, location, state.speed, state.position,
        );
    }

    Ok(())
}
