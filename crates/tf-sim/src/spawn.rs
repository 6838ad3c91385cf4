//! Population regulation: entry scanning, class selection, spawn attempts.
//!
//! Spawning is driven by an explicit throttle timer rather than a sleeping
//! task: one spawn attempt at most per interval, with a longer interval
//! while the population sits at its cap so a full map doesn't busy-poll.

use tf_core::{SimClock, SimRng, Tick, TransportClass, TransportFilter, VehicleId};
use tf_guide::GuideNetwork;
use tf_map::{MapResult, RoadMap};
use tf_sensor::VehicleIndex;
use tf_vehicle::VehicleSpec;

use crate::registry::VehicleRegistry;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Spawner parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnConfig {
    /// Hard population cap across both classes.
    pub max_vehicles: usize,

    /// Target share of public-transit vehicles in `[0, 1]`.  The public cap
    /// is `round(max_vehicles × public_ratio)`; the private cap is the
    /// remainder, so one class may carry a single rounding unit more than
    /// an exact split.
    pub public_ratio: f32,

    /// Seconds between spawn attempts while under the cap.
    pub spawn_interval_secs: f32,

    /// Seconds between attempts while at the cap (longer, to bound polling).
    pub saturated_interval_secs: f32,

    /// Per-entry-node cooldown, randomized uniformly in this range (seconds)
    /// once at simulation start.
    pub entry_cooldown_secs: (f32, f32),

    /// A spawn point is blocked while any vehicle centre is within this
    /// radius (metres).
    pub spawn_clear_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_vehicles:            60,
            public_ratio:            0.2,
            spawn_interval_secs:     1.0,
            saturated_interval_secs: 5.0,
            entry_cooldown_secs:     (2.0, 6.0),
            spawn_clear_radius:      10.0,
        }
    }
}

/// Spawn attempt counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnStats {
    /// Successful spawns.
    pub spawned: u64,
    /// Attempts rejected because the spawn point was occupied.
    pub blocked: u64,
}

// ── Entry nodes ───────────────────────────────────────────────────────────────

/// One traffic entry point, computed once at simulation start.
#[derive(Clone, Debug)]
pub struct EntryNodeInfo {
    pub node: String,
    /// The entry's single edge — the road vehicles spawn onto.
    pub edge: String,
    /// Which classes this entry emits.
    pub filter: TransportFilter,
    /// Minimum ticks between two spawns at this entry.
    pub cooldown_ticks: u64,
    pub last_spawn: Option<Tick>,
}

impl EntryNodeInfo {
    fn ready(&self, now: Tick) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now.since(last) >= self.cooldown_ticks,
        }
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

/// Regulates the vehicle population: class caps with rounding spillover,
/// entry-node selection, vacancy checks, and the attempt throttle.
pub struct Spawner {
    config: SpawnConfig,
    fleet: Vec<VehicleSpec>,
    entries: Vec<EntryNodeInfo>,
    public_cap: usize,
    private_cap: usize,
    next_attempt: Tick,
    stats: SpawnStats,
}

impl Spawner {
    /// Scan `map` for entry nodes and set up the spawner.
    ///
    /// Per-entry cooldowns are randomized from `config.entry_cooldown_secs`
    /// using `rng`, once, here — the run stays reproducible from the seed.
    pub fn new(
        config: SpawnConfig,
        fleet: Vec<VehicleSpec>,
        map: &RoadMap,
        clock: &SimClock,
        rng: &mut SimRng,
    ) -> MapResult<Spawner> {
        let mut entries = Vec::new();
        for id in map.node_ids() {
            let Some(filter) = map.entry_filter(id)? else {
                continue;
            };
            let edge = map.incident_edges(id)?[0].clone();
            let (lo, hi) = config.entry_cooldown_secs;
            let cooldown_secs = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            entries.push(EntryNodeInfo {
                node: id.clone(),
                edge,
                filter,
                cooldown_ticks: clock.ticks_for_secs(cooldown_secs),
                last_spawn: None,
            });
        }

        let public_cap = (config.max_vehicles as f32 * config.public_ratio).round() as usize;
        let private_cap = config.max_vehicles - public_cap;

        Ok(Spawner {
            config,
            fleet,
            entries,
            public_cap,
            private_cap,
            next_attempt: Tick::ZERO,
            stats: SpawnStats::default(),
        })
    }

    pub fn stats(&self) -> SpawnStats {
        self.stats
    }

    pub fn entries(&self) -> &[EntryNodeInfo] {
        &self.entries
    }

    pub fn cap(&self, class: TransportClass) -> usize {
        match class {
            TransportClass::Private => self.private_cap,
            TransportClass::Public  => self.public_cap,
        }
    }

    /// One scheduling tick: at most one spawn attempt, throttled.
    ///
    /// Returns the new vehicle's id when a spawn succeeds.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        now: Tick,
        clock: &SimClock,
        map: &RoadMap,
        guide: &GuideNetwork,
        index: &VehicleIndex,
        registry: &mut VehicleRegistry,
        rng: &mut SimRng,
    ) -> Option<VehicleId> {
        if now < self.next_attempt {
            return None;
        }

        let counts = registry.counts();
        let at_cap = counts.total() >= self.config.max_vehicles;
        let interval = if at_cap {
            self.config.saturated_interval_secs
        } else {
            self.config.spawn_interval_secs
        };
        self.next_attempt = now + clock.ticks_for_secs(interval).max(1);
        if at_cap {
            return None;
        }

        // ── Class selection: remaining capacity, with spillover ───────────
        //
        // A class that can't spawn at all (no archetypes, or no entry node
        // admitting it) donates its remaining capacity to the other class.
        let mut rem_public = self.public_cap.saturating_sub(counts.public);
        let mut rem_private = self.private_cap.saturating_sub(counts.private);
        if !self.eligible(TransportClass::Public) {
            rem_private += rem_public;
            rem_public = 0;
        }
        if !self.eligible(TransportClass::Private) {
            rem_public += rem_private;
            rem_private = 0;
        }
        let room = rem_public + rem_private;
        if room == 0 {
            return None;
        }
        let class = if rng.gen_range(0..room) < rem_public {
            TransportClass::Public
        } else {
            TransportClass::Private
        };

        // ── Archetype: uniform within the class ───────────────────────────
        let of_class: Vec<&VehicleSpec> =
            self.fleet.iter().filter(|s| s.class == class).collect();
        let spec = (*rng.choose(&of_class)?).clone();

        // ── Entry node: uniform among ready entries admitting the class ───
        let ready: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.filter.admits(class) && e.ready(now))
            .map(|(i, _)| i)
            .collect();
        let entry_idx = *rng.choose(&ready)?;
        let (entry_node, entry_edge) = {
            let e = &self.entries[entry_idx];
            (e.node.clone(), e.edge.clone())
        };

        // ── Spawn point: the entry's lane start for this class ────────────
        let node_pos = map.node_position(&entry_node).ok()?;
        let position = match guide.nearest_lane_start(&entry_edge, class, node_pos) {
            Ok(start) => guide.node(start).position,
            Err(e) => {
                log::warn!("entry {entry_node:?}: {e}; skipping spawn");
                return None;
            }
        };

        // ── Vacancy check ─────────────────────────────────────────────────
        if !index.is_vacant(position, self.config.spawn_clear_radius) {
            self.stats.blocked += 1;
            return None;
        }

        let heading = match map.entry_orientation(&entry_node) {
            Ok(h) => h,
            Err(e) => {
                log::warn!("entry {entry_node:?}: {e}; skipping spawn");
                return None;
            }
        };

        let id = registry.spawn(spec, position, heading, &entry_edge, now);
        self.entries[entry_idx].last_spawn = Some(now);
        self.stats.spawned += 1;
        Some(id)
    }

    /// `true` if `class` has at least one archetype and one entry node.
    fn eligible(&self, class: TransportClass) -> bool {
        self.fleet.iter().any(|s| s.class == class)
            && self.entries.iter().any(|e| e.filter.admits(class))
    }
}
