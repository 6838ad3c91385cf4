//! Live-vehicle storage with slot reuse and per-class counts.

use tf_core::{Tick, TransportClass, Vec2, VehicleId, VehicleRng};
use tf_vehicle::{VehicleSpec, VehicleState};

/// Running vehicle counts per transport class.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub private: usize,
    pub public: usize,
}

impl ClassCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.private + self.public
    }

    #[inline]
    pub fn of(&self, class: TransportClass) -> usize {
        match class {
            TransportClass::Private => self.private,
            TransportClass::Public  => self.public,
        }
    }

    fn of_mut(&mut self, class: TransportClass) -> &mut usize {
        match class {
            TransportClass::Private => &mut self.private,
            TransportClass::Public  => &mut self.public,
        }
    }
}

/// One occupied slot: the vehicle's state and its private RNG stream,
/// stored side by side so the tick loop can split-borrow them
/// (`&state` for the driver, `&mut rng` for its decisions).
pub struct Slot {
    pub state: VehicleState,
    pub rng: VehicleRng,
}

/// Slot-based vehicle storage.
///
/// `VehicleId` is the slot index.  Despawned slots go on a free list and are
/// reused; identity across reuse comes from `VehicleState::spawn_serial`,
/// which also keys the RNG stream — a reused slot never replays its previous
/// occupant's randomness.
///
/// Iteration is always ascending slot index, which fixes the per-tick update
/// order for a run.
pub struct VehicleRegistry {
    slots: Vec<Option<Slot>>,
    free: Vec<u32>,
    counts: ClassCounts,
    next_serial: u64,
    global_seed: u64,
}

impl VehicleRegistry {
    pub fn new(global_seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            counts: ClassCounts::default(),
            next_serial: 0,
            global_seed,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of live vehicles.
    pub fn len(&self) -> usize {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.total() == 0
    }

    pub fn counts(&self) -> ClassCounts {
        self.counts
    }

    /// Total vehicles ever spawned (the next spawn serial).
    pub fn spawned_ever(&self) -> u64 {
        self.next_serial
    }

    // ── Spawn / despawn ───────────────────────────────────────────────────

    /// Create a vehicle and return its id.
    pub fn spawn(
        &mut self,
        spec: VehicleSpec,
        position: Vec2,
        heading: Vec2,
        edge: &str,
        now: Tick,
    ) -> VehicleId {
        let serial = self.next_serial;
        self.next_serial += 1;

        *self.counts.of_mut(spec.class) += 1;
        let slot = Slot {
            rng: VehicleRng::new(self.global_seed, serial),
            state: VehicleState::spawn(spec, position, heading, edge, serial, now),
        };

        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(slot);
                VehicleId(i)
            }
            None => {
                self.slots.push(Some(slot));
                VehicleId(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Remove a vehicle, returning its final state.  `None` if the slot is
    /// already vacant.
    pub fn despawn(&mut self, id: VehicleId) -> Option<VehicleState> {
        let slot = self.slots.get_mut(id.index())?.take()?;
        *self.counts.of_mut(slot.state.spec.class) -= 1;
        self.free.push(id.0);
        Some(slot.state)
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn get(&self, id: VehicleId) -> Option<&VehicleState> {
        self.slots.get(id.index())?.as_ref().map(|s| &s.state)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut VehicleState> {
        self.slots.get_mut(id.index())?.as_mut().map(|s| &mut s.state)
    }

    /// Mutable slot access for the produce phase's split borrow.
    pub fn slot_mut(&mut self, id: VehicleId) -> Option<&mut Slot> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Live vehicle ids in ascending slot order — the canonical update order.
    pub fn ids(&self) -> Vec<VehicleId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| VehicleId(i as u32))
            .collect()
    }

    /// Iterator over live vehicles in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &VehicleState)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (VehicleId(i as u32), &s.state)))
    }
}
