//! Vehicle archetypes and sensor tuning.

use tf_core::TransportClass;

/// The static parameters of one vehicle archetype.
///
/// The spawner picks an archetype uniformly within the selected transport
/// class; everything dynamic lives in
/// [`VehicleState`][crate::VehicleState].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub name: String,
    pub class: TransportClass,
    /// Top speed in m/s.
    pub max_speed: f32,
    /// Linear speed ramp in m/s².
    pub acceleration: f32,
    /// Body length in metres; half of it is the sensing footprint radius.
    pub length: f32,
}

impl VehicleSpec {
    pub fn new(
        name: &str,
        class: TransportClass,
        max_speed: f32,
        acceleration: f32,
        length: f32,
    ) -> Self {
        Self {
            name: name.to_owned(),
            class,
            max_speed,
            acceleration,
            length,
        }
    }

    /// Sensing footprint radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.length * 0.5
    }

    /// A small mixed fleet: three private archetypes, two public.
    ///
    /// Speeds are urban figures (50 km/h ≈ 13.9 m/s).
    pub fn standard_fleet() -> Vec<VehicleSpec> {
        vec![
            VehicleSpec::new("sedan", TransportClass::Private, 13.9, 2.6, 4.5),
            VehicleSpec::new("hatchback", TransportClass::Private, 13.9, 2.9, 4.0),
            VehicleSpec::new("van", TransportClass::Private, 12.5, 2.0, 5.5),
            VehicleSpec::new("bus", TransportClass::Public, 11.1, 1.2, 12.0),
            VehicleSpec::new("minibus", TransportClass::Public, 12.5, 1.6, 7.0),
        ]
    }
}

/// Sensor geometry shared by all vehicles.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorTuning {
    /// Ray length in metres.
    pub sense_radius: f32,
    /// How far ahead of the vehicle centre the rays originate.  Must exceed
    /// the longest archetype's footprint radius or a vehicle would sense its
    /// own body.
    pub forward_offset: f32,
    /// Angle of the two diagonal rays off the heading, in radians.
    pub side_angle: f32,
    /// Fixed yaw step applied per boundary-line hit, in radians.
    pub yaw_correction: f32,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            sense_radius:   18.0,
            forward_offset: 6.5,
            side_angle:     std::f32::consts::FRAC_PI_4,
            yaw_correction: 0.06,
        }
    }
}
