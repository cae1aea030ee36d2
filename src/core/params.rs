use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SimError;

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const SEA_LEVEL_AIR_DENSITY_KGPM3: f64 = 1.225;

/// Physical configuration of one shot. Owned by the caller and read on every
/// physics call, so edits between ticks take effect immediately.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub launch_speed_mps: f64,
    pub launch_angle_deg: f64,
    pub mass_kg: f64,
    pub gravity_mps2: f64,
    pub air_density_kgpm3: f64,
    pub drag_coefficient: f64,
    pub cross_section_m2: f64,
    /// Display-only; has no effect on the flight.
    pub target_distance_m: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            launch_speed_mps: 18.0,
            launch_angle_deg: 20.0,
            mass_kg: 24.35,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            air_density_kgpm3: SEA_LEVEL_AIR_DENSITY_KGPM3,
            drag_coefficient: 0.47,
            cross_section_m2: 0.05,
            target_distance_m: 25.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    LaunchSpeed,
    LaunchAngle,
    Mass,
    Gravity,
    AirDensity,
    DragCoefficient,
    CrossSection,
    TargetDistance,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Decrease,
    Increase,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::LaunchSpeed,
        Parameter::LaunchAngle,
        Parameter::Mass,
        Parameter::Gravity,
        Parameter::AirDensity,
        Parameter::DragCoefficient,
        Parameter::CrossSection,
        Parameter::TargetDistance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::LaunchSpeed => "launch_speed",
            Parameter::LaunchAngle => "angle",
            Parameter::Mass => "mass",
            Parameter::Gravity => "gravity",
            Parameter::AirDensity => "air_density",
            Parameter::DragCoefficient => "drag_coefficient",
            Parameter::CrossSection => "cross_section",
            Parameter::TargetDistance => "target_distance",
        }
    }

    pub fn bounds(self) -> ParameterBounds {
        let (min, max, step) = match self {
            Parameter::LaunchSpeed => (0.0, 30.0, 0.1),
            Parameter::LaunchAngle => (0.0, 90.0, 1.0),
            Parameter::Mass => (1.0, 31.0, 0.01),
            Parameter::Gravity => (0.0, 20.0, 0.01),
            Parameter::AirDensity => (0.0, 2.0, 0.01),
            Parameter::DragCoefficient => (0.0, 2.0, 0.01),
            Parameter::CrossSection => (0.001, 1.0, 0.001),
            Parameter::TargetDistance => (0.0, 30.0, 0.5),
        };
        ParameterBounds { min, max, step }
    }

    /// Whether the parameter only matters to the drag integrator.
    pub fn drag_only(self) -> bool {
        matches!(
            self,
            Parameter::Mass
                | Parameter::AirDensity
                | Parameter::DragCoefficient
                | Parameter::CrossSection
        )
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "launch_speed" | "speed" | "initial_speed" => Ok(Parameter::LaunchSpeed),
            "angle" | "launch_angle" => Ok(Parameter::LaunchAngle),
            "mass" => Ok(Parameter::Mass),
            "gravity" => Ok(Parameter::Gravity),
            "air_density" => Ok(Parameter::AirDensity),
            "drag_coefficient" | "cd" => Ok(Parameter::DragCoefficient),
            "cross_section" | "area" => Ok(Parameter::CrossSection),
            "target_distance" | "target" => Ok(Parameter::TargetDistance),
            _ => Err(SimError::UnknownParameter(s.to_string())),
        }
    }
}

impl ParameterSet {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::LaunchSpeed => self.launch_speed_mps,
            Parameter::LaunchAngle => self.launch_angle_deg,
            Parameter::Mass => self.mass_kg,
            Parameter::Gravity => self.gravity_mps2,
            Parameter::AirDensity => self.air_density_kgpm3,
            Parameter::DragCoefficient => self.drag_coefficient,
            Parameter::CrossSection => self.cross_section_m2,
            Parameter::TargetDistance => self.target_distance_m,
        }
    }

    fn slot_mut(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::LaunchSpeed => &mut self.launch_speed_mps,
            Parameter::LaunchAngle => &mut self.launch_angle_deg,
            Parameter::Mass => &mut self.mass_kg,
            Parameter::Gravity => &mut self.gravity_mps2,
            Parameter::AirDensity => &mut self.air_density_kgpm3,
            Parameter::DragCoefficient => &mut self.drag_coefficient,
            Parameter::CrossSection => &mut self.cross_section_m2,
            Parameter::TargetDistance => &mut self.target_distance_m,
        }
    }

    /// Stores `value` clamped into the parameter's bounds and returns what was
    /// stored. Only non-finite input is rejected.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<f64, SimError> {
        if !value.is_finite() {
            return Err(SimError::NonFiniteValue { parameter, value });
        }
        let clamped = parameter.bounds().clamp(value);
        if clamped != value {
            log::debug!("{parameter} = {value} clamped to {clamped}");
        }
        *self.slot_mut(parameter) = clamped;
        Ok(clamped)
    }

    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<f64, SimError> {
        let parameter = name.parse::<Parameter>()?;
        self.set(parameter, value)
    }

    pub fn step(&mut self, parameter: Parameter, direction: StepDirection) -> f64 {
        let bounds = parameter.bounds();
        let current = self.get(parameter);
        let next = match direction {
            StepDirection::Decrease => current - bounds.step,
            StepDirection::Increase => current + bounds.step,
        };
        // Snap to the step grid.
        let snapped = (next / bounds.step).round() * bounds.step;
        let clamped = bounds.clamp(snapped);
        *self.slot_mut(parameter) = clamped;
        clamped
    }

    /// Clamps every field into bounds, replacing non-finite values with the
    /// defaults. Used after loading a file.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for parameter in Parameter::ALL {
            let value = self.get(parameter);
            let value = if value.is_finite() {
                value
            } else {
                defaults.get(parameter)
            };
            *self.slot_mut(parameter) = parameter.bounds().clamp(value);
        }
        self
    }

    pub fn launch_angle_rad(&self) -> f64 {
        self.launch_angle_deg.to_radians()
    }
}
