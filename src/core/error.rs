use std::error::Error;
use std::fmt;

use crate::core::params::Parameter;

#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    UnknownParameter(String),
    NonFiniteValue { parameter: Parameter, value: f64 },
    InvalidScale { axis: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownParameter(name) => write!(
                f,
                "Unknown parameter '{name}'. Expected one of: {}.",
                Parameter::ALL
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            SimError::NonFiniteValue { parameter, value } => {
                write!(f, "Invalid {}: {value}. Expected a finite number.", parameter.name())
            }
            SimError::InvalidScale { axis, value } => write!(
                f,
                "Invalid {axis} scale: {value} px/m. Expected a finite number above zero."
            ),
        }
    }
}

impl Error for SimError {}
