//! TOML description of a qubit, its noise environment, and solver options.
//!
//! Every table is optional; missing fields take their defaults.
//!
//! ```toml
//! units = "GHz"
//!
//! [params]
//! EJ = 15.0
//! dL = 0.6
//! flux = 0.5
//!
//! [noise]
//! T = 0.015
//!
//! [solver]
//! shift = 0.0
//! ```

use std::{ fs, path::Path };
use log::info;
use serde::{ Deserialize, Serialize };
use crate::{
    error::Cos2PhiResult,
    noise::NoiseParams,
    qubit::{ Cos2PhiParams, Cos2PhiQubit },
    units::FrequencyUnit,
};

/// Eigensolver settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Eigenvalues nearest this value are returned.
    pub shift: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cos2PhiConfig {
    pub units: FrequencyUnit,
    pub params: Cos2PhiParams,
    pub noise: NoiseParams,
    pub solver: SolverConfig,
}

impl Cos2PhiConfig {
    pub fn from_toml_str(s: &str) -> Cos2PhiResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a config file.
    pub fn load<P>(path: P) -> Cos2PhiResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        info!("loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Validate the parameters and construct a qubit with the configured
    /// units and shift.
    pub fn build_qubit(&self) -> Cos2PhiResult<Cos2PhiQubit> {
        Ok(
            Cos2PhiQubit::new(self.params)?
                .with_units(self.units)
                .with_shift(self.solver.shift)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Cos2PhiError;

    #[test]
    fn empty_config_is_default() {
        let config = Cos2PhiConfig::from_toml_str("").unwrap();
        assert_eq!(config, Cos2PhiConfig::default());
        assert_eq!(config.params, Cos2PhiParams::default_params());
        assert_eq!(config.noise.T, 0.015);
    }

    #[test]
    fn partial_tables() {
        let config = Cos2PhiConfig::from_toml_str(r#"
            units = "MHz"

            [params]
            EJ = 12.5
            ncut = 3
            truncated_dim = 4

            [noise]
            A_flux = 2e-6

            [solver]
            shift = -1.0
        "#).unwrap();
        assert_eq!(config.units, FrequencyUnit::MHz);
        assert_eq!(config.params.EJ, 12.5);
        assert_eq!(config.params.ncut, 3);
        assert_eq!(config.params.ECJ, 2.0);
        assert_eq!(config.noise.A_flux, 2e-6);
        assert_eq!(config.noise.A_ng, 1e-4);
        assert_eq!(config.solver.shift, -1.0);

        let qubit = config.build_qubit().unwrap();
        assert_eq!(qubit.units(), FrequencyUnit::MHz);
        assert_eq!(qubit.shift(), -1.0);
        assert_eq!(qubit.hilbertdim(), 7 * 30 * 7);
    }

    #[test]
    fn bad_input() {
        assert!(matches!(
            Cos2PhiConfig::from_toml_str("[params]\nEJ = \"big\""),
            Err(Cos2PhiError::Config(_))
        ));
        let config = Cos2PhiConfig::from_toml_str("[params]\ndL = 1.0").unwrap();
        assert!(matches!(
            config.build_qubit(),
            Err(Cos2PhiError::InvalidParameter { name: "dL", .. })
        ));
        assert!(matches!(
            Cos2PhiConfig::load("/nonexistent/cos2phi.toml"),
            Err(Cos2PhiError::Io(_))
        ));
    }
}
