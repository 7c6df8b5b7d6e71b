//! Conversion between the frequency units used for system energies and
//! standard units (Hz, or rad/s for angular frequencies).

use serde::{ Deserialize, Serialize };

/// Unit in which all system energies are expressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[default]
    GHz,
    MHz,
    #[serde(rename = "kHz")]
    KHz,
    Hz,
}

impl FrequencyUnit {
    /// Multiplier taking a value in `self` to Hz.
    pub fn factor(self) -> f64 {
        match self {
            Self::GHz => 1e9,
            Self::MHz => 1e6,
            Self::KHz => 1e3,
            Self::Hz => 1.0,
        }
    }

    /// Convert a (possibly angular) frequency in system units to standard
    /// units.
    pub fn to_standard_units(self, value: f64) -> f64 { value * self.factor() }

    /// Convert a (possibly angular) frequency in standard units to system
    /// units.
    pub fn from_standard_units(self, value: f64) -> f64 {
        value / self.factor()
    }
}

impl std::fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GHz => write!(f, "GHz"),
            Self::MHz => write!(f, "MHz"),
            Self::KHz => write!(f, "kHz"),
            Self::Hz => write!(f, "Hz"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_standard_units() {
        let w = 2.0 * std::f64::consts::PI * 5.0;
        let std_w = FrequencyUnit::GHz.to_standard_units(w);
        assert!((std_w - w * 1e9).abs() < 1e-3);
        assert!((FrequencyUnit::MHz.from_standard_units(2.5e6) - 2.5).abs() < 1e-15);
        assert_eq!(FrequencyUnit::default(), FrequencyUnit::GHz);
        assert_eq!(FrequencyUnit::KHz.to_string(), "kHz");
    }
}
