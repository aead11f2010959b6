use serde::{Deserialize, Serialize};

use crate::models::thermal::alphat::ConfigError;
use crate::support::constraint::{Constrained, StrictlyPositive};

/// Model coefficients of a thermal wall function.
///
/// Fixed for the lifetime of a boundary condition, configurable per patch.
/// All coefficients are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCoefficients {
    prt: Constrained<f64, StrictlyPositive>,
    cmu: Constrained<f64, StrictlyPositive>,
    kappa: Constrained<f64, StrictlyPositive>,
    e: Constrained<f64, StrictlyPositive>,
}

impl WallCoefficients {
    pub const DEFAULT_PRT: f64 = 0.85;
    pub const DEFAULT_CMU: f64 = 0.09;
    pub const DEFAULT_KAPPA: f64 = 0.41;
    pub const DEFAULT_E: f64 = 9.8;

    /// Creates validated coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCoefficient`] naming the first coefficient
    /// that is not strictly positive.
    pub fn new(prt: f64, cmu: f64, kappa: f64, e: f64) -> Result<Self, ConfigError> {
        let check = |name: &'static str, value: f64| {
            StrictlyPositive::new(value)
                .map_err(|source| ConfigError::InvalidCoefficient { name, source })
        };

        Ok(Self {
            prt: check("Prt", prt)?,
            cmu: check("Cmu", cmu)?,
            kappa: check("kappa", kappa)?,
            e: check("E", e)?,
        })
    }

    /// Turbulent Prandtl number.
    #[must_use]
    pub fn prt(&self) -> f64 {
        self.prt.get()
    }

    #[must_use]
    pub fn cmu(&self) -> f64 {
        self.cmu.get()
    }

    /// Von Kármán constant.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa.get()
    }

    /// Log-law coefficient.
    #[must_use]
    pub fn e(&self) -> f64 {
        self.e.get()
    }

    /// `Cmu^0.25`, the factor relating friction velocity to `sqrt(k)`.
    #[must_use]
    pub fn cmu25(&self) -> f64 {
        self.cmu().sqrt().sqrt()
    }
}

impl Default for WallCoefficients {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PRT,
            Self::DEFAULT_CMU,
            Self::DEFAULT_KAPPA,
            Self::DEFAULT_E,
        )
        .expect("default coefficients are strictly positive")
    }
}

/// Plain representation used when coefficients are read or written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct RawCoefficients {
    #[serde(rename = "Prt", default = "default_prt")]
    pub prt: f64,
    #[serde(rename = "Cmu", default = "default_cmu")]
    pub cmu: f64,
    #[serde(default = "default_kappa")]
    pub kappa: f64,
    #[serde(rename = "E", default = "default_e")]
    pub e: f64,
}

fn default_prt() -> f64 {
    WallCoefficients::DEFAULT_PRT
}

fn default_cmu() -> f64 {
    WallCoefficients::DEFAULT_CMU
}

fn default_kappa() -> f64 {
    WallCoefficients::DEFAULT_KAPPA
}

fn default_e() -> f64 {
    WallCoefficients::DEFAULT_E
}

impl Default for RawCoefficients {
    fn default() -> Self {
        WallCoefficients::default().into()
    }
}

impl From<WallCoefficients> for RawCoefficients {
    fn from(coeffs: WallCoefficients) -> Self {
        Self {
            prt: coeffs.prt(),
            cmu: coeffs.cmu(),
            kappa: coeffs.kappa(),
            e: coeffs.e(),
        }
    }
}

impl TryFrom<RawCoefficients> for WallCoefficients {
    type Error = ConfigError;

    fn try_from(raw: RawCoefficients) -> Result<Self, Self::Error> {
        Self::new(raw.prt, raw.cmu, raw.kappa, raw.e)
    }
}
