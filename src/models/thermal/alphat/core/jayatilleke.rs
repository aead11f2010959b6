use uom::si::{
    f64::{HeatTransfer, MassDensity, SpecificHeatCapacity, Velocity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    velocity::meter_per_second,
};

use super::{BoundaryFaceSample, SolutionParams, WallCoefficients, YPlusTherm, y_plus_therm};

/// Lower bound on the Prandtl number ratio fed to the `P` function.
const PRAT_FLOOR: f64 = 1e-8;

/// Jayatilleke's sublayer resistance `P` as a function of `Prat = Pr / Prt`.
///
/// ```text
/// P(Prat) = 9.24 (Prat^0.75 - 1) (1 + 0.28 exp(-0.007 Prat))
/// ```
///
/// Vanishes at `Prat = 1`. The ratio is floored at a small positive value and
/// the exponent argument is capped at [`SolutionParams::max_exp`].
#[must_use]
pub fn p_smooth(prat: f64, params: &SolutionParams) -> f64 {
    let prat = prat.max(PRAT_FLOOR);
    9.24 * (prat.powf(0.75) - 1.0) * (1.0 + 0.28 * params.capped_exp(-0.007 * prat))
}

/// Thermal sublayer state for one molecular Prandtl number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalSublayer {
    /// Molecular Prandtl number.
    pub prandtl: f64,

    /// Sublayer resistance `P(Pr / Prt)`.
    pub p: f64,

    /// Edge of the thermal sublayer.
    pub edge: YPlusTherm,
}

/// Jayatilleke thermal wall function.
///
/// Inside the thermal sublayer (`y+ ≤ y+_therm`) heat is carried by molecular
/// diffusion alone and the turbulent diffusivity is zero. Outside it the
/// dimensionless temperature follows the thermal log law
///
/// ```text
/// T+ = Prt (ln(E y+) / kappa + P)
/// ```
///
/// and the effective diffusivity is `nu y+ / T+`; the turbulent part is what
/// exceeds the laminar `alpha`. Both profiles meet at `y+_therm`, so the
/// result is continuous across the sublayer edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jayatilleke {
    coeffs: WallCoefficients,
    params: SolutionParams,
}

impl Jayatilleke {
    #[must_use]
    pub fn new(coeffs: WallCoefficients, params: SolutionParams) -> Self {
        Self { coeffs, params }
    }

    #[must_use]
    pub fn coefficients(&self) -> &WallCoefficients {
        &self.coeffs
    }

    #[must_use]
    pub fn params(&self) -> &SolutionParams {
        &self.params
    }

    /// Resolves the thermal sublayer for a molecular Prandtl number.
    #[must_use]
    pub fn thermal_sublayer(&self, prandtl: f64) -> ThermalSublayer {
        let prat = (prandtl / self.coeffs.prt()).max(PRAT_FLOOR);
        let p = p_smooth(prat, &self.params);
        let edge = y_plus_therm(prat, p, &self.coeffs, &self.params);

        ThermalSublayer { prandtl, p, edge }
    }

    /// Dimensionless wall temperature `T+ = nu y+ / alpha_eff` at the face.
    ///
    /// Equal to `min(Pr y+, Prt (ln(E y+) / kappa + P))` outside the sublayer
    /// and to `Pr y+` inside it, so it is continuous whichever root the
    /// sublayer solve settles on.
    ///
    /// Returns `None` when the molecular Prandtl number is not finite and
    /// positive, or when `T+` itself is not finite.
    #[must_use]
    pub fn t_plus(&self, sample: &BoundaryFaceSample) -> Option<f64> {
        let alpha_eff = self.effective_diffusivity(sample)?;
        let t_plus = sample.nu_w * sample.y_plus / alpha_eff;
        t_plus.is_finite().then_some(t_plus)
    }

    /// Effective thermal diffusivity `alpha + alphat` at the face.
    ///
    /// Never below the molecular `alpha` unless the face falls back to a
    /// negative previous value.
    ///
    /// Returns `None` when the molecular Prandtl number is not finite and positive.
    #[must_use]
    pub fn effective_diffusivity(&self, sample: &BoundaryFaceSample) -> Option<f64> {
        valid_prandtl(sample)?;
        Some(sample.alpha + self.face_alphat(sample))
    }

    /// Turbulent thermal diffusivity at a single face.
    ///
    /// - A face without turbulent viscosity is laminar: zero.
    /// - A non-positive Prandtl number is a domain error: zero.
    /// - Any other non-finite result falls back to the previous value.
    #[must_use]
    pub fn face_alphat(&self, sample: &BoundaryFaceSample) -> f64 {
        if sample.nut_w.is_nan() {
            return sample.prev_alphat;
        }
        if sample.nut_w <= 0.0 {
            return 0.0;
        }

        let prandtl = sample.prandtl();
        if !prandtl.is_finite() {
            return sample.prev_alphat;
        }
        if prandtl <= 0.0 {
            return 0.0;
        }

        let sublayer = self.thermal_sublayer(prandtl);
        if sample.y_plus <= sublayer.edge.value {
            return 0.0;
        }

        let t_plus = self.log_law_t_plus(&sublayer, sample.y_plus);
        let alphat = sample.nu_w * sample.y_plus / t_plus - sample.alpha;

        if alphat.is_finite() {
            alphat.max(0.0)
        } else {
            sample.prev_alphat
        }
    }

    /// Turbulent thermal diffusivity for every face, in input order.
    #[must_use]
    pub fn calc_alphat(&self, samples: &[BoundaryFaceSample]) -> Vec<f64> {
        samples
            .iter()
            .map(|sample| self.face_alphat(sample))
            .collect()
    }

    /// Wall heat transfer coefficient `rho cp u_tau / T+`.
    ///
    /// Returns `None` if `T+` cannot be evaluated or is not positive.
    #[must_use]
    pub fn heat_transfer_coefficient(&self, sample: &BoundaryFaceSample) -> Option<HeatTransfer> {
        let t_plus = self.t_plus(sample).filter(|t| *t > 0.0)?;

        let rho = MassDensity::new::<kilogram_per_cubic_meter>(sample.rho);
        let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(sample.cp);
        let u_tau = Velocity::new::<meter_per_second>(sample.u_tau);

        let h: HeatTransfer = rho * cp * u_tau / t_plus;
        Some(h)
    }

    fn log_law_t_plus(&self, sublayer: &ThermalSublayer, y_plus: f64) -> f64 {
        self.coeffs.prt() * ((self.coeffs.e() * y_plus).ln() / self.coeffs.kappa() + sublayer.p)
    }
}

fn valid_prandtl(sample: &BoundaryFaceSample) -> Option<f64> {
    let prandtl = sample.prandtl();
    (prandtl.is_finite() && prandtl > 0.0).then_some(prandtl)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::heat_transfer::watt_per_square_meter_kelvin;

    const NU: f64 = 1.5e-5;
    const PR: f64 = 0.7;

    fn sample(y_plus: f64) -> BoundaryFaceSample {
        BoundaryFaceSample {
            nu_w: NU,
            nut_w: 5.0 * NU,
            y_plus,
            u_tau: 0.05,
            rho: 1.2,
            cp: 1005.0,
            alpha: NU / PR,
            prev_alphat: 1e-4,
        }
    }

    #[test]
    fn p_vanishes_when_prandtl_numbers_coincide() {
        let params = SolutionParams::default();
        assert_relative_eq!(p_smooth(1.0, &params), 0.0);

        let model = Jayatilleke::default();
        let sublayer = model.thermal_sublayer(WallCoefficients::DEFAULT_PRT);
        assert_relative_eq!(sublayer.p, 0.0);
    }

    #[test]
    fn p_reference_values() {
        let params = SolutionParams::default();
        assert_relative_eq!(p_smooth(2.0, &params), 8.0392, epsilon = 1e-3);
        assert!(p_smooth(0.5, &params) < 0.0);
        assert!(p_smooth(0.0, &params).is_finite());
    }

    #[test]
    fn laminar_inside_thermal_sublayer() {
        let model = Jayatilleke::default();
        assert_relative_eq!(model.face_alphat(&sample(5.0)), 0.0);
        assert_relative_eq!(
            model.effective_diffusivity(&sample(5.0)).unwrap(),
            NU / PR
        );
    }

    #[test]
    fn continuous_across_sublayer_edge() {
        let model = Jayatilleke::default();
        let edge = model.thermal_sublayer(PR).edge.value;

        let below = sample(edge * (1.0 - 1e-9));
        let above = sample(edge * (1.0 + 1e-9));

        let alpha_below = model.effective_diffusivity(&below).unwrap();
        let alpha_above = model.effective_diffusivity(&above).unwrap();
        assert_relative_eq!(alpha_above, alpha_below, max_relative = 1e-6);

        assert_relative_eq!(model.face_alphat(&below), 0.0);
        assert!(model.face_alphat(&above) <= 1e-6 * NU / PR);
    }

    #[test]
    fn low_prandtl_diffusivity_is_continuous_and_never_below_molecular() {
        let model = Jayatilleke::default();

        for prandtl in [0.05, 0.17, 0.7] {
            let face = |y_plus| BoundaryFaceSample {
                alpha: NU / prandtl,
                ..sample(y_plus)
            };
            let edge = model.thermal_sublayer(prandtl).edge.value;

            let below = model.effective_diffusivity(&face(edge * (1.0 - 1e-9)));
            let above = model.effective_diffusivity(&face(edge * (1.0 + 1e-9)));
            assert_relative_eq!(above.unwrap(), below.unwrap(), max_relative = 1e-6);

            for y_plus in [1.0, 5.0, 11.0, 15.0, 30.0, 100.0, 300.0] {
                let alpha_eff = model.effective_diffusivity(&face(y_plus)).unwrap();
                assert!(alpha_eff >= NU / prandtl, "Pr = {prandtl}, y+ = {y_plus}");

                let t_plus = model.t_plus(&face(y_plus)).unwrap();
                assert!(t_plus > 0.0);
                assert!(
                    t_plus <= prandtl * y_plus * (1.0 + 1e-12),
                    "Pr = {prandtl}, y+ = {y_plus}, T+ = {t_plus}"
                );
            }
        }
    }

    #[test]
    fn approaches_turbulent_wall_function_far_from_wall() {
        let model = Jayatilleke::default();
        let y_plus = 100.0;
        let kappa = WallCoefficients::DEFAULT_KAPPA;
        let e = WallCoefficients::DEFAULT_E;

        // Log-law wall viscosity at this y+.
        let nut_w = NU * (y_plus * kappa / (e * y_plus).ln() - 1.0);
        let face = BoundaryFaceSample {
            nut_w,
            ..sample(y_plus)
        };

        let alphat = model.face_alphat(&face);
        let reference = nut_w / WallCoefficients::DEFAULT_PRT;

        assert!(alphat > 0.0);
        assert!(
            (0.8..1.3).contains(&(alphat / reference)),
            "alphat = {alphat}, nut/Prt = {reference}"
        );
    }

    #[test]
    fn masked_face_has_no_turbulent_diffusivity() {
        let model = Jayatilleke::default();
        let face = BoundaryFaceSample {
            nut_w: 0.0,
            ..sample(100.0)
        };
        assert_relative_eq!(model.face_alphat(&face), 0.0);
    }

    #[test]
    fn zero_prandtl_is_laminar() {
        let model = Jayatilleke::default();
        let face = BoundaryFaceSample {
            nu_w: 0.0,
            ..sample(100.0)
        };
        assert_relative_eq!(model.face_alphat(&face), 0.0);
    }

    #[test]
    fn non_finite_inputs_fall_back_to_previous_value() {
        let model = Jayatilleke::default();

        let nan_y_plus = sample(f64::NAN);
        assert_relative_eq!(model.face_alphat(&nan_y_plus), 1e-4);

        let zero_alpha = BoundaryFaceSample {
            alpha: 0.0,
            ..sample(100.0)
        };
        assert_relative_eq!(model.face_alphat(&zero_alpha), 1e-4);
    }

    #[test]
    fn extreme_prandtl_numbers_stay_finite() {
        let model = Jayatilleke::default();
        for prandtl in [1e-6, 1e6, 1e10] {
            let face = BoundaryFaceSample {
                alpha: NU / prandtl,
                ..sample(30.0)
            };
            let alphat = model.face_alphat(&face);
            assert!(alphat.is_finite(), "Pr = {prandtl}");
            assert!(alphat >= 0.0, "Pr = {prandtl}");
        }
    }

    #[test]
    fn one_output_per_face() {
        let model = Jayatilleke::default();
        let samples = [sample(1.0), sample(30.0), sample(300.0)];

        let alphat = model.calc_alphat(&samples);

        assert_eq!(alphat.len(), samples.len());
        assert_relative_eq!(alphat[0], 0.0);
        assert!(alphat[1] > 0.0);
        assert!(alphat[2] > alphat[1]);
    }

    #[test]
    fn laminar_heat_transfer_is_conduction() {
        let model = Jayatilleke::default();
        let face = sample(5.0);

        let h = model.heat_transfer_coefficient(&face).unwrap();

        let expected = face.rho * face.cp * face.u_tau / (PR * face.y_plus);
        assert_relative_eq!(
            h.get::<watt_per_square_meter_kelvin>(),
            expected,
            max_relative = 1e-12
        );
    }
}
