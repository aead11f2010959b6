use log::debug;

use super::{SolutionParams, WallCoefficients};

/// Starting guess for the Newton iteration: the edge of the viscous sublayer.
const INITIAL_GUESS: f64 = 11.0;

/// Iterates below this value have left the domain of `ln(E y+)`.
const V_SMALL: f64 = 1e-300;

/// Restart point, in multiples of the minimum of `f` at `y+ = 1 / (kappa Prat)`.
///
/// `f` is convex, so Newton started right of its minimum converges
/// monotonically to the outer root.
const RESTART_FACTOR: f64 = 2.0;

/// Dimensionless thickness of the thermal sublayer at one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YPlusTherm {
    /// `y+` at the edge of the thermal sublayer.
    pub value: f64,

    /// Newton iterations performed, across a restart if one was needed.
    pub iterations: usize,

    /// Whether the Newton step fell below the tolerance.
    ///
    /// An unconverged solve still returns its last finite iterate.
    pub converged: bool,
}

/// Solves for `y+` at the edge of the thermal sublayer.
///
/// The edge is where the linear sublayer profile `T+ = Pr y+` meets the
/// log-law profile `T+ = Prt (ln(E y+) / kappa + P)`, i.e. the root of
///
/// ```text
/// f(y+)  = y+ - (ln(E y+) / kappa + P) / Prat
/// f'(y+) = 1 - 1 / (y+ kappa Prat)
/// ```
///
/// Newton iteration starts from `y+ = 11` and stops once the step is below
/// [`SolutionParams::tolerance`] or after [`SolutionParams::max_iters`]
/// iterations. Non-convergence is not an error: the last finite iterate is kept.
///
/// For `Prat` below about 0.22 the start lies left of the minimum of `f`,
/// where the slope is negative. If a step then leaves the domain, the
/// iteration restarts once at `2 / (kappa Prat)` and converges to the outer
/// root. The restart shares the iteration budget.
#[must_use]
pub fn y_plus_therm(
    prat: f64,
    p: f64,
    coeffs: &WallCoefficients,
    params: &SolutionParams,
) -> YPlusTherm {
    let kappa = coeffs.kappa();
    let e = coeffs.e();

    let mut ypt = INITIAL_GUESS;
    let mut restarted = false;

    for iteration in 1..=params.max_iters() {
        let f = ypt - ((e * ypt).ln() / kappa + p) / prat;
        let df = 1.0 - 1.0 / (ypt * kappa * prat);
        let next = ypt - f / df;

        if !next.is_finite() || next < V_SMALL {
            let restart = RESTART_FACTOR / (kappa * prat);
            if !restarted && restart.is_finite() {
                debug!(
                    "thermal sublayer solve left the domain at Prat = {prat}, \
                     restarting from y+ = {restart}"
                );
                restarted = true;
                ypt = restart;
                continue;
            }

            debug!("thermal sublayer solve left the domain at Prat = {prat}, keeping y+ = {ypt}");
            return YPlusTherm {
                value: ypt,
                iterations: iteration,
                converged: false,
            };
        }

        let step = (next - ypt).abs();
        ypt = next;

        if step < params.tolerance() {
            return YPlusTherm {
                value: ypt,
                iterations: iteration,
                converged: true,
            };
        }
    }

    debug!(
        "thermal sublayer solve did not converge in {} iterations at Prat = {prat}",
        params.max_iters()
    );

    YPlusTherm {
        value: ypt,
        iterations: params.max_iters(),
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use twine_core::{EquationProblem, Model};
    use twine_solvers::equation::bisection;

    use crate::models::thermal::alphat::core::p_smooth;

    fn solve(prat: f64) -> YPlusTherm {
        let params = SolutionParams::default();
        y_plus_therm(
            prat,
            p_smooth(prat, &params),
            &WallCoefficients::default(),
            &params,
        )
    }

    /// Passes `y+` straight through so the bisection snapshot exposes it.
    struct Identity;

    impl Model for Identity {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(*input)
        }
    }

    /// Residual of the laminar/log-law profile intersection.
    struct SublayerEdge {
        prat: f64,
        p: f64,
        coeffs: WallCoefficients,
    }

    impl EquationProblem<1> for SublayerEdge {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
            Ok(x[0])
        }

        fn residuals(
            &self,
            input: &Self::Input,
            _output: &Self::Output,
        ) -> Result<[f64; 1], Self::Error> {
            let y = *input;
            let log_law = (self.coeffs.e() * y).ln() / self.coeffs.kappa() + self.p;
            Ok([y - log_law / self.prat])
        }
    }

    fn bisect(prat: f64) -> f64 {
        let params = SolutionParams::default();
        let problem = SublayerEdge {
            prat,
            p: p_smooth(prat, &params),
            coeffs: WallCoefficients::default(),
        };

        let solution = bisection::solve(
            &Identity,
            &problem,
            [1.0, 100.0],
            &bisection::Config {
                max_iters: 200,
                x_abs_tol: 1e-12,
                x_rel_tol: 0.0,
                residual_tol: 1e-12,
            },
            |event: &bisection::Event<'_, _, _>| {
                if event.result().is_err() {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )
        .expect("bracket contains the sublayer edge");

        assert!(solution.status == bisection::Status::Converged);
        solution.snapshot.output
    }

    #[test]
    fn unit_prandtl_ratio_matches_log_law_intersection() {
        let result = solve(1.0);

        assert!(result.converged);
        assert_relative_eq!(result.value, 11.5298, epsilon = 1e-3);
    }

    #[test]
    fn agrees_with_bisection() {
        for prat in [0.5, 1.0, 2.0, 5.0, 10.0] {
            assert_relative_eq!(solve(prat).value, bisect(prat), epsilon = 1e-6);
        }
    }

    #[test]
    fn converges_within_iteration_cap() {
        let max_iters = SolutionParams::default().max_iters();
        for prat in [0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 100.0] {
            let result = solve(prat);
            assert!(result.converged, "no convergence at Prat = {prat}");
            assert!(result.iterations <= max_iters);
        }
    }

    #[test]
    fn thins_monotonically_as_prandtl_ratio_grows() {
        let edges: Vec<f64> = [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|prat| solve(prat).value)
            .collect();

        for pair in edges.windows(2) {
            assert!(pair[1] < pair[0], "edges not monotonic: {edges:?}");
        }
    }

    #[test]
    fn pathological_ratios_stay_finite() {
        for prat in [1e-8, 1e8, 1e12] {
            let result = solve(prat);
            assert!(result.value.is_finite(), "Prat = {prat}");
            assert!(result.value > 0.0, "Prat = {prat}");
        }
    }

    #[test]
    fn negative_first_step_restarts_on_outer_root() {
        let coeffs = WallCoefficients::default();
        for prat in [0.15, 0.16, 0.18, 0.2, 0.22] {
            let result = solve(prat);
            assert!(result.converged, "no convergence at Prat = {prat}");
            assert!(result.iterations <= SolutionParams::default().max_iters());

            // Right of the minimum of f, so the outer root.
            assert!(result.value > 1.0 / (coeffs.kappa() * prat), "Prat = {prat}");

            let p = p_smooth(prat, &SolutionParams::default());
            let log_law = (coeffs.e() * result.value).ln() / coeffs.kappa() + p;
            let residual = result.value - log_law / prat;
            assert!(residual.abs() < 1e-6, "residual {residual} at Prat = {prat}");
        }
    }

    #[test]
    fn iteration_cap_keeps_last_iterate() {
        let params = SolutionParams::new(50.0, 1e-4, 1).unwrap();
        let coeffs = WallCoefficients::default();

        let result = y_plus_therm(10.0, p_smooth(10.0, &params), &coeffs, &params);

        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!(result.value.is_finite());
        assert!(result.value < INITIAL_GUESS);
    }
}
