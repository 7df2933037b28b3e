//! Integration tests for PIN estimation.
//!
//! Purpose
//! -------
//! - Validate the end-to-end PIN pipeline: from raw buy/sell counts or
//!   classified trades, through EKOP estimation, to the PIN and classical
//!   standard errors.
//!
//! Coverage
//! --------
//! - `pin::core::VolumeSeries`:
//!   - Construction from counts and from tick-test classified trades.
//! - `pin::models::ekop`:
//!   - `estimate_pin` on short and information-rich samples.
//!   - `EKOPModel` with tuned `MLEOptions`, `ensure_converged` and
//!     `standard_errors`.
//! - `measures::trade_direction`:
//!   - Tick-test output feeding period counts.
//!
//! Exclusions
//! ----------
//! - Likelihood formula and gradient checks; these are covered by unit
//!   tests next to the likelihood.
//! - Python bindings.
use rust_microstructure::{
    measures::trade_direction::{TradeDirection, tick_direction},
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    pin::{
        core::{data::VolumeSeries, likelihood::DegeneratePolicy, options::PinOptions, params::PinParams},
        errors::PinError,
        models::ekop::{EKOPModel, estimate_pin},
    },
};

const INFO_BUYS: [u64; 10] = [10, 11, 9, 30, 32, 10, 9, 11, 10, 12];
const INFO_SELLS: [u64; 10] = [10, 9, 11, 10, 11, 29, 31, 10, 12, 9];

/// Purpose
/// -------
/// Build trade prices (in ticks) and period indices whose tick-test
/// classification reproduces the given per-period counts.
///
/// Construction
/// ------------
/// - A leading trade in period 0 is always `Undetermined` under the tick
///   test and therefore does not count.
/// - Each buy moves the price up one tick, each sell down one tick, so
///   every subsequent trade has a non-zero tick.
fn synthetic_trades(buys: &[u64], sells: &[u64]) -> (Vec<f64>, Vec<usize>) {
    let mut price = 10_000.0;
    let mut prices = vec![price];
    let mut periods = vec![0_usize];
    for (period, (&b, &s)) in buys.iter().zip(sells).enumerate() {
        for _ in 0..b {
            price += 1.0;
            prices.push(price);
            periods.push(period);
        }
        for _ in 0..s {
            price -= 1.0;
            prices.push(price);
            periods.push(period);
        }
    }
    (prices, periods)
}

#[test]
// Purpose
// -------
// The short three-period example yields a PIN strictly inside (0, 1).
//
// Given
// -----
// - buys = [5, 10, 15], sells = [6, 9, 14], default options.
//
// Expect
// ------
// - `0 < pin < 1`, finite fitted parameters inside their box.
fn short_sample_pin_is_strictly_inside_unit_interval() {
    let estimate = estimate_pin(&[5, 10, 15], &[6, 9, 14]).expect("estimation should succeed");

    assert!(estimate.pin > 0.0 && estimate.pin < 1.0, "pin = {}", estimate.pin);
    let p = estimate.fit.params;
    assert!((0.0..=1.0).contains(&p.alpha));
    assert!([p.mu, p.eps_b, p.eps_s].iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
// Purpose
// -------
// Estimation is deterministic: repeated calls on the same input agree.
//
// Given
// -----
// - The information sample estimated twice with default options.
//
// Expect
// ------
// - Identical PIN and parameters.
fn repeated_estimation_is_deterministic() {
    let first = estimate_pin(&INFO_BUYS, &INFO_SELLS).expect("first estimate");
    let second = estimate_pin(&INFO_BUYS, &INFO_SELLS).expect("second estimate");

    assert_eq!(first.pin, second.pin);
    assert_eq!(first.fit.params, second.fit.params);
}

#[test]
// Purpose
// -------
// Invalid inputs fail before optimization.
//
// Given
// -----
// - Unequal lengths; empty series.
//
// Expect
// ------
// - `LengthMismatch { buys: 2, sells: 1 }` and `EmptySeries`.
fn invalid_inputs_are_rejected() {
    assert_eq!(
        estimate_pin(&[1, 2], &[1]).expect_err("length mismatch"),
        PinError::LengthMismatch { buys: 2, sells: 1 }
    );
    assert_eq!(estimate_pin(&[], &[]).expect_err("empty"), PinError::EmptySeries);
}

#[test]
// Purpose
// -------
// Tick-test classified trades aggregate to the same counts and the same
// estimate as the raw counts.
//
// Given
// -----
// - Synthetic tick prices built from the information sample.
//
// Expect
// ------
// - The first trade is `Undetermined`; aggregated buys/sells equal the
//   sample; PIN from both routes is identical.
fn classified_trades_reproduce_count_based_estimate() {
    // Arrange
    let (prices, periods) = synthetic_trades(&INFO_BUYS, &INFO_SELLS);
    let directions = tick_direction(&prices).expect("valid prices");
    assert_eq!(directions[0], TradeDirection::Undetermined);

    // Act
    let series =
        VolumeSeries::from_classified_trades(&periods, &directions).expect("classified series");
    let from_trades = EKOPModel::default().estimate(&series).expect("estimate from trades");
    let from_counts = estimate_pin(&INFO_BUYS, &INFO_SELLS).expect("estimate from counts");

    // Assert
    assert_eq!(series.buys(), &INFO_BUYS);
    assert_eq!(series.sells(), &INFO_SELLS);
    assert_eq!(from_trades.pin, from_counts.pin);
}

#[test]
// Purpose
// -------
// A tuned configuration converges on the information sample and yields
// usable standard errors.
//
// Given
// -----
// - `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 500`, Moré–Thuente
//   line search, L-BFGS memory 10, start (0.5, 10, 5, 5).
//
// Expect
// ------
// - `ensure_converged` succeeds; PIN ≈ 0.28.
// - Four finite, positive standard errors.
fn tuned_options_converge_and_give_standard_errors() {
    // Arrange
    let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(500)).expect("valid tolerances");
    let mle_opts =
        MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(10), None).expect("options");
    let guess = PinParams::new(0.5, 10.0, 5.0, 5.0).expect("valid guess");
    let options =
        PinOptions::new(guess, mle_opts, DegeneratePolicy::SkipDegeneratePeriod).expect("options");
    let model = EKOPModel::new(options);
    let data = VolumeSeries::new(INFO_BUYS.to_vec(), INFO_SELLS.to_vec()).expect("series");

    // Act
    let estimate = model.estimate(&data).expect("estimate").ensure_converged().expect("converged");
    let se = model.standard_errors(&estimate.fit, &data).expect("standard errors");

    // Assert
    assert!((estimate.pin - 0.2832).abs() < 0.01, "pin = {}", estimate.pin);
    assert_eq!(se.len(), 4);
    assert!(se.iter().all(|s| s.is_finite() && *s > 0.0), "se = {se:?}");
}

#[test]
// Purpose
// -------
// An initial guess outside the parameter box is rejected up front.
//
// Given
// -----
// - α = 1.5.
//
// Expect
// ------
// - `InvalidParam { name: "alpha", .. }`.
fn out_of_box_initial_guess_is_rejected() {
    let err = PinParams::new(1.5, 1.0, 1.0, 1.0).expect_err("alpha outside [0, 1]");

    assert!(matches!(err, PinError::InvalidParam { name: "alpha", .. }));
}
