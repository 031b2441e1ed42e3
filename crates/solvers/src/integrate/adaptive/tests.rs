use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{arr1, arr2};
use ode_solvers::dop_shared::IntegrationError;
use tangent_core::{Convention, Force, Integrator, StateLayout, Status};
use thiserror::Error;

use super::{Adaptive, Error, Method, Options};
use crate::integrate::ConfigError;

#[derive(Debug, Error)]
#[error("negative position")]
struct NegativePosition;

/// dy/dt = slope, on a flat state.
fn linear(slope: f64) -> Force<'static> {
    Force::time_first(move |_, y| Ok(y.mapv(|_| slope)))
}

/// Harmonic oscillator on a flat state `[x, v]`.
fn oscillator() -> Force<'static> {
    Force::time_first(|_, y| Ok(arr1(&[y[[1]], -y[[0]]]).into_dyn()))
}

fn tight(method: Method) -> Adaptive {
    Adaptive::new(Options::new(method, 1e-10, 1e-12).unwrap())
}

#[test]
fn solves_a_linear_ode() {
    let mut integrator = Adaptive::default();

    let solution = integrator
        .integrate(linear(2.0), &arr1(&[4.0]).into_dyn(), 1.0)
        .unwrap();

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.times[0], 0.0);
    assert_relative_eq!(solution.times[solution.len() - 1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(solution.final_state().unwrap()[[0]], 6.0, epsilon = 1e-9);
    assert!(solution.evaluations > 0);
    assert_eq!(solution.jacobian_evaluations, 0);
}

#[test]
fn both_methods_track_a_harmonic_oscillator() {
    for method in Method::ALL {
        let mut integrator = tight(method);

        let solution = integrator
            .integrate(oscillator(), &arr1(&[1.0, 0.0]).into_dyn(), PI)
            .unwrap();
        let end = solution.final_state().unwrap();

        assert_relative_eq!(end[[0]], -1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(end[[1]], 0.0, epsilon = 1e-8);
    }
}

#[test]
fn structured_states_are_raveled() {
    let initial = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
    let mut seen_shapes = Vec::new();

    let force = Force::time_first(|_, y| {
        seen_shapes.push(y.shape().to_vec());
        Ok(y.mapv(|_| 0.0))
    });
    let solution = Adaptive::default().integrate(force, &initial, 1.0).unwrap();

    assert!(seen_shapes.iter().all(|shape| shape == &[4]));
    assert_eq!(solution.states.shape()[1..], [4]);
    assert_eq!(
        solution.final_state().unwrap(),
        arr1(&[1.0, 2.0, 3.0, 4.0]).into_dyn()
    );
}

#[test]
fn times_increase_from_zero() {
    let solution = tight(Method::Dopri5)
        .integrate(oscillator(), &arr1(&[1.0, 0.0]).into_dyn(), 2.0)
        .unwrap();

    assert!(solution.len() > 2);
    assert_eq!(solution.states.shape()[0], solution.len());
    for window in solution.times.windows(2) {
        assert!(window[1] > window[0]);
    }
}

#[test]
fn zero_end_time_returns_the_initial_state() {
    let solution = Adaptive::default()
        .integrate(linear(1.0), &arr1(&[3.0]).into_dyn(), 0.0)
        .unwrap();

    assert_eq!(solution.len(), 1);
    assert_eq!(solution.evaluations, 0);
    assert_eq!(solution.final_state().unwrap(), arr1(&[3.0]).into_dyn());
}

#[test]
fn vector_field_errors_propagate() {
    // x' = -1 from x = 0.5 reaches zero at t = 0.5.
    let force = Force::time_first(|_, y| {
        if y[[0]] < 0.0 {
            Err(NegativePosition.into())
        } else {
            Ok(y.mapv(|_| -1.0))
        }
    });

    let err = Adaptive::default()
        .integrate(force, &arr1(&[0.5]).into_dyn(), 1.0)
        .unwrap_err();

    match err {
        Error::Field(source) => assert!(source.downcast_ref::<NegativePosition>().is_some()),
        other => panic!("expected a field error, got {other:?}"),
    }
}

#[test]
fn non_finite_end_time_is_rejected() {
    let err = Adaptive::default()
        .integrate(linear(1.0), &arr1(&[0.0]).into_dyn(), f64::INFINITY)
        .unwrap_err();

    assert!(matches!(err, Error::EndTime(t) if t.is_infinite()));
}

#[test]
fn results_are_kept_only_when_requested() {
    let initial = arr1(&[0.0]).into_dyn();

    let mut integrator = Adaptive::default();
    integrator.integrate(linear(1.0), &initial, 1.0).unwrap();
    assert!(integrator.last_solution().is_none());

    let mut integrator = Adaptive::default().with_save_result(true);
    let first = integrator.integrate(linear(1.0), &initial, 1.0).unwrap();
    assert_eq!(integrator.last_solution(), Some(&first));

    let second = integrator.integrate(linear(-1.0), &initial, 1.0).unwrap();
    assert_eq!(integrator.last_solution(), Some(&second));
}

#[test]
fn options_are_validated() {
    assert_eq!(
        Options::named("LSODA", 1e-3, 1e-6).unwrap_err(),
        ConfigError::UnknownMethod("LSODA".to_owned())
    );
    assert_eq!(
        Options::new(Method::Dopri5, 0.0, 1e-6).unwrap_err(),
        ConfigError::InvalidTolerance {
            name: "rtol",
            value: 0.0
        }
    );
    assert!(Options::new(Method::Dopri5, 1e-3, f64::NAN).is_err());

    let options = Options::named("DOP853", 1e-8, 1e-10).unwrap();
    assert_eq!(options.method(), Method::Dop853);
    assert_eq!(options.method().to_string(), "DOP853");
    assert_eq!(Options::default().method().name(), "RK45");
}

#[test]
fn step_limit_failures_surface_as_solver_errors() {
    for method in Method::ALL {
        let options = Options::new(method, 1e-10, 1e-12)
            .unwrap()
            .with_max_steps(3)
            .unwrap();

        let err = Adaptive::new(options)
            .integrate(oscillator(), &arr1(&[1.0, 0.0]).into_dyn(), 10.0 * PI)
            .unwrap_err();

        assert!(
            matches!(err, Error::Solver(IntegrationError::MaxNumStepReached { .. })),
            "{method}: {err:?}"
        );
    }
}

#[test]
fn max_step_bounds_every_accepted_step() {
    let options = Options::default().with_max_step(0.01).unwrap();

    let solution = Adaptive::new(options)
        .integrate(linear(1.0), &arr1(&[0.0]).into_dyn(), 1.0)
        .unwrap();

    assert!(solution.len() >= 101);
    for window in solution.times.windows(2) {
        assert!(window[1] - window[0] <= 0.01 + 1e-12);
    }
    assert_relative_eq!(solution.final_state().unwrap()[[0]], 1.0, epsilon = 1e-9);
}

#[test]
fn initial_step_is_taken_as_given() {
    // A linear solution has no local error, so the first step is accepted.
    let options = Options::default().with_initial_step(1e-4).unwrap();

    let solution = Adaptive::new(options)
        .integrate(linear(2.0), &arr1(&[0.0]).into_dyn(), 1.0)
        .unwrap();

    assert_relative_eq!(solution.times[1], 1e-4, epsilon = 1e-15);
    assert_relative_eq!(solution.states[[1, 0]], 2e-4, epsilon = 1e-12);
}

#[test]
fn step_controls_are_validated() {
    let options = Options::default();

    assert_eq!(
        options.with_max_step(-1.0).unwrap_err(),
        ConfigError::InvalidStepSize {
            name: "h_max",
            value: -1.0
        }
    );
    assert!(options.with_initial_step(f64::INFINITY).is_err());
    assert_eq!(options.with_max_steps(0).unwrap_err(), ConfigError::ZeroMaxSteps);

    let options = options
        .with_max_step(0.5)
        .and_then(|o| o.with_initial_step(1e-3))
        .and_then(|o| o.with_max_steps(500))
        .unwrap();
    assert_eq!(options.max_step(), Some(0.5));
    assert_eq!(options.initial_step(), Some(1e-3));
    assert_eq!(options.max_steps(), Some(500));
    assert_eq!(Options::default().max_steps(), None);
}

#[test]
fn layout_is_raveled_and_time_first() {
    let layout = Adaptive::default().layout();

    assert_eq!(layout.state, StateLayout::Raveled);
    assert_eq!(layout.convention, Convention::TimeFirst);
}
