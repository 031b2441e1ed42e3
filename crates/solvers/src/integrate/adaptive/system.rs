use std::cell::RefCell;

use ndarray::{Array1, ArrayD};
use ode_solvers::{DVector, System};
use tangent_core::{FieldError, Force, StateError};

/// Trajectory and failure recorded while the external solver runs.
#[derive(Debug, Default)]
pub(super) struct Record {
    pub(super) times: Vec<f64>,
    pub(super) states: Vec<DVector<f64>>,
    pub(super) error: Option<FieldError>,
}

/// Adapts a [`Force`] into an ODE solver system on flat vectors.
///
/// The solver always calls `system(t, y, dy)`; the state is handed to the
/// force as a flat `ndarray` vector and the derivative is copied back.
pub(super) struct FlatSystem<'s, 'f> {
    pub(super) force: &'s RefCell<Force<'f>>,
    pub(super) record: &'s RefCell<Record>,
}

impl FlatSystem<'_, '_> {
    fn derivative(&self, t: f64, y: &DVector<f64>) -> Result<ArrayD<f64>, FieldError> {
        let state = Array1::from_iter(y.iter().copied()).into_dyn();
        let derivative = self.force.borrow_mut().eval(&state, t)?;

        if derivative.shape() != state.shape() {
            return Err(StateError::ShapeMismatch {
                expected: state.shape().to_vec(),
                got: derivative.shape().to_vec(),
            }
            .into());
        }

        Ok(derivative)
    }
}

impl System<f64, DVector<f64>> for FlatSystem<'_, '_> {
    fn system(&self, t: f64, y: &DVector<f64>, dy: &mut DVector<f64>) {
        if self.record.borrow().error.is_some() {
            dy.fill(f64::NAN);
            return;
        }

        match self.derivative(t, y) {
            Ok(derivative) => {
                for (d, value) in dy.iter_mut().zip(derivative.iter()) {
                    *d = *value;
                }
            }
            Err(err) => {
                self.record.borrow_mut().error = Some(err);
                dy.fill(f64::NAN);
            }
        }
    }

    fn solout(&mut self, t: f64, y: &DVector<f64>, _dy: &DVector<f64>) -> bool {
        let mut record = self.record.borrow_mut();

        // Stop integration early if the force failed.
        if record.error.is_some() {
            return true;
        }

        if record.times.last() != Some(&t) {
            record.times.push(t);
            record.states.push(y.clone());
        }
        false
    }
}
