use ndarray::{Array1, ArrayD, ArrayViewD, Axis};

use crate::state::StateError;

/// Indicates how an integration terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Reached the requested end time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// A computed trajectory.
///
/// Every integrator reports its trajectory in the same layout: `states` has
/// time as its outermost axis, so `states[i]` is the state at `times[i]` and
/// has the shape of the state the integrator was given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Increasing time points, starting at 0.
    pub times: Array1<f64>,

    /// States at each time point, shape `(times.len(), ...state shape)`.
    pub states: ArrayD<f64>,

    /// Number of vector-field evaluations performed.
    ///
    /// Zero when the cost of a custom step function is unknown.
    pub evaluations: usize,

    /// Number of Jacobian evaluations performed (always zero).
    pub jacobian_evaluations: usize,

    /// How the integration terminated.
    pub status: Status,
}

impl Solution {
    /// Builds a solution from per-time-point states.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if the states differ in shape or
    /// if their count differs from the number of time points.
    pub fn from_trajectory(
        times: Array1<f64>,
        states: &[ArrayD<f64>],
        evaluations: usize,
        status: Status,
    ) -> Result<Self, StateError> {
        if times.len() != states.len() {
            return Err(StateError::ShapeMismatch {
                expected: vec![times.len()],
                got: vec![states.len()],
            });
        }

        let Some(first) = states.first() else {
            return Err(StateError::ShapeMismatch {
                expected: vec![1],
                got: vec![0],
            });
        };

        if let Some(odd) = states.iter().find(|s| s.shape() != first.shape()) {
            return Err(StateError::ShapeMismatch {
                expected: first.shape().to_vec(),
                got: odd.shape().to_vec(),
            });
        }

        let views: Vec<_> = states.iter().map(|s| s.view()).collect();
        let states = ndarray::stack(Axis(0), &views).map_err(|_| StateError::ShapeMismatch {
            expected: first.shape().to_vec(),
            got: first.shape().to_vec(),
        })?;

        Ok(Self {
            times,
            states,
            evaluations,
            jacobian_evaluations: 0,
            status,
        })
    }

    /// Returns `true` if the integration reached its end time.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Complete
    }

    /// Returns the number of time points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the trajectory holds no time points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the state at time point `index`.
    #[must_use]
    pub fn state_at(&self, index: usize) -> Option<ArrayViewD<'_, f64>> {
        if self.states.ndim() == 0 || index >= self.states.len_of(Axis(0)) {
            return None;
        }
        Some(self.states.index_axis(Axis(0), index))
    }

    /// Returns the state at the final time point.
    #[must_use]
    pub fn final_state(&self) -> Option<ArrayViewD<'_, f64>> {
        self.len().checked_sub(1).and_then(|last| self.state_at(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::arr1;

    fn two_point_solution() -> Solution {
        Solution::from_trajectory(
            arr1(&[0.0, 1.0]),
            &[
                arr1(&[0.0, 1.0]).into_dyn(),
                arr1(&[1.0, 1.0]).into_dyn(),
            ],
            1,
            Status::Complete,
        )
        .unwrap()
    }

    #[test]
    fn time_is_the_outermost_axis() {
        let solution = two_point_solution();

        assert_eq!(solution.states.shape(), &[2, 2]);
        assert_eq!(solution.len(), 2);
        assert_eq!(
            solution.state_at(0).unwrap(),
            arr1(&[0.0, 1.0]).into_dyn()
        );
        assert_eq!(
            solution.final_state().unwrap(),
            arr1(&[1.0, 1.0]).into_dyn()
        );
        assert!(solution.state_at(2).is_none());
        assert!(solution.is_success());
        assert_eq!(solution.jacobian_evaluations, 0);
    }

    #[test]
    fn rejects_ragged_states() {
        let err = Solution::from_trajectory(
            arr1(&[0.0, 1.0]),
            &[arr1(&[0.0, 1.0]).into_dyn(), arr1(&[1.0]).into_dyn()],
            1,
            Status::Complete,
        )
        .unwrap_err();

        assert_eq!(
            err,
            StateError::ShapeMismatch {
                expected: vec![2],
                got: vec![1],
            }
        );
    }

    #[test]
    fn rejects_count_mismatch() {
        let result = Solution::from_trajectory(
            arr1(&[0.0, 0.5, 1.0]),
            &[arr1(&[0.0]).into_dyn()],
            0,
            Status::StoppedByObserver,
        );

        assert!(result.is_err());
    }
}
