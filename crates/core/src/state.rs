//! Structured and raveled integration states.
//!
//! A geodesic is integrated as a first-order system in position and velocity.
//! The *structured* layout stacks the two halves along a new leading axis,
//! giving shape `(2, ...point_shape)`. The *raveled* layout is the row-major
//! flattening of that stack: all position entries, then all velocity entries.
//!
//! ```text
//! structured: [[p0, p1, p2], [v0, v1, v2]]   shape (2, 3)
//! raveled:    [p0, p1, p2, v0, v1, v2]       shape (6,)
//! ```

use ndarray::{Array1, ArrayD, ArrayViewD, Axis, IxDyn};
use thiserror::Error;

/// Errors produced when building or splitting integration states.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("raveled state has length {len}, expected {expected}")]
    Length { len: usize, expected: usize },

    #[error("structured state must have a leading axis of length 2, got shape {0:?}")]
    NotStructured(Vec<usize>),
}

/// Stacks a position and a velocity into a structured state.
///
/// # Errors
///
/// Returns [`StateError::ShapeMismatch`] if the two arrays differ in shape.
pub fn stack(
    position: ArrayViewD<'_, f64>,
    velocity: ArrayViewD<'_, f64>,
) -> Result<ArrayD<f64>, StateError> {
    let mismatch = || StateError::ShapeMismatch {
        expected: position.shape().to_vec(),
        got: velocity.shape().to_vec(),
    };

    if position.shape() != velocity.shape() {
        return Err(mismatch());
    }

    ndarray::stack(Axis(0), &[position.view(), velocity.view()]).map_err(|_| mismatch())
}

/// Flattens a state of any layout into a single vector, in logical order.
#[must_use]
pub fn ravel(state: &ArrayD<f64>) -> Array1<f64> {
    state.iter().copied().collect()
}

/// Rebuilds a structured state from a raveled one.
///
/// `point_shape` is the shape of one position (or of a batch of positions),
/// so the result has shape `(2, ...point_shape)`.
///
/// # Errors
///
/// Returns [`StateError::Length`] if `flat` does not hold exactly two points.
pub fn unravel(flat: ArrayViewD<'_, f64>, point_shape: &[usize]) -> Result<ArrayD<f64>, StateError> {
    let expected = 2 * point_shape.iter().product::<usize>();
    if flat.len() != expected {
        return Err(StateError::Length {
            len: flat.len(),
            expected,
        });
    }

    let mut shape = Vec::with_capacity(point_shape.len() + 1);
    shape.push(2);
    shape.extend_from_slice(point_shape);

    ArrayD::from_shape_vec(IxDyn(&shape), flat.iter().copied().collect()).map_err(|_| {
        StateError::Length {
            len: flat.len(),
            expected,
        }
    })
}

/// Returns the position half of a structured state.
///
/// # Errors
///
/// Returns [`StateError::NotStructured`] if the leading axis is not of length 2.
pub fn position<'a>(structured: &ArrayViewD<'a, f64>) -> Result<ArrayViewD<'a, f64>, StateError> {
    if structured.ndim() == 0 || structured.len_of(Axis(0)) != 2 {
        return Err(StateError::NotStructured(structured.shape().to_vec()));
    }
    Ok(structured.clone().index_axis_move(Axis(0), 0))
}

/// Returns the position half of a raveled state, shaped as `point_shape`.
///
/// # Errors
///
/// Returns [`StateError::Length`] if `flat` does not hold exactly two points.
pub fn raveled_position(
    flat: ArrayViewD<'_, f64>,
    point_shape: &[usize],
) -> Result<ArrayD<f64>, StateError> {
    let structured = unravel(flat, point_shape)?;
    Ok(structured.index_axis_move(Axis(0), 0))
}
