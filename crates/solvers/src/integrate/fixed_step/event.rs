use ndarray::ArrayD;

/// A time point reached by the fixed-step integrator.
///
/// The initial state is reported as step 0, before the first step is taken;
/// step `i` is the state after `i` steps, at time `i * dt`.
#[derive(Debug, Clone)]
pub struct Event {
    pub step: usize,
    pub time: f64,

    /// Structured state, same shape as the initial state.
    pub state: ArrayD<f64>,
}
