/// What an observer can ask of the fixed-step integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return the trajectory up to and including the observed time point,
    /// with [`tangent_core::Status::StoppedByObserver`].
    StopEarly,
}
