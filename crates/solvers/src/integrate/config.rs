use thiserror::Error;

/// Errors raised while configuring an integrator.
///
/// Configuration is validated eagerly, so an integrator that was built
/// successfully never fails for configuration reasons during integration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown stepper `{0}`, expected one of: euler, rk2, rk4")]
    UnknownStepper(String),

    #[error("unknown adaptive method `{0}`, expected one of: RK45, DOP853")]
    UnknownMethod(String),

    #[error("n_steps must be positive")]
    ZeroSteps,

    #[error("n_max must be positive")]
    ZeroMaxSteps,

    #[error("{name} must be finite and positive, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("{name} must be finite and positive, got {value}")]
    InvalidStepSize { name: &'static str, value: f64 },
}
