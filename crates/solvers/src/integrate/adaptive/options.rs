use std::{fmt, str::FromStr};

use crate::integrate::ConfigError;

/// Adaptive step-size methods provided by the external solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Dormand–Prince 5(4), named `RK45`.
    ///
    /// Seven field evaluations per attempted step. Enough for most geodesics
    /// at the default tolerances.
    #[default]
    Dopri5,

    /// Dormand–Prince 8(5,3), named `DOP853`.
    ///
    /// Pays off when the exponential map is needed to near machine precision,
    /// e.g. inside a shooting logarithm.
    Dop853,
}

impl Method {
    /// Every available method.
    pub const ALL: [Self; 2] = [Self::Dopri5, Self::Dop853];

    /// Returns the method's name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dopri5 => "RK45",
            Self::Dop853 => "DOP853",
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| ConfigError::UnknownMethod(name.to_owned()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options forwarded to the adaptive solver.
///
/// Step controls left unset fall back to the solver's own choices: the
/// whole horizon as the largest step, an estimated initial step, and
/// 100 000 steps at most.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    method: Method,
    rtol: f64,
    atol: f64,
    max_step: Option<f64>,
    initial_step: Option<f64>,
    max_steps: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            method: Method::default(),
            rtol: 1e-3,
            atol: 1e-6,
            max_step: None,
            initial_step: None,
            max_steps: None,
        }
    }
}

impl Options {
    /// Creates options with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] if a tolerance is not finite
    /// and positive.
    pub fn new(method: Method, rtol: f64, atol: f64) -> Result<Self, ConfigError> {
        check_tolerance("rtol", rtol)?;
        check_tolerance("atol", atol)?;
        Ok(Self {
            method,
            rtol,
            atol,
            ..Self::default()
        })
    }

    /// Creates options for the method called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownMethod`] for an unknown name, or
    /// [`ConfigError::InvalidTolerance`] for an invalid tolerance.
    pub fn named(name: &str, rtol: f64, atol: f64) -> Result<Self, ConfigError> {
        Self::new(name.parse()?, rtol, atol)
    }

    /// Returns the step-size method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn rtol(&self) -> f64 {
        self.rtol
    }

    /// Returns the absolute tolerance.
    #[must_use]
    pub fn atol(&self) -> f64 {
        self.atol
    }

    /// Caps the size of any single step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] if `h_max` is not finite and
    /// positive.
    pub fn with_max_step(mut self, h_max: f64) -> Result<Self, ConfigError> {
        check_step("h_max", h_max)?;
        self.max_step = Some(h_max);
        Ok(self)
    }

    /// Sets the size of the first attempted step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] if `h` is not finite and
    /// positive.
    pub fn with_initial_step(mut self, h: f64) -> Result<Self, ConfigError> {
        check_step("initial_step", h)?;
        self.initial_step = Some(h);
        Ok(self)
    }

    /// Limits the number of steps before the solver gives up.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxSteps`] if `n_max` is zero.
    pub fn with_max_steps(mut self, n_max: u32) -> Result<Self, ConfigError> {
        if n_max == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        self.max_steps = Some(n_max);
        Ok(self)
    }

    /// Returns the step-size cap, if set.
    #[must_use]
    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    /// Returns the initial step size, if set.
    #[must_use]
    pub fn initial_step(&self) -> Option<f64> {
        self.initial_step
    }

    /// Returns the step limit, if set.
    #[must_use]
    pub fn max_steps(&self) -> Option<u32> {
        self.max_steps
    }
}

fn check_step(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidStepSize { name, value })
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}
