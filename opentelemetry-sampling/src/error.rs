//! Errors raised while building sampling results and samplers.
use thiserror::Error;

/// Errors returned when constructing a [`SamplingResult`] or a [`Sampler`].
///
/// Sampling itself never fails: every check happens when the result or the
/// sampler graph is built, so a misconfigured sampler is reported at startup
/// instead of degrading decisions at runtime.
///
/// [`SamplingResult`]: crate::SamplingResult
/// [`Sampler`]: crate::Sampler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SamplerError {
    /// The decision was missing or is not one of `drop`, `record` or
    /// `record_and_propagate`.
    #[error("invalid sampling decision: {0}")]
    InvalidDecision(String),

    /// A sampler was configured with parameters it cannot honor, such as a
    /// ratio outside of `[0.0, 1.0]` or an unknown sampler name.
    #[error("invalid sampler configuration: {0}")]
    InvalidConfiguration(String),
}

impl SamplerError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        SamplerError::InvalidConfiguration(message.into())
    }
}
