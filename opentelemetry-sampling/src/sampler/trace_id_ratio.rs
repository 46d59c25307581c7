use crate::{Decision, SamplerError};
use opentelemetry::{otel_debug, trace::TraceId};

/// Samples a fixed fraction of traces.
///
/// The decision is derived from the trace id alone, so every span of a trace
/// gets the same decision, in every process, without coordination. The low 64
/// bits of the trace id (bytes 8 to 15, big-endian) are shifted right by one
/// and the resulting 63-bit value is compared against `ratio * 2^63`, computed
/// once at construction. A ratio of `0.0` never samples and a ratio of `1.0`
/// always samples.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceIdRatioBased {
    ratio: f64,
    upper_bound: u64,
}

impl TraceIdRatioBased {
    /// Create a sampler for `ratio`.
    ///
    /// Fails with [`SamplerError::InvalidConfiguration`] if `ratio` is NaN or
    /// outside of `[0.0, 1.0]`.
    pub fn new(ratio: f64) -> Result<Self, SamplerError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(SamplerError::invalid_configuration(format!(
                "trace id ratio must be within [0.0, 1.0], got {ratio}"
            )));
        }
        // Folds -0.0 into 0.0.
        let ratio = ratio + 0.0;

        let upper_bound = if ratio >= 1.0 {
            u64::MAX
        } else {
            (ratio * (1u64 << 63) as f64) as u64
        };
        otel_debug!(
            name: "Sampler.TraceIdRatioBased.Built",
            ratio = ratio,
            upper_bound = upper_bound
        );

        Ok(TraceIdRatioBased { ratio, upper_bound })
    }

    /// The configured sampling ratio.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub(crate) fn decide(&self, trace_id: TraceId) -> Decision {
        if trace_id_fraction(trace_id) < self.upper_bound {
            Decision::RecordAndPropagate
        } else {
            Decision::Drop
        }
    }

    pub(crate) fn description(&self) -> String {
        format!("TraceIdRatioBased{{{:.6}}}", self.ratio)
    }
}

/// The low 64 bits of the trace id, as a value in `[0, 2^63)`.
fn trace_id_fraction(trace_id: TraceId) -> u64 {
    // Truncation keeps bytes 8..16 of the big-endian id.
    (u128::from_be_bytes(trace_id.to_bytes()) as u64) >> 1
}
