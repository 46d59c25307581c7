use crate::SamplerError;
use opentelemetry::trace::SamplingDecision;
use std::fmt;
use std::str::FromStr;

/// The outcome of a sampling call.
///
/// Variants are ordered by how much telemetry survives the decision:
/// `Drop < Record < RecordAndPropagate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decision {
    /// The span is neither recorded nor propagated as sampled.
    Drop,
    /// The span is recorded locally, but the `sampled` flag is not set for
    /// downstream propagation.
    Record,
    /// The span is recorded and the `sampled` flag is propagated to children.
    RecordAndPropagate,
}

impl Decision {
    /// Returns `true` if the `sampled` flag should be set on the span context.
    pub fn is_sampled(self) -> bool {
        match self {
            Decision::RecordAndPropagate => true,
            Decision::Record | Decision::Drop => false,
        }
    }

    /// Returns `true` if the span should record events and be handed to span
    /// processors.
    pub fn records_events(self) -> bool {
        match self {
            Decision::Record | Decision::RecordAndPropagate => true,
            Decision::Drop => false,
        }
    }

    /// The canonical lower snake case name of this decision.
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Drop => "drop",
            Decision::Record => "record",
            Decision::RecordAndPropagate => "record_and_propagate",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Decision::Drop),
            "record" => Ok(Decision::Record),
            "record_and_propagate" => Ok(Decision::RecordAndPropagate),
            other => Err(SamplerError::InvalidDecision(format!(
                "{other:?} is not one of drop, record, record_and_propagate"
            ))),
        }
    }
}

impl From<SamplingDecision> for Decision {
    fn from(decision: SamplingDecision) -> Self {
        match decision {
            SamplingDecision::Drop => Decision::Drop,
            SamplingDecision::RecordOnly => Decision::Record,
            SamplingDecision::RecordAndSample => Decision::RecordAndPropagate,
        }
    }
}

impl From<Decision> for SamplingDecision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Drop => SamplingDecision::Drop,
            Decision::Record => SamplingDecision::RecordOnly,
            Decision::RecordAndPropagate => SamplingDecision::RecordAndSample,
        }
    }
}
