use crate::{Decision, SamplerError, SamplingAttributes};
use opentelemetry::trace::TraceState;
use opentelemetry::KeyValue;

/// The outcome of [`ShouldSample::should_sample`].
///
/// A result pairs a [`Decision`] with the attributes the sampler wants added
/// to the span, and the trace state that should be propagated with it. It is
/// immutable once built; `is_sampled` and `records_events` are always derived
/// from the stored decision.
///
/// [`ShouldSample::should_sample`]: crate::ShouldSample::should_sample
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingResult {
    decision: Decision,
    attributes: SamplingAttributes,
    trace_state: TraceState,
}

impl SamplingResult {
    /// A result with no attributes and an empty trace state.
    pub fn new(decision: Decision) -> Self {
        SamplingResult {
            decision,
            attributes: SamplingAttributes::default(),
            trace_state: TraceState::default(),
        }
    }

    pub(crate) fn from_parts(
        decision: Decision,
        attributes: SamplingAttributes,
        trace_state: TraceState,
    ) -> Self {
        SamplingResult {
            decision,
            attributes,
            trace_state,
        }
    }

    /// Start building a result.
    pub fn builder() -> SamplingResultBuilder {
        SamplingResultBuilder::default()
    }

    /// The sampling decision.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Attributes to add to the span.
    pub fn attributes(&self) -> &SamplingAttributes {
        &self.attributes
    }

    /// Trace state to propagate with the span context.
    pub fn trace_state(&self) -> &TraceState {
        &self.trace_state
    }

    /// Returns `true` if the decision is [`Decision::RecordAndPropagate`].
    pub fn is_sampled(&self) -> bool {
        self.decision.is_sampled()
    }

    /// Returns `true` if the decision is [`Decision::Record`] or
    /// [`Decision::RecordAndPropagate`].
    pub fn records_events(&self) -> bool {
        self.decision.records_events()
    }
}

impl From<Decision> for SamplingResult {
    fn from(decision: Decision) -> Self {
        SamplingResult::new(decision)
    }
}

impl From<SamplingResult> for opentelemetry::trace::SamplingResult {
    fn from(result: SamplingResult) -> Self {
        opentelemetry::trace::SamplingResult {
            decision: result.decision.into(),
            attributes: result.attributes.as_slice().to_vec(),
            trace_state: result.trace_state,
        }
    }
}

/// Builder for [`SamplingResult`].
///
/// A decision must be provided before calling [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SamplingResultBuilder {
    decision: Option<Decision>,
    attributes: Option<SamplingAttributes>,
    trace_state: TraceState,
}

impl SamplingResultBuilder {
    /// Set the decision.
    pub fn with_decision(self, decision: Decision) -> Self {
        SamplingResultBuilder {
            decision: Some(decision),
            ..self
        }
    }

    /// Set the attributes. The iterator is consumed and copied into the
    /// result.
    pub fn with_attributes<I>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        SamplingResultBuilder {
            attributes: Some(attributes.into_iter().collect()),
            ..self
        }
    }

    /// Set the attributes if present. `None` leaves the result with no
    /// attributes.
    pub fn with_optional_attributes<I>(self, attributes: Option<I>) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        SamplingResultBuilder {
            attributes: attributes.map(|attributes| attributes.into_iter().collect()),
            ..self
        }
    }

    /// Set the trace state to propagate.
    pub fn with_trace_state(self, trace_state: TraceState) -> Self {
        SamplingResultBuilder {
            trace_state,
            ..self
        }
    }

    /// Build the result.
    ///
    /// Fails with [`SamplerError::InvalidDecision`] if no decision was set.
    pub fn build(self) -> Result<SamplingResult, SamplerError> {
        let decision = self.decision.ok_or_else(|| {
            SamplerError::InvalidDecision("a sampling result requires a decision".into())
        })?;
        Ok(SamplingResult::from_parts(
            decision,
            self.attributes.unwrap_or_default(),
            self.trace_state,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::SamplingDecision;
    use opentelemetry::Key;
    use rstest::rstest;

    #[rstest]
    #[case(Decision::Drop)]
    #[case(Decision::Record)]
    #[case(Decision::RecordAndPropagate)]
    fn keeps_decision(#[case] decision: Decision) {
        assert_eq!(SamplingResult::new(decision).decision(), decision);
        let built = SamplingResult::builder()
            .with_decision(decision)
            .build()
            .unwrap();
        assert_eq!(built.decision(), decision);
    }

    #[test]
    fn attributes_empty_by_default() {
        let result = SamplingResult::new(Decision::Record);
        assert!(result.attributes().is_empty());

        let result = SamplingResult::builder()
            .with_decision(Decision::Record)
            .build()
            .unwrap();
        assert_eq!(result.attributes(), &SamplingAttributes::empty());
    }

    #[test]
    fn attributes_empty_when_absent() {
        let result = SamplingResult::builder()
            .with_decision(Decision::Record)
            .with_optional_attributes(None::<Vec<KeyValue>>)
            .build()
            .unwrap();
        assert!(result.attributes().is_empty());
    }

    #[test]
    fn attributes_reflect_values_passed_in() {
        let attributes = vec![KeyValue::new("foo", "bar"), KeyValue::new("bar", "baz")];
        let result = SamplingResult::builder()
            .with_decision(Decision::Record)
            .with_attributes(attributes.clone())
            .build()
            .unwrap();

        let expected: SamplingAttributes = attributes.into_iter().collect();
        assert_eq!(result.attributes(), &expected);
        assert_eq!(result.attributes().as_slice()[0], KeyValue::new("foo", "bar"));
    }

    #[test]
    fn attributes_are_copied_on_build() {
        let mut attributes = vec![KeyValue::new("foo", "bar")];
        let result = SamplingResult::builder()
            .with_decision(Decision::Record)
            .with_attributes(attributes.clone())
            .build()
            .unwrap();

        attributes.push(KeyValue::new("late", "value"));
        attributes[0] = KeyValue::new("foo", "changed");

        assert_eq!(result.attributes().len(), 1);
        assert_eq!(
            result.attributes().get(&Key::new("foo")),
            Some(&"bar".into())
        );
        assert!(result.attributes().get(&Key::new("late")).is_none());
    }

    #[test]
    fn repeated_reads_share_storage() {
        let result = SamplingResult::builder()
            .with_decision(Decision::RecordAndPropagate)
            .with_attributes([KeyValue::new("foo", "bar")])
            .build()
            .unwrap();

        assert!(std::ptr::eq(
            result.attributes().as_slice(),
            result.attributes().as_slice()
        ));
    }

    #[test]
    fn missing_decision_is_rejected() {
        let err = SamplingResult::builder()
            .with_attributes([KeyValue::new("foo", "bar")])
            .build()
            .unwrap_err();
        assert!(matches!(err, SamplerError::InvalidDecision(_)));
    }

    #[rstest]
    #[case("true")]
    #[case("ok")]
    fn unrecognized_decision_is_rejected(#[case] raw: &str) {
        let err = raw
            .parse::<Decision>()
            .map(|decision| SamplingResult::builder().with_decision(decision))
            .and_then(SamplingResultBuilder::build)
            .unwrap_err();
        assert!(matches!(err, SamplerError::InvalidDecision(_)));
    }

    #[rstest]
    #[case(Decision::RecordAndPropagate, true, true)]
    #[case(Decision::Record, false, true)]
    #[case(Decision::Drop, false, false)]
    fn derived_predicates(
        #[case] decision: Decision,
        #[case] sampled: bool,
        #[case] recording: bool,
    ) {
        let result = SamplingResult::new(decision);
        assert_eq!(result.is_sampled(), sampled);
        assert_eq!(result.records_events(), recording);
    }

    #[test]
    fn converts_into_api_result() {
        let trace_state = TraceState::from_key_value([("vendor", "value")]).unwrap();
        let result = SamplingResult::builder()
            .with_decision(Decision::Record)
            .with_attributes([KeyValue::new("foo", "bar")])
            .with_trace_state(trace_state.clone())
            .build()
            .unwrap();

        let api: opentelemetry::trace::SamplingResult = result.into();
        assert_eq!(api.decision, SamplingDecision::RecordOnly);
        assert_eq!(api.attributes, vec![KeyValue::new("foo", "bar")]);
        assert_eq!(api.trace_state, trace_state);
    }
}
