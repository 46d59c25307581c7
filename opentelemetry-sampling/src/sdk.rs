//! Integration with the OpenTelemetry SDK tracer provider.
use crate::{Sampler, ShouldSample};
use opentelemetry::{
    trace::{Link, SamplingResult, SpanKind, TraceId},
    Context, KeyValue,
};

/// Adapts a [`Sampler`] to [`opentelemetry_sdk::trace::ShouldSample`], so it
/// can be installed on an SDK tracer provider.
///
/// ```
/// use opentelemetry_sampling::{Sampler, SdkSampler};
/// use opentelemetry_sdk::trace::SdkTracerProvider;
///
/// let sampler = Sampler::parent_based(Sampler::trace_id_ratio_based(0.1)?).build()?;
/// let provider = SdkTracerProvider::builder()
///     .with_sampler(SdkSampler::new(sampler))
///     .build();
/// # drop(provider);
/// # Ok::<(), opentelemetry_sampling::SamplerError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SdkSampler {
    inner: Sampler,
}

impl SdkSampler {
    /// Wrap `sampler`.
    pub fn new(sampler: Sampler) -> Self {
        SdkSampler { inner: sampler }
    }

    /// The wrapped sampler.
    pub fn sampler(&self) -> &Sampler {
        &self.inner
    }
}

impl From<Sampler> for SdkSampler {
    fn from(sampler: Sampler) -> Self {
        SdkSampler::new(sampler)
    }
}

impl opentelemetry_sdk::trace::ShouldSample for SdkSampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        name: &str,
        span_kind: &SpanKind,
        attributes: &[KeyValue],
        links: &[Link],
    ) -> SamplingResult {
        ShouldSample::should_sample(
            &self.inner,
            parent_context,
            trace_id,
            name,
            span_kind,
            attributes,
            links,
        )
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{
        SamplingDecision, SpanContext, SpanId, TraceContextExt, TraceFlags, TraceState,
    };

    #[test]
    fn converts_results_for_the_sdk() {
        let sampler = SdkSampler::from(
            Sampler::parent_based(Sampler::AlwaysOn)
                .with_remote_parent_sampled(Sampler::AlwaysOff)
                .build()
                .unwrap(),
        );
        let trace_state = TraceState::from_key_value([("vendor", "value")]).unwrap();
        let cx = Context::new().with_remote_span_context(SpanContext::new(
            TraceId::from(7_u128),
            SpanId::from(7_u64),
            TraceFlags::SAMPLED,
            true,
            trace_state.clone(),
        ));

        let result = opentelemetry_sdk::trace::ShouldSample::should_sample(
            &sampler,
            Some(&cx),
            TraceId::from(7_u128),
            "remote_child",
            &SpanKind::Server,
            &[],
            &[],
        );
        assert_eq!(result.decision, SamplingDecision::Drop);
        assert!(result.attributes.is_empty());
        assert_eq!(result.trace_state, trace_state);

        let result = opentelemetry_sdk::trace::ShouldSample::should_sample(
            &sampler,
            None,
            TraceId::from(7_u128),
            "root",
            &SpanKind::Server,
            &[],
            &[],
        );
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
    }
}
