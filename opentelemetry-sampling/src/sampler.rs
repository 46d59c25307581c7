use crate::{Decision, SamplingAttributes, SamplingResult};
use opentelemetry::{
    trace::{Link, SpanKind, TraceContextExt, TraceId, TraceState},
    Context, KeyValue,
};

mod parent_based;
mod trace_id_ratio;

pub use parent_based::{ParentBased, ParentBasedBuilder};
pub use trace_id_ratio::TraceIdRatioBased;

/// The [`ShouldSample`] interface lets samplers return a [`SamplingResult`]
/// from the information available just before a span is created.
///
/// The two properties of a span that sampling controls are:
///
/// * whether the span records events ([`SamplingResult::records_events`]).
///   Span processors receive every recording span.
/// * whether the `sampled` flag is set in the span context
///   ([`SamplingResult::is_sampled`]). The flag is propagated to child spans,
///   including children in other processes, and only sampled spans reach
///   exporters.
///
/// A span can be recording without being sampled, but never sampled without
/// recording; [`Decision`] has no variant for that combination.
///
/// Implementations are called on every span start, from any thread. They must
/// not block, must not hold mutable state, and must not panic: any validation
/// belongs in the constructor.
pub trait ShouldSample: Send + Sync + std::fmt::Debug {
    /// Returns the [`SamplingResult`] for a span to be created.
    ///
    /// `parent_context` is the context the span is started in. When it holds
    /// an active, valid span, that span is the parent.
    #[allow(clippy::too_many_arguments)]
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        name: &str,
        span_kind: &SpanKind,
        attributes: &[KeyValue],
        links: &[Link],
    ) -> SamplingResult;

    /// A short description of the sampler and its configuration, suitable for
    /// debug output.
    fn description(&self) -> String;
}

/// The built-in samplers.
///
/// The [built-in samplers] cover the common head sampling strategies. They are
/// cheap to clone and can be shared between threads.
///
/// [built-in samplers]: https://github.com/open-telemetry/opentelemetry-specification/blob/main/specification/trace/sdk.md#built-in-samplers
#[derive(Clone, Debug, PartialEq)]
pub enum Sampler {
    /// Always record and propagate the span.
    AlwaysOn,
    /// Always drop the span.
    AlwaysOff,
    /// Sample a fixed fraction of traces, decided from the trace id alone so
    /// every span of a trace gets the same decision.
    TraceIdRatioBased(TraceIdRatioBased),
    /// Follow the parent span's decision, or a root sampler when there is no
    /// parent.
    ParentBased(Box<ParentBased>),
}

impl Sampler {
    /// A [`Sampler::TraceIdRatioBased`] sampler for `ratio`.
    ///
    /// Fails if `ratio` is not within `[0.0, 1.0]`.
    pub fn trace_id_ratio_based(ratio: f64) -> Result<Sampler, crate::SamplerError> {
        TraceIdRatioBased::new(ratio).map(Sampler::TraceIdRatioBased)
    }

    /// Start building a [`Sampler::ParentBased`] sampler that uses `root` for
    /// spans without a parent.
    pub fn parent_based(root: Sampler) -> ParentBasedBuilder {
        ParentBasedBuilder::new(root)
    }
}

impl Default for Sampler {
    /// `ParentBased` with an `AlwaysOn` root.
    fn default() -> Self {
        Sampler::ParentBased(Box::new(ParentBased::new(Sampler::AlwaysOn)))
    }
}

impl From<TraceIdRatioBased> for Sampler {
    fn from(sampler: TraceIdRatioBased) -> Self {
        Sampler::TraceIdRatioBased(sampler)
    }
}

impl From<ParentBased> for Sampler {
    fn from(sampler: ParentBased) -> Self {
        Sampler::ParentBased(Box::new(sampler))
    }
}

impl ShouldSample for Sampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        name: &str,
        span_kind: &SpanKind,
        attributes: &[KeyValue],
        links: &[Link],
    ) -> SamplingResult {
        let decision = match self {
            Sampler::AlwaysOn => Decision::RecordAndPropagate,
            Sampler::AlwaysOff => Decision::Drop,
            Sampler::TraceIdRatioBased(sampler) => sampler.decide(trace_id),
            // The delegate builds the whole result, trace state included.
            Sampler::ParentBased(sampler) => {
                return sampler.should_sample(
                    parent_context,
                    trace_id,
                    name,
                    span_kind,
                    attributes,
                    links,
                )
            }
        };
        result_with_parent_state(decision, parent_context)
    }

    fn description(&self) -> String {
        match self {
            Sampler::AlwaysOn => "AlwaysOnSampler".to_string(),
            Sampler::AlwaysOff => "AlwaysOffSampler".to_string(),
            Sampler::TraceIdRatioBased(sampler) => sampler.description(),
            Sampler::ParentBased(sampler) => sampler.description(),
        }
    }
}

/// Built-in samplers add no attributes and pass the parent's trace state
/// through unchanged.
fn result_with_parent_state(
    decision: Decision,
    parent_context: Option<&Context>,
) -> SamplingResult {
    let trace_state = match parent_context {
        Some(cx) => cx.span().span_context().trace_state().clone(),
        None => TraceState::default(),
    };
    SamplingResult::from_parts(decision, SamplingAttributes::empty(), trace_state)
}
