use crate::{Sampler, SamplerError, SamplingResult, ShouldSample};
use opentelemetry::{
    otel_debug,
    trace::{Link, SpanKind, TraceContextExt, TraceId},
    Context, KeyValue,
};

/// Respects the sampling decision of the parent span.
///
/// Spans without a parent are sampled by the `root` sampler. Spans with a
/// parent are handed to one of four delegates, picked by whether the parent
/// is remote or local and whether its `sampled` flag is set. With the default
/// delegates a child is sampled exactly when its parent is, which keeps a
/// distributed trace coherent using only the propagated flag.
#[derive(Clone, Debug, PartialEq)]
pub struct ParentBased {
    root: Sampler,
    remote_parent_sampled: Sampler,
    remote_parent_not_sampled: Sampler,
    local_parent_sampled: Sampler,
    local_parent_not_sampled: Sampler,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Parent {
    None,
    RemoteSampled,
    RemoteNotSampled,
    LocalSampled,
    LocalNotSampled,
}

impl Parent {
    fn from_context(parent_context: Option<&Context>) -> Parent {
        let Some(cx) = parent_context.filter(|cx| cx.has_active_span()) else {
            return Parent::None;
        };
        let span = cx.span();
        let span_context = span.span_context();
        if !span_context.is_valid() {
            return Parent::None;
        }
        match (span_context.is_remote(), span_context.is_sampled()) {
            (true, true) => Parent::RemoteSampled,
            (true, false) => Parent::RemoteNotSampled,
            (false, true) => Parent::LocalSampled,
            (false, false) => Parent::LocalNotSampled,
        }
    }
}

impl ParentBased {
    /// A parent based sampler with `root` for spans without a parent and the
    /// default delegates: `AlwaysOn` for sampled parents and `AlwaysOff` for
    /// parents that are not sampled.
    pub fn new(root: Sampler) -> Self {
        ParentBased {
            root,
            remote_parent_sampled: Sampler::AlwaysOn,
            remote_parent_not_sampled: Sampler::AlwaysOff,
            local_parent_sampled: Sampler::AlwaysOn,
            local_parent_not_sampled: Sampler::AlwaysOff,
        }
    }

    /// The sampler used for spans without a parent.
    pub fn root(&self) -> &Sampler {
        &self.root
    }

    fn delegate(&self, parent: Parent) -> &Sampler {
        match parent {
            Parent::None => &self.root,
            Parent::RemoteSampled => &self.remote_parent_sampled,
            Parent::RemoteNotSampled => &self.remote_parent_not_sampled,
            Parent::LocalSampled => &self.local_parent_sampled,
            Parent::LocalNotSampled => &self.local_parent_not_sampled,
        }
    }
}

impl ShouldSample for ParentBased {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        name: &str,
        span_kind: &SpanKind,
        attributes: &[KeyValue],
        links: &[Link],
    ) -> SamplingResult {
        self.delegate(Parent::from_context(parent_context))
            .should_sample(parent_context, trace_id, name, span_kind, attributes, links)
    }

    fn description(&self) -> String {
        format!(
            "ParentBased{{root={}, remote_parent_sampled={}, remote_parent_not_sampled={}, local_parent_sampled={}, local_parent_not_sampled={}}}",
            self.root.description(),
            self.remote_parent_sampled.description(),
            self.remote_parent_not_sampled.description(),
            self.local_parent_sampled.description(),
            self.local_parent_not_sampled.description(),
        )
    }
}

/// Builder for [`Sampler::ParentBased`].
///
/// Delegates that are not set keep the defaults of [`ParentBased::new`].
#[derive(Debug)]
pub struct ParentBasedBuilder {
    inner: ParentBased,
}

impl ParentBasedBuilder {
    pub(crate) fn new(root: Sampler) -> Self {
        ParentBasedBuilder {
            inner: ParentBased::new(root),
        }
    }

    /// Sampler for spans whose parent is remote and sampled.
    pub fn with_remote_parent_sampled(mut self, sampler: Sampler) -> Self {
        self.inner.remote_parent_sampled = sampler;
        self
    }

    /// Sampler for spans whose parent is remote and not sampled.
    pub fn with_remote_parent_not_sampled(mut self, sampler: Sampler) -> Self {
        self.inner.remote_parent_not_sampled = sampler;
        self
    }

    /// Sampler for spans whose parent is local and sampled.
    pub fn with_local_parent_sampled(mut self, sampler: Sampler) -> Self {
        self.inner.local_parent_sampled = sampler;
        self
    }

    /// Sampler for spans whose parent is local and not sampled.
    pub fn with_local_parent_not_sampled(mut self, sampler: Sampler) -> Self {
        self.inner.local_parent_not_sampled = sampler;
        self
    }

    /// Validate the delegates and build the sampler.
    ///
    /// A parent delegate may not itself be `ParentBased`: it would only ever
    /// be called with a parent present, so its root sampler could never run.
    /// Such a graph is rejected with [`SamplerError::InvalidConfiguration`].
    pub fn build(self) -> Result<Sampler, SamplerError> {
        let inner = self.inner;
        for (branch, delegate) in [
            ("remote_parent_sampled", &inner.remote_parent_sampled),
            ("remote_parent_not_sampled", &inner.remote_parent_not_sampled),
            ("local_parent_sampled", &inner.local_parent_sampled),
            ("local_parent_not_sampled", &inner.local_parent_not_sampled),
        ] {
            if let Sampler::ParentBased(nested) = delegate {
                return Err(SamplerError::invalid_configuration(format!(
                    "{branch} delegate cannot be parent based, its root is unreachable: {}",
                    nested.description()
                )));
            }
        }

        otel_debug!(
            name: "Sampler.ParentBased.Built",
            description = inner.description()
        );
        Ok(Sampler::ParentBased(Box::new(inner)))
    }
}
