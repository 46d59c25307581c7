//! # OpenTelemetry Sampling
//!
//! Head sampling decisions for OpenTelemetry traces. Before a span is
//! created, a [`Sampler`] decides whether it is dropped, recorded locally, or
//! recorded and propagated as sampled to its children. The decision is
//! returned as a [`SamplingResult`] together with any attributes the sampler
//! wants added to the span.
//!
//! Samplers are immutable after construction and every call is a pure
//! function of the sampler configuration and its inputs, so spans of the same
//! trace reach the same decision in every process.
//!
//! ```
//! use opentelemetry::trace::{SpanKind, TraceId};
//! use opentelemetry_sampling::{Sampler, ShouldSample};
//!
//! let sampler = Sampler::parent_based(Sampler::trace_id_ratio_based(0.25)?).build()?;
//!
//! let result = sampler.should_sample(
//!     None,
//!     TraceId::from(0x4bf92f3577b34da6a3ce929d0e0e4736_u128),
//!     "GET /users",
//!     &SpanKind::Server,
//!     &[],
//!     &[],
//! );
//! if result.records_events() {
//!     // build a recording span, propagating `result.is_sampled()`
//! }
//! # Ok::<(), opentelemetry_sampling::SamplerError>(())
//! ```
//!
//! ## Crate Feature Flags
//!
//! * `internal-logs`: emits construction and configuration events through
//!   OpenTelemetry's internal `tracing` based logging. Enabled by default.
//! * `sdk`: provides [`SdkSampler`], which installs a [`Sampler`] on an
//!   `opentelemetry_sdk` tracer provider. Enabled by default.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/open-telemetry/opentelemetry-rust/main/assets/logo.svg"
)]

mod attributes;
pub mod config;
mod decision;
mod error;
mod result;
mod sampler;
#[cfg(feature = "sdk")]
#[cfg_attr(docsrs, doc(cfg(feature = "sdk")))]
mod sdk;

pub use attributes::SamplingAttributes;
pub use config::SamplerKind;
pub use decision::Decision;
pub use error::SamplerError;
pub use result::{SamplingResult, SamplingResultBuilder};
pub use sampler::{ParentBased, ParentBasedBuilder, Sampler, ShouldSample, TraceIdRatioBased};
#[cfg(feature = "sdk")]
#[cfg_attr(docsrs, doc(cfg(feature = "sdk")))]
pub use sdk::SdkSampler;
