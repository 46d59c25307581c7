//! Sampler configuration
//!
//! Resolves the standard `OTEL_TRACES_SAMPLER` and `OTEL_TRACES_SAMPLER_ARG`
//! environment variables into a fully built [`Sampler`]. An unknown sampler
//! name, an invalid ratio or a value that is not valid unicode is returned as
//! an error. A ratio based sampler without an argument falls back to a ratio
//! of `1.0`.
use crate::{Sampler, SamplerError};
use opentelemetry::{otel_debug, otel_warn};
use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the sampler.
pub const OTEL_TRACES_SAMPLER: &str = "OTEL_TRACES_SAMPLER";
/// Environment variable holding the sampler argument, the ratio for the
/// ratio based samplers.
pub const OTEL_TRACES_SAMPLER_ARG: &str = "OTEL_TRACES_SAMPLER_ARG";

/// Ratio used when a ratio based sampler is selected without an argument.
const DEFAULT_RATIO: f64 = 1.0;

/// The sampler names understood by [`Sampler::from_env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerKind {
    /// `always_on`
    AlwaysOn,
    /// `always_off`
    AlwaysOff,
    /// `traceidratio`
    TraceIdRatio,
    /// `parentbased_always_on`
    ParentBasedAlwaysOn,
    /// `parentbased_always_off`
    ParentBasedAlwaysOff,
    /// `parentbased_traceidratio`
    ParentBasedTraceIdRatio,
}

impl SamplerKind {
    /// The environment variable value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SamplerKind::AlwaysOn => "always_on",
            SamplerKind::AlwaysOff => "always_off",
            SamplerKind::TraceIdRatio => "traceidratio",
            SamplerKind::ParentBasedAlwaysOn => "parentbased_always_on",
            SamplerKind::ParentBasedAlwaysOff => "parentbased_always_off",
            SamplerKind::ParentBasedTraceIdRatio => "parentbased_traceidratio",
        }
    }

    fn takes_ratio(self) -> bool {
        matches!(
            self,
            SamplerKind::TraceIdRatio | SamplerKind::ParentBasedTraceIdRatio
        )
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplerKind {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always_on" => Ok(SamplerKind::AlwaysOn),
            "always_off" => Ok(SamplerKind::AlwaysOff),
            "traceidratio" => Ok(SamplerKind::TraceIdRatio),
            "parentbased_always_on" => Ok(SamplerKind::ParentBasedAlwaysOn),
            "parentbased_always_off" => Ok(SamplerKind::ParentBasedAlwaysOff),
            "parentbased_traceidratio" => Ok(SamplerKind::ParentBasedTraceIdRatio),
            unsupported @ ("jaeger_remote" | "parentbased_jaeger_remote" | "xray") => {
                Err(SamplerError::invalid_configuration(format!(
                    "sampler '{unsupported}' is not supported"
                )))
            }
            unknown => Err(SamplerError::invalid_configuration(format!(
                "unrecognized sampler '{unknown}', valid values are: always_on, always_off, \
                 traceidratio, parentbased_always_on, parentbased_always_off, \
                 parentbased_traceidratio"
            ))),
        }
    }
}

impl Sampler {
    /// Build the sampler selected by `OTEL_TRACES_SAMPLER` and
    /// `OTEL_TRACES_SAMPLER_ARG`.
    ///
    /// When `OTEL_TRACES_SAMPLER` is unset or empty the default
    /// `ParentBased(AlwaysOn)` sampler is returned.
    pub fn from_env() -> Result<Sampler, SamplerError> {
        let raw = match read_var(OTEL_TRACES_SAMPLER)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                otel_debug!(
                    name: "Sampler.Config.DefaultSampler",
                    message = "OTEL_TRACES_SAMPLER is not set, using ParentBased(AlwaysOn)"
                );
                return Ok(Sampler::default());
            }
        };
        let arg = read_var(OTEL_TRACES_SAMPLER_ARG)?;

        let kind = raw.parse::<SamplerKind>().map_err(|err| {
            otel_warn!(
                name: "Sampler.Config.InvalidSamplerType",
                otel_traces_sampler = raw.clone(),
                error = err.to_string()
            );
            err
        })?;
        Sampler::from_kind(kind, arg.as_deref())
    }

    /// Build the sampler for `kind`, parsing `arg` as the ratio when the kind
    /// is ratio based. The argument is ignored by the other kinds.
    pub fn from_kind(kind: SamplerKind, arg: Option<&str>) -> Result<Sampler, SamplerError> {
        let ratio = if kind.takes_ratio() {
            parse_ratio(kind, arg)?
        } else {
            DEFAULT_RATIO
        };

        let sampler = match kind {
            SamplerKind::AlwaysOn => Sampler::AlwaysOn,
            SamplerKind::AlwaysOff => Sampler::AlwaysOff,
            SamplerKind::TraceIdRatio => Sampler::trace_id_ratio_based(ratio)?,
            SamplerKind::ParentBasedAlwaysOn => Sampler::parent_based(Sampler::AlwaysOn).build()?,
            SamplerKind::ParentBasedAlwaysOff => {
                Sampler::parent_based(Sampler::AlwaysOff).build()?
            }
            SamplerKind::ParentBasedTraceIdRatio => {
                Sampler::parent_based(Sampler::trace_id_ratio_based(ratio)?).build()?
            }
        };
        otel_debug!(
            name: "Sampler.Config.Resolved",
            kind = kind.as_str(),
            description = crate::ShouldSample::description(&sampler)
        );
        Ok(sampler)
    }
}

/// `None` only when `name` is not set. A value that is not valid unicode is
/// an error.
fn read_var(name: &str) -> Result<Option<String>, SamplerError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(value)) => {
            otel_warn!(
                name: "Sampler.Config.NotUnicode",
                variable = name.to_string(),
                value = format!("{value:?}")
            );
            Err(SamplerError::invalid_configuration(format!(
                "{name} is not valid unicode: {value:?}"
            )))
        }
    }
}

fn parse_ratio(kind: SamplerKind, arg: Option<&str>) -> Result<f64, SamplerError> {
    match arg.map(str::trim).filter(|arg| !arg.is_empty()) {
        Some(arg) => arg.parse::<f64>().map_err(|_| {
            SamplerError::invalid_configuration(format!(
                "{OTEL_TRACES_SAMPLER_ARG} must be a float between 0.0 and 1.0 for '{kind}', got '{arg}'"
            ))
        }),
        None => {
            otel_warn!(
                name: "Sampler.Config.MissingSamplerArgument",
                message = format!(
                    "OTEL_TRACES_SAMPLER is set to '{kind}' but OTEL_TRACES_SAMPLER_ARG is missing. Falling back to default ratio: 1.0 (100% sampling)"
                )
            );
            Ok(DEFAULT_RATIO)
        }
    }
}
