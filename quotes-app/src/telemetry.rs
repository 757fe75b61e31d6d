//! Logging and trace export setup.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use quotes_types::Environment;

const DEFAULT_FILTER: &str = "info,quotes_app=debug,quotes_hex=debug";
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Handle that flushes exported spans on shutdown.
pub struct Telemetry {
    provider: Option<sdktrace::SdkTracerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            let _ = provider.shutdown();
        }
    }
}

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("quotes-service"), provider))
}

/// Installs the global subscriber.
///
/// JSON lines in production, human-readable output elsewhere. Spans are
/// exported over OTLP only when an endpoint is configured.
pub fn init(env: &Environment) -> anyhow::Result<Telemetry> {
    let otlp_enabled = std::env::var(OTLP_ENDPOINT_VAR).is_ok_and(|v| !v.is_empty());

    let (telemetry, provider) = if otlp_enabled {
        let (tracer, provider) = init_tracer()?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        )
    } else {
        (None, None)
    };

    let json = env.is_production().then(|| fmt::layer().json());
    let pretty = (!env.is_production()).then(|| fmt::layer());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(json)
        .with(pretty)
        .with(telemetry)
        .try_init()?;

    Ok(Telemetry { provider })
}
