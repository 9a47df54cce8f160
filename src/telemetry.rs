use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

lazy_static! {
    pub static ref QUIZ_SERVED_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out to quiz players",
        &["scope"]
    )
    .unwrap();
    pub static ref QUIZ_EXHAUSTED_CNTR: CounterVec = register_counter_vec!(
        "quiz_exhausted_total",
        "Number of quiz requests with no question left to serve",
        &["scope"]
    )
    .unwrap();
}

/// Installs the global subscriber. `LOG_LEVEL` takes an EnvFilter directive, `info` otherwise.
pub fn init_tracing() -> anyhow::Result<()> {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer =
        EnvFilter::try_from_env("LOG_LEVEL").or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

/// Prometheus text exposition of every registered metric.
pub fn gather_metrics() -> anyhow::Result<(String, Vec<u8>)> {
    let encoder = TextEncoder::new();
    let mut buf = vec![];
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok((encoder.format_type().to_owned(), buf))
}
