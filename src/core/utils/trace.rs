use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt};

pub const LOG_DIR: &str = "./logs";

pub fn setup_tracing() -> (WorkerGuard, WorkerGuard) {
   let trace_appender = tracing_appender::rolling::daily(LOG_DIR, "trace.log");
   let output_appender = tracing_appender::rolling::daily(LOG_DIR, "output.log");

   let (trace_writer, trace_guard) = tracing_appender::non_blocking(trace_appender);
   let (output_writer, output_guard) = tracing_appender::non_blocking(output_appender);

   // RUST_LOG only overrides the console
   let console_filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new("moacswap=info,moac_eth=info,warn"));
   let trace_filter = EnvFilter::new("moacswap=trace,moac_eth=trace");
   let output_filter = EnvFilter::new("moacswap=info,moac_eth=info,warn");

   // Console goes to stderr, stdout is for command output
   let console_layer = fmt::layer()
      .with_writer(std::io::stderr)
      .with_filter(console_filter);

   let trace_layer = fmt::layer()
      .with_ansi(false)
      .with_writer(trace_writer)
      .with_filter(trace_filter);

   let output_layer = fmt::layer()
      .with_ansi(false)
      .with_writer(output_writer)
      .with_filter(output_filter);

   Registry::default()
      .with(trace_layer)
      .with(console_layer)
      .with(output_layer)
      .init();

   (trace_guard, output_guard)
}
