use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;

use tracing_subscriber::{
   EnvFilter, fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt,
};

/// Log to stdout and to daily rolling files under ./logs
///
/// The returned guards must stay alive for the lifetime of the app,
/// dropping them stops the non-blocking writers
pub fn setup_tracing() -> (WorkerGuard, WorkerGuard) {
   let trace_appender = tracing_appender::rolling::daily("./logs", "trace.log");
   let output_appender = tracing_appender::rolling::daily("./logs", "output.log");

   let (trace_writer, trace_guard) = tracing_appender::non_blocking(trace_appender);
   let (output_writer, output_guard) = tracing_appender::non_blocking(output_appender);

   // trace.log gets everything, stdout and output.log stay at info
   let console_filter = EnvFilter::new("rigo_wallet=info,error,warn,rigo_eth=info,error,warn");
   let trace_filter = EnvFilter::new("rigo_wallet=trace,rigo_eth=trace");
   let output_filter = EnvFilter::new("rigo_wallet=info,error,warn,rigo_eth=info,error,warn");

   let console_layer = fmt::layer()
      .with_writer(std::io::stdout)
      .with_filter(console_filter);

   let trace_layer = fmt::layer()
      .with_writer(trace_writer)
      .with_filter(trace_filter);

   let output_layer = fmt::layer()
      .with_writer(output_writer)
      .with_filter(output_filter);

   Registry::default()
      .with(trace_layer)
      .with(console_layer)
      .with(output_layer)
      .init();

   (trace_guard, output_guard)
}
