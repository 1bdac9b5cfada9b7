use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tracing_fanout::init::LoggerBuilder;
use tracing_fanout::layer::FanoutLayer;
use tracing_fanout::noop::NoopEmitter;
use tracing_fanout::record::LogEvent;
use tracing_fanout::severity::Level;

#[tokio::main]
async fn main() {
    // Console + file + remote (noop emitter so the demo runs offline;
    // swap in OtlpHttpEmitter::from_env() to ship to a real backend).
    let logger = LoggerBuilder::new("tracing-fanout-demo")
        .min_level(Level::Debug)
        .console(Level::Debug)
        .file(Level::Debug, "app.log")
        .remote(Level::Debug, Arc::new(NoopEmitter))
        .build();

    // A tracer with no exporter still produces valid span identities,
    // which is all the correlation path needs.
    let provider = SdkTracerProvider::builder().build();
    let tracer = provider.tracer("fanout-demo");

    tracing_subscriber::registry()
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(FanoutLayer::new(logger.clone()))
        .init();

    logger.info("service starting");

    {
        let span = tracing::info_span!("create-order", order.user_id = "u42");
        let _guard = span.enter();

        tracing::info!(user_id = "u42", item_count = 3u64, "Creating new order");
        logger.log(
            LogEvent::new(Level::Http, "POST /orders")
                .with("status", 201)
                .with("durationMs", 12),
        );
        tracing::warn!(user_id = "u42", "payment provider slow");
    }

    logger.error("simulated failure outside any span");
    logger.flush().await;
}
