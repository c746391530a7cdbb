//! Simulated "why would I setTimeout(0)?" button demo.
//!
//! Two buttons drive the same CPU-bound computation against two status
//! labels. The blocking button computes first and only then updates its
//! label, so the user never sees an intermediate state. The deferred button
//! schedules the computation as a zero-delay task and updates its label
//! immediately, so the "calculating...." text gets painted before the
//! thread goes busy.
//!
//! Running This Demo:
//! ```bash
//! cargo run --example ui_buttons
//! ```

use miette::Result;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use yieldpoint::config::LoopConfig;
use yieldpoint::demo::Demonstrator;
use yieldpoint::event_loop::EventLoop;
use yieldpoint::sinks::SinkRegistry;

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,yieldpoint=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    // The "host UI": two status labels, one per button.
    let registry = SinkRegistry::new();
    let status = registry.register("status");
    let status_ok = registry.register("status_ok");

    let event_loop = EventLoop::from_config(registry.clone(), &LoopConfig::default());
    let demo = Demonstrator::new(registry, event_loop.handle());

    info!("pressing the blocking button");
    demo.run_blocking("status");
    info!(text = %status.text(), "blocking label after the call returned");
    // One paint happens after the handler returns; it already shows "Done!".
    event_loop.run_until_idle();

    info!("pressing the deferred button");
    demo.run_deferred("status_ok")?;
    info!(text = %status_ok.text(), "deferred label before the task ran");
    // The drain paints "calculating...." first, then runs the task and
    // paints "Done!".
    event_loop.run_until_idle();
    info!(text = %status_ok.text(), "deferred label after the task ran");

    Ok(())
}
