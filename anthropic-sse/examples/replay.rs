//! Replay a captured Messages API stream from stdin.
//!
//! ```bash
//! RUST_LOG=anthropic_sse_streaming=debug \
//!     cargo run -p anthropic-sse --example replay < transcript.sse
//! ```

use anthropic_sse::prelude::*;
use futures::StreamExt;
use std::io::Write;
use tokio_util::io::ReaderStream;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let body = ReaderStream::new(tokio::io::stdin());
    let mut events = message_stream(body);
    let mut stdout = std::io::stdout();

    while let Some(event) = events.next().await {
        match event? {
            MessageStreamEvent::MessageStart { message } => {
                tracing::info!(id = %message.id, model = %message.model, "message started");
            }
            MessageStreamEvent::MessageDelta { delta, usage } => {
                tracing::info!(
                    stop_reason = ?delta.stop_reason,
                    output_tokens = usage.map(|u| u.output_tokens),
                    "message delta"
                );
            }
            event => {
                if let Some(text) = event.text_delta() {
                    write!(stdout, "{}", text)?;
                    stdout.flush()?;
                }
            }
        }
    }

    writeln!(stdout)?;
    Ok(())
}
