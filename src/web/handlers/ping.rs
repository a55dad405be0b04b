//! Heartbeat endpoint
//!
//! Two periodic signals merged into one response stream: a `ping` event
//! every second and a generic `tick` message every ten. Dropping the
//! response on disconnect drops both timers atomically, so neither can
//! outlive the connection.

use axum::response::sse::{Event, Sse};
use chrono::Utc;
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

pub async fn ping_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("💓 Heartbeat connection opened");

    let ping_period = Duration::from_secs(1);
    let tick_period = Duration::from_secs(10);

    let mut id: u64 = 0;
    let pings = IntervalStream::new(interval_at(Instant::now() + ping_period, ping_period))
        .map(move |_| {
            id += 1;
            let data = serde_json::json!({ "time": Utc::now().to_rfc3339() });
            Event::default()
                .event("ping")
                .id(id.to_string())
                .data(data.to_string())
        });

    let ticks = IntervalStream::new(interval_at(Instant::now() + tick_period, tick_period))
        .map(|_| Event::default().data(format!("tick {}", Utc::now().to_rfc3339())));

    // A comment frame goes out immediately so proxies see a live connection.
    let connected = tokio_stream::once(Event::default().comment("connected"));

    let stream = connected
        .chain(pings.merge(ticks))
        .map(Ok::<_, Infallible>);
    Sse::new(stream)
}
