use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tracing::{info, warn};

use crate::{dto::notification::Notification, state::SharedState};

/// SSE event name carrying a serialized [`Notification`].
pub const EVENT_NOTIFICATION: &str = "notification";

/// Subscribe to notifications, returning the replay buffer first.
pub fn subscribe(state: &SharedState) -> (Vec<Notification>, broadcast::Receiver<Notification>) {
    state.notifications().subscribe_with_history()
}

/// Recent notifications, oldest first.
pub fn recent(state: &SharedState) -> Vec<Notification> {
    state.notifications().history()
}

/// Convert a backlog plus a broadcast receiver into an SSE response, forwarding
/// events until the client disconnects.
pub fn to_sse_stream(
    backlog: Vec<Notification>,
    receiver: broadcast::Receiver<Notification>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Notification>(8);

    tokio::spawn(async move {
        forward(backlog, receiver, tx).await;
        info!("notification SSE stream disconnected");
    });

    let stream = ReceiverStream::new(rx)
        .filter_map(|notification| to_event(&notification))
        .map(Ok::<_, Infallible>);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Push the backlog, then live notifications, until either side goes away.
///
/// A lagging subscriber skips what it missed and keeps receiving.
async fn forward(
    backlog: Vec<Notification>,
    mut receiver: broadcast::Receiver<Notification>,
    tx: mpsc::Sender<Notification>,
) {
    for notification in backlog {
        if tx.send(notification).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            _ = tx.closed() => break,
            recv_result = receiver.recv() => {
                match recv_result {
                    Ok(notification) => {
                        if tx.send(notification).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "notification subscriber lagged; skipping");
                        continue;
                    }
                }
            }
        }
    }
}

fn to_event(notification: &Notification) -> Option<Event> {
    match Event::default()
        .event(EVENT_NOTIFICATION)
        .id(notification.id.to_string())
        .json_data(notification)
    {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "failed to encode notification event");
            None
        }
    }
}
