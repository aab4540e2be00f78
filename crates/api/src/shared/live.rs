use actix_web::{http::header::ContentEncoding, web::Bytes, HttpResponse};
use companion_reminders_infra::{Change, StoreError, Subscription};
use futures::{stream, Stream, StreamExt};
use serde::Serialize;
use std::convert::Infallible;
use tracing::error;

/// Streams every item as one line of JSON until `items` ends or the client
/// goes away
pub fn ndjson_response<S, T>(items: S) -> HttpResponse
where
    S: Stream<Item = T> + 'static,
    T: Serialize + 'static,
{
    let lines = items.filter_map(|item| async move {
        match serde_json::to_vec(&item) {
            Ok(mut line) => {
                line.push(b'\n');
                Some(Ok::<_, Infallible>(Bytes::from(line)))
            }
            Err(e) => {
                error!("Unable to serialize live update: {:?}", e);
                None
            }
        }
    });

    HttpResponse::Ok()
        .content_type("application/x-ndjson")
        // Compress would buffer the lines
        .insert_header(ContentEncoding::Identity)
        .streaming(lines)
}

/// Stream of the changes a store subscription yields
pub fn subscription_stream<T: 'static>(
    subscription: Subscription<T>,
) -> impl Stream<Item = Result<Change<T>, StoreError>> {
    stream::unfold(subscription, |mut subscription| async move {
        subscription
            .next()
            .await
            .map(|change| (change, subscription))
    })
}
