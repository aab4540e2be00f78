use crate::error::StoreError;
use companion_reminders_domain::{Entity, ID};
use futures::Future;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

const SUBSCRIPTION_BUFFER: usize = 64;

/// A change to a record observed by a store subscription
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Created(T),
    Updated(T),
}

impl<T> Change<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }
}

/// Long lived listener for store changes.
///
/// The stream ends after the first error. Dropping the `Subscription`
/// stops the background task feeding it.
pub struct Subscription<T> {
    receiver: mpsc::Receiver<Result<Change<T>, StoreError>>,
    task: JoinHandle<()>,
}

impl<T> Subscription<T> {
    pub async fn next(&mut self) -> Option<Result<Change<T>, StoreError>> {
        self.receiver.recv().await
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscription fed by an in process broadcast of changes, keeping only
/// the records `filter` accepts
pub fn forward_broadcast<T, F>(mut changes: broadcast::Receiver<Change<T>>, filter: F) -> Subscription<T>
where
    T: Clone + Send + 'static,
    F: Fn(&T) -> bool + Send + 'static,
{
    let (tx, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
    let task = tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    if filter(change.record()) && tx.send(Ok(change)).await.is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Subscription lagged behind by {} changes", skipped);
                    let _ = tx
                        .send(Err(StoreError::Transport(format!(
                            "Subscription missed {} changes",
                            skipped
                        ))))
                        .await;
                    return;
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    });

    Subscription { receiver, task }
}

/// Compares two listings of the same query, in the order of `current`
pub(crate) fn diff_snapshots<T>(previous: &HashMap<ID, T>, current: &[T]) -> Vec<Change<T>>
where
    T: Entity<ID> + Clone + PartialEq,
{
    current
        .iter()
        .filter_map(|record| match previous.get(&record.id()) {
            None => Some(Change::Created(record.clone())),
            Some(old) if old != record => Some(Change::Updated(record.clone())),
            Some(_) => None,
        })
        .collect()
}

fn index_by_id<T: Entity<ID>>(records: Vec<T>) -> HashMap<ID, T> {
    records.into_iter().map(|r| (r.id(), r)).collect()
}

/// Emulates a realtime subscription for stores without one by running
/// `fetch` every `interval` and emitting the differences between listings.
///
/// The baseline listing is fetched before this returns, so every change
/// committed afterwards is emitted.
pub async fn poll_changes<T, F, Fut>(interval: Duration, fetch: F) -> Subscription<T>
where
    T: Entity<ID> + Clone + PartialEq + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T>, StoreError>> + Send + 'static,
{
    let (tx, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
    let baseline = fetch().await;
    let task = tokio::spawn(async move {
        let mut known = match baseline {
            Ok(records) => index_by_id(records),
            Err(e) => {
                warn!("Polling subscription failed: {:?}", e);
                let _ = tx.send(Err(e)).await;
                return;
            }
        };

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let records = match fetch().await {
                Ok(records) => records,
                Err(e) => {
                    warn!("Polling subscription failed: {:?}", e);
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            };

            let changes = diff_snapshots(&known, &records);
            known = index_by_id(records);

            for change in changes {
                if tx.send(Ok(change)).await.is_err() {
                    return;
                }
            }
        }
    });

    Subscription { receiver, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: ID,
        value: i32,
    }

    impl Entity<ID> for Record {
        fn id(&self) -> ID {
            self.id.clone()
        }
    }

    fn record(value: i32) -> Record {
        Record {
            id: ID::new(),
            value,
        }
    }

    #[test]
    fn diff_detects_created_and_updated_records() {
        let a = record(1);
        let b = record(2);
        let previous: HashMap<ID, Record> =
            vec![a.clone(), b.clone()].into_iter().map(|r| (r.id(), r)).collect();

        let mut a_changed = a.clone();
        a_changed.value = 10;
        let c = record(3);

        let changes = diff_snapshots(&previous, &[a_changed.clone(), b, c.clone()]);
        assert_eq!(changes, vec![Change::Updated(a_changed), Change::Created(c)]);
    }

    #[tokio::test]
    async fn polling_emits_changes_after_baseline() {
        let a = record(1);
        let listing = Arc::new(Mutex::new(vec![a.clone()]));

        let source = listing.clone();
        let mut sub = poll_changes(Duration::from_millis(10), move || {
            let records = source.lock().unwrap().clone();
            async move { Ok(records) }
        })
        .await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        let b = record(2);
        listing.lock().unwrap().push(b.clone());

        assert_eq!(sub.next().await, Some(Ok(Change::Created(b))));
    }

    #[tokio::test]
    async fn polling_emits_change_committed_right_after_subscribing() {
        let a = record(1);
        let listing = Arc::new(Mutex::new(vec![a.clone()]));

        let source = listing.clone();
        let mut sub = poll_changes(Duration::from_millis(10), move || {
            let records = source.lock().unwrap().clone();
            async move { Ok(records) }
        })
        .await;

        // Lands between the baseline and a listing the caller fetches next
        let mut a_changed = a.clone();
        a_changed.value = 2;
        *listing.lock().unwrap() = vec![a_changed.clone()];

        assert_eq!(sub.next().await, Some(Ok(Change::Updated(a_changed))));
    }

    #[tokio::test]
    async fn polling_stops_after_error() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let mut sub = poll_changes::<Record, _, _>(Duration::from_millis(5), move || {
            *counter.lock().unwrap() += 1;
            async { Err(StoreError::Transport("offline".into())) }
        })
        .await;

        assert_eq!(
            sub.next().await,
            Some(Err(StoreError::Transport("offline".into())))
        );
        assert_eq!(sub.next().await, None);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn broadcast_subscription_filters_records() {
        let (tx, rx) = broadcast::channel(8);
        let mut sub = forward_broadcast(rx, |r: &Record| r.value > 1);

        let low = record(1);
        let high = record(5);
        tx.send(Change::Created(low)).unwrap();
        tx.send(Change::Updated(high.clone())).unwrap();

        assert_eq!(sub.next().await, Some(Ok(Change::Updated(high))));
    }
}
