//! Bounded fan-out: run an async operation per item with at most `limit` in flight.
//!
//! Items are launched in input order; when the window is full, the next item waits
//! until one in-flight operation settles. Results are collected in completion order,
//! so callers that need a stable order sort afterwards.
//!
//! [`map_bounded`] takes an operation that already contains its own failures and
//! reports "no data for this item" as `None`. [`try_map_bounded`] accepts a fallible
//! operation; the first error is fatal to the whole call: no further items are
//! launched, the operations already in flight are still awaited, and the error is
//! returned.

use std::convert::Infallible;
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};

/// Maps `items` through `op` with at most `limit` operations in flight and keeps the `Some` results.
///
/// `limit` of 0 is treated as 1. Output order is completion order.
pub async fn map_bounded<T, R, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: usize,
    mut op: F,
) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Option<R>>,
{
    let contained = try_map_bounded(items, limit, |item| {
        let fut = op(item);
        async move { Ok::<_, Infallible>(fut.await) }
    })
    .await;
    match contained {
        Ok(results) => results,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`map_bounded`]. The first `Err` aborts launching and is returned
/// once every in-flight operation has settled.
pub async fn try_map_bounded<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: usize,
    mut op: F,
) -> Result<Vec<R>, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<Option<R>, E>>,
{
    let limit = limit.max(1);
    let mut pending = items.into_iter();
    let mut window = FuturesUnordered::new();
    let mut results = Vec::new();
    let mut failure: Option<E> = None;

    loop {
        while failure.is_none() && window.len() < limit {
            match pending.next() {
                Some(item) => window.push(op(item)),
                None => break,
            }
        }
        match window.next().await {
            Some(Ok(Some(r))) => results.push(r),
            Some(Ok(None)) => {}
            Some(Err(e)) => {
                if failure.is_none() {
                    failure = Some(e);
                }
            }
            None => break,
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(results),
    }
}
