//! Enrichment joins: attach secondary lookups to primary records by key.
//!
//! [`enrich`] is the generic join. It derives the distinct key set, performs one
//! secondary fetch for it (skipped when the set is empty) and zips the result back
//! onto the primary records in input order. Records whose key was not found stay in
//! the output with `secondary: None`.
//!
//! The instantiations below cover the Steam shapes: persona hydration for SteamIDs,
//! partner hydration for 32-bit account ids, and app-name hydration.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::future::Future;
use std::hash::Hash;

use serde::Serialize;

use crate::error::SteamError;
use crate::fanout::map_bounded;
use crate::gateway::types::PlayerSummary;
use crate::gateway::{SteamGateway, PLAYER_SUMMARIES_MAX_IDS};
use crate::services::SteamServices;
use crate::steam_id::SteamId;

/// App-name hydration switches from per-app store lookups to the catalog cache above this many ids.
pub const DIRECT_APP_LOOKUP_MAX: usize = 10;

/// A primary record with the secondary value found for its key, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<P, S> {
    pub record: P,
    pub secondary: Option<S>,
}

/// Joins `primary` against the mapping returned by `fetch_secondary`.
///
/// `key_of` returning `None` means the record has nothing to look up. `fetch_secondary`
/// is called at most once, with the deduplicated key set, and never with an empty set.
pub async fn enrich<P, K, S, E, F, Fut>(
    primary: Vec<P>,
    key_of: impl Fn(&P) -> Option<K>,
    fetch_secondary: F,
) -> Result<Vec<Enriched<P, S>>, E>
where
    K: Eq + Hash + Clone,
    S: Clone,
    F: FnOnce(HashSet<K>) -> Fut,
    Fut: Future<Output = Result<HashMap<K, S>, E>>,
{
    let keys: HashSet<K> = primary.iter().filter_map(&key_of).collect();
    let found = if keys.is_empty() {
        HashMap::new()
    } else {
        fetch_secondary(keys).await?
    };
    Ok(primary
        .into_iter()
        .map(|record| {
            let secondary = key_of(&record).and_then(|k| found.get(&k).cloned());
            Enriched { record, secondary }
        })
        .collect())
}

/// Like [`enrich`], but a failed secondary fetch yields every record unenriched.
///
/// Hydration is decoration on top of data the caller already has; losing it is
/// logged and the primary records are still returned.
pub async fn enrich_or_degrade<P, K, S, F, Fut>(
    what: &str,
    primary: Vec<P>,
    key_of: impl Fn(&P) -> Option<K>,
    fetch_secondary: F,
) -> Vec<Enriched<P, S>>
where
    K: Eq + Hash + Clone,
    S: Clone,
    F: FnOnce(HashSet<K>) -> Fut,
    Fut: Future<Output = Result<HashMap<K, S>, SteamError>>,
{
    let mut failure = None;
    let fetch = |keys| {
        let fut = fetch_secondary(keys);
        let failure = &mut failure;
        async move {
            match fut.await {
                Ok(found) => Ok::<_, Infallible>(found),
                Err(e) => {
                    *failure = Some(e);
                    Ok(HashMap::new())
                }
            }
        }
    };
    let out = match enrich(primary, key_of, fetch).await {
        Ok(out) => out,
        Err(never) => match never {},
    };
    if let Some(e) = failure {
        tracing::warn!(what, error = %e, "enrichment unavailable, returning unenriched records");
    }
    out
}

/// Runs `fetch_chunk` over `keys` in chunks of at most `chunk_size` and merges the results.
///
/// Chunks run one after another; the first failing chunk fails the whole fetch.
pub async fn fetch_chunked<K, S, E, F, Fut>(
    keys: HashSet<K>,
    chunk_size: usize,
    mut fetch_chunk: F,
) -> Result<HashMap<K, S>, E>
where
    K: Eq + Hash + Ord + Clone,
    F: FnMut(Vec<K>) -> Fut,
    Fut: Future<Output = Result<HashMap<K, S>, E>>,
{
    let mut keys: Vec<K> = keys.into_iter().collect();
    keys.sort();
    let mut merged = HashMap::with_capacity(keys.len());
    for chunk in keys.chunks(chunk_size.max(1)) {
        merged.extend(fetch_chunk(chunk.to_vec()).await?);
    }
    Ok(merged)
}

/// Player summaries for every id, batched at the endpoint maximum.
pub async fn player_summaries_by_id(
    gateway: &SteamGateway,
    ids: HashSet<SteamId>,
) -> Result<HashMap<SteamId, PlayerSummary>, SteamError> {
    fetch_chunked(ids, PLAYER_SUMMARIES_MAX_IDS, |chunk| async move {
        let players = gateway.player_summaries(&chunk).await?;
        Ok(players.into_iter().map(|p| (p.steamid, p)).collect())
    })
    .await
}

/// Player summaries keyed by 32-bit account id.
///
/// Account ids are lifted into the SteamID64 namespace for the lookup, and results are
/// mapped back with the reverse transform. Summaries whose id falls outside the
/// individual-account range cannot correspond to a requested key and are dropped.
pub async fn player_summaries_by_account_id(
    gateway: &SteamGateway,
    account_ids: HashSet<u32>,
) -> Result<HashMap<u32, PlayerSummary>, SteamError> {
    let ids: HashSet<SteamId> = account_ids
        .iter()
        .copied()
        .map(SteamId::from_account_id)
        .collect();
    let found = player_summaries_by_id(gateway, ids).await?;
    Ok(found
        .into_iter()
        .filter_map(|(id, summary)| id.account_id().map(|a| (a, summary)))
        .filter(|(a, _)| account_ids.contains(a))
        .collect())
}

/// Names for the given app ids.
///
/// Up to [`DIRECT_APP_LOOKUP_MAX`] ids are looked up one by one on the storefront
/// through the bounded fan-out (a miss just leaves that id out). Larger sets are
/// answered from the cached app catalog.
pub async fn app_names(
    services: &SteamServices,
    appids: HashSet<u32>,
) -> Result<HashMap<u32, String>, SteamError> {
    if appids.len() <= DIRECT_APP_LOOKUP_MAX {
        let gateway = &services.gateway;
        let found = map_bounded(appids, services.fanout_limit, |appid| async move {
            match gateway.app_details(appid).await {
                Ok(details) => Some((appid, details.name)),
                Err(e) => {
                    tracing::debug!(appid, error = %e, "app name lookup missed");
                    None
                }
            }
        })
        .await;
        return Ok(found.into_iter().collect());
    }

    let catalog = services.app_list.get().await?;
    Ok(catalog
        .iter()
        .filter(|app| appids.contains(&app.appid))
        .map(|app| (app.appid, app.name.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[tokio::test]
    async fn join_keeps_every_record_in_order() {
        let primary = vec![("a", 5u32), ("b", 5), ("c", 9)];
        let out = enrich(
            primary,
            |p| Some(p.1),
            |keys: HashSet<u32>| async move {
                let mut keys: Vec<u32> = keys.into_iter().collect();
                keys.sort();
                assert_eq!(keys, vec![5, 9]);
                Ok::<_, SteamError>(HashMap::from([(5u32, "Alpha".to_string())]))
            },
        )
        .await
        .unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].record.0, "a");
        assert_eq!(out[0].secondary.as_deref(), Some("Alpha"));
        assert_eq!(out[1].record.0, "b");
        assert_eq!(out[1].secondary.as_deref(), Some("Alpha"));
        assert_eq!(out[2].record.0, "c");
        assert_eq!(out[2].secondary, None);
    }

    #[tokio::test]
    async fn duplicate_keys_are_fetched_once() {
        let seen = Mutex::new(Vec::new());
        let primary: Vec<u32> = vec![1, 2, 1, 3, 2, 1, 3, 3];
        let out = enrich(
            primary,
            |p| Some(*p),
            |keys: HashSet<u32>| {
                seen.lock().unwrap().push(keys.len());
                async move { Ok::<_, SteamError>(keys.into_iter().map(|k| (k, k * 10)).collect()) }
            },
        )
        .await
        .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|e| e.secondary == Some(e.record * 10)));
    }

    #[tokio::test]
    async fn empty_key_set_skips_fetch() {
        let calls = AtomicUsize::new(0);
        let out = enrich(
            vec!["x", "y"],
            |_| None::<u32>,
            |_keys| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<HashMap<u32, String>, SteamError>(HashMap::new()) }
            },
        )
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.secondary.is_none()));
    }

    #[tokio::test]
    async fn fetch_error_propagates_from_strict_join() {
        let err = enrich(
            vec![1u32],
            |p| Some(*p),
            |_keys| async { Err::<HashMap<u32, u32>, _>(SteamError::RateLimited) },
        )
        .await
        .unwrap_err();
        assert_eq!(err, SteamError::RateLimited);
    }

    #[tokio::test]
    async fn lenient_join_degrades_to_unenriched() {
        let out: Vec<Enriched<u32, String>> = enrich_or_degrade(
            "test",
            vec![1u32, 2],
            |p| Some(*p),
            |_keys| async { Err(SteamError::Network("down".into())) },
        )
        .await;
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.secondary.is_none()));
    }

    #[tokio::test]
    async fn chunked_fetch_merges_all_chunks() {
        let chunk_sizes = Mutex::new(Vec::new());
        let keys: HashSet<u32> = (0..250).collect();
        let merged = fetch_chunked(keys, 100, |chunk| {
            chunk_sizes.lock().unwrap().push(chunk.len());
            async move {
                Ok::<_, SteamError>(
                    chunk
                        .into_iter()
                        .filter(|k| k % 2 == 0)
                        .map(|k| (k, k))
                        .collect(),
                )
            }
        })
        .await
        .unwrap();
        assert_eq!(*chunk_sizes.lock().unwrap(), vec![100, 100, 50]);
        assert_eq!(merged.len(), 125);
        assert_eq!(merged.get(&248), Some(&248));
    }
}
