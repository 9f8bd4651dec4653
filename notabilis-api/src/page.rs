//! Lazy pagination over the listing endpoints.

use futures::stream::{self, Stream, TryStreamExt};

use crate::client::ApiClient;
use crate::endpoint::{Endpoint, Paged, PagedParams};
use crate::error::ApiError;

struct PageState<P> {
    params: P,
    next_page: u32,
    pages_fetched: u64,
    total_pages: Option<u64>,
}

/// Returns a lazy stream over every item of a paged endpoint.
///
/// Fetching starts at page 1 and continues until the fetched page count
/// reaches the server-reported total; the final page is fetched even when
/// it adds nothing. Pages are requested only as the stream is consumed.
/// Each call starts fresh at page 1; there is no mid-stream resume.
///
/// A server-reported page size of zero would never terminate, so it is
/// reported as [`ApiError::Precondition`] instead.
pub fn paged<'a, E, T>(
    client: &'a ApiClient,
    params: E::Params,
) -> impl Stream<Item = Result<T, ApiError>> + 'a
where
    E: Endpoint<Response = Paged<T>>,
    E::Params: PagedParams + 'a,
{
    let state = PageState {
        params,
        next_page: 1,
        pages_fetched: 0,
        total_pages: None,
    };
    stream::try_unfold(state, move |mut state: PageState<E::Params>| async move {
        if let Some(total) = state.total_pages {
            if state.pages_fetched >= total {
                return Ok(None);
            }
        }
        state.params.set_page(state.next_page);
        let page: Paged<T> = client.call::<E>(&state.params).await?;
        if page.per_page == 0 {
            return Err(ApiError::Precondition(
                "paged response reported a page size of zero".to_string(),
            ));
        }
        state.total_pages = Some(page.total_pages());
        state.pages_fetched += 1;
        state.next_page += 1;
        Ok(Some((page.results, state)))
    })
    .map_ok(|items: Vec<T>| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::QueryParams;
    use crate::transport::{RawResponse, Transport};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use url::Url;

    /// Fake listing endpoint yielding plain integers.
    struct Listing;

    #[derive(Debug, Clone, Default)]
    struct ListingParams {
        page: Option<u32>,
    }

    impl QueryParams for ListingParams {
        fn query_pairs(&self) -> Vec<(&'static str, String)> {
            let mut pairs = Vec::new();
            if let Some(page) = self.page {
                pairs.push(("page", page.to_string()));
            }
            pairs
        }
    }

    impl PagedParams for ListingParams {
        fn set_page(&mut self, page: u32) {
            self.page = Some(page);
        }
    }

    impl Endpoint for Listing {
        type Params = ListingParams;
        type Response = Paged<u64>;
        const PATH: &'static str = "/listing";
        const CACHE_TTL_SECS: u64 = 60;
    }

    /// Serves 25 items across pages of 10.
    struct ThreePageTransport {
        calls: AtomicU32,
    }

    #[async_trait]
    impl Transport for ThreePageTransport {
        async fn get(&self, url: &Url, _ttl: u64) -> Result<RawResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let page: u64 = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .map(|(_, v)| v.parse().unwrap())
                .unwrap_or(1);
            let start = (page - 1) * 10;
            let results: Vec<u64> = (start..(start + 10).min(25)).collect();
            let body = json!({
                "total_results": 25,
                "page": page,
                "per_page": 10,
                "results": results,
            });
            Ok(RawResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    fn test_client(transport: Arc<dyn Transport>) -> ApiClient {
        ApiClient::with_transport("https://api.test", transport)
            .unwrap()
            .with_min_interval(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_paged_yields_all_items_in_order() {
        let transport = Arc::new(ThreePageTransport {
            calls: AtomicU32::new(0),
        });
        let client = test_client(transport.clone());

        let items: Vec<u64> = paged::<Listing, _>(&client, ListingParams::default())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items, (0..25).collect::<Vec<u64>>());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_paged_is_restartable_per_call() {
        let transport = Arc::new(ThreePageTransport {
            calls: AtomicU32::new(0),
        });
        let client = test_client(transport.clone());

        let first: Vec<u64> = paged::<Listing, _>(&client, ListingParams::default())
            .try_collect()
            .await
            .unwrap();
        let second: Vec<u64> = paged::<Listing, _>(&client, ListingParams::default())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_paged_is_lazy() {
        let transport = Arc::new(ThreePageTransport {
            calls: AtomicU32::new(0),
        });
        let client = test_client(transport.clone());

        let mut stream = Box::pin(paged::<Listing, _>(&client, ListingParams::default()));
        for expected in 0..10u64 {
            assert_eq!(stream.try_next().await.unwrap(), Some(expected));
        }
        // The first page covers the first ten items; page 2 is untouched.
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    struct EmptyTransport {
        calls: AtomicU32,
    }

    #[async_trait]
    impl Transport for EmptyTransport {
        async fn get(&self, _url: &Url, _ttl: u64) -> Result<RawResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = json!({
                "total_results": 0,
                "page": 1,
                "per_page": 10,
                "results": [],
            });
            Ok(RawResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_paged_empty_result_issues_one_request() {
        let transport = Arc::new(EmptyTransport {
            calls: AtomicU32::new(0),
        });
        let client = test_client(transport.clone());

        let items: Vec<u64> = paged::<Listing, _>(&client, ListingParams::default())
            .try_collect()
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    struct ZeroPerPageTransport;

    #[async_trait]
    impl Transport for ZeroPerPageTransport {
        async fn get(&self, _url: &Url, _ttl: u64) -> Result<RawResponse, ApiError> {
            let body = json!({
                "total_results": 25,
                "page": 1,
                "per_page": 0,
                "results": [],
            });
            Ok(RawResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_zero_per_page_is_a_precondition_error() {
        let client = test_client(Arc::new(ZeroPerPageTransport));

        let result: Result<Vec<u64>, ApiError> =
            paged::<Listing, _>(&client, ListingParams::default())
                .try_collect()
                .await;

        assert!(matches!(result, Err(ApiError::Precondition(_))));
    }
}
