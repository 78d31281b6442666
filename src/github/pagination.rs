//! Cursor-following over paginated GitHub list endpoints.
//!
//! GitHub communicates pagination through the `Link` response header. The
//! continuation policy is deliberately lenient: a missing or malformed
//! `rel="next"` link terminates pagination instead of failing, which avoids
//! infinite loops on malformed headers.

use crate::Result;
use core::future::Future;
use futures::Stream;
use futures::stream;
use futures_util::TryStreamExt;
use std::sync::LazyLock;

const LOG_TARGET: &str = "pagination";

/// Pattern to extract the page number from a GitHub API Link header segment
static PAGE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"[?&]page=(\d+)").expect("invalid regex"));

/// One page of a paginated list response.
#[derive(Debug)]
pub struct Page<T> {
    /// The items carried by this page. May be empty.
    pub items: Vec<T>,

    /// The number of the next page, if the response advertised one.
    pub next: Option<u32>,
}

/// Extract the next page number from a `Link` header value.
///
/// Returns `None` when the header has no `rel="next"` segment or when the
/// segment carries no parsable `page=` query parameter.
#[must_use]
pub fn next_page_number(link_header: &str) -> Option<u32> {
    let segment = link_header.split(',').find(|segment| segment.contains(r#"rel="next""#))?;

    let Some(page) = PAGE_REGEX
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .and_then(|page| page.as_str().parse().ok())
    else {
        log::debug!(target: LOG_TARGET, "Malformed next link '{segment}', treating as end of pagination");
        return None;
    };

    Some(page)
}

/// Produce the pages of a paginated endpoint lazily, starting at page 1.
///
/// The stream yields one `Vec<T>` per page and stops after the first page
/// without a next link. Every invocation starts over at page 1; there is no
/// cursor state shared across consumers. A failed page request ends the
/// stream with that error.
pub fn page_stream<T, F, Fut>(request: F) -> impl Stream<Item = Result<Vec<T>>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::try_unfold((request, Some(1u32)), |(request, next)| async move {
        let Some(page_number) = next else {
            return Ok(None);
        };

        let page = request(page_number).await?;
        Ok(Some((page.items, (request, page.next))))
    })
}

/// Fetch and concatenate all pages of a paginated endpoint, starting at page 1.
///
/// Pagination is all-or-nothing: a failure on any page discards the items
/// accumulated from earlier pages and surfaces the underlying error.
pub async fn fetch_all<T, F, Fut>(request: F) -> Result<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    page_stream(request).try_concat().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn three_pages(page: u32) -> Result<Page<u32>> {
        Ok(match page {
            1 => Page {
                items: vec![1, 2],
                next: Some(2),
            },
            2 => Page {
                items: vec![3, 4],
                next: Some(3),
            },
            _ => Page {
                items: vec![5, 6],
                next: None,
            },
        })
    }

    #[tokio::test]
    async fn fetch_all_concatenates_every_page() {
        let items = fetch_all(|page| async move { three_pages(page) }).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn fetch_all_discards_earlier_pages_on_failure() {
        let result = fetch_all(|page| async move {
            match page {
                1 => Ok(Page {
                    items: vec![1, 2],
                    next: Some(2),
                }),
                _ => Err(ohno::app_err!("page {page} unavailable")),
            }
        })
        .await;

        let _ = result.unwrap_err();
    }

    #[tokio::test]
    async fn fetch_all_treats_empty_pages_as_zero_items() {
        let items: Vec<u32> = fetch_all(|_| async move {
            Ok(Page {
                items: Vec::new(),
                next: None,
            })
        })
        .await
        .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn page_stream_yields_one_item_per_page() {
        let pages: Vec<Vec<u32>> = page_stream(|page| async move { three_pages(page) }).try_collect().await.unwrap();
        assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[tokio::test]
    async fn page_stream_restarts_from_page_one() {
        let first_pages_requested = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = Arc::clone(&first_pages_requested);
            let pages: Vec<Vec<u32>> = page_stream(move |page| {
                let counter = Arc::clone(&counter);
                async move {
                    if page == 1 {
                        let _ = counter.fetch_add(1, Ordering::SeqCst);
                    }
                    three_pages(page)
                }
            })
            .try_collect()
            .await
            .unwrap();
            assert_eq!(pages.len(), 3);
        }

        assert_eq!(first_pages_requested.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn next_link_is_extracted_from_link_header() {
        let header = r#"<https://api.github.com/orgs/dse/repos?page=2>; rel="next", <https://api.github.com/orgs/dse/repos?page=5>; rel="last""#;
        assert_eq!(next_page_number(header), Some(2));
    }

    #[test]
    fn missing_next_relation_ends_pagination() {
        let header = r#"<https://api.github.com/orgs/dse/repos?page=5>; rel="last""#;
        assert_eq!(next_page_number(header), None);
    }

    #[test]
    fn malformed_next_link_ends_pagination() {
        let header = r#"<https://api.github.com/orgs/dse/repos>; rel="next""#;
        assert_eq!(next_page_number(header), None);
    }
}
