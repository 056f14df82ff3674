use std::future::Future;

use anyhow::{bail, Result};

use super::cancel::CancelFlag;
use crate::api::models::{Page, PageRequest};

/// Call `list` with advancing offsets until the remote collection is exhausted.
///
/// Stops when the accumulated count reaches the reported total, when a page
/// comes back empty or short, or when the reported total drops below what has
/// already been collected. Each page's total replaces the previous one. A zero total on the first page yields an empty result. The
/// first call is always made since it is how the total is learned.
pub async fn paginate<F, Fut>(page_size: u64, cancel: &CancelFlag, mut list: F) -> Result<Page>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page>>,
{
    if page_size == 0 {
        bail!("Page size must be greater than 0");
    }

    let mut items = Vec::new();
    let mut total = 0;
    let mut offset = 0;

    loop {
        cancel.check()?;

        let page = list(PageRequest {
            offset,
            limit: page_size,
        })
        .await?;
        let fetched = page.items.len() as u64;
        tracing::debug!(offset, fetched, total = page.total, "fetched page");

        if offset == 0 && page.total == 0 {
            return Ok(Page::default());
        }

        let shrunk = page.total < items.len() as u64;
        total = page.total;
        items.extend(page.items);

        if shrunk || fetched < page_size || items.len() as u64 >= total {
            break;
        }
        offset += page_size;
    }

    Ok(Page { items, total })
}
