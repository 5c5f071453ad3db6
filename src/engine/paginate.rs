//! engine::paginate
//!
//! Page-token collection for list endpoints.
//!
//! # Design
//!
//! Google list APIs return a page of items plus an opaque `nextPageToken`.
//! Under `--all`, [`collect_all`] drives the fetch closure until no token
//! remains, concatenating pages in server order and halting on the first
//! error with no partial-result recovery. Without `--all`, handlers fetch a
//! single page and surface the next token to the caller for manual
//! continuation.

use std::future::Future;

/// One page of a listing: the items plus the continuation token, if any.
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }

    /// A final page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Fetch every page, concatenating items in server order.
///
/// The closure receives the continuation token (`None` for the first page)
/// and returns the next page. Iteration stops when a page carries no token;
/// any error aborts immediately and is returned as-is.
pub async fn collect_all<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = fetch(token.take()).await?;
        items.extend(page.items);
        match page.next {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn single_page() {
        let result: Result<Vec<i32>, &str> = tokio_test::block_on(collect_all(|token| async move {
            assert!(token.is_none());
            Ok(Page::last(vec![1, 2, 3]))
        }));
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn concatenates_pages_in_server_order() {
        let calls = RefCell::new(Vec::new());
        let result: Result<Vec<i32>, &str> = tokio_test::block_on(collect_all(|token| {
            calls.borrow_mut().push(token.clone());
            async move {
                Ok(match token.as_deref() {
                    None => Page::new(vec![1, 2], Some("p2".into())),
                    Some("p2") => Page::new(vec![3], Some("p3".into())),
                    Some("p3") => Page::last(vec![4, 5]),
                    other => panic!("unexpected token {:?}", other),
                })
            }
        }));
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *calls.borrow(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[test]
    fn halts_on_first_error() {
        let calls = RefCell::new(0u32);
        let result: Result<Vec<i32>, String> = tokio_test::block_on(collect_all(|token| {
            *calls.borrow_mut() += 1;
            async move {
                match token {
                    None => Ok(Page::new(vec![1], Some("p2".into()))),
                    Some(_) => Err("boom".to_string()),
                }
            }
        }));
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn empty_listing() {
        let result: Result<Vec<i32>, &str> =
            tokio_test::block_on(collect_all(|_| async { Ok(Page::last(vec![])) }));
        assert!(result.unwrap().is_empty());
    }
}
