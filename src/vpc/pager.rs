use std::future::Future;

use serde::de::DeserializeOwned;

use crate::common::pager::{Collection, next_start};
use crate::common::response::DetailedResponse;
use crate::error::{Error, Result};
use crate::vpc::serviceclient::VpcService;

/// Options of a list operation that pages with a `start` cursor.
pub trait ListOptions: Clone {
    type Collection: Collection + DeserializeOwned;

    fn set_start(&mut self, start: Option<String>);

    /// Issue the list call for the current cursor.
    fn fetch<'a>(
        &'a self,
        service: &'a VpcService,
    ) -> impl Future<Output = Result<DetailedResponse<Self::Collection>>> + Send + 'a;
}

type Item<O> = <<O as ListOptions>::Collection as Collection>::Item;

/// Walks a paginated list one page at a time, following `next` until it is absent.
///
/// A pager is single use: once exhausted it yields no more pages. To start
/// over, build a new one.
pub struct Pager<'a, O: ListOptions> {
    service: &'a VpcService,
    options: O,
    has_next: bool,
    pages_fetched: usize,
}

impl<'a, O: ListOptions> Pager<'a, O> {
    pub fn new(service: &'a VpcService, options: O) -> Self {
        Self {
            service,
            options,
            has_next: true,
            pages_fetched: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the last page has been returned.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Item<O>>>> {
        if !self.has_next {
            return Ok(None);
        }

        let response = self.options.fetch(self.service).await?;
        let collection = response.into_result();
        let start = next_start(collection.next_link()).map_err(|e| Error::decode("pager", e))?;

        self.pages_fetched += 1;
        log::debug!(
            "Fetched page {} (more: {})",
            self.pages_fetched,
            start.is_some()
        );

        self.has_next = start.is_some();
        self.options.set_start(start);
        Ok(Some(collection.into_items()))
    }

    /// Fetch every remaining page and concatenate the items.
    pub async fn get_all(mut self) -> Result<Vec<Item<O>>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }
}

/// Implement [`ListOptions`] for a list options type with a `start` field.
macro_rules! pageable {
    ($options:ty, $collection:ty, $method:ident) => {
        impl $crate::vpc::pager::ListOptions for $options {
            type Collection = $collection;

            fn set_start(&mut self, start: Option<String>) {
                self.start = start;
            }

            fn fetch<'a>(
                &'a self,
                service: &'a $crate::vpc::serviceclient::VpcService,
            ) -> impl ::std::future::Future<
                Output = $crate::error::Result<
                    $crate::common::response::DetailedResponse<$collection>,
                >,
            > + Send
                   + 'a {
                service.$method(self)
            }
        }
    };
}

pub(crate) use pageable;
