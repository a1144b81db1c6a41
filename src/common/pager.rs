use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::common::polymorphic::DecodeError;

const START_PARAMETER: &str = "start";

/// A link to a page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
}

/// One page of a paginated list response.
pub trait Collection {
    type Item;

    /// The link to the following page; `None` on the last page.
    fn next_link(&self) -> Option<&PageLink>;

    /// Total number of items across all pages, when the service reports it.
    fn total_count(&self) -> Option<i64>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Extract the `start` cursor from a `next` link.
///
/// Returns `Ok(None)` on the last page. A link that is present but carries no
/// usable cursor is an error, so callers never loop on the same page.
pub fn next_start(link: Option<&PageLink>) -> Result<Option<String>, DecodeError> {
    let Some(link) = link else {
        return Ok(None);
    };

    let url = Url::parse(&link.href)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(&link.href)))
        .map_err(|_| DecodeError::InvalidPageLink(link.href.clone()))?;

    url.query_pairs()
        .find(|(key, _)| key == START_PARAMETER)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(Some)
        .ok_or_else(|| DecodeError::InvalidPageLink(link.href.clone()))
}

/// Define a paginated collection envelope and its [`Collection`] impl.
macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $field:ident: $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub $field: Vec<$item>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub first: Option<$crate::common::pager::PageLink>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub limit: Option<i64>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub next: Option<$crate::common::pager::PageLink>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub total_count: Option<i64>,
        }

        impl $crate::common::pager::Collection for $name {
            type Item = $item;

            fn next_link(&self) -> Option<&$crate::common::pager::PageLink> {
                self.next.as_ref()
            }

            fn total_count(&self) -> Option<i64> {
                self.total_count
            }

            fn into_items(self) -> Vec<$item> {
                self.$field
            }
        }
    };
}

pub(crate) use collection;

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> PageLink {
        PageLink {
            href: href.to_string(),
        }
    }

    #[test]
    fn last_page_has_no_cursor() {
        assert_eq!(next_start(None).unwrap(), None);
    }

    #[test]
    fn cursor_is_read_from_absolute_link() {
        let next = link(
            "https://us-south.iaas.cloud.ibm.com/v1/vpcs?limit=50&start=9d5a91a3e2cbd233b5a5b33436855ed1",
        );
        assert_eq!(
            next_start(Some(&next)).unwrap().as_deref(),
            Some("9d5a91a3e2cbd233b5a5b33436855ed1")
        );
    }

    #[test]
    fn cursor_is_read_from_relative_link() {
        let next = link("/v1/subnets?start=r006%2Dabc&limit=10");
        assert_eq!(next_start(Some(&next)).unwrap().as_deref(), Some("r006-abc"));
    }

    #[test]
    fn link_without_cursor_is_rejected() {
        let next = link("https://us-south.iaas.cloud.ibm.com/v1/vpcs?limit=50");
        assert!(matches!(
            next_start(Some(&next)),
            Err(DecodeError::InvalidPageLink(_))
        ));
    }
}
