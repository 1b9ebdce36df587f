//! HTTP client for the Clover v3 merchant REST API.
//!
//! Every call is a single authenticated GET. Non-2xx responses become
//! [`CloverError::Upstream`]; transport failures become
//! [`CloverError::Network`]. Nothing is retried.

use std::time::Duration;

use bitewise_core::{Category, CloverConfig};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::aggregate::aggregate_categories;
use crate::error::{extract_upstream_message, CloverError};
use crate::types::{CloverCategory, CloverItem, CloverMerchant, CloverModifierGroup, ElementList};

/// Fixed page size for list endpoints. Only the first page is read.
pub const PAGE_LIMIT: u32 = 100;

const ITEMS_EXPAND: &str = "variants,categories";
const ITEM_DETAILS_EXPAND: &str = "variants";

/// Client for the Clover merchant API.
///
/// Holds one pooled `reqwest::Client` and the merchant collection root
/// (e.g. `https://api.clover.com/v3/merchants/`). Credentials are supplied
/// per call since each merchant has its own token.
#[derive(Debug, Clone)]
pub struct CloverClient {
    client: Client,
    base_url: Url,
}

impl CloverClient {
    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`CloverError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CloverError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &CloverConfig) -> Result<Self, CloverError> {
        Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CloverError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CloverError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CloverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so merchant ids append as a new segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed =
            Url::parse(&normalised).map_err(|_| CloverError::InvalidBaseUrl(base_url.to_owned()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(CloverError::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches the first page of a merchant's categories.
    ///
    /// # Errors
    ///
    /// - [`CloverError::Upstream`] on a non-2xx status.
    /// - [`CloverError::Network`] on transport failure.
    /// - [`CloverError::Deserialize`] if the body is not a category list.
    pub async fn fetch_categories(
        &self,
        merchant_id: &str,
        token: &str,
    ) -> Result<Vec<CloverCategory>, CloverError> {
        let url = self.list_url(merchant_id, "categories", None)?;
        let page: ElementList<CloverCategory> =
            self.get_json(url, token, "categories").await?;
        Ok(page.elements)
    }

    /// Fetches the first page of a merchant's items with variants and
    /// category links expanded inline.
    ///
    /// # Errors
    ///
    /// Same as [`CloverClient::fetch_categories`].
    pub async fn fetch_items(
        &self,
        merchant_id: &str,
        token: &str,
    ) -> Result<Vec<CloverItem>, CloverError> {
        let url = self.list_url(merchant_id, "items", Some(ITEMS_EXPAND))?;
        let page: ElementList<CloverItem> = self.get_json(url, token, "items").await?;
        Ok(page.elements)
    }

    /// Fetches the first page of a merchant's modifier groups.
    ///
    /// # Errors
    ///
    /// Same as [`CloverClient::fetch_categories`].
    pub async fn fetch_modifier_groups(
        &self,
        merchant_id: &str,
        token: &str,
    ) -> Result<Vec<CloverModifierGroup>, CloverError> {
        let url = self.list_url(merchant_id, "modifier_groups", None)?;
        let page: ElementList<CloverModifierGroup> =
            self.get_json(url, token, "modifier_groups").await?;
        Ok(page.elements)
    }

    /// Fetches the merchant resource itself.
    ///
    /// # Errors
    ///
    /// Same as [`CloverClient::fetch_categories`].
    pub async fn fetch_merchant_details(
        &self,
        merchant_id: &str,
        token: &str,
    ) -> Result<CloverMerchant, CloverError> {
        let url = self.merchant_url(merchant_id, &[])?;
        self.get_json(url, token, "merchant").await
    }

    /// Fetches a single item with its variants expanded.
    ///
    /// # Errors
    ///
    /// Same as [`CloverClient::fetch_categories`].
    pub async fn fetch_item_details(
        &self,
        merchant_id: &str,
        item_id: &str,
        token: &str,
    ) -> Result<CloverItem, CloverError> {
        let mut url = self.merchant_url(merchant_id, &["items", item_id])?;
        url.query_pairs_mut()
            .append_pair("expand", ITEM_DETAILS_EXPAND);
        self.get_json(url, token, "item").await
    }

    /// Fetches categories and items concurrently and folds them into the
    /// category → variation tree. Fails if either fetch fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`CloverError`] raised by either fetch.
    pub async fn fetch_category_catalog(
        &self,
        merchant_id: &str,
        token: &str,
    ) -> Result<Vec<Category>, CloverError> {
        let (categories, items) = tokio::try_join!(
            self.fetch_categories(merchant_id, token),
            self.fetch_items(merchant_id, token),
        )?;

        tracing::debug!(
            merchant_id,
            categories = categories.len(),
            items = items.len(),
            "aggregating clover catalog"
        );

        Ok(aggregate_categories(&categories, &items))
    }

    /// `{base}/{merchant_id}/{segments...}`, each segment percent-encoded.
    fn merchant_url(&self, merchant_id: &str, segments: &[&str]) -> Result<Url, CloverError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| CloverError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(merchant_id);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn list_url(
        &self,
        merchant_id: &str,
        endpoint: &str,
        expand: Option<&str>,
    ) -> Result<Url, CloverError> {
        let mut url = self.merchant_url(merchant_id, &[endpoint])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &PAGE_LIMIT.to_string());
            pairs.append_pair("offset", "0");
            if let Some(expand) = expand {
                pairs.append_pair("expand", expand);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        context: &str,
    ) -> Result<T, CloverError> {
        tracing::debug!(path = url.path(), context, "clover request");

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_upstream_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                context,
                message = %message,
                "clover request failed"
            );
            return Err(CloverError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| CloverError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}
