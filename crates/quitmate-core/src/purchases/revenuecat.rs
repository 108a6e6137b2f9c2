//! RevenueCat REST backend for the purchase flow.
//!
//! Talks to the subscriber endpoints of the RevenueCat v1 API. The client
//! is deliberately thin: it reports entitlements and offerings and posts
//! purchases, and lets the callers in [`super`] apply the demo fallback.

use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use super::{Entitlements, Offering, Package, PurchaseProvider};
use crate::error::PurchaseError;

const DEFAULT_BASE_URL: &str = "https://api.revenuecat.com/v1";

/// The entitlement gating premium features.
const ENTITLEMENT_ID: &str = "premium";

/// RevenueCat REST client.
pub struct RevenueCatClient {
    api_key: String,
    app_user_id: String,
    base_url: String,
    client: Client,
}

impl RevenueCatClient {
    /// Client for the production endpoint.
    pub fn new(api_key: impl Into<String>, app_user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_user_id: app_user_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the service endpoint (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, PurchaseError> {
        Url::parse(base_url).map_err(|e| PurchaseError::InvalidEndpoint(e.to_string()))?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    fn subscriber_url(&self) -> String {
        format!("{}/subscribers/{}", self.base_url, self.app_user_id)
    }

    async fn get_json(&self, url: &str) -> Result<Value, PurchaseError> {
        if !self.is_configured() {
            return Err(PurchaseError::NotConfigured);
        }
        let resp = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PurchaseError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }

    /// Whether `subscriber.entitlements` carries an active premium grant.
    fn parse_entitlements(data: &Value) -> Entitlements {
        let premium_active = data["subscriber"]["entitlements"]
            .as_object()
            .map(|entitlements| entitlements.contains_key(ENTITLEMENT_ID))
            .unwrap_or(false);
        Entitlements { premium_active }
    }
}

impl PurchaseProvider for RevenueCatClient {
    fn name(&self) -> &str {
        "revenuecat"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.app_user_id.is_empty()
    }

    async fn entitlements(&self) -> Result<Entitlements, PurchaseError> {
        let data = self.get_json(&self.subscriber_url()).await?;
        Ok(Self::parse_entitlements(&data))
    }

    async fn offerings(&self) -> Result<Vec<Offering>, PurchaseError> {
        let url = format!("{}/offerings", self.subscriber_url());
        let data = self.get_json(&url).await?;

        let mut offerings = Vec::new();
        if let Some(items) = data["offerings"].as_array() {
            for item in items {
                let identifier = item["identifier"].as_str().unwrap_or_default().to_string();
                let packages = item["packages"]
                    .as_array()
                    .map(|packages| {
                        packages
                            .iter()
                            .map(|p| Package {
                                identifier: p["identifier"]
                                    .as_str()
                                    .unwrap_or_default()
                                    .to_string(),
                                product_id: p["platform_product_identifier"]
                                    .as_str()
                                    .unwrap_or_default()
                                    .to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                offerings.push(Offering {
                    identifier,
                    packages,
                });
            }
        }
        Ok(offerings)
    }

    async fn purchase(&self, package: &Package) -> Result<Entitlements, PurchaseError> {
        if !self.is_configured() {
            return Err(PurchaseError::NotConfigured);
        }
        let body = json!({
            "app_user_id": self.app_user_id,
            "product_id": package.product_id,
        });
        let resp = self
            .client
            .post(format!("{}/receipts", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PurchaseError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let data: Value = resp.json().await?;
        Ok(Self::parse_entitlements(&data))
    }

    async fn restore(&self) -> Result<Entitlements, PurchaseError> {
        // Restoring is a fresh read of the subscriber's entitlements.
        self.entitlements().await
    }
}
