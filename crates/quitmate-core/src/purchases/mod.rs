//! Premium purchase flow.
//!
//! The store service is an external collaborator consumed as a black box.
//! The one non-negotiable behavior is the demo fallback: whenever the
//! service fails, is unreachable, or is simply not configured, premium is
//! treated as unlocked. The app must stay fully usable offline and in demo
//! builds, so the fallback is load-bearing, not error handling.

pub mod revenuecat;

pub use revenuecat::RevenueCatClient;

use serde::{Deserialize, Serialize};

use crate::error::PurchaseError;

/// A purchasable package inside an offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub identifier: String,
    /// Store product id (platform-specific).
    pub product_id: String,
}

/// A group of packages presented together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub identifier: String,
    pub packages: Vec<Package>,
}

/// Entitlement snapshot for this install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
    pub premium_active: bool,
}

/// Every purchase backend implements this seam. Implementations are
/// stateless between calls; the install id names the customer.
pub trait PurchaseProvider {
    /// Unique identifier (e.g. "revenuecat").
    fn name(&self) -> &str;

    /// Whether the provider has credentials to talk to the service.
    fn is_configured(&self) -> bool;

    /// Current entitlements for this install.
    fn entitlements(
        &self,
    ) -> impl std::future::Future<Output = Result<Entitlements, PurchaseError>> + Send;

    /// Available offerings.
    fn offerings(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Offering>, PurchaseError>> + Send;

    /// Purchase a package; returns the resulting entitlements.
    fn purchase(
        &self,
        package: &Package,
    ) -> impl std::future::Future<Output = Result<Entitlements, PurchaseError>> + Send;

    /// Restore previous purchases; returns the refreshed entitlements.
    fn restore(
        &self,
    ) -> impl std::future::Future<Output = Result<Entitlements, PurchaseError>> + Send;
}

/// Purchase with the demo fallback applied: a clean answer from the
/// service is honored, every failure unlocks premium.
pub async fn unlock_with_fallback(provider: &impl PurchaseProvider, package: &Package) -> bool {
    match provider.purchase(package).await {
        Ok(entitlements) => entitlements.premium_active,
        Err(_) => true,
    }
}

/// Restore with the demo fallback applied.
pub async fn restore_with_fallback(provider: &impl PurchaseProvider) -> bool {
    match provider.restore().await {
        Ok(entitlements) => entitlements.premium_active,
        Err(_) => true,
    }
}

/// Entitlement check with the demo fallback applied.
pub async fn premium_with_fallback(provider: &impl PurchaseProvider) -> bool {
    match provider.entitlements().await {
        Ok(entitlements) => entitlements.premium_active,
        Err(_) => true,
    }
}
