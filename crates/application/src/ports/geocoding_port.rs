//! Geocoding service port
//!
//! Defines the interface for resolving free-text addresses to coordinates.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address geocoding
///
/// `Ok(None)` means the provider answered but found no match; `Err` means
/// the provider itself failed. The two stay distinct so the caller can tag
/// its not-found outcome for diagnostics.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<Option<GeoLocation>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }
}
