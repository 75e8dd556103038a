//! Postcode lookup boundary used by address fields.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;

/// One candidate address returned for a postcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCandidate {
    /// Unique property reference.
    pub uprn: String,
    /// Single-line address.
    pub address: String,
    /// Structured address parts.
    pub item: AddressParts,
}

/// Structured parts of a candidate address, in the provider's casing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AddressParts {
    /// Building number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    /// Building name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    /// Street.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thoroughfare_name: Option<String>,
    /// Post town.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_town: Option<String>,
    /// Postcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

/// A source of addresses for a postcode.
pub trait AddressLookup {
    /// Candidate addresses for `postcode`.
    fn find(&self, postcode: &str) -> Result<Vec<AddressCandidate>, Error>;
}

/// The placeholder returned when the lookup fails.
pub fn fallback_candidates() -> Vec<AddressCandidate> {
    vec![AddressCandidate {
        uprn: "x".to_string(),
        address: "address".to_string(),
        item: AddressParts {
            building_number: Some("1".to_string()),
            post_town: Some("The Town".to_string()),
            postcode: Some("XX1 1XX".to_string()),
            ..AddressParts::default()
        },
    }]
}

/// Look up `postcode`, degrading a failed lookup to [`fallback_candidates`].
pub fn find_addresses(lookup: &dyn AddressLookup, postcode: &str) -> Vec<AddressCandidate> {
    match lookup.find(postcode) {
        Ok(found) => {
            debug!(postcode, count = found.len(), "address lookup");
            found
        }
        Err(e) => {
            warn!(postcode, error = %e, "address lookup failed, using fallback");
            fallback_candidates()
        }
    }
}
