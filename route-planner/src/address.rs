//! Address Normalizer: free text → one geocoded address inside the designated city.

use std::sync::Arc;

use maps_client::MapsProvider;
use tracing::{info, instrument};

use crate::error::PlanError;
use crate::model::ResolvedAddress;

/// The designated city and the spellings accepted in formatted addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceArea {
    name: String,
    spellings: Vec<String>,
}

impl ServiceArea {
    /// The display name is always one of the accepted spellings; blank and duplicate aliases are dropped.
    pub fn new<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut spellings = vec![name.clone()];
        for alias in aliases {
            let alias = alias.into().trim().to_string();
            if !alias.is_empty() && !spellings.iter().any(|s| s.to_lowercase() == alias.to_lowercase()) {
                spellings.push(alias);
            }
        }
        Self { name, spellings }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    /// Case-insensitive containment of any accepted spelling.
    pub fn contains(&self, formatted_address: &str) -> bool {
        let haystack = formatted_address.to_lowercase();
        self.spellings
            .iter()
            .any(|s| haystack.contains(&s.to_lowercase()))
    }
}

pub struct AddressNormalizer {
    maps: Arc<dyn MapsProvider>,
    area: ServiceArea,
}

impl AddressNormalizer {
    pub fn new(maps: Arc<dyn MapsProvider>, area: ServiceArea) -> Self {
        Self { maps, area }
    }

    pub fn area(&self) -> &ServiceArea {
        &self.area
    }

    /// Resolves `input` with the best geocode candidate only; a best candidate outside the
    /// service area fails even when later candidates would match.
    #[instrument(skip(self))]
    pub async fn normalize(&self, input: &str) -> Result<ResolvedAddress, PlanError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(PlanError::AddressNotFound {
                input: input.to_string(),
            });
        }

        let candidates = self.maps.geocode(query).await?;
        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| PlanError::AddressNotFound {
                input: input.to_string(),
            })?;

        if !self.area.contains(&best.formatted_address) {
            info!(
                formatted_address = %best.formatted_address,
                area = %self.area.name,
                "step: geocoded address outside service area"
            );
            return Err(PlanError::OutOfServiceArea {
                input: input.to_string(),
                formatted_address: best.formatted_address,
            });
        }

        info!(formatted_address = %best.formatted_address, "step: address normalized");
        Ok(ResolvedAddress {
            formatted_address: best.formatted_address,
            coordinate: best.geometry.location.into(),
        })
    }
}
