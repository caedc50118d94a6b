//! EntityId — the (provider, region) pair identifying one forecastable series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One forecastable series: a cloud provider plus a region code.
///
/// Derived `Ord` compares provider first, then region — the same ordering
/// the output sort contract uses, so entity comparison and row sorting can
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub provider: String,
    pub region: String,
}

impl EntityId {
    pub fn new(provider: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.region)
    }
}
