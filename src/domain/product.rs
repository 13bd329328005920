use serde::{Deserialize, Serialize};

/// Gateway amounts are expressed in the currency's minor unit (paise, cents).
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// A purchasable set of notes.
///
/// The download link is only ever handed out after a verified payment, so
/// listing endpoints must go through [`ProductSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub download_link: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        download_link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            download_link: download_link.into(),
        }
    }

    /// Price scaled into the gateway's minor unit.
    ///
    /// Catalog validation guarantees this does not overflow for loaded
    /// products; `None` is only possible for hand-built values.
    pub fn amount_in_minor_units(&self) -> Option<u64> {
        self.price.checked_mul(MINOR_UNITS_PER_MAJOR)
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Public view of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: u64,
}
