use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument};

use super::product::{Product, ProductSummary};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog is empty")]
    Empty,
    #[error("Product with empty id")]
    EmptyId,
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
    #[error("Product {0} must have a positive price")]
    InvalidPrice(String),
    #[error("Product {0} price overflows the gateway amount")]
    PriceOverflow(String),
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only product catalog, built once at startup.
///
/// Products keep the order they were declared in so listings are stable.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for product in &products {
            if product.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price == 0 {
                return Err(CatalogError::InvalidPrice(product.id.clone()));
            }
            if product.amount_in_minor_units().is_none() {
                return Err(CatalogError::PriceOverflow(product.id.clone()));
            }
        }

        Ok(Self { products })
    }

    /// Loads the catalog from a JSON array of products, or falls back to the
    /// built-in notes when no path is configured.
    #[instrument(skip_all, fields(path = ?path))]
    pub async fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                let bytes = tokio::fs::read(path).await?;
                let products: Vec<Product> = serde_json::from_slice(&bytes)?;
                Self::new(products)?
            }
            None => Self::builtin_notes(),
        };
        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn summaries(&self) -> Vec<ProductSummary> {
        self.products.iter().map(Product::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// The notes sold by the store out of the box.
    pub fn builtin_notes() -> Self {
        const DRIVE: &str = "https://drive.google.com/uc?export=download&id=";
        let notes = [
            ("c_notes", "C Notes", "13LUsRlpsgrWL7clJBTgadvEuiT6x2IsM"),
            ("javascript_notes", "JavaScript Notes", "1dNJvdn7LMzJpYzyoHz6J1sdlIv1REh7v"),
            ("git_notes", "Git Notes", "1Vvbbggz1RV7URlm1HWfdez05TXOkpYC-"),
            ("css_notes", "CSS Notes", "1puy1HziMZe-ZXR5-keYiRNzSD5mu_aDI"),
            ("html5_notes", "HTML5 Notes", "1LHZijM0mg2NOTVR_zygX1d-bzfyS6viX"),
            ("kotlin_notes", "Kotlin Notes", "1cLFvWDEHH4M3tLIJ6fNm5Xz4g1kCncK4"),
            ("matlab_notes", "MatLab Notes", "13_9VE2pSii_CBzXTXwvRrEcQ_QSIofpY"),
            ("mongodb_notes", "MongoDB Notes", "1eGZlDrEl1vSwq6oSs76_zcCl4IEwVhIe"),
            ("mysql_notes", "MySQL Notes", "1m0hevvjSWrYOQBR3LukjKsGXCskMPEfP"),
            ("reactjs_notes", "ReactJS Notes", "1bad37X6yX2J-giQ6E_ilrsCr1DNWr45n"),
        ];

        let products = notes
            .into_iter()
            .map(|(id, name, file)| Product::new(id, name, 1, format!("{DRIVE}{file}")))
            .collect();
        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_notes_are_valid() {
        let builtin = Catalog::builtin_notes();
        assert_eq!(builtin.len(), 10);
        // Same checks as a file-loaded catalog.
        let revalidated = Catalog::new(builtin.products.clone()).unwrap();
        assert_eq!(revalidated.len(), 10);
        assert_eq!(builtin.get("git_notes").unwrap().name, "Git Notes");
        assert!(builtin.get("rust_notes").is_none());
    }

    #[test]
    fn rejects_bad_products() {
        let ok = Product::new("a", "A", 1, "https://example.com/a");

        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::new(vec![ok.clone(), ok.clone()]),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));
        assert!(matches!(
            Catalog::new(vec![Product::new("", "Blank", 1, "x")]),
            Err(CatalogError::EmptyId)
        ));
        assert!(matches!(
            Catalog::new(vec![Product::new("free", "Free", 0, "x")]),
            Err(CatalogError::InvalidPrice(id)) if id == "free"
        ));
        assert!(matches!(
            Catalog::new(vec![Product::new("big", "Big", u64::MAX, "x")]),
            Err(CatalogError::PriceOverflow(id)) if id == "big"
        ));
    }

    #[tokio::test]
    async fn loads_catalog_file_in_declared_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        tokio::fs::write(
            &path,
            r#"[
                {"id": "z_notes", "name": "Z Notes", "price": 5, "downloadLink": "https://example.com/z"},
                {"id": "a_notes", "name": "A Notes", "price": 3, "downloadLink": "https://example.com/a"}
            ]"#,
        )
        .await
        .unwrap();

        let catalog = Catalog::load(Some(&path)).await.unwrap();
        let ids: Vec<_> = catalog.summaries().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["z_notes", "a_notes"]);
        assert_eq!(catalog.get("a_notes").unwrap().download_link, "https://example.com/a");
    }

    #[tokio::test]
    async fn falls_back_to_builtin_notes() {
        let catalog = Catalog::load(None).await.unwrap();
        assert_eq!(catalog.len(), Catalog::builtin_notes().len());
    }
}
