//! Sequential submission of imported drafts to the catalog store.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Product, ProductDraft};
use crate::store::CatalogStore;

/// What happened to one imported row. Rows are numbered from 1.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RowOutcome {
    Created { row: usize, product: Product },
    Failed { row: usize, error: String },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            RowOutcome::Created { row, .. } | RowOutcome::Failed { row, .. } => *row,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, RowOutcome::Created { .. })
    }
}

/// Per-row results of an import batch, in row order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub outcomes: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_created()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.created_count()
    }

    /// Products that were created, in row order.
    pub fn created(&self) -> impl Iterator<Item = &Product> {
        self.outcomes.iter().filter_map(|o| match o {
            RowOutcome::Created { product, .. } => Some(product),
            RowOutcome::Failed { .. } => None,
        })
    }
}

/// Create every draft in the catalog, one request at a time.
///
/// Each create is awaited before the next is issued, so products land in
/// row order. A failing row is recorded and the batch carries on; rows
/// already created are kept.
pub async fn import_drafts<S>(store: &S, drafts: Vec<ProductDraft>) -> ImportReport
where
    S: CatalogStore + ?Sized,
{
    let total = drafts.len();
    info!(rows = total, "importing products");

    let outcomes: Vec<RowOutcome> = stream::iter(drafts.into_iter().enumerate())
        .then(|(idx, draft)| async move {
            let row = idx + 1;
            match store.create(draft).await {
                Ok(product) => {
                    debug!(row, product_id = %product.id, "imported row");
                    RowOutcome::Created { row, product }
                }
                Err(e) => {
                    warn!(row, error = %e, "failed to import row");
                    RowOutcome::Failed {
                        row,
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect()
        .await;

    let report = ImportReport { outcomes };
    info!(
        created = report.created_count(),
        failed = report.failed_count(),
        "import finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductPatch};
    use crate::error::CommerceError;
    use crate::ids::ProductId;
    use crate::money::Money;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Catalog that rejects drafts named "bad" and tracks concurrent calls.
    #[derive(Default)]
    struct RecordingCatalog {
        products: Mutex<Vec<Product>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for RecordingCatalog {
        async fn list_all(&self) -> Result<Vec<Product>, CommerceError> {
            Ok(self.products.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
            Ok(self.products.lock().unwrap().iter().find(|p| &p.id == id).cloned())
        }

        async fn create(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if draft.name == "bad" {
                return Err(CommerceError::Storage("rejected".to_string()));
            }
            let mut products = self.products.lock().unwrap();
            let product = Product::from_draft(ProductId::new(products.len().to_string()), draft);
            products.push(product.clone());
            Ok(product)
        }

        async fn update(&self, id: &ProductId, _patch: ProductPatch) -> Result<Product, CommerceError> {
            Err(CommerceError::ProductNotFound(id.to_string()))
        }

        async fn delete(&self, _id: &ProductId) -> Result<(), CommerceError> {
            Ok(())
        }
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft::new(name, Category::Laboratory, Money::new(100), 1)
    }

    #[tokio::test]
    async fn test_import_in_row_order() {
        let store = RecordingCatalog::default();
        let report = import_drafts(&store, vec![draft("a"), draft("b"), draft("c")]).await;

        assert_eq!(report.created_count(), 3);
        assert_eq!(report.failed_count(), 0);
        let names: Vec<_> = store.list_all().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_row_does_not_stop_batch() {
        let store = RecordingCatalog::default();
        let report = import_drafts(&store, vec![draft("a"), draft("bad"), draft("c")]).await;

        assert_eq!(report.created_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(matches!(
            &report.outcomes[1],
            RowOutcome::Failed { row: 2, error } if error.contains("rejected")
        ));
        assert_eq!(report.outcomes[2].row(), 3);

        let created: Vec<_> = report.created().map(|p| p.name.as_str()).collect();
        assert_eq!(created, vec!["a", "c"]);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let store = RecordingCatalog::default();
        let report = import_drafts(&store, Vec::new()).await;
        assert!(report.outcomes.is_empty());
        assert_eq!(report.created_count(), 0);
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let store = RecordingCatalog::default();
        let report = import_drafts(&store, vec![draft("bad")]).await;
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["outcome"], "failed");
        assert_eq!(json["outcomes"][0]["row"], 1);
    }
}
