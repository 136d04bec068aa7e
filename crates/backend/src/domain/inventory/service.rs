use contracts::api::request::StockOperation;
use contracts::inventory::record::{CellValue, ProductRecord, COL_STOCK_ACTUAL};

use super::error::InventoryError;
use super::sheet::SheetStore;

/// All product rows, in sheet order.
pub async fn list_inventory(store: &SheetStore) -> Result<Vec<ProductRecord>, InventoryError> {
    store.read_all().await
}

/// Applies `current ± quantity` to the product's `stock_actual` and returns
/// the new value. Subtracting below zero is rejected before anything is
/// written.
pub async fn update_stock(
    store: &SheetStore,
    product_id: i64,
    operation: &str,
    quantity: i64,
) -> Result<i64, InventoryError> {
    let operation = StockOperation::parse(operation)
        .map_err(|_| InventoryError::UnknownOperation(operation.to_string()))?;
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity(quantity));
    }

    let updated = store
        .update_row(product_id, |row| {
            let current = row
                .stock_actual()
                .map_err(|e| InventoryError::InvalidColumn(e.message))?;
            let new_stock = match operation {
                StockOperation::Add => current + quantity,
                StockOperation::Subtract => current - quantity,
            };
            if new_stock < 0 {
                return Err(InventoryError::InsufficientStock {
                    product_id,
                    current,
                    requested: quantity,
                });
            }
            row.set(COL_STOCK_ACTUAL, CellValue::Int(new_stock));
            Ok(())
        })
        .await?;

    updated
        .stock_actual()
        .map_err(|e| InventoryError::InvalidColumn(e.message))
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{temp_store, SAMPLE_SHEET};
    use super::*;

    #[tokio::test]
    async fn list_inventory_returns_rows_in_sheet_order() {
        let store = temp_store("svc-list", Some(SAMPLE_SHEET));
        let rows = list_inventory(&store).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn subtract_decrements_and_returns_new_stock() {
        let store = temp_store("svc-subtract", Some(SAMPLE_SHEET));
        let new_stock = update_stock(&store, 1, "subtract", 1).await.unwrap();
        assert_eq!(new_stock, 7);

        let rows = list_inventory(&store).await.unwrap();
        assert_eq!(rows[0].stock_actual().unwrap(), 7);
    }

    #[tokio::test]
    async fn add_is_the_restock_path() {
        let store = temp_store("svc-add", Some(SAMPLE_SHEET));
        let new_stock = update_stock(&store, 3, "add", 10).await.unwrap();
        assert_eq!(new_stock, 10);
    }

    #[tokio::test]
    async fn subtract_below_zero_is_insufficient_stock() {
        let store = temp_store("svc-insufficient", Some(SAMPLE_SHEET));
        let err = update_stock(&store, 2, "subtract", 3).await.unwrap_err();
        match err {
            InventoryError::InsufficientStock {
                product_id,
                current,
                requested,
            } => {
                assert_eq!(product_id, 2);
                assert_eq!(current, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // nothing was written
        let rows = list_inventory(&store).await.unwrap();
        assert_eq!(rows[1].stock_actual().unwrap(), 2);
    }

    #[tokio::test]
    async fn subtract_to_exactly_zero_is_allowed() {
        let store = temp_store("svc-to-zero", Some(SAMPLE_SHEET));
        let new_stock = update_stock(&store, 2, "subtract", 2).await.unwrap();
        assert_eq!(new_stock, 0);
    }

    #[tokio::test]
    async fn unknown_operation_is_rejected_before_touching_the_sheet() {
        let store = temp_store("svc-unknown-op", Some(SAMPLE_SHEET));
        let err = update_stock(&store, 1, "multiply", 1).await.unwrap_err();
        assert!(matches!(err, InventoryError::UnknownOperation(_)));
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let store = temp_store("svc-bad-qty", Some(SAMPLE_SHEET));
        assert!(matches!(
            update_stock(&store, 1, "subtract", 0).await.unwrap_err(),
            InventoryError::InvalidQuantity(0)
        ));
        assert!(matches!(
            update_stock(&store, 1, "add", -4).await.unwrap_err(),
            InventoryError::InvalidQuantity(-4)
        ));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let store = temp_store("svc-not-found", Some(SAMPLE_SHEET));
        let err = update_stock(&store, 42, "subtract", 1).await.unwrap_err();
        assert!(matches!(err, InventoryError::ProductNotFound(42)));
    }

    #[tokio::test]
    async fn concurrent_subtracts_do_not_lose_updates() {
        let store = std::sync::Arc::new(temp_store("svc-concurrent", Some(SAMPLE_SHEET)));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                update_stock(&store, 1, "subtract", 1).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        let rows = list_inventory(&store).await.unwrap();
        assert_eq!(rows[0].stock_actual().unwrap(), 4);
    }
}
