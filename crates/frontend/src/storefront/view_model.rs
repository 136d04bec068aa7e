use contracts::inventory::record::{ProductRecord, COL_NOMBRE, COL_PRECIO};
use contracts::inventory::status::StockStatus;

/// Rendered state of one product. Everything the card and its buy control
/// show is derived from here; the DOM is a pure projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: i64,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: i64,
    pub stock_minimo: i64,
    pub status: StockStatus,
}

impl ProductView {
    /// Buy-control label for the current status.
    pub fn button_label(&self) -> String {
        match self.status {
            StockStatus::OutOfStock => "Agotado".to_string(),
            StockStatus::LowStock { remaining } => format!("Comprar (Quedan {remaining})"),
            StockStatus::Available => "Comprar".to_string(),
        }
    }

    pub fn stock_line(&self) -> String {
        format!("Stock: {}", self.stock)
    }
}

/// Per-product view state, in snapshot order. Rebuilt whole by [`reconcile`]
/// on every full load; patched in place by [`apply_stock_update`] after a
/// purchase. Both paths classify through [`StockStatus::classify`], so the
/// same stock value always renders the same.
///
/// [`reconcile`]: ViewState::reconcile
/// [`apply_stock_update`]: ViewState::apply_stock_update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    products: Vec<ProductView>,
}

impl ViewState {
    /// Derives the full view state from an inventory snapshot.
    ///
    /// Rows missing the numeric `id`/`stock_actual`/`stock_minimo` columns
    /// cannot be rendered and are skipped with a warning.
    pub fn reconcile(snapshot: &[ProductRecord]) -> Self {
        let mut products = Vec::with_capacity(snapshot.len());
        for record in snapshot {
            let (Ok(id), Ok(stock), Ok(stock_minimo)) =
                (record.id(), record.stock_actual(), record.stock_minimo())
            else {
                log::warn!("fila de inventario sin columnas numéricas, ignorada: {record:?}");
                continue;
            };
            products.push(ProductView {
                id,
                name: record.text(COL_NOMBRE).filter(|s| !s.trim().is_empty()),
                price: record.text(COL_PRECIO).filter(|s| !s.trim().is_empty()),
                stock,
                stock_minimo,
                status: StockStatus::classify(stock, stock_minimo),
            });
        }
        Self { products }
    }

    /// Applies the server-confirmed stock of a single product through the
    /// same classification rule as a full reconcile. Returns `false` when the
    /// product is not on screen.
    pub fn apply_stock_update(&mut self, product_id: i64, new_stock: i64) -> bool {
        match self.products.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.stock = new_stock;
                product.status = StockStatus::classify(new_stock, product.stock_minimo);
                true
            }
            None => false,
        }
    }

    pub fn products(&self) -> &[ProductView] {
        &self.products
    }

    pub fn get(&self, product_id: i64) -> Option<&ProductView> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::inventory::record::CellValue;

    fn record(id: i64, stock: i64, minimo: i64) -> ProductRecord {
        let mut record = ProductRecord::new();
        record.push("id", CellValue::Int(id));
        record.push("nombre", CellValue::Text(format!("Producto {id}")));
        record.push("precio", CellValue::Float(10.0 + id as f64));
        record.push("stock_actual", CellValue::Int(stock));
        record.push("stock_minimo", CellValue::Int(minimo));
        record
    }

    #[test]
    fn zero_stock_renders_out_of_stock_and_disabled() {
        let state = ViewState::reconcile(&[record(1, 0, 5)]);
        let product = state.get(1).unwrap();
        assert_eq!(product.status, StockStatus::OutOfStock);
        assert!(!product.status.purchasable());
        assert_eq!(product.button_label(), "Agotado");
    }

    #[test]
    fn low_stock_shows_the_exact_remaining_count_and_stays_enabled() {
        let state = ViewState::reconcile(&[record(1, 2, 3)]);
        let product = state.get(1).unwrap();
        assert_eq!(product.status, StockStatus::LowStock { remaining: 2 });
        assert!(product.status.purchasable());
        assert_eq!(product.button_label(), "Comprar (Quedan 2)");
    }

    #[test]
    fn available_stock_keeps_the_plain_label() {
        let state = ViewState::reconcile(&[record(1, 9, 3)]);
        assert_eq!(state.get(1).unwrap().button_label(), "Comprar");
    }

    #[test]
    fn snapshot_order_is_preserved() {
        let state = ViewState::reconcile(&[record(3, 1, 1), record(1, 5, 1), record(2, 0, 1)]);
        let ids: Vec<i64> = state.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn rows_without_numeric_columns_are_skipped() {
        let mut broken = ProductRecord::new();
        broken.push("id", CellValue::Text("uno".into()));
        broken.push("stock_actual", CellValue::Int(4));
        let state = ViewState::reconcile(&[broken, record(2, 4, 1)]);
        assert_eq!(state.products().len(), 1);
        assert_eq!(state.get(2).unwrap().id, 2);
    }

    #[test]
    fn single_product_update_matches_a_full_re_render() {
        let before = [record(1, 8, 3), record(2, 5, 3)];
        let after = [record(1, 8, 3), record(2, 4, 3)];

        let mut patched = ViewState::reconcile(&before);
        assert!(patched.apply_stock_update(2, 4));

        assert_eq!(patched, ViewState::reconcile(&after));
    }

    #[test]
    fn re_applying_the_same_stock_value_is_a_no_op_visually() {
        let snapshot = [record(1, 2, 3)];
        let rendered = ViewState::reconcile(&snapshot);
        let mut patched = rendered.clone();
        patched.apply_stock_update(1, 2);
        assert_eq!(patched, rendered);
    }

    #[test]
    fn update_crossing_the_threshold_changes_the_status() {
        let mut state = ViewState::reconcile(&[record(1, 4, 3)]);
        assert_eq!(state.get(1).unwrap().status, StockStatus::Available);

        state.apply_stock_update(1, 3);
        assert_eq!(
            state.get(1).unwrap().status,
            StockStatus::LowStock { remaining: 3 }
        );

        state.apply_stock_update(1, 0);
        assert_eq!(state.get(1).unwrap().status, StockStatus::OutOfStock);
    }

    #[test]
    fn updating_an_unknown_product_reports_false() {
        let mut state = ViewState::reconcile(&[record(1, 4, 3)]);
        assert!(!state.apply_stock_update(99, 1));
    }
}
