/// Availability of a product as shown on the storefront.
///
/// Both the full-snapshot render and the single-product update after a
/// purchase classify through [`StockStatus::classify`], so the same stock
/// value always produces the same visual state regardless of which path
/// computed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// `stock_actual <= 0`: purchase disabled.
    OutOfStock,
    /// `0 < stock_actual <= stock_minimo`: purchase enabled, warning shown
    /// with the exact remaining count.
    LowStock { remaining: i64 },
    Available,
}

impl StockStatus {
    pub fn classify(stock_actual: i64, stock_minimo: i64) -> Self {
        if stock_actual <= 0 {
            StockStatus::OutOfStock
        } else if stock_actual <= stock_minimo {
            StockStatus::LowStock {
                remaining: stock_actual,
            }
        } else {
            StockStatus::Available
        }
    }

    pub fn purchasable(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stock_is_out_of_stock_regardless_of_threshold() {
        for minimo in [-5, 0, 3, 100] {
            assert_eq!(StockStatus::classify(0, minimo), StockStatus::OutOfStock);
            assert_eq!(StockStatus::classify(-2, minimo), StockStatus::OutOfStock);
            assert!(!StockStatus::classify(0, minimo).purchasable());
        }
    }

    #[test]
    fn stock_at_or_below_threshold_is_low_with_exact_count() {
        assert_eq!(
            StockStatus::classify(1, 3),
            StockStatus::LowStock { remaining: 1 }
        );
        assert_eq!(
            StockStatus::classify(3, 3),
            StockStatus::LowStock { remaining: 3 }
        );
        assert!(StockStatus::classify(3, 3).purchasable());
    }

    #[test]
    fn stock_above_threshold_is_available() {
        assert_eq!(StockStatus::classify(4, 3), StockStatus::Available);
        assert_eq!(StockStatus::classify(50, 0), StockStatus::Available);
        assert!(StockStatus::classify(4, 3).purchasable());
    }
}
