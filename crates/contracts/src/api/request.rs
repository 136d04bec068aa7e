use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

/// Action names understood by the remote store.
pub const ACTION_GET_INVENTORY: &str = "getInventory";
pub const ACTION_UPDATE_STOCK: &str = "updateStock";

/// Stock mutation direction. The wire format is the lowercase action word;
/// anything else is rejected with a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    Add,
    Subtract,
}

impl StockOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOperation::Add => "add",
            StockOperation::Subtract => "subtract",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw {
            "add" => Ok(StockOperation::Add),
            "subtract" => Ok(StockOperation::Subtract),
            other => Err(ApiError::validation(format!(
                "Operación desconocida: '{other}'. Use 'add' o 'subtract'."
            ))),
        }
    }
}

impl std::fmt::Display for StockOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request envelope of the `updateStock` POST.
///
/// `operation` travels as a plain string so the remote side can answer unknown
/// values with a failure envelope instead of a deserialization fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStockRequest {
    pub action: String,
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub operation: String,
    pub quantity: i64,
}

impl UpdateStockRequest {
    pub fn new(product_id: i64, operation: StockOperation, quantity: i64) -> Self {
        Self {
            action: ACTION_UPDATE_STOCK.to_string(),
            product_id,
            operation: operation.as_str().to_string(),
            quantity,
        }
    }
}

/// Success payload of `updateStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStockResult {
    #[serde(rename = "newStock")]
    pub new_stock: i64,
}
