use contracts::api::error::ErrorKind;
use thiserror::Error;

/// Everything that can go wrong while servicing an inventory request.
///
/// The display strings are the user-facing envelope messages, so they stay in
/// the storefront's language. The insufficient-stock message must keep its
/// "Stock insuficiente" prefix: the client matches on it to name the product.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("La hoja con el nombre '{0}' no fue encontrada.")]
    SheetNotFound(String),

    #[error("Producto con id {0} no encontrado.")]
    ProductNotFound(i64),

    #[error("Operación desconocida: '{0}'. Use 'add' o 'subtract'.")]
    UnknownOperation(String),

    #[error("Cantidad inválida: {0}. Debe ser un entero positivo.")]
    InvalidQuantity(i64),

    #[error("Stock insuficiente: quedan {current} unidades del producto {product_id}.")]
    InsufficientStock {
        product_id: i64,
        current: i64,
        requested: i64,
    },

    #[error("Columna inválida en la hoja: {0}")]
    InvalidColumn(String),

    #[error("Error de almacenamiento: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Error leyendo la hoja: {0}")]
    Csv(#[from] csv::Error),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::SheetNotFound(_) => ErrorKind::Configuration,
            InventoryError::ProductNotFound(_) => ErrorKind::NotFound,
            InventoryError::UnknownOperation(_)
            | InventoryError::InvalidQuantity(_)
            | InventoryError::InvalidColumn(_) => ErrorKind::Validation,
            InventoryError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            InventoryError::Storage(_) | InventoryError::Csv(_) => ErrorKind::Internal,
        }
    }
}
