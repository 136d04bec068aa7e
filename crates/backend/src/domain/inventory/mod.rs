pub mod error;
pub mod service;
pub mod sheet;

pub use error::InventoryError;
pub use sheet::SheetStore;
