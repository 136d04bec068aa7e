pub mod record;
pub mod status;

pub use record::{CellValue, ProductRecord};
pub use status::StockStatus;
