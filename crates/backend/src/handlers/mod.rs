pub mod inventory;

use std::sync::Arc;

use crate::domain::inventory::SheetStore;

/// Shared handler state: the sheet-backed inventory store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SheetStore>,
}
