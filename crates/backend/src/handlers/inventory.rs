use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use contracts::api::envelope::Envelope;
use contracts::api::error::ErrorKind;
use contracts::api::request::{
    UpdateStockRequest, UpdateStockResult, ACTION_GET_INVENTORY, ACTION_UPDATE_STOCK,
};
use contracts::inventory::record::ProductRecord;

use crate::domain::inventory::{service, InventoryError};
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub action: Option<String>,
}

/// GET /api/inventory?action=getInventory
///
/// Always answers HTTP 200 with an envelope; the `success` flag is the error
/// channel, as the browser client expects.
pub async fn handle_get(
    State(state): State<AppState>,
    Query(params): Query<ActionParams>,
) -> Json<Envelope<Vec<ProductRecord>>> {
    match params.action.as_deref() {
        Some(ACTION_GET_INVENTORY) => match service::list_inventory(&state.store).await {
            Ok(rows) if rows.is_empty() => Json(Envelope::ok("Inventario vacío.", rows)),
            Ok(rows) => Json(Envelope::ok("Inventario obtenido correctamente.", rows)),
            Err(e) => Json(fail(e)),
        },
        _ => Json(Envelope::failure(
            "Acción no válida para GET. Use GET con ?action=getInventory para obtener el inventario.",
        )),
    }
}

/// POST /api/inventory
///
/// Body is the request envelope `{action, ...}`. The body is parsed by hand so
/// a malformed payload still comes back as a failure envelope instead of a
/// transport-level fault.
pub async fn handle_post(
    State(state): State<AppState>,
    body: String,
) -> Json<Envelope<UpdateStockResult>> {
    let value: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => return Json(Envelope::failure(format!("Cuerpo de petición inválido: {e}"))),
    };

    let action = value
        .get("action")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    match action.as_deref() {
        Some(ACTION_UPDATE_STOCK) => {
            let request: UpdateStockRequest = match serde_json::from_value(value) {
                Ok(request) => request,
                Err(e) => {
                    return Json(Envelope::failure(format!(
                        "Petición updateStock inválida: {e}"
                    )))
                }
            };
            match service::update_stock(
                &state.store,
                request.product_id,
                &request.operation,
                request.quantity,
            )
            .await
            {
                Ok(new_stock) => Json(Envelope::ok(
                    "Stock actualizado correctamente.",
                    UpdateStockResult { new_stock },
                )),
                Err(e) => Json(fail(e)),
            }
        }
        _ => Json(Envelope::failure(
            "Acción no válida para POST. Use action=updateStock.",
        )),
    }
}

/// Converts a domain error into the failure envelope, logging at a severity
/// matching its kind.
fn fail<T>(error: InventoryError) -> Envelope<T> {
    match error.kind() {
        ErrorKind::Internal | ErrorKind::Configuration => {
            tracing::error!("inventory request failed: {error}")
        }
        _ => tracing::warn!("inventory request rejected: {error}"),
    }
    Envelope::failure(error.to_string())
}
