//! Remote calls against the inventory endpoint.
//!
//! Transport failures (network error, non-2xx status) surface as
//! `ErrorKind::Transport` for the caller to catch; envelope-level failures
//! come back as ordinary envelopes with `success=false`.

use contracts::api::envelope::Envelope;
use contracts::api::error::ApiError;
use contracts::api::request::{
    StockOperation, UpdateStockRequest, UpdateStockResult, ACTION_GET_INVENTORY,
};
use contracts::inventory::record::ProductRecord;

use crate::shared::config::ClientConfig;

/// GET `{endpoint}?action=getInventory`.
pub async fn fetch_inventory(
    config: &ClientConfig,
) -> Result<Envelope<Vec<ProductRecord>>, ApiError> {
    let url = format!("{}?action={}", config.endpoint_url, ACTION_GET_INVENTORY);
    let text = http_get(&url).await.map_err(ApiError::transport)?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::transport(format!("Respuesta del servidor no válida: {e}")))
}

/// POST of the `updateStock` request envelope.
pub async fn request_stock_change(
    config: &ClientConfig,
    product_id: i64,
    operation: StockOperation,
    quantity: i64,
) -> Result<Envelope<UpdateStockResult>, ApiError> {
    let request = UpdateStockRequest::new(product_id, operation, quantity);
    let body = serde_json::to_string(&request).map_err(|e| ApiError::internal(e.to_string()))?;
    let text = http_post(&config.endpoint_url, &body)
        .await
        .map_err(ApiError::transport)?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::transport(format!("Respuesta del servidor no válida: {e}")))
}

async fn http_get(url: &str) -> Result<String, String> {
    use web_sys::{Request, RequestInit, RequestMode};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    send(request).await
}

async fn http_post(url: &str, body: &str) -> Result<String, String> {
    use wasm_bindgen::JsValue;
    use web_sys::{Request, RequestInit, RequestMode};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    send(request).await
}

async fn send(request: web_sys::Request) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use web_sys::Response;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}
