use contracts::api::error::ApiError;

use super::view_model::ProductView;

/// Fixed delay before the post-purchase full refresh that reconciles the
/// optimistic update with server truth.
pub const REFRESH_DELAY_MS: u32 = 1_000;

/// Generic retry suggestion for transport failures; never retried
/// automatically.
pub const TRANSPORT_NOTICE: &str = "Error procesando la compra. Intenta nuevamente.";

/// Server-message fragment that identifies an insufficient-stock rejection.
const INSUFFICIENT_STOCK_MARKER: &str = "Stock insuficiente";

/// Raw data carried by the control that triggered the purchase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseTrigger {
    pub product_id: Option<i64>,
    pub product: Option<String>,
    pub price: Option<String>,
}

/// A trigger that passed validation; only intents reach the confirmation
/// step and the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseIntent {
    pub product_id: i64,
    pub product: String,
    pub price: String,
}

impl PurchaseTrigger {
    pub fn from_view(view: &ProductView) -> Self {
        Self {
            product_id: Some(view.id),
            product: view.name.clone(),
            price: view.price.clone(),
        }
    }

    /// Validating step of the purchase flow: id, name and price must all be
    /// present, otherwise the flow aborts locally and nothing is sent.
    pub fn validate(&self) -> Result<PurchaseIntent, ApiError> {
        match (
            self.product_id,
            self.product.as_deref(),
            self.price.as_deref(),
        ) {
            (Some(product_id), Some(product), Some(price))
                if !product.trim().is_empty() && !price.trim().is_empty() =>
            {
                Ok(PurchaseIntent {
                    product_id,
                    product: product.to_string(),
                    price: price.to_string(),
                })
            }
            _ => Err(ApiError::validation("Información del producto incompleta")),
        }
    }
}

/// Confirmation prompt shown before anything is sent.
pub fn confirm_message(intent: &PurchaseIntent) -> String {
    format!(
        "¿Confirmar compra de {}?\nPrecio: ${}",
        intent.product, intent.price
    )
}

pub fn success_notice(intent: &PurchaseIntent) -> String {
    format!("Compra realizada: {}", intent.product)
}

/// Notice for a `success=false` envelope. An insufficient-stock rejection is
/// clarified by naming the product.
pub fn failure_notice(intent: &PurchaseIntent, server_message: &str) -> String {
    if server_message.contains(INSUFFICIENT_STOCK_MARKER) {
        format!("No hay suficiente stock de {}", intent.product)
    } else {
        format!("Error en compra: {server_message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::api::error::ErrorKind;

    fn intent() -> PurchaseIntent {
        PurchaseIntent {
            product_id: 2,
            product: "Mermelada de mora".to_string(),
            price: "9.9".to_string(),
        }
    }

    #[test]
    fn complete_trigger_validates_into_an_intent() {
        let trigger = PurchaseTrigger {
            product_id: Some(2),
            product: Some("Mermelada de mora".to_string()),
            price: Some("9.9".to_string()),
        };
        assert_eq!(trigger.validate().unwrap(), intent());
    }

    #[test]
    fn incomplete_triggers_abort_before_any_request() {
        let cases = [
            PurchaseTrigger::default(),
            PurchaseTrigger {
                product_id: None,
                product: Some("Miel".into()),
                price: Some("12.5".into()),
            },
            PurchaseTrigger {
                product_id: Some(1),
                product: None,
                price: Some("12.5".into()),
            },
            PurchaseTrigger {
                product_id: Some(1),
                product: Some("Miel".into()),
                price: None,
            },
            PurchaseTrigger {
                product_id: Some(1),
                product: Some("  ".into()),
                price: Some("12.5".into()),
            },
        ];
        for trigger in cases {
            let err = trigger.validate().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "trigger: {trigger:?}");
        }
    }

    #[test]
    fn confirmation_names_product_and_price() {
        let message = confirm_message(&intent());
        assert!(message.contains("Mermelada de mora"));
        assert!(message.contains("$9.9"));
    }

    #[test]
    fn insufficient_stock_failure_is_clarified_with_the_product_name() {
        let message = failure_notice(&intent(), "Stock insuficiente: quedan 1 unidades del producto 2.");
        assert_eq!(message, "No hay suficiente stock de Mermelada de mora");
    }

    #[test]
    fn other_failures_relay_the_server_message() {
        let message = failure_notice(&intent(), "Producto con id 2 no encontrado.");
        assert!(message.contains("Producto con id 2 no encontrado."));
    }
}
