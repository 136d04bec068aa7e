use std::collections::HashSet;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use contracts::api::request::StockOperation;
use contracts::inventory::status::StockStatus;

use crate::shared::config::ClientConfig;
use crate::shared::notify;
use crate::storefront::api;
use crate::storefront::purchase::{self, PurchaseTrigger, REFRESH_DELAY_MS};
use crate::storefront::view_model::ViewState;

#[component]
#[allow(non_snake_case)]
pub fn StorefrontPage(config: ClientConfig) -> impl IntoView {
    let config = StoredValue::new(config);
    let (view_state, set_view_state) = signal(ViewState::default());
    let (loading, set_loading) = signal(false);
    let (notice, set_notice) = signal::<Option<String>>(None);
    // ids of products with a purchase in flight; per-product, no global lock
    let (in_flight, set_in_flight) = signal::<HashSet<i64>>(HashSet::new());

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_inventory(&config.get_value()).await {
                Ok(envelope) => {
                    if envelope.success {
                        let snapshot = envelope.data.unwrap_or_default();
                        set_view_state.set(ViewState::reconcile(&snapshot));
                        set_notice.set(None);
                    } else {
                        set_notice.set(Some(format!(
                            "Error cargando inventario: {}",
                            envelope.message
                        )));
                    }
                }
                Err(error) => {
                    log::error!("error conectando con el servidor: {}", error.message);
                    set_notice.set(Some(
                        "Error conectando con el servidor. Intenta nuevamente.".to_string(),
                    ));
                }
            }
            set_loading.set(false);
        });
    };

    let handle_purchase = move |product_id: i64| {
        let Some(product) = view_state.get_untracked().get(product_id).cloned() else {
            return;
        };
        let intent = match PurchaseTrigger::from_view(&product).validate() {
            Ok(intent) => intent,
            Err(error) => {
                notify::alert(&error.message);
                return;
            }
        };
        if !notify::confirm(&purchase::confirm_message(&intent)) {
            return;
        }

        set_in_flight.update(|set| {
            set.insert(product_id);
        });
        spawn_local(async move {
            match api::request_stock_change(
                &config.get_value(),
                intent.product_id,
                StockOperation::Subtract,
                1,
            )
            .await
            {
                Ok(envelope) if envelope.success => match envelope.data {
                    Some(update) => {
                        notify::alert(&purchase::success_notice(&intent));
                        set_view_state.update(|state| {
                            state.apply_stock_update(product_id, update.new_stock);
                        });
                        // reconcile with server truth after the fixed delay
                        spawn_local(async move {
                            TimeoutFuture::new(REFRESH_DELAY_MS).await;
                            fetch();
                        });
                    }
                    None => {
                        // acknowledgment without newStock: fall back to a full read
                        log::warn!("respuesta de updateStock sin newStock");
                        fetch();
                    }
                },
                Ok(envelope) => {
                    notify::alert(&purchase::failure_notice(&intent, &envelope.message));
                }
                Err(error) => {
                    log::error!("error procesando la compra: {}", error.message);
                    notify::alert(purchase::TRANSPORT_NOTICE);
                }
            }
            // terminal step: re-enable the control whatever the outcome
            set_in_flight.update(|set| {
                set.remove(&product_id);
            });
        });
    };

    fetch();

    view! {
        <div class="storefront">
            <header class="storefront-header">
                <h1>{"Sabores del Bosque"}</h1>
                <button class="btn btn-secondary" on:click=move |_| fetch()>
                    {"Actualizar"}
                </button>
            </header>

            {move || notice.get().map(|message| view! { <div class="error">{message}</div> })}
            {move || loading.get().then(|| view! { <div class="loading">{"Cargando inventario..."}</div> })}

            <div class="product-grid">
                {move || {
                    view_state
                        .get()
                        .products()
                        .to_vec()
                        .into_iter()
                        .map(|product| {
                            let id = product.id;
                            let card_class = match product.status {
                                StockStatus::OutOfStock => "product-card out-of-stock",
                                StockStatus::LowStock { .. } => "product-card low-stock",
                                StockStatus::Available => "product-card",
                            };
                            let name = product
                                .name
                                .clone()
                                .unwrap_or_else(|| format!("Producto {id}"));
                            let price = product.price.clone();
                            let label = product.button_label();
                            let purchasable = product.status.purchasable();
                            view! {
                                <div class=card_class>
                                    <h3>{name}</h3>
                                    {price.map(|price| view! { <p class="price">{format!("${price}")}</p> })}
                                    <p class="stock-line">{product.stock_line()}</p>
                                    <button
                                        class="buy-btn"
                                        disabled=move || !purchasable || in_flight.get().contains(&id)
                                        on:click=move |_| handle_purchase(id)
                                    >
                                        {move || {
                                            if in_flight.get().contains(&id) {
                                                "Procesando...".to_string()
                                            } else {
                                                label.clone()
                                            }
                                        }}
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>

            {move || {
                (!loading.get() && view_state.get().is_empty() && notice.get().is_none())
                    .then(|| view! { <p class="empty">{"Inventario vacío."}</p> })
            }}
        </div>
    }
}
