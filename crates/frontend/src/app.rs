use leptos::prelude::*;

use crate::shared::config::ClientConfig;
use crate::storefront::page::StorefrontPage;

#[component]
pub fn App() -> impl IntoView {
    // A configuration error is fatal to initialization: blocking notice
    // instead of the storefront, no automatic recovery.
    match ClientConfig::from_location() {
        Ok(config) => view! { <StorefrontPage config=config /> }.into_any(),
        Err(error) => {
            log::error!("configuración inválida: {}", error.message);
            view! {
                <div class="config-error">
                    <h2>{"Error de configuración"}</h2>
                    <p>{error.message}</p>
                </div>
            }
            .into_any()
        }
    }
}
