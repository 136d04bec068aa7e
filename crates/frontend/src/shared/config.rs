use contracts::api::error::ApiError;

use crate::shared::api_utils::api_url;

/// Sentinel left behind by an unconfigured deployment.
pub const ENDPOINT_PLACEHOLDER: &str = "REEMPLAZAR_CON_TU_URL_DE_WEB_APP";

/// Client-side configuration, constructed explicitly and handed to the
/// storefront at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint_url: String,
}

impl ClientConfig {
    /// Fails fast when the endpoint URL is absent or still the placeholder;
    /// the app then renders a blocking configuration notice instead of the
    /// storefront.
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, ApiError> {
        let endpoint_url = endpoint_url.into();
        if endpoint_url.trim().is_empty() || endpoint_url == ENDPOINT_PLACEHOLDER {
            return Err(ApiError::configuration(
                "URL del endpoint de inventario no configurada. Verifica la configuración del despliegue.",
            ));
        }
        Ok(Self { endpoint_url })
    }

    /// Endpoint derived from the current window location.
    pub fn from_location() -> Result<Self, ApiError> {
        Self::new(api_url("/api/inventory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::api::error::ErrorKind;

    #[test]
    fn valid_endpoint_is_accepted() {
        let config = ClientConfig::new("http://localhost:3000/api/inventory").unwrap();
        assert_eq!(config.endpoint_url, "http://localhost:3000/api/inventory");
    }

    #[test]
    fn placeholder_endpoint_is_a_configuration_error() {
        let err = ClientConfig::new(ENDPOINT_PLACEHOLDER).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn empty_endpoint_is_a_configuration_error() {
        assert!(ClientConfig::new("").is_err());
        assert!(ClientConfig::new("   ").is_err());
    }
}
