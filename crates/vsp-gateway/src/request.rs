//! Behaviour shared by every gateway operation.
//!
//! - [`GatewayRequest`]: envelope fields, endpoint selection and basket
//!   serialization common to all transaction types
//! - [`ServiceRequest`]: a generic request for any `TxType`, carrying the
//!   configured policy fields, an optional basket and extra fields

use crate::basket::{formatter_for, Basket, BasketFormatter};
use crate::config::RequestConfig;
use crate::constants::{field, PROTOCOL_VERSION};
use crate::fields::FormFields;
use crate::policy::flag_value;
use crate::GatewayError;

/// A single gateway operation (payment, refund, void, token removal...).
pub trait GatewayRequest: Send + Sync {
    /// Transaction type, e.g. `PAYMENT`. Also names the service endpoint.
    fn action(&self) -> &str;

    fn config(&self) -> &RequestConfig;

    /// Complete outgoing field set for this operation.
    fn data(&self) -> Result<FormFields, GatewayError>;

    /// Envelope fields every transaction carries.
    fn base_data(&self) -> FormFields {
        let config = self.config();
        let mut data = FormFields::new();
        data.insert(field::VPS_PROTOCOL, PROTOCOL_VERSION.to_string());
        data.insert(field::TX_TYPE, self.action().to_string());
        data.insert(field::VENDOR, config.vendor.clone());
        data.insert(
            field::ACCOUNT_TYPE,
            config.account_type_or_default().as_str().to_string(),
        );
        data
    }

    /// `<base>/<action lowercased>.vsp` for the configured environment.
    fn endpoint(&self) -> String {
        let config = self.config();
        config
            .endpoints
            .service_url(self.action(), config.test_mode)
    }

    fn basket_formatter(&self) -> &'static dyn BasketFormatter {
        formatter_for(self.config().use_old_basket_format)
    }

    /// Basket in the configured format.
    fn item_data(&self, basket: &Basket) -> String {
        self.basket_formatter().serialize(basket)
    }
}

/// Generic request for any transaction type.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    action: String,
    config: RequestConfig,
    basket: Basket,
    extra: FormFields,
}

impl ServiceRequest {
    pub fn new(action: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            action: action.into(),
            config,
            basket: Basket::new(),
            extra: FormFields::new(),
        }
    }

    pub fn with_basket(mut self, basket: Basket) -> Self {
        self.basket = basket;
        self
    }

    /// Add an operation-specific field. Unset values are sent empty.
    pub fn with_field<V>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V: Into<Option<String>>,
    {
        self.extra.insert(name, value);
        self
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Policy fields in protocol order. Unset options stay present and go
    /// out as `""`.
    fn policy_data(&self) -> FormFields {
        let config = &self.config;
        let mut data = FormFields::new();
        data.insert(
            field::APPLY_3D_SECURE,
            config.apply_3d_secure.map(|mode| mode.to_string()),
        );
        data.insert(
            field::APPLY_AVS_CV2,
            config.apply_avs_cv2.map(|mode| mode.to_string()),
        );
        data.insert(
            field::PROFILE,
            config.profile.map(|profile| profile.as_str().to_string()),
        );
        data.insert(field::VENDOR_DATA, config.vendor_data.clone());
        data.insert(field::REFERRER_ID, config.referrer_id.clone());
        data.insert(
            field::CREATE_TOKEN,
            config.create_token.map(|flag| flag_value(flag).to_string()),
        );
        data.insert(
            field::STORE_TOKEN,
            config.store_token.map(|flag| flag_value(flag).to_string()),
        );
        data
    }
}

impl GatewayRequest for ServiceRequest {
    fn action(&self) -> &str {
        &self.action
    }

    fn config(&self) -> &RequestConfig {
        &self.config
    }

    fn data(&self) -> Result<FormFields, GatewayError> {
        let mut data = self.base_data();
        data.extend(self.policy_data().iter().map(|(n, v)| (n, v.map(str::to_string))));

        let basket = self.item_data(&self.basket);
        if !basket.is_empty() {
            data.insert(self.basket_formatter().field_name(), basket);
        }

        data.extend(self.extra.iter().map(|(n, v)| (n, v.map(str::to_string))));
        Ok(data)
    }
}
