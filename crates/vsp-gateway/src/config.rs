use std::env;
use std::str::FromStr;

use url::Url;

use crate::constants::EndpointConfig;
use crate::policy::{AccountType, Apply3DSecure, ApplyAvsCv2, Profile};
use crate::ConfigError;

/// Per-request gateway parameters.
///
/// Every optional field is independent: nothing here is cross-validated,
/// the gateway reports invalid combinations in its response status.
/// Unset fields are transmitted as empty strings, not omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Vendor name identifying the merchant account.
    pub vendor: Option<String>,
    /// Sent as `E` when unset.
    pub account_type: Option<AccountType>,
    pub apply_3d_secure: Option<Apply3DSecure>,
    pub apply_avs_cv2: Option<ApplyAvsCv2>,
    /// Hosted form profile, see [`RequestConfig::set_iframe`].
    pub profile: Option<Profile>,
    /// ASCII alphanumerics and spaces, at most 200 characters.
    pub vendor_data: Option<String>,
    /// Referrer id for PAYMENT, DEFERRED and AUTHENTICATE transactions.
    pub referrer_id: Option<String>,
    /// Send the colon-delimited `Basket` instead of `BasketXML`.
    pub use_old_basket_format: bool,
    /// Ask the gateway to create a reusable card token from the payment.
    pub create_token: Option<bool>,
    /// Keep a token stored after it has been used.
    pub store_token: Option<bool>,
    /// Route requests to the test environment.
    pub test_mode: bool,
    pub endpoints: EndpointConfig,
}

impl RequestConfig {
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: Some(vendor.into()),
            ..Self::default()
        }
    }

    /// Switch the hosted form profile for iframe embedding on or off.
    pub fn set_iframe(&mut self, iframe: bool) -> &mut Self {
        self.profile = Some(Profile::for_iframe(iframe));
        self
    }

    /// Account type, falling back to e-commerce.
    pub fn account_type_or_default(&self) -> AccountType {
        self.account_type.unwrap_or_default()
    }

    /// Load configuration from `VSP_*` environment variables.
    ///
    /// Only `VSP_VENDOR` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vendor = env::var("VSP_VENDOR")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("VSP_VENDOR"))?;

        let mut endpoints = EndpointConfig::default();
        if let Some(url) = optional_var("VSP_LIVE_ENDPOINT") {
            Url::parse(&url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            endpoints.live_endpoint = url;
        }
        if let Some(url) = optional_var("VSP_TEST_ENDPOINT") {
            Url::parse(&url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            endpoints.test_endpoint = url;
        }

        Ok(Self {
            vendor: Some(vendor),
            account_type: parse_var("VSP_ACCOUNT_TYPE")?,
            apply_3d_secure: parse_var("VSP_APPLY_3DSECURE")?,
            apply_avs_cv2: parse_var("VSP_APPLY_AVSCV2")?,
            profile: parse_var("VSP_PROFILE")?,
            vendor_data: optional_var("VSP_VENDOR_DATA"),
            referrer_id: optional_var("VSP_REFERRER_ID"),
            use_old_basket_format: bool_var("VSP_USE_OLD_BASKET_FORMAT")?.unwrap_or(false),
            create_token: bool_var("VSP_CREATE_TOKEN")?,
            store_token: bool_var("VSP_STORE_TOKEN")?,
            test_mode: bool_var("VSP_TEST_MODE")?.unwrap_or(false),
            endpoints,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = ConfigError>,
{
    optional_var(name).map(|v| v.parse()).transpose()
}

fn bool_var(name: &'static str) -> Result<Option<bool>, ConfigError> {
    optional_var(name).map(|v| parse_bool(name, &v)).transpose()
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
