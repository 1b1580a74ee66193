/// VPS protocol version sent with every request.
pub const PROTOCOL_VERSION: &str = "3.00";

/// Live gateway base URL.
pub const LIVE_ENDPOINT: &str = "https://live.sagepay.com/gateway/service";

/// Test (simulator) gateway base URL.
pub const TEST_ENDPOINT: &str = "https://test.sagepay.com/gateway/service";

/// Suffix appended to the lowercased service name.
pub const SERVICE_SUFFIX: &str = ".vsp";

/// Fixed per-line tax amount; baskets are sent tax-inclusive.
pub const ZERO_TAX: &str = "0.00";

/// Item and discount names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Protocol field names.
pub mod field {
    pub const VPS_PROTOCOL: &str = "VPSProtocol";
    pub const TX_TYPE: &str = "TxType";
    pub const VENDOR: &str = "Vendor";
    pub const ACCOUNT_TYPE: &str = "AccountType";
    pub const APPLY_3D_SECURE: &str = "Apply3DSecure";
    pub const APPLY_AVS_CV2: &str = "ApplyAVSCV2";
    pub const PROFILE: &str = "Profile";
    pub const VENDOR_DATA: &str = "VendorData";
    pub const REFERRER_ID: &str = "ReferrerID";
    pub const CREATE_TOKEN: &str = "CreateToken";
    pub const STORE_TOKEN: &str = "StoreToken";
    pub const BASKET: &str = "Basket";
    pub const BASKET_XML: &str = "BasketXML";
    pub const STATUS: &str = "Status";
    pub const STATUS_DETAIL: &str = "StatusDetail";
}

/// Runtime endpoint configuration. Defaults to the published live and test
/// gateway hosts; override to point at a simulator or a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub live_endpoint: String,
    pub test_endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            live_endpoint: LIVE_ENDPOINT.to_string(),
            test_endpoint: TEST_ENDPOINT.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Base URL for the selected environment.
    pub fn base(&self, test_mode: bool) -> &str {
        if test_mode {
            &self.test_endpoint
        } else {
            &self.live_endpoint
        }
    }

    /// Full service URL: `<base>/<service>.vsp` with the service lowercased.
    pub fn service_url(&self, service: &str, test_mode: bool) -> String {
        format!(
            "{}/{}{}",
            self.base(test_mode).trim_end_matches('/'),
            service.to_lowercase(),
            SERVICE_SUFFIX
        )
    }
}
