//! Client for the Sage Pay (Opayo) VSP name/value pair card gateway.
//!
//! Builds the form fields shared by every transaction type, serializes the
//! shopping basket, posts the form to `<base>/<txtype>.vsp` and parses the
//! line-oriented `Key=Value` reply.
//!
//! # Quick example
//!
//! ```no_run
//! use vsp_gateway::{Amount, Basket, CartItem, RequestConfig, ServiceRequest, VspClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), vsp_gateway::GatewayError> {
//! let mut config = RequestConfig::new("myvendor");
//! config.test_mode = true;
//!
//! let basket: Basket = vec![CartItem::new("Widget", 2, "10.00".parse::<Amount>()?)].into();
//! let request = ServiceRequest::new("PAYMENT", config)
//!     .with_basket(basket)
//!     .with_field("VendorTxCode", "order-1001".to_string());
//!
//! let response = VspClient::new()?.send(&request).await?;
//! println!("{:?}", response.status());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod amount;
pub mod constants;
pub mod error;
pub mod fields;
pub mod policy;
pub mod response;

// Request assembly
pub mod basket;
pub mod config;
pub mod request;

// HTTP
pub mod http_client;
pub mod transport;

// Re-exports
pub use amount::Amount;
pub use basket::{
    filter_discount_name, filter_item_name, formatter_for, Basket, BasketFormatter, CartItem,
    LegacyBasketFormatter, XmlBasketFormatter,
};
pub use config::RequestConfig;
pub use constants::EndpointConfig;
pub use error::{ConfigError, GatewayError};
pub use fields::FormFields;
pub use policy::{AccountType, Apply3DSecure, ApplyAvsCv2, Profile};
pub use request::{GatewayRequest, ServiceRequest};
pub use response::ResponseFields;
pub use transport::{HttpTransport, Transport};

pub use http_client::VspClient;
