//! Drives `VspClient` end to end over an in-memory transport.

use std::sync::Mutex;

use vsp_gateway::{
    Amount, Apply3DSecure, Basket, CartItem, FormFields, GatewayError, GatewayRequest,
    RequestConfig, ServiceRequest, Transport, VspClient,
};

/// Records every post and answers with a canned body.
struct RecordingTransport {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingTransport {
    fn replying(body: &str) -> Self {
        Self {
            reply: Ok(body.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), fields.to_vec()));
        self.reply.clone().map_err(GatewayError::HttpError)
    }
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn test_config() -> RequestConfig {
    let mut config = RequestConfig::new("acme");
    config.test_mode = true;
    config
}

#[tokio::test]
async fn test_send_posts_once_and_parses_reply() {
    let client = VspClient::with_transport(RecordingTransport::replying(
        "VPSProtocol=3.00\r\nStatus=OK\r\n\
         StatusDetail=0000 : The Authorisation was Successful.\r\n\
         VPSTxId={7A2A7E4B-0000}\r\n\r\n",
    ));

    let request = ServiceRequest::new("PAYMENT", test_config())
        .with_field("VendorTxCode", "order-1".to_string());
    let response = client.send(&request).await.unwrap();

    assert_eq!(response.status(), Some("OK"));
    assert_eq!(
        response.status_detail(),
        Some("0000 : The Authorisation was Successful.")
    );
    assert_eq!(response.get("VPSTxId"), Some("{7A2A7E4B-0000}"));
    assert_eq!(response.len(), 4);

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    let (url, fields) = &calls[0];
    assert_eq!(url, "https://test.sagepay.com/gateway/service/payment.vsp");
    assert_eq!(field(fields, "VPSProtocol"), Some("3.00"));
    assert_eq!(field(fields, "TxType"), Some("PAYMENT"));
    assert_eq!(field(fields, "Vendor"), Some("acme"));
    assert_eq!(field(fields, "AccountType"), Some("E"));
    assert_eq!(field(fields, "VendorTxCode"), Some("order-1"));
}

#[tokio::test]
async fn test_unset_fields_are_sent_as_empty_strings() {
    let client = VspClient::with_transport(RecordingTransport::replying("Status=INVALID"));

    let request = ServiceRequest::new("REFUND", RequestConfig::default())
        .with_field("Description", None::<String>);
    client.send(&request).await.unwrap();

    let calls = client.transport().calls();
    let (_, fields) = &calls[0];
    assert_eq!(field(fields, "Vendor"), Some(""));
    assert_eq!(field(fields, "Description"), Some(""));
    for name in [
        "Apply3DSecure",
        "ApplyAVSCV2",
        "Profile",
        "VendorData",
        "ReferrerID",
        "CreateToken",
        "StoreToken",
    ] {
        assert_eq!(field(fields, name), Some(""), "{name}");
    }
}

#[tokio::test]
async fn test_live_endpoint_and_lowercased_service() {
    let client = VspClient::with_transport(RecordingTransport::replying("Status=OK"));

    let request = ServiceRequest::new("RemoveToken", RequestConfig::new("acme"));
    client.send(&request).await.unwrap();

    let calls = client.transport().calls();
    let (url, _) = &calls[0];
    assert_eq!(url, "https://live.sagepay.com/gateway/service/removetoken.vsp");
}

#[tokio::test]
async fn test_basket_and_policy_fields_reach_the_wire() {
    let client = VspClient::with_transport(RecordingTransport::replying("Status=OK"));

    let mut config = test_config();
    config.apply_3d_secure = Some(Apply3DSecure::None);
    let basket: Basket = vec![
        CartItem::new("Tea & cake", 2, "3.50".parse::<Amount>().unwrap()),
        CartItem::new("Voucher", 1, "-1.00".parse::<Amount>().unwrap()),
    ]
    .into();
    let request = ServiceRequest::new("DEFERRED", config).with_basket(basket);
    client.send(&request).await.unwrap();

    let calls = client.transport().calls();
    let (_, fields) = &calls[0];
    assert_eq!(field(fields, "Apply3DSecure"), Some("2"));
    let xml = field(fields, "BasketXML").unwrap();
    assert!(xml.contains("<description>Tea &amp; cake</description>"));
    assert!(xml.contains("<totalGrossAmount>7.00</totalGrossAmount>"));
    assert!(xml.contains("<fixed>1.00</fixed>"));
}

#[tokio::test]
async fn test_empty_reply_gives_empty_response() {
    let client = VspClient::with_transport(RecordingTransport::replying(""));

    let response = client
        .send(&ServiceRequest::new("PAYMENT", test_config()))
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.status(), None);
}

#[tokio::test]
async fn test_transport_errors_propagate() {
    let client = VspClient::with_transport(RecordingTransport::failing("connection refused"));

    let err = client
        .send(&ServiceRequest::new("PAYMENT", test_config()))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::HttpError(ref m) if m == "connection refused"));
    assert_eq!(client.transport().calls().len(), 1);
}

/// An operation defined outside the crate reuses the shared behaviour.
struct AbortRequest {
    config: RequestConfig,
    tx_code: String,
}

impl GatewayRequest for AbortRequest {
    fn action(&self) -> &str {
        "ABORT"
    }

    fn config(&self) -> &RequestConfig {
        &self.config
    }

    fn data(&self) -> Result<FormFields, GatewayError> {
        let mut data = self.base_data();
        data.insert("VendorTxCode", self.tx_code.clone());
        Ok(data)
    }
}

#[tokio::test]
async fn test_custom_request_type() {
    let client = VspClient::with_transport(RecordingTransport::replying("Status=OK"));

    let request = AbortRequest {
        config: test_config(),
        tx_code: "order-9".to_string(),
    };
    client.send(&request).await.unwrap();

    let calls = client.transport().calls();
    let (url, fields) = &calls[0];
    assert_eq!(url, "https://test.sagepay.com/gateway/service/abort.vsp");
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        ["VPSProtocol", "TxType", "Vendor", "AccountType", "VendorTxCode"]
    );
}
