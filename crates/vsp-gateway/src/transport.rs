//! HTTP transport seam.
//!
//! [`VspClient`](crate::VspClient) talks to the gateway through [`Transport`]
//! so tests can swap in an in-memory implementation.

use std::time::Duration;

use crate::GatewayError;

/// Posts a form body and returns the raw response text.
pub trait Transport: Send + Sync {
    /// POST `fields` to `url` as `application/x-www-form-urlencoded`.
    /// One round trip, no retry.
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Client with a 30 second timeout and redirects disabled.
    pub fn new() -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::HttpError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Form-encoded POST of `fields` to `url`.
    fn build_request(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<reqwest::Request, GatewayError> {
        self.http
            .post(url)
            .form(fields)
            .build()
            .map_err(|e| GatewayError::HttpError(format!("invalid request: {e}")))
    }
}

impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<String, GatewayError> {
        let request = self.build_request(url, fields)?;
        let resp = self
            .http
            .execute(request)
            .await
            .map_err(|e| GatewayError::HttpError(format!("request failed: {e}")))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| GatewayError::HttpError(format!("gateway returned an error: {e}")))?;

        resp.text()
            .await
            .map_err(|e| GatewayError::HttpError(format!("failed to read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_build_request_form_encodes_fields() {
        let transport = HttpTransport::new().unwrap();
        let fields = [
            pair("Vendor", "acme ltd"),
            pair("VendorData", ""),
            pair("Basket", "1:A&B=C:1:1.00"),
        ];

        let request = transport
            .build_request("https://test.sagepay.com/gateway/service/payment.vsp", &fields)
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://test.sagepay.com/gateway/service/payment.vsp"
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "Vendor=acme+ltd&VendorData=&Basket=1%3AA%26B%3DC%3A1%3A1.00"
        );
    }

    #[test]
    fn test_build_request_rejects_bad_url() {
        let transport = HttpTransport::new().unwrap();
        let err = transport.build_request("not a url", &[]).unwrap_err();
        assert!(matches!(err, GatewayError::HttpError(_)));
    }
}
