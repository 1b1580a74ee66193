use crate::request::GatewayRequest;
use crate::response::ResponseFields;
use crate::transport::{HttpTransport, Transport};
use crate::GatewayError;

/// Gateway client: one request in, one parsed response out.
///
/// Each call assembles the request's fields, sends them in a single POST to
/// the request's endpoint and parses the `Key=Value` reply. No state is kept
/// between calls.
pub struct VspClient<T: Transport = HttpTransport> {
    transport: T,
}

impl VspClient<HttpTransport> {
    pub fn new() -> Result<Self, GatewayError> {
        Ok(Self {
            transport: HttpTransport::new()?,
        })
    }
}

impl<T: Transport> VspClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and parse the gateway's reply.
    ///
    /// Transport failures are returned as-is. A reply that parses to nothing
    /// is not an error here; check [`ResponseFields::status`].
    pub async fn send<R: GatewayRequest>(
        &self,
        request: &R,
    ) -> Result<ResponseFields, GatewayError> {
        let data = request.data()?;
        let url = request.endpoint();

        tracing::debug!(
            %url,
            tx_type = request.action(),
            fields = data.len(),
            "sending gateway request"
        );

        // The gateway rejects absent fields; unset values go out empty.
        let wire = data.into_wire();
        let body = self.transport.post_form(&url, &wire).await?;

        let response = ResponseFields::parse(&body);
        tracing::debug!(
            status = response.status().unwrap_or_default(),
            fields = response.len(),
            "gateway response parsed"
        );

        Ok(response)
    }
}
