//! Send one request to the gateway and print the parsed reply.
//!
//! Usage: `vsp-request <TXTYPE> [Key=Value ...]`
//!
//! Configuration comes from `VSP_*` environment variables (a `.env` file is
//! loaded if present). A basket can be given as `VSP_BASKET`, a `;`-separated
//! list of `name|quantity|price` lines.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vsp_gateway::{Basket, CartItem, GatewayError, RequestConfig, ServiceRequest, VspClient};

fn parse_basket(lines: &str) -> Result<Basket, GatewayError> {
    lines
        .split(';')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.splitn(3, '|');
            let (Some(name), Some(quantity), Some(price)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(GatewayError::InvalidAmount(format!(
                    "basket line '{line}' is not name|quantity|price"
                )));
            };
            let quantity: u32 = quantity.trim().parse().map_err(|e| {
                GatewayError::InvalidAmount(format!("basket line '{line}': quantity: {e}"))
            })?;
            Ok(CartItem::new(name.trim(), quantity, price.parse()?))
        })
        .collect()
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(tx_type) = args.next() else {
        eprintln!("usage: vsp-request <TXTYPE> [Key=Value ...]");
        std::process::exit(2);
    };

    let config = match RequestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut request = ServiceRequest::new(tx_type, config);
    for arg in args {
        let (name, value) = arg.split_once('=').unwrap_or((arg.as_str(), ""));
        request = request.with_field(name, value.to_string());
    }

    if let Ok(lines) = std::env::var("VSP_BASKET") {
        match parse_basket(&lines) {
            Ok(basket) => request = request.with_basket(basket),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    let client = match VspClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(endpoint = %vsp_gateway::GatewayRequest::endpoint(&request), "sending request");

    match client.send(&request).await {
        Ok(response) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsp_gateway::Amount;

    #[test]
    fn test_parse_basket_lines() {
        let basket = parse_basket(" Widget | 2 | 10.00 ;Voucher|1|-1.50;").unwrap();
        assert_eq!(
            basket.items(),
            [
                CartItem::new("Widget", 2, Amount::from_minor(1000)),
                CartItem::new("Voucher", 1, Amount::from_minor(-150)),
            ]
        );
    }

    #[test]
    fn test_parse_basket_empty() {
        assert!(parse_basket("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_basket_rejects_malformed_lines() {
        assert!(parse_basket("Widget|2").is_err());
        assert!(parse_basket("Widget|two|1.00").is_err());
        assert!(parse_basket("Widget|2|1.x").is_err());
    }
}
