use std::io;

use guodu_sms::{Credentials, GatewayClient};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account = std::env::var("GUODU_ACCOUNT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GUODU_ACCOUNT environment variable is required",
        )
    })?;
    let password = std::env::var("GUODU_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GUODU_PASSWORD environment variable is required",
        )
    })?;

    let client = GatewayClient::new(Credentials::new(account, password)?)?;
    println!("remaining messages: {}", client.query_quota()?);

    Ok(())
}
