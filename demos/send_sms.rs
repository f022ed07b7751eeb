use std::io;

use guodu_sms::{GatewayClient, GatewayConfig, SendOptions};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GatewayConfig {
        account: required("GUODU_ACCOUNT")?,
        password: required("GUODU_PASSWORD")?,
        name: std::env::var("GUODU_NAME").ok(),
        affix: std::env::var("GUODU_AFFIX").ok(),
        send_url: std::env::var("GUODU_SEND_URL").ok(),
        quota_url: None,
    };
    let phones = required("GUODU_PHONES")?;
    let message =
        std::env::var("GUODU_MESSAGE").unwrap_or_else(|_| "来自 guodu-sms 示例的短信".to_owned());

    let client = GatewayClient::from_config(config)?;
    let options = SendOptions {
        round_trip: true,
        ..Default::default()
    };
    let response = client.send(message, phones.split(','), options)?;

    println!("batches: {}", response.batches);
    for (phone, id) in response.message_ids.unwrap_or_default() {
        println!("{} -> {}", phone.raw(), id.as_str());
    }

    Ok(())
}
