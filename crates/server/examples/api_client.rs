//! Examples for using the textveil server API

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Pseudonymize a text via the HOCR workflow
    println!("2. Pseudonymize:");
    let resp = client
        .post(format!("{SERVER_URL}/hocr"))
        .json(&json!({
            "text": "Meine Name ist Korben Dallas und meine Kontonummer ist 900123."
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Improve a text through the full round trip
    println!("3. Improve:");
    let resp = client
        .post(format!("{SERVER_URL}/improve"))
        .json(&json!({
            "text": "hallo, ich wollte nur kurz sagen dass Korben Dallas morgen vorbeikommt"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
