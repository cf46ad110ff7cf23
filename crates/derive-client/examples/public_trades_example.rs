/*
[INPUT]:  Instrument name (e.g., "ETH-PERP")
[OUTPUT]: Recent settled public trades
[POS]:    Examples - public queries over async and blocking clients
[UPDATE]: When adding new public endpoints
*/

use derive_client::*;

/// Example: Query public trade history (no authentication required)
#[tokio::main]
async fn main() {
    println!("=== Derive Public Trades Example ===\n");

    let client = match DeriveClient::for_environment(Environment::Test) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let params = PublicTradeHistoryParams {
        instrument_name: Some("ETH-PERP".to_string()),
        page_size: Some(5),
        ..Default::default()
    };

    println!("Querying public trades for ETH-PERP...");
    match client.trades().list_public(&params).await {
        Ok(trades) => {
            for trade in &trades {
                println!(
                    "  {} {:?} {} @ {}",
                    trade.trade_id, trade.direction, trade.trade_amount, trade.trade_price
                );
            }
            println!("✓ {} trades", trades.len());
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    // The blocking client must run off the async runtime
    let blocking = tokio::task::spawn_blocking(move || {
        let client = BlockingDeriveClient::for_environment(Environment::Test)?;
        client.trades().list_public(&params)
    })
    .await;
    match blocking {
        Ok(Ok(trades)) => println!("\n✓ Blocking client returned {} trades", trades.len()),
        Ok(Err(e)) => println!("\n✗ Blocking error: {}", e),
        Err(e) => println!("\n✗ Blocking task failed: {}", e),
    }

    println!("\n✓ Public trades example complete");
}
