/*
[INPUT]:  DERIVE_WALLET / DERIVE_SESSION_KEY environment variables
[OUTPUT]: Logged-in websocket session with private trades and channel pushes
[POS]:    Examples - authenticated websocket usage
[UPDATE]: When websocket login or channels change
*/

use std::time::Duration;

use derive_client::*;

/// Example: Log in over websocket, read private trades, follow a channel
#[tokio::main]
async fn main() {
    println!("=== Derive WebSocket Example ===\n");

    let (Ok(wallet), Ok(session_key)) = (
        std::env::var("DERIVE_WALLET"),
        std::env::var("DERIVE_SESSION_KEY"),
    ) else {
        eprintln!("Set DERIVE_WALLET and DERIVE_SESSION_KEY to run this example");
        return;
    };
    let credentials = Credentials::new(wallet, session_key);

    let mut ws = match DeriveWebSocket::connect_env(Environment::Test, &credentials).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("✗ Connect/login failed: {}", e);
            return;
        }
    };
    println!("✓ Logged in, subaccounts: {:?}\n", ws.subaccount_ids());

    match ws
        .trades()
        .list_private(&PrivateTradeHistoryParams::default())
        .await
    {
        Ok(trades) => println!("✓ {} private trades", trades.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    let Some(mut receiver) = ws.take_receiver() else {
        return;
    };
    match ws.subscribe(&["ETH-PERP.trades"]).await {
        Ok(result) => println!("✓ Subscribed: {:?}", result.current_subscriptions),
        Err(e) => {
            println!("✗ Subscribe failed: {}", e);
            return;
        }
    }

    let deadline = tokio::time::sleep(Duration::from_secs(10));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            message = receiver.recv() => match message {
                Some(message) => println!("  push on {}", message.channel),
                None => break,
            },
        }
    }

    if let Err(e) = ws.close().await {
        println!("✗ Close failed: {}", e);
    }
    println!("\n✓ WebSocket example complete");
}
