//! Client example demonstrating the payment flows against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example --no-default-features --features sqlite

use payments_client::PaymentsClient;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use payments_types::{PaymentId, PaymentStatus};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and schema creation)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = PaymentService::new(repo);
    let server = HttpServer::new(service);
    let router = server.router();

    let server_listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(server_listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    // Create client
    let base_url = format!("http://127.0.0.1:{port}");
    let client = PaymentsClient::new(&base_url);

    // Health check
    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Confirm payments over REST
    let first = client.confirm_payment(42, 100.0).await?;
    println!("✅ Confirmed payment {} for order 42 ({})", first.id, first.payment_status);

    let second = client.confirm_payment(42, 25.0).await?;
    println!("✅ Confirmed payment {} for order 42", second.id);

    let other = client.confirm_payment(99, 12.5).await?;
    println!("✅ Confirmed payment {} for order 99", other.id);

    // Look up over REST
    let fetched = client.get_payment_status(first.id).await?;
    println!("🔎 Payment {}: {:?}", first.id, fetched);

    let missing = client.get_payment_status(PaymentId::new(9999)).await?;
    println!("🔎 Payment 9999: {:?}", missing);

    // List over GraphQL
    let for_order = client.list_payments(Some(42)).await?;
    println!("\n📋 Payments for order 42:");
    for p in &for_order {
        println!("   - #{} {:.2} {}", p.id, p.amount, p.payment_status);
    }

    // Update over GraphQL, read back over REST
    let updated = client
        .update_payment_status(second.id, PaymentStatus::Failed)
        .await?;
    println!("\n✏️  Updated payment {}: {:?}", second.id, updated);

    if let Some(p) = client.get_payment_status(second.id).await? {
        println!("   REST now reports status {}", p.payment_status);
    }

    let all = client.list_payments(None).await?;
    println!("\n📋 All payments: {}", all.len());

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
