//! Payments CLI
//!
//! Command-line interface for the payment service.

use anyhow::Result;
use clap::{Parser, Subcommand};

use payments_client::PaymentsClient;
use payments_types::{PaymentId, PaymentStatus};

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payment service CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payment service
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Confirm a payment for an order
    Confirm {
        #[arg(long)]
        order_id: i64,
        #[arg(long)]
        amount: f64,
    },
    /// Show a payment by ID
    Status {
        /// Payment ID
        id: i64,
    },
    /// List payments
    List {
        /// Only payments for this order
        #[arg(long)]
        order_id: Option<i64>,
    },
    /// Overwrite a payment's status
    Update {
        /// Payment ID
        id: i64,
        /// PENDING, PAID or FAILED
        #[arg(long)]
        status: String,
    },
    /// Check API health
    Health,
}

fn parse_status(s: &str) -> Result<PaymentStatus> {
    s.to_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown status: {}. Supported: PENDING, PAID, FAILED", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Confirm { order_id, amount } => {
            let payment = client.confirm_payment(order_id, amount).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::Status { id } => match client.get_payment_status(PaymentId::new(id)).await? {
            Some(payment) => println!("{}", serde_json::to_string_pretty(&payment)?),
            None => {
                eprintln!("Payment {} not found", id);
                std::process::exit(1);
            }
        },

        Commands::List { order_id } => {
            let payments = client.list_payments(order_id).await?;
            println!("{}", serde_json::to_string_pretty(&payments)?);
        }

        Commands::Update { id, status } => {
            let status = parse_status(&status)?;
            match client
                .update_payment_status(PaymentId::new(id), status)
                .await?
            {
                Some(payment) => println!("{}", serde_json::to_string_pretty(&payment)?),
                None => {
                    eprintln!("Payment {} not found", id);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
