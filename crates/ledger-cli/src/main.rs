use anyhow::Result;
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "CLI client for a ledger node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:5000)
    #[arg(long, global = true, default_value = "http://127.0.0.1:5000")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a transaction
    Submit {
        /// Sender
        #[arg(long)]
        sender: String,
        /// Recipient
        #[arg(long)]
        recipient: String,
        /// Amount
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
    },
    /// Mine a block on the node
    Mine,
    /// Print the node's full chain
    Chain,
    /// Print transactions waiting for the next block
    Pending,
    /// Register peers with the node
    Register {
        /// Peer addresses, e.g. http://127.0.0.1:5001
        #[arg(required = true)]
        nodes: Vec<String>,
    },
    /// List peers known to the node
    Nodes,
    /// Run conflict resolution on the node
    Resolve,
}

#[derive(Serialize)]
struct Tx {
    sender: String,
    recipient: String,
    amount: i64,
}

#[derive(Serialize)]
struct Register {
    nodes: Vec<String>,
}

impl Command {
    fn request(self, client: &Client, node: &str) -> RequestBuilder {
        let node = node.trim_end_matches('/');
        match self {
            Command::Submit {
                sender,
                recipient,
                amount,
            } => client
                .post(format!("{node}/transaction/new"))
                .json(&Tx {
                    sender,
                    recipient,
                    amount,
                }),
            Command::Mine => client.get(format!("{node}/mine")),
            Command::Chain => client.get(format!("{node}/chain")),
            Command::Pending => client.get(format!("{node}/transactions/pending")),
            Command::Register { nodes } => client
                .post(format!("{node}/nodes/register"))
                .json(&Register { nodes }),
            Command::Nodes => client.get(format!("{node}/nodes")),
            Command::Resolve => client.get(format!("{node}/nodes/resolve")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let cli = Cli::parse();
    let client = Client::new();
    let req = cli.cmd.request(&client, &cli.node).build()?;
    debug!(method = %req.method(), url = %req.url(), "sending");

    let res = client.execute(req).await?;
    let status = res.status();
    let body = res.text().await?;
    println!("status: {}", status);
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{body}"),
    }
    Ok(())
}
