//! mn - MicroNet control plane CLI
//!
//! Talks to the management and proxy routes of a running mn-server and
//! prints the JSON reply.
//!
//! # Examples
//!
//! ```bash
//! # Registry snapshot
//! mn status --pretty
//!
//! # Start a service as a manager
//! mn start user --role manager
//!
//! # Round-robin product fetches and a status report
//! mn smoke --pretty
//! ```

mod cli;
mod commands;
mod order_commands;
mod product_commands;
mod user_commands;

use crate::{
    cli::Cli, commands::Commands, order_commands::OrderCommands,
    product_commands::ProductCommands, user_commands::UserCommands,
};

use mn_cli::Client;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let client = Client::new(&cli.server, cli.role.as_deref(), cli.token.as_deref());

    let result = match cli.command {
        // Management
        Commands::Status => client.status().await,
        Commands::Start { service } => client.start_service(&service).await,
        Commands::Stop { service } => client.stop_service(&service).await,
        Commands::Fail { service } => client.simulate_failure(&service).await,
        Commands::Recover { service } => client.recover_service(&service).await,

        // Domain proxy
        Commands::User { action } => match action {
            UserCommands::List => client.list_users().await,
            UserCommands::Get { id } => client.get_user(&id).await,
            UserCommands::Create { name, email } => client.create_user(&name, &email).await,
        },
        Commands::Product { action } => match action {
            ProductCommands::List => client.list_products().await,
            ProductCommands::Get { id } => client.get_product(&id).await,
            ProductCommands::Purchase { id, quantity } => {
                client.purchase_product(&id, quantity).await
            }
        },
        Commands::Order { action } => match action {
            OrderCommands::List => client.list_orders().await,
            OrderCommands::Get { id } => client.get_order(&id).await,
        },

        Commands::Smoke => client.smoke().await,
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
