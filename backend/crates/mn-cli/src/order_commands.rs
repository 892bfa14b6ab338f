use clap::Subcommand;

#[derive(Subcommand)]
pub enum OrderCommands {
    /// List all orders
    List,
    /// Get an order by ID
    Get { id: String },
}
