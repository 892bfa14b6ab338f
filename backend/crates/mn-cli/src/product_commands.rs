use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List all products
    List,
    /// Get a product by ID (load-balanced)
    Get { id: String },
    /// Purchase stock of a product
    Purchase {
        id: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}
