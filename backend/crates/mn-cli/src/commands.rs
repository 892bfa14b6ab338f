use crate::{
    order_commands::OrderCommands, product_commands::ProductCommands,
    user_commands::UserCommands,
};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Registry snapshot
    Status,

    /// Launch a service process (manager only)
    Start {
        /// Service name (user, product, order)
        service: String,
    },

    /// Terminate a service process (manager only)
    Stop { service: String },

    /// Mark a service unhealthy
    Fail { service: String },

    /// Mark a service healthy
    Recover { service: String },

    /// User service operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Product service operations
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Order service operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Exercise every proxied service once and report the status snapshot
    Smoke,
}
