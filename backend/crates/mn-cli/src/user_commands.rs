use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,
    /// Get a user by ID
    Get { id: String },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}
