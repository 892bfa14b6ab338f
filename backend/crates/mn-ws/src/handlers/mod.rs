pub mod command;
pub mod command_error;
pub mod command_reply;
pub mod context;
pub mod dispatcher;
pub mod error_boundary;
pub mod response_builder;
