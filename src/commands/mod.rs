//! Command implementations for the futebol CLI

pub mod common;
pub mod list;
pub mod query;
pub mod register;

#[cfg(test)]
mod tests;

pub use common::{open_context, resolve_config, ConfigOverrides};
pub use list::handle_list;
pub use query::handle_query;
pub use register::handle_register;
