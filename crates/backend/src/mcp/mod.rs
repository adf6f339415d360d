//! Model Context Protocol surface for assistants

mod server;
mod transport;

pub use server::*;
pub use transport::*;
