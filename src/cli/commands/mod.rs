//! CLI command implementations.

mod chunk;
mod config;
mod ingest;
mod init;
mod list;
mod search;

pub use chunk::run_chunk;
pub use config::run_config;
pub use ingest::run_ingest;
pub use init::run_init;
pub use list::run_list;
pub use search::run_search;
