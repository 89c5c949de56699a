mod error;
pub use error::*;

mod execute_hook;
pub use execute_hook::*;

mod initializer;
pub use initializer::*;

mod launcher;
pub use launcher::*;

mod service;
pub use service::*;

mod state;
pub use state::*;

mod worker;
pub use worker::*;

mod worker_config;
pub use worker_config::*;
