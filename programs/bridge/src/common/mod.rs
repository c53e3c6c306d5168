pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod wrapped_token;

pub use config::*;
pub use context::*;
pub use error::*;
pub use instructions::*;
pub use state::*;
pub use wrapped_token::*;
