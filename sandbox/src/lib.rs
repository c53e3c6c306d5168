//! An in-process agglayer: mainnet and any number of rollups, each running the
//! bridge, its global exit root manager and the bridge extension, connected by
//! a relayer that settles exit roots and builds claims.

pub mod chain;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod indexer;
pub mod sandbox;

pub use chain::*;
pub use config::*;
pub use error::*;
pub use indexer::*;
pub use sandbox::*;
