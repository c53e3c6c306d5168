mod asset;
mod leaf;
mod message;
mod permit;

pub use asset::*;
pub use leaf::*;
pub use message::*;
pub use permit::*;
