mod claim_bitmap;
mod token_registry;

pub use claim_bitmap::*;
pub use token_registry::*;
