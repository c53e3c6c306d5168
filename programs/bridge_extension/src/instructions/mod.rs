mod bridge_and_call;
mod receive;

pub use bridge_and_call::*;
pub use receive::*;
