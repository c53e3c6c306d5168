mod emergency;
mod initialize;
mod roles;
mod sovereign;
mod token_mapping;

pub use emergency::*;
pub use initialize::*;
pub use roles::*;
pub use sovereign::*;
pub use token_mapping::*;
