pub mod libs;

pub use libs::error::MashError;
pub use libs::io::*;
