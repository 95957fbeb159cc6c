pub mod error;
pub mod input;
pub mod io;
pub mod mash;
pub mod matrix;
pub mod pipeline;
pub mod table;
pub mod workspace;
