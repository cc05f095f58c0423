mod error;
mod formatter;
mod store;
mod synthesizer;
mod writer;

pub use error::*;
pub use formatter::*;
pub use store::*;
pub use synthesizer::*;
pub use writer::*;
