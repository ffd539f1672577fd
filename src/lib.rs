pub mod emit;
pub mod error;
pub mod play;
pub mod wav;

pub use error::Error;
pub use play::{Converter, PlayOptions};
