pub mod header;
pub mod synth;
pub mod writer;

pub use header::WavHeader;
pub use synth::render;
pub use writer::{encode, WavWriter};
