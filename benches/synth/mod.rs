//! Synth benchmarks.

mod mixer;
mod voice;

pub use mixer::bench_mixer;
pub use voice::bench_voice;
