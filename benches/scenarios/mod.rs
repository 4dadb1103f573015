//! Real-world pointer scenarios.

mod glissando;

pub use glissando::bench_glissando;
