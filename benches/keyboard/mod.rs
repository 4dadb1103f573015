//! Keyboard benchmarks.

mod locate;

pub use locate::bench_locate;
