//! Content store integration tests.

mod collection;
mod storage;
mod bundle;

#[cfg(feature = "emitter")]
mod emitter;
