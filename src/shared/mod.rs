//! Usage: Cross-cutting utilities shared across modules (low-level helpers, pure logic).

pub(crate) mod blocking;
pub(crate) mod fs;
pub(crate) mod mutex_ext;
