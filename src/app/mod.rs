//! Usage: Application layer (window host, logging, first-run bootstrapping).

#[cfg(desktop)]
pub(crate) mod autostart;
pub(crate) mod logging;
#[cfg(desktop)]
pub(crate) mod notice;
pub(crate) mod resident;
pub(crate) mod shell;
