//! Infrastructure configuration modules.

pub mod collection;
pub mod environment;
pub mod logging;
pub mod settings;
