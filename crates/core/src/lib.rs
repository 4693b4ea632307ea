// pgscout Core - Domain Logic & Ports
// NO infrastructure dependencies: the database driver and the packaged
// query bundle live behind the ports (Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
