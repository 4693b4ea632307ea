// Application Layer - probe execution use case

pub mod executor;

pub use executor::{execute, fetch_all};
