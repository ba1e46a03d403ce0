pub mod controllers;
pub mod error;
pub mod extract;

pub use error::{Error, Result};
