pub mod error;
pub mod form;
pub mod id;

pub use error::Error;
