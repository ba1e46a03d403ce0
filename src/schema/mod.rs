mod meal;
mod user;

pub use meal::*;
pub use user::*;
