//! Request-independent operations. Each operation is a struct holding
//! its inputs with a `perform` method, so they can be exercised without
//! going through HTTP.

pub mod meals;
pub mod users;
