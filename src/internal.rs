/// Prevents downstream crates from implementing traits that
/// only make sense for types defined here.
pub trait Sealed {}
