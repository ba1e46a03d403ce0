use once_cell::sync::Lazy;
use std::{
  fmt::{Debug, Display},
  hash::Hash,
  marker::PhantomData,
  str::FromStr,
};
use uuid::Uuid;

use self::marker::Marker;

pub mod marker;

pub type MealId = Id<marker::MealMarker>;
pub type UserId = Id<marker::UserMarker>;

/// A UUID tagged with the kind of record it identifies, so that
/// a meal id cannot be passed where a user id is expected.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id<T: Marker> {
  value: Uuid,
  phantom: PhantomData<T>,
}

impl<T: Marker> Id<T> {
  /// Generates a new random (version 4) identifier.
  #[must_use]
  pub fn generate() -> Self {
    Self::from_uuid(Uuid::new_v4())
  }

  #[must_use]
  pub const fn from_uuid(value: Uuid) -> Self {
    Self {
      value,
      phantom: PhantomData,
    }
  }
}

impl<T: Marker> FromStr for Id<T> {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::try_parse(s).map(Self::from_uuid)
  }
}

impl<T: Marker> Debug for Id<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use heck::ToSnakeCase;
    static MARKER_MODULE: Lazy<String> = Lazy::new(|| {
      format!(
        "{}::types::id::marker::",
        env!("CARGO_PKG_NAME").to_snake_case()
      )
    });

    // This is to assume that all ID markers are defined in `marker` module
    let type_name = std::any::type_name::<T>();
    let type_name = if type_name.starts_with(&*MARKER_MODULE) {
      type_name.split("::").last().unwrap_or(type_name)
    } else {
      type_name
    };
    write!(f, "Id::<{type_name}>({})", self.value)
  }
}

impl<T: Marker> Display for Id<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    Display::fmt(&self.value.hyphenated(), f)
  }
}

impl<T: Marker> Hash for Id<T> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.value.hash(state);
  }
}

impl<T: Marker> serde::Serialize for Id<T> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.collect_str(self)
  }
}

impl<'q, T: Marker> sqlx::Encode<'q, sqlx::Postgres> for Id<T> {
  fn encode_by_ref(
    &self,
    buf: &mut <sqlx::Postgres as sqlx::database::HasArguments<'q>>::ArgumentBuffer,
  ) -> sqlx::encode::IsNull {
    <Uuid as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.value, buf)
  }
}

impl<'r, T: Marker> sqlx::Decode<'r, sqlx::Postgres> for Id<T> {
  fn decode(
    value: <sqlx::Postgres as sqlx::database::HasValueRef<'r>>::ValueRef,
  ) -> Result<Self, sqlx::error::BoxDynError> {
    <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self::from_uuid)
  }
}

impl<T: Marker> sqlx::Type<sqlx::Postgres> for Id<T> {
  fn type_info() -> <sqlx::Postgres as sqlx::Database>::TypeInfo {
    <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
  }
}
