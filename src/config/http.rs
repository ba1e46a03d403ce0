use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use validator::{Validate, ValidateError};

#[derive(Debug, Deserialize)]
pub struct Http {
  /// **Environment variables**:
  /// - `DAILYDIET_HTTP_IP`
  #[serde(default = "Http::default_ip")]
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `DAILYDIET_HTTP_PORT` or `PORT`
  #[serde(default = "Http::default_port")]
  pub port: u16,
  /// Amount of HTTP worker threads. actix-web spawns one
  /// per physical core if it is not set.
  ///
  /// **Environment variables**:
  /// - `DAILYDIET_HTTP_WORKERS`
  pub workers: Option<NonZeroUsize>,
}

impl Http {
  const DEFAULT_PORT: u16 = 3333;

  const fn default_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
  }

  const fn default_port() -> u16 {
    Self::DEFAULT_PORT
  }
}

impl Default for Http {
  fn default() -> Self {
    Self {
      ip: Self::default_ip(),
      port: Self::default_port(),
      workers: None,
    }
  }
}

impl Validate for Http {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("port", {
      let mut error = ValidateError::msg_builder();
      if self.port == 0 {
        error.insert("Port must not be zero");
      }
      error.build()
    });
    fields.build().into_result()
  }
}
