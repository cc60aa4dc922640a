use anyhow::{anyhow, bail};

/// Project id issued by the wallet connector service, the app refuses to connect without it
pub const WC_PROJECT_ID_ENV: &str = "RIGO_WC_PROJECT_ID";

/// Optional private key used to connect a development wallet
pub const DEV_KEY_ENV: &str = "RIGO_DEV_KEY";

/// Optional override for the max amount a single transfer can send, "none" lifts the cap
pub const TRANSFER_CAP_ENV: &str = "RIGO_TRANSFER_CAP";

pub const DEFAULT_TRANSFER_CAP: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Config {
   pub wc_project_id: String,
   pub dev_key: Option<String>,
   pub transfer_cap: Option<f64>,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         wc_project_id: String::new(),
         dev_key: None,
         transfer_cap: Some(DEFAULT_TRANSFER_CAP),
      }
   }
}

impl Config {
   pub fn from_env() -> Result<Self, anyhow::Error> {
      let wc_project_id = std::env::var(WC_PROJECT_ID_ENV)
         .map_err(|_| anyhow!("{} is not set", WC_PROJECT_ID_ENV))?;

      if wc_project_id.trim().is_empty() {
         bail!("{} is set but empty", WC_PROJECT_ID_ENV);
      }

      let dev_key = std::env::var(DEV_KEY_ENV)
         .ok()
         .filter(|key| !key.trim().is_empty());

      let transfer_cap = match std::env::var(TRANSFER_CAP_ENV) {
         Ok(value) => parse_transfer_cap(&value)?,
         Err(_) => Some(DEFAULT_TRANSFER_CAP),
      };

      Ok(Self {
         wc_project_id,
         dev_key,
         transfer_cap,
      })
   }

   /// True if the required wallet connector project id is present
   pub fn is_ready(&self) -> bool {
      !self.wc_project_id.is_empty()
   }
}

/// Parse the transfer cap override, "none" disables the cap entirely
pub fn parse_transfer_cap(value: &str) -> Result<Option<f64>, anyhow::Error> {
   let value = value.trim();

   if value.eq_ignore_ascii_case("none") {
      return Ok(None);
   }

   let cap: f64 = value
      .parse()
      .map_err(|_| anyhow!("Invalid transfer cap: {}", value))?;

   if !cap.is_finite() || cap <= 0.0 {
      bail!("Transfer cap must be a positive number, got {}", value);
   }

   Ok(Some(cap))
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn cap_accepts_numbers() {
      assert_eq!(parse_transfer_cap("5").unwrap(), Some(5.0));
      assert_eq!(parse_transfer_cap("0.5").unwrap(), Some(0.5));
      assert_eq!(parse_transfer_cap(" 12.25 ").unwrap(), Some(12.25));
   }

   #[test]
   fn cap_none_lifts_the_limit() {
      assert_eq!(parse_transfer_cap("none").unwrap(), None);
      assert_eq!(parse_transfer_cap("NONE").unwrap(), None);
   }

   #[test]
   fn cap_rejects_garbage() {
      assert!(parse_transfer_cap("abc").is_err());
      assert!(parse_transfer_cap("").is_err());
      assert!(parse_transfer_cap("-1").is_err());
      assert!(parse_transfer_cap("0").is_err());
      assert!(parse_transfer_cap("inf").is_err());
   }

   #[test]
   fn default_config_has_the_cap() {
      let config = Config::default();
      assert_eq!(config.transfer_cap, Some(DEFAULT_TRANSFER_CAP));
      assert!(!config.is_ready());
   }
}
