use rigo_eth::alloy_primitives::TxHash;

/// Per-field validation errors for the transfer form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
   pub recipient: Option<String>,
   pub amount: Option<String>,
}

impl FieldErrors {
   pub fn is_empty(&self) -> bool {
      self.recipient.is_none() && self.amount.is_none()
   }
}

/// Validate the transfer form fields
///
/// `cap` is an optional upper bound on the amount, `None` means unbounded.
/// Amounts are only bounded from above here, anything the form accepts
/// still has to survive [`send_transfer`](crate::core::send_transfer)
pub fn validate_transfer(recipient: &str, amount: &str, cap: Option<f64>) -> FieldErrors {
   let mut errors = FieldErrors::default();

   if recipient.trim().is_empty() {
      errors.recipient = Some("Provide a receiver address".to_string());
   }

   let amount = amount.trim();
   if amount.is_empty() {
      errors.amount = Some("Amount cannot be empty".to_string());
      return errors;
   }

   match amount.parse::<f64>() {
      Ok(value) if value.is_finite() => {
         if let Some(cap) = cap {
            if value > cap {
               errors.amount =
                  Some("Transfer amount cannot exceed current balance".to_string());
            }
         }
      }
      _ => {
         errors.amount = Some("Enter a valid amount".to_string());
      }
   }

   errors
}

/// State of the current transfer submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SendState {
   #[default]
   Idle,
   Pending,
   Success(TxHash),
   Error(String),
}

impl SendState {
   pub fn is_pending(&self) -> bool {
      matches!(self, Self::Pending)
   }
}

/// A state change worth notifying the user about
#[derive(Debug, Clone, PartialEq)]
pub enum SendTransition {
   Started,
   Confirmed(TxHash),
   Failed(String),
}

/// Tracks the last seen [`SendState`] and reports each change exactly once
///
/// The GUI repaints many times per second, so notifications have to fire
/// on the transition and not on the state itself
#[derive(Debug, Default)]
pub struct SendWatcher {
   last: SendState,
}

impl SendWatcher {
   pub fn observe(&mut self, state: &SendState) -> Option<SendTransition> {
      if *state == self.last {
         return None;
      }

      self.last = state.clone();
      match state {
         SendState::Idle => None,
         SendState::Pending => Some(SendTransition::Started),
         SendState::Success(hash) => Some(SendTransition::Confirmed(*hash)),
         SendState::Error(msg) => Some(SendTransition::Failed(msg.clone())),
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use rigo_eth::alloy_primitives::b256;

   const RECIPIENT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

   #[test]
   fn valid_fields_pass() {
      let errors = validate_transfer(RECIPIENT, "0.05", Some(5.0));
      assert!(errors.is_empty());
   }

   #[test]
   fn empty_recipient_is_rejected() {
      let errors = validate_transfer("  ", "0.05", Some(5.0));
      assert_eq!(errors.recipient.as_deref(), Some("Provide a receiver address"));
      assert!(errors.amount.is_none());
   }

   #[test]
   fn empty_amount_is_rejected() {
      let errors = validate_transfer(RECIPIENT, "", Some(5.0));
      assert!(errors.recipient.is_none());
      assert_eq!(errors.amount.as_deref(), Some("Amount cannot be empty"));
   }

   #[test]
   fn both_fields_can_fail_at_once() {
      let errors = validate_transfer("", "", Some(5.0));
      assert_eq!(errors.recipient.as_deref(), Some("Provide a receiver address"));
      assert_eq!(errors.amount.as_deref(), Some("Amount cannot be empty"));
      assert!(!errors.is_empty());
   }

   #[test]
   fn non_numeric_amount_is_rejected() {
      for bad in ["abc", "1.2.3", "NaN", "inf"] {
         let errors = validate_transfer(RECIPIENT, bad, Some(5.0));
         assert_eq!(errors.amount.as_deref(), Some("Enter a valid amount"), "{bad}");
      }
   }

   #[test]
   fn amount_over_the_cap_is_rejected() {
      for over in ["5.01", "6"] {
         let errors = validate_transfer(RECIPIENT, over, Some(5.0));
         assert_eq!(
            errors.amount.as_deref(),
            Some("Transfer amount cannot exceed current balance"),
            "{over}"
         );
      }
   }

   #[test]
   fn amount_at_the_cap_passes() {
      let errors = validate_transfer(RECIPIENT, "5", Some(5.0));
      assert!(errors.is_empty());
   }

   #[test]
   fn no_cap_means_unbounded() {
      let errors = validate_transfer(RECIPIENT, "1000000", None);
      assert!(errors.is_empty());
   }

   #[test]
   fn amounts_are_only_bounded_above() {
      // negative input clears the form check and fails later at submission
      let errors = validate_transfer(RECIPIENT, "-3", Some(5.0));
      assert!(errors.is_empty());
   }

   #[test]
   fn watcher_fires_once_per_change() {
      let hash = b256!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
      let mut watcher = SendWatcher::default();

      assert_eq!(watcher.observe(&SendState::Idle), None);
      assert_eq!(watcher.observe(&SendState::Pending), Some(SendTransition::Started));
      assert_eq!(watcher.observe(&SendState::Pending), None);
      assert_eq!(
         watcher.observe(&SendState::Success(hash)),
         Some(SendTransition::Confirmed(hash))
      );
      assert_eq!(watcher.observe(&SendState::Success(hash)), None);
   }

   #[test]
   fn watcher_reports_failures() {
      let mut watcher = SendWatcher::default();

      assert_eq!(watcher.observe(&SendState::Pending), Some(SendTransition::Started));
      assert_eq!(
         watcher.observe(&SendState::Error("boom".to_string())),
         Some(SendTransition::Failed("boom".to_string()))
      );
      assert_eq!(watcher.observe(&SendState::Error("boom".to_string())), None);
   }

   #[test]
   fn watcher_fires_again_on_retry() {
      let mut watcher = SendWatcher::default();

      watcher.observe(&SendState::Pending);
      watcher.observe(&SendState::Error("boom".to_string()));

      // a retry goes back through Pending, so the same failure fires again
      assert_eq!(watcher.observe(&SendState::Pending), Some(SendTransition::Started));
      assert_eq!(
         watcher.observe(&SendState::Error("boom".to_string())),
         Some(SendTransition::Failed("boom".to_string()))
      );
   }

   #[test]
   fn watcher_is_silent_on_reset_to_idle() {
      let mut watcher = SendWatcher::default();

      watcher.observe(&SendState::Pending);
      assert_eq!(watcher.observe(&SendState::Idle), None);
      // but the next submission still fires
      assert_eq!(watcher.observe(&SendState::Pending), Some(SendTransition::Started));
   }
}
