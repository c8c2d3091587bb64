use crate::core::bridge::BridgeError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
   #[error("No active account in the signing session")]
   NoActiveSession,

   #[error("{field} address mismatch: {value}")]
   SenderMismatch { field: &'static str, value: String },

   #[error("Signing service failure: {payload}")]
   ServiceFailure { payload: String },

   #[error(transparent)]
   Transport(BridgeError),

   #[error("Signing service did not respond within {0:?}")]
   Timeout(Duration),
}

impl DispatchError {
   /// Nothing reached the signing service, the request itself is wrong
   pub fn is_input_error(&self) -> bool {
      matches!(self, Self::SenderMismatch { .. })
   }
}

impl From<BridgeError> for DispatchError {
   fn from(err: BridgeError) -> Self {
      match err {
         BridgeError::Failure(raw) => Self::ServiceFailure {
            payload: raw.to_string(),
         },
         other => Self::Transport(other),
      }
   }
}
