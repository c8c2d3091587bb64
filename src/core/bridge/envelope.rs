use super::BridgeError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decoded response from the wallet bridge
///
/// The bridge answers every call with `{ "result": bool, "data": ..., "msg": ... }`.
/// The payload is only read after `result` has been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeResponse<T> {
   Success(T),
   /// The raw payload as the bridge sent it
   Failure(Value),
}

impl<T: DeserializeOwned> BridgeResponse<T> {
   pub fn decode(raw: Value) -> Result<Self, BridgeError> {
      if !is_success(&raw) {
         return Ok(Self::Failure(raw));
      }

      let data = match raw.get("data") {
         Some(data) if !data.is_null() => data.clone(),
         _ => return Err(BridgeError::Decode(format!("missing data in {}", raw))),
      };

      let data = serde_json::from_value(data)
         .map_err(|e| BridgeError::Decode(format!("{}: {}", e, raw)))?;

      Ok(Self::Success(data))
   }
}

impl<T> BridgeResponse<T> {
   pub fn into_result(self) -> Result<T, BridgeError> {
      match self {
         Self::Success(data) => Ok(data),
         Self::Failure(raw) => Err(BridgeError::Failure(raw)),
      }
   }
}

/// `result` must be `true` or a non-zero number.
///
/// Strings are not accepted, `"true"` and `"false"` both count as a failure.
fn is_success(raw: &Value) -> bool {
   match raw.get("result") {
      Some(Value::Bool(result)) => *result,
      Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
      _ => false,
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use moac_eth::alloy_primitives::TxHash;
   use serde_json::json;
   use std::str::FromStr;

   const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

   #[test]
   fn decodes_success() {
      let raw = json!({ "result": true, "data": HASH, "msg": "success" });
      let res = BridgeResponse::<TxHash>::decode(raw).unwrap();
      assert_eq!(res, BridgeResponse::Success(TxHash::from_str(HASH).unwrap()));
   }

   #[test]
   fn failure_keeps_raw_payload() {
      let raw = json!({ "result": false, "msg": "user cancelled" });
      let res = BridgeResponse::<TxHash>::decode(raw.clone()).unwrap();
      assert_eq!(res, BridgeResponse::Failure(raw.clone()));

      let err = res.into_result().unwrap_err();
      assert!(matches!(err, BridgeError::Failure(payload) if payload == raw));
   }

   #[test]
   fn missing_result_flag_is_failure() {
      let raw = json!({ "data": HASH });
      let res = BridgeResponse::<TxHash>::decode(raw).unwrap();
      assert!(matches!(res, BridgeResponse::Failure(_)));
   }

   #[test]
   fn string_result_is_failure() {
      for result in [json!("true"), json!("1"), json!(0), json!(null)] {
         let raw = json!({ "result": result, "data": HASH });
         let res = BridgeResponse::<TxHash>::decode(raw).unwrap();
         assert!(matches!(res, BridgeResponse::Failure(_)));
      }
   }

   #[test]
   fn success_without_data_is_malformed() {
      let raw = json!({ "result": true, "data": null });
      let res = BridgeResponse::<TxHash>::decode(raw);
      assert!(matches!(res, Err(BridgeError::Decode(_))));
   }

   #[test]
   fn success_with_wrong_data_is_malformed() {
      let raw = json!({ "result": 1, "data": { "hash": 5 } });
      let res = BridgeResponse::<TxHash>::decode(raw);
      assert!(matches!(res, Err(BridgeError::Decode(_))));
   }
}
