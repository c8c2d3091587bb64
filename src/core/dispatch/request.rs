use moac_eth::{
   alloy_primitives::{Address, Bytes, U256, hex},
   utils::to_hex_string,
};
use serde::{Deserialize, Serialize};

/// A transaction as the swap frontend builds it
///
/// Only the recipient is required, everything else is resolved by the [Dispatcher](super::Dispatcher).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxRequest {
   /// Must match the active wallet if set
   pub from: Option<Address>,
   pub to: Address,
   pub value: U256,
   pub gas_limit: Option<u64>,
   pub data: Option<Bytes>,
   pub nonce: Option<u64>,
}

impl TxRequest {
   pub fn new(to: Address, value: U256) -> Self {
      Self {
         to,
         value,
         ..Default::default()
      }
   }

   pub fn with_from(mut self, from: Address) -> Self {
      self.from = Some(from);
      self
   }

   pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
      self.gas_limit = Some(gas_limit);
      self
   }

   pub fn with_data(mut self, data: Bytes) -> Self {
      self.data = Some(data);
      self
   }

   pub fn with_nonce(mut self, nonce: u64) -> Self {
      self.nonce = Some(nonce);
      self
   }
}

/// How numeric fields are written before they reach the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericEncoding {
   /// `"5000000"`
   Decimal,
   /// `"0x4c4b40"`
   Hex,
}

impl NumericEncoding {
   pub fn encode(&self, value: U256) -> String {
      match self {
         Self::Decimal => value.to_string(),
         Self::Hex => to_hex_string(value),
      }
   }
}

/// The finished transaction handed to the signing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchTx {
   pub from: String,
   pub to: String,
   pub value: String,
   pub gas_limit: String,
   pub gas_price: String,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub data: Option<String>,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub nonce: Option<String>,
   pub chain_id: u64,
}

impl DispatchTx {
   /// Complete `request` with the resolved fields
   ///
   /// Addresses, data and nonce are always hex, `encoding` only applies to value, gas limit and gas price.
   pub fn new(
      request: &TxRequest,
      from: Address,
      gas_limit: u64,
      gas_price: u128,
      chain_id: u64,
      encoding: NumericEncoding,
   ) -> Self {
      Self {
         from: hex::encode_prefixed(from),
         to: hex::encode_prefixed(request.to),
         value: encoding.encode(request.value),
         gas_limit: encoding.encode(U256::from(gas_limit)),
         gas_price: encoding.encode(U256::from(gas_price)),
         data: request.data.as_ref().map(hex::encode_prefixed),
         nonce: request.nonce.map(|n| format!("0x{:x}", n)),
         chain_id,
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use moac_eth::alloy_primitives::address;
   use serde_json::json;

   fn request() -> TxRequest {
      TxRequest::new(
         address!("0xc4b00992d186435fced593a691b7138b13971bc8"),
         U256::from(1_000_000_000_000_000_000u128),
      )
   }

   #[test]
   fn encodes_decimal_fields() {
      let from = address!("0x8ba1f109551bD432803012645Ac136ddd64DBA72");
      let tx = DispatchTx::new(&request(), from, 5_000_000, 100_000_000_000, 101, NumericEncoding::Decimal);

      assert_eq!(tx.from, "0x8ba1f109551bd432803012645ac136ddd64dba72");
      assert_eq!(tx.to, "0xc4b00992d186435fced593a691b7138b13971bc8");
      assert_eq!(tx.value, "1000000000000000000");
      assert_eq!(tx.gas_limit, "5000000");
      assert_eq!(tx.gas_price, "100000000000");
      assert_eq!(tx.chain_id, 101);
   }

   #[test]
   fn encodes_hex_fields() {
      let from = address!("0x8ba1f109551bD432803012645Ac136ddd64DBA72");
      let tx = DispatchTx::new(&request(), from, 5_000_000, 100_000_000_000, 101, NumericEncoding::Hex);

      assert_eq!(tx.value, "0xde0b6b3a7640000");
      assert_eq!(tx.gas_limit, "0x4c4b40");
      assert_eq!(tx.gas_price, "0x174876e800");
   }

   #[test]
   fn wire_format() {
      let from = address!("0x8ba1f109551bD432803012645Ac136ddd64DBA72");
      let req = request().with_data(Bytes::from(vec![0xde, 0xad])).with_nonce(7);
      let tx = DispatchTx::new(&req, from, 21_000, 1, 99, NumericEncoding::Hex);

      let value = serde_json::to_value(&tx).unwrap();
      assert_eq!(
         value,
         json!({
            "from": "0x8ba1f109551bd432803012645ac136ddd64dba72",
            "to": "0xc4b00992d186435fced593a691b7138b13971bc8",
            "value": "0xde0b6b3a7640000",
            "gasLimit": "0x5208",
            "gasPrice": "0x1",
            "data": "0xdead",
            "nonce": "0x7",
            "chainId": 99,
         })
      );
      assert!(value.get("gas").is_none());
   }

   #[test]
   fn optional_fields_are_omitted() {
      let tx = DispatchTx::new(&request(), Address::ZERO, 21_000, 1, 99, NumericEncoding::Decimal);
      let value = serde_json::to_value(&tx).unwrap();
      assert!(value.get("data").is_none());
      assert!(value.get("nonce").is_none());
   }
}
