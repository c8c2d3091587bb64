use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, sol};

pub use IMulticall::Call;

sol! {
    contract IMulticall {
        struct Call {
            address target;
            bytes callData;
        }

        function aggregate(Call[] memory calls) public returns (uint256 blockNumber, bytes[] memory returnData);
        function getEthBalance(address addr) public view returns (uint256 balance);
        function getBlockHash(uint256 blockNumber) public view returns (bytes32 blockHash);
        function getLastBlockHash() public view returns (bytes32 blockHash);
        function getCurrentBlockTimestamp() public view returns (uint256 timestamp);
        function getCurrentBlockDifficulty() public view returns (uint256 difficulty);
        function getCurrentBlockGasLimit() public view returns (uint256 gaslimit);
        function getCurrentBlockCoinbase() public view returns (address coinbase);
}
}

pub fn aggregate_selector() -> [u8; 4] {
   IMulticall::aggregateCall::SELECTOR
}

pub fn encode_aggregate(calls: Vec<Call>) -> Bytes {
   let c = IMulticall::aggregateCall { calls };
   Bytes::from(c.abi_encode())
}

pub fn encode_get_eth_balance(addr: Address) -> Bytes {
   let c = IMulticall::getEthBalanceCall { addr };
   Bytes::from(c.abi_encode())
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn aggregate_encoding() {
      assert_eq!(aggregate_selector(), [0x25, 0x2d, 0xba, 0x42]);

      let balance_call = Call {
         target: Address::ZERO,
         callData: encode_get_eth_balance(Address::ZERO),
      };
      let encoded = encode_aggregate(vec![balance_call]);
      assert_eq!(&encoded[..4], &aggregate_selector());
   }
}
