use alloy_contract::private::{Network, Provider};
use alloy_primitives::{Address, U256, address};
use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};

sol! {
   #[sol(rpc)]
   contract IERC20 {
      event Approval(address indexed owner, address indexed spender, uint value);
      event Transfer(address indexed from, address indexed to, uint value);

      function balanceOf(address owner) external view returns (uint256 balance);
      function approve(address spender, uint256 amount) external returns (bool);
      function transfer(address recipient, uint256 amount) external returns (bool);
      function transferFrom(address from, address recipient, uint256 amount) external returns (bool);
      function allowance(address owner, address spender) external view returns (uint256);
      function name() external view returns (string memory);
      function symbol() external view returns (string memory);
      function decimals() external view returns (uint8);
      function totalSupply() external view returns (uint256);
   }
}

/// Deployment address of the Rigo token, the same account on every supported chain
pub const RIGO_TOKEN: Address = address!("09188484e1Ab980DAeF53a9755241D759C5B7d60");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ERC20Token {
   pub chain_id: u64,
   pub address: Address,
   pub decimals: u8,
   pub symbol: String,
   pub name: String,
}

impl Default for ERC20Token {
   fn default() -> Self {
      Self::rigo(crate::chain::ETHEREUM)
   }
}

// * Builders

impl ERC20Token {
   pub fn rigo(chain_id: u64) -> Self {
      Self {
         chain_id,
         address: RIGO_TOKEN,
         decimals: 18,
         symbol: "RGT".to_string(),
         name: "Rigo Token".to_string(),
      }
   }
}

/// On-chain metadata and balance of a token, read in a single batch
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
   pub name: String,
   pub symbol: String,
   pub balance: U256,
}

/// Read the name, symbol and the owner's balance of a token in one multicall
///
/// The batch is atomic, if any call reverts the whole read fails
pub async fn get_token_info<P, N>(
   client: P,
   token: Address,
   owner: Address,
) -> Result<TokenInfo, anyhow::Error>
where
   P: Provider<N> + Clone,
   N: Network,
{
   tracing::trace!(target: "rigo_eth::erc20", "Reading token info for {} owned by {}", token, owner);

   let contract = IERC20::new(token, &client);
   let multicall = client
      .multicall()
      .add(contract.name())
      .add(contract.symbol())
      .add(contract.balanceOf(owner));

   let (name, symbol, balance) = multicall.aggregate().await?;

   Ok(TokenInfo {
      name,
      symbol,
      balance,
   })
}
