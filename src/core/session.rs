use crate::core::{
   WalletCtx,
   client::TIMEOUT_FOR_SENDING_TX,
   utils::RT,
};
use crate::gui::SHARED_GUI;

use alloy_signer_local::PrivateKeySigner;
use anyhow::{anyhow, bail};
use rigo_eth::{
   alloy_network::{EthereumWallet, TransactionBuilder},
   alloy_primitives::{Address, TxHash, U256},
   alloy_provider::Provider,
   alloy_rpc_types::{BlockId, TransactionRequest},
   chain::{ChainId, next_block_base_fee},
   value::NumericValue,
};
use std::{str::FromStr, time::Duration};

/// Base fee of the latest block and the expected one for the next block
#[derive(Debug, Clone, Copy)]
pub struct BaseFee {
   pub current: u64,
   pub next: u64,
}

impl Default for BaseFee {
   fn default() -> Self {
      Self {
         current: 1,
         next: 1,
      }
   }
}

impl BaseFee {
   pub fn new(current: u64, next: u64) -> Self {
      Self { current, next }
   }
}

/// The wallet connected to the app, if any
pub struct WalletSession {
   signer: Option<PrivateKeySigner>,
}

impl WalletSession {
   pub fn new() -> Self {
      Self { signer: None }
   }

   pub fn is_connected(&self) -> bool {
      self.signer.is_some()
   }

   pub fn address(&self) -> Option<Address> {
      self.signer.as_ref().map(|signer| signer.address())
   }

   pub fn signer(&self) -> Option<PrivateKeySigner> {
      self.signer.clone()
   }

   /// Connect a wallet, from the configured dev key if there is one, otherwise a fresh signer
   pub fn connect(&mut self, dev_key: Option<&str>) -> Result<Address, anyhow::Error> {
      let signer = match dev_key {
         Some(key) => key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| anyhow!("Invalid dev key: {}", e))?,
         None => PrivateKeySigner::random(),
      };

      let address = signer.address();
      self.signer = Some(signer);
      Ok(address)
   }

   pub fn disconnect(&mut self) {
      self.signer = None;
   }
}

#[derive(Debug, Clone)]
pub struct TxParams {
   pub from: Address,
   pub to: Address,
   pub nonce: u64,
   pub value: U256,
   pub chain: ChainId,
   pub miner_tip: U256,
   pub base_fee: u64,
   pub gas_limit: u64,
}

impl TxParams {
   pub fn max_fee_per_gas(&self) -> U256 {
      let fee = self.miner_tip + U256::from(self.base_fee);
      // add a 10% tolerance
      fee * U256::from(110) / U256::from(100)
   }

   pub fn gas_cost(&self) -> U256 {
      U256::from(self.gas_limit) * self.max_fee_per_gas()
   }

   pub fn sufficient_balance(&self, balance: NumericValue) -> Result<(), anyhow::Error> {
      let coin = self.chain.coin_symbol();
      let cost = NumericValue::format_wei(self.gas_cost() + self.value, 18);

      if balance.wei() < cost.wei() {
         return Err(anyhow!(
            "Insufficient balance, need at least {} {} but you have {} {}",
            cost.formatted(),
            coin,
            balance.formatted(),
            coin
         ));
      }

      Ok(())
   }
}

fn make_tx_request(params: &TxParams) -> TransactionRequest {
   TransactionRequest::default()
      .with_from(params.from)
      .with_to(params.to)
      .with_chain_id(params.chain.id())
      .with_value(params.value)
      .with_nonce(params.nonce)
      .with_gas_limit(params.gas_limit)
      .with_max_priority_fee_per_gas(params.miner_tip.to::<u128>())
      .max_fee_per_gas(params.max_fee_per_gas().to::<u128>())
}

/// Send a native transfer and return its hash as soon as it is broadcast
///
/// The receipt is awaited on a background task which then refreshes the balance
pub async fn send_transfer(
   ctx: WalletCtx,
   chain: ChainId,
   recipient: String,
   amount: String,
) -> Result<TxHash, anyhow::Error> {
   let signer = ctx
      .read(|ctx| ctx.session.signer())
      .ok_or(anyhow!("No wallet connected"))?;
   let from = signer.address();

   let to =
      Address::from_str(recipient.trim()).map_err(|_| anyhow!("Invalid receiver address"))?;

   // parse_to_wei keeps the absolute value, so negative amounts are caught here
   let valid_amount = amount.trim().parse::<f64>().unwrap_or(0.0) > 0.0;
   let amount = NumericValue::parse_to_wei(&amount, 18);
   if !valid_amount || amount.is_zero() {
      bail!("Enter a valid amount");
   }

   let client = ctx.client();

   let nonce_fut = client.request(chain.id(), |client| async move {
      client.get_transaction_count(from).await.map_err(|e| anyhow!("{:?}", e))
   });
   let base_fee_fut = get_base_fee(ctx.clone(), chain);

   let nonce = nonce_fut.await?;
   let base_fee = base_fee_fut.await?;

   let miner_tip = match get_priority_fee(ctx.clone(), chain).await {
      Ok(fee) => fee,
      Err(e) => {
         tracing::warn!("Falling back to a 1 Gwei priority fee: {}", e);
         NumericValue::parse_to_gwei("1")
      }
   };

   let params = TxParams {
      from,
      to,
      nonce,
      value: amount.wei(),
      chain,
      miner_tip: miner_tip.wei(),
      base_fee: base_fee.next,
      gas_limit: chain.transfer_gas(),
   };

   // Balance may still be syncing, in that case let the node reject the transfer
   let balance = ctx.native_balance();
   if !balance.is_zero() {
      params.sufficient_balance(balance)?;
   }

   let tx = make_tx_request(&params);
   let wallet = EthereumWallet::from(signer);
   let tx_envelope = tx.build(&wallet).await?;

   let tx_client = client.get_client(chain.id(), TIMEOUT_FOR_SENDING_TX).await?;

   let time = std::time::Instant::now();
   let pending = tx_client.send_tx_envelope(tx_envelope).await?;
   let hash = *pending.tx_hash();

   tracing::info!(
      "Broadcast transfer of {} ETH to {} in {}secs, hash: {}",
      amount.formatted(),
      to,
      time.elapsed().as_secs_f32(),
      hash
   );

   let ctx_clone = ctx.clone();
   RT.spawn(async move {
      let receipt = pending
         .with_timeout(Some(Duration::from_secs(TIMEOUT_FOR_SENDING_TX)))
         .get_receipt()
         .await;

      match receipt {
         Ok(receipt) => {
            if !receipt.status() {
               tracing::warn!("Transfer {} reverted on chain", receipt.transaction_hash);
            }
            if let Err(e) = sync_native_balance(ctx_clone).await {
               tracing::error!("Failed to refresh balance after transfer: {}", e);
            }
         }
         Err(e) => {
            tracing::error!("Error waiting for the receipt of {}: {:?}", hash, e);
         }
      }
   });

   Ok(hash)
}

pub async fn get_base_fee(ctx: WalletCtx, chain: ChainId) -> Result<BaseFee, anyhow::Error> {
   let client = ctx.client();
   let block = client
      .request(chain.id(), |client| async move {
         client.get_block(BlockId::latest()).await.map_err(|e| anyhow!("{:?}", e))
      })
      .await?;

   let block = block.ok_or(anyhow!("No block found, this is usually a provider issue"))?;

   let current = block.header.base_fee_per_gas.unwrap_or_default();
   let next = next_block_base_fee(block.header.gas_used, block.header.gas_limit, current);

   Ok(BaseFee::new(current, next))
}

pub async fn get_priority_fee(
   ctx: WalletCtx,
   chain: ChainId,
) -> Result<NumericValue, anyhow::Error> {
   let client = ctx.client();
   let fee = client
      .request(chain.id(), |client| async move {
         client.get_max_priority_fee_per_gas().await.map_err(|e| anyhow!("{:?}", e))
      })
      .await?;

   let fee = NumericValue::format_to_gwei(U256::from(fee));
   if fee.is_zero() {
      bail!("Rpc returned a zero priority fee for {}", chain.name());
   }

   Ok(fee)
}

/// Fetch the native coin balance of the connected wallet and store it on the context
pub async fn sync_native_balance(ctx: WalletCtx) -> Result<(), anyhow::Error> {
   let Some(owner) = ctx.current_address() else {
      return Ok(());
   };

   let chain = ctx.chain();
   let client = ctx.client();
   let balance = client
      .request(chain.id(), |client| async move {
         client.get_balance(owner).await.map_err(|e| anyhow!("{:?}", e))
      })
      .await?;

   ctx.write(|ctx| ctx.native_balance = NumericValue::currency_balance(balance, 18));
   SHARED_GUI.request_repaint();
   Ok(())
}

#[cfg(test)]
mod tests {
   use super::*;
   use rigo_eth::alloy_primitives::{TxKind, address, utils::parse_ether};

   fn transfer_params() -> TxParams {
      TxParams {
         from: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
         to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
         nonce: 7,
         value: parse_ether("0.5").unwrap(),
         chain: ChainId::ethereum(),
         // 2 Gwei tip on a 10 Gwei base fee
         miner_tip: U256::from(2_000_000_000u64),
         base_fee: 10_000_000_000,
         gas_limit: 21_000,
      }
   }

   #[test]
   fn max_fee_has_ten_percent_tolerance() {
      let params = transfer_params();
      // (2 + 10) Gwei * 110%
      assert_eq!(params.max_fee_per_gas(), U256::from(13_200_000_000u64));
   }

   #[test]
   fn gas_cost_uses_the_max_fee() {
      let params = transfer_params();
      assert_eq!(params.gas_cost(), U256::from(277_200_000_000_000u64));
   }

   #[test]
   fn balance_check() {
      let params = transfer_params();

      let balance = NumericValue::currency_balance(parse_ether("1").unwrap(), 18);
      assert!(params.sufficient_balance(balance).is_ok());

      // Exactly the value but nothing left for gas
      let balance = NumericValue::currency_balance(parse_ether("0.5").unwrap(), 18);
      let err = params.sufficient_balance(balance).unwrap_err();
      assert!(err.to_string().starts_with("Insufficient balance"));
   }

   #[test]
   fn tx_request_fields() {
      let params = transfer_params();
      let tx = make_tx_request(&params);

      assert_eq!(tx.from, Some(params.from));
      assert_eq!(tx.to, Some(TxKind::Call(params.to)));
      assert_eq!(tx.chain_id, Some(1));
      assert_eq!(tx.value, Some(params.value));
      assert_eq!(tx.nonce, Some(7));
      assert_eq!(tx.gas, Some(21_000));
      assert_eq!(tx.max_priority_fee_per_gas, Some(2_000_000_000));
      assert_eq!(tx.max_fee_per_gas, Some(13_200_000_000));
   }

   #[test]
   fn base_fee_defaults_to_one_wei() {
      let fee = BaseFee::default();
      assert_eq!(fee.current, 1);
      assert_eq!(fee.next, 1);
   }

   #[test]
   fn session_connects_with_a_dev_key() {
      let mut session = WalletSession::new();
      assert!(!session.is_connected());

      // Well known test key
      let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
      let address = session.connect(Some(key)).unwrap();
      assert_eq!(
         address,
         address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
      );
      assert!(session.is_connected());

      session.disconnect();
      assert!(!session.is_connected());
      assert!(session.address().is_none());
   }

   #[test]
   fn session_rejects_a_bad_dev_key() {
      let mut session = WalletSession::new();
      assert!(session.connect(Some("not a key")).is_err());
      assert!(!session.is_connected());
   }

   #[test]
   fn session_connects_with_a_random_signer() {
      let mut session = WalletSession::new();
      let address = session.connect(None).unwrap();
      assert_eq!(session.address(), Some(address));
   }

   #[tokio::test]
   async fn transfer_requires_a_wallet() {
      let ctx = WalletCtx::new();
      let err = send_transfer(
         ctx,
         ChainId::ethereum(),
         "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
         "0.05".to_string(),
      )
      .await
      .unwrap_err();
      assert_eq!(err.to_string(), "No wallet connected");
   }

   #[tokio::test]
   async fn transfer_rejects_a_bad_recipient() {
      let ctx = WalletCtx::new();
      ctx.write(|c| c.session.connect(None).map(|_| ())).unwrap();

      let err = send_transfer(
         ctx,
         ChainId::ethereum(),
         "vitalik".to_string(),
         "0.05".to_string(),
      )
      .await
      .unwrap_err();
      assert_eq!(err.to_string(), "Invalid receiver address");
   }

   #[tokio::test]
   async fn transfer_rejects_a_bad_amount() {
      let ctx = WalletCtx::new();
      ctx.write(|c| c.session.connect(None).map(|_| ())).unwrap();

      for amount in ["abc", "0", "-5"] {
         let err = send_transfer(
            ctx.clone(),
            ChainId::ethereum(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            amount.to_string(),
         )
         .await
         .unwrap_err();
         assert_eq!(err.to_string(), "Enter a valid amount", "amount: {}", amount);
      }
   }
}
