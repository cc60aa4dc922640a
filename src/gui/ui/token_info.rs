use crate::core::{WalletCtx, utils::RT};
use crate::gui::SHARED_GUI;
use crate::gui::ui::rich_text;

use egui::{Color32, Frame, Margin, Spinner, Ui, vec2};
use rigo_eth::{
   alloy_primitives::Address,
   erc20::{ERC20Token, TokenInfo, get_token_info},
};

/// Read only panel with the Rigo token details for the connected account
///
/// Name, symbol and balance are fetched in a single multicall whenever
/// the account or the chain changes
pub struct TokenInfoUi {
   /// The (owner, chain) pair the current fetch belongs to
   key: Option<(Address, u64)>,
   result: Option<Result<TokenInfo, String>>,
   fetching: bool,
   size: (f32, f32),
}

impl TokenInfoUi {
   pub fn new() -> Self {
      Self {
         key: None,
         result: None,
         fetching: false,
         size: (450.0, 150.0),
      }
   }

   pub fn show(&mut self, ctx: WalletCtx, ui: &mut Ui) {
      if !ctx.is_connected() {
         self.key = None;
         self.result = None;
         self.fetching = false;
         return;
      }

      let Some(owner) = ctx.current_address() else {
         return;
      };

      let chain = ctx.chain();
      let key = (owner, chain.id());

      if self.key != Some(key) {
         self.key = Some(key);
         self.result = None;
         self.fetching = true;
         start_fetch(ctx.clone(), owner, chain.id(), key);
      }

      ui.add_space(15.0);

      ui.vertical_centered(|ui| {
         Frame::group(ui.style()).inner_margin(Margin::same(10)).show(ui, |ui| {
            ui.set_width(self.size.0);
            ui.set_max_height(self.size.1);
            ui.spacing_mut().item_spacing = vec2(0.0, 10.0);

            if self.fetching {
               ui.add(Spinner::new().size(20.0));
            }

            match &self.result {
               Some(Ok(info)) => {
                  for line in display_lines(info, chain.id()) {
                     ui.label(rich_text(line));
                  }
               }
               Some(Err(msg)) => {
                  let text = format!("Error: {}", msg);
                  ui.label(rich_text(text).color(Color32::LIGHT_RED));
               }
               None => {}
            }
         });
      });
   }
}

fn start_fetch(ctx: WalletCtx, owner: Address, chain: u64, key: (Address, u64)) {
   let token = ERC20Token::rigo(chain);
   let token_address = token.address;

   RT.spawn(async move {
      let client = ctx.client();
      let result = client
         .request(chain, |client| async move {
            get_token_info(client, token_address, owner).await
         })
         .await;

      match &result {
         Ok(info) => {
            tracing::info!(
               "Fetched {} ({}) info on chain {}",
               info.name,
               info.symbol,
               chain
            );
         }
         Err(e) => {
            tracing::error!("Failed to fetch token info on chain {}: {:?}", chain, e);
         }
      }

      SHARED_GUI.write(|gui| {
         // an account or chain switch may have started a newer fetch
         if gui.token_info.key == Some(key) {
            gui.token_info.result = Some(result.map_err(|e| e.to_string()));
            gui.token_info.fetching = false;
            gui.request_repaint();
         }
      });
   });
}

fn display_lines(info: &TokenInfo, chain: u64) -> [String; 3] {
   [
      format!("Token: {} ({})", info.name, info.symbol),
      format!("ChainId: {}", chain),
      format!("Balance: {}", info.balance),
   ]
}

#[cfg(test)]
mod tests {
   use super::*;
   use rigo_eth::{alloy_primitives::U256, chain};

   #[test]
   fn panel_lines_show_raw_balance() {
      let info = TokenInfo {
         name: "Rigo Token".to_string(),
         symbol: "RGT".to_string(),
         balance: U256::from(1_250_000_000_000_000_000u128),
      };

      let lines = display_lines(&info, chain::ETHEREUM);
      assert_eq!(lines[0], "Token: Rigo Token (RGT)");
      assert_eq!(lines[1], "ChainId: 1");
      assert_eq!(lines[2], "Balance: 1250000000000000000");
   }
}
