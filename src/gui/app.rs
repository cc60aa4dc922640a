use crate::core::Config;
use crate::gui::SHARED_GUI;
use eframe::{CreationContext, egui};

pub struct RigoApp;

impl RigoApp {
   pub fn new(cc: &CreationContext) -> Self {
      let egui_ctx = cc.egui_ctx.clone();

      match Config::from_env() {
         Ok(config) => {
            SHARED_GUI.write(|gui| {
               gui.egui_ctx = egui_ctx;
               gui.ctx.write(|ctx| ctx.config = config);
            });
         }
         Err(e) => {
            tracing::error!("Configuration error: {:?}", e);

            SHARED_GUI.write(|gui| {
               gui.egui_ctx = egui_ctx;
               gui.open_msg_window("Configuration error", e.to_string());
            });
         }
      }

      Self
   }
}

impl eframe::App for RigoApp {
   fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
      // All Ui is painted while holding the lock, background tasks only
      // touch SHARED_GUI from the runtime threads
      SHARED_GUI.write(|gui| {
         egui::TopBottomPanel::top("top_panel")
            .exact_height(60.0)
            .resizable(false)
            .show_separator_line(true)
            .show(ctx, |ui| {
               gui.show_top_panel(ui);
            });

         egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            gui.show_central_panel(ui);

            gui.notification.show(ui);
            gui.msg_window.show(ui);
         });
      });
   }
}
