use egui::{Align2, Color32, ProgressBar, RichText, Ui, Window, vec2};

use std::time::{SystemTime, UNIX_EPOCH};

/// How long a notification stays on screen
const NOTIFICATION_SECS: u64 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationKind {
   Info,
   Success,
   Error,
}

impl NotificationKind {
   pub fn color(&self) -> Color32 {
      match self {
         Self::Info => Color32::LIGHT_BLUE,
         Self::Success => Color32::LIGHT_GREEN,
         Self::Error => Color32::LIGHT_RED,
      }
   }
}

/// A notification that appears at the top of the screen
///
/// It closes itself once its progress bar fills up
pub struct Notification {
   open: bool,
   // UNIX timestamp in seconds of when the notification started
   start_on: u64,
   // UNIX timestamp in seconds of when the notification must be closed
   finish_on: u64,
   kind: NotificationKind,
   title: String,
   message: String,
   size: (f32, f32),
}

impl Notification {
   pub fn new() -> Self {
      Self {
         open: false,
         start_on: 0,
         finish_on: 0,
         kind: NotificationKind::Info,
         title: String::new(),
         message: String::new(),
         size: (350.0, 100.0),
      }
   }

   pub fn open_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
      self.open(NotificationKind::Info, title.into(), message.into());
   }

   pub fn open_success(&mut self, title: impl Into<String>) {
      self.open(NotificationKind::Success, title.into(), String::new());
   }

   pub fn open_error(&mut self, message: impl Into<String>) {
      self.open(NotificationKind::Error, message.into(), String::new());
   }

   fn open(&mut self, kind: NotificationKind, title: String, message: String) {
      let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();

      self.open = true;
      self.start_on = now;
      self.finish_on = now + NOTIFICATION_SECS;
      self.kind = kind;
      self.title = title;
      self.message = message;
   }

   pub fn reset(&mut self) {
      *self = Self::new();
   }

   pub fn show(&mut self, ui: &mut Ui) {
      if !self.open {
         return;
      }

      let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
      let start = (self.start_on as u128) * 1000u128;
      let finish = (self.finish_on as u128) * 1000u128;
      let elapsed = now.saturating_sub(start);
      let total = finish.saturating_sub(start);

      let progress: f32 = if total == 0 {
         1.0
      } else {
         (elapsed as f64 / total as f64).min(1.0) as f32
      };

      if progress >= 1.0 {
         self.reset();
         return;
      }

      let bar_width = self.size.0 / 2.0;
      let bar_color = self.kind.color();

      Window::new("notification_window")
         .title_bar(false)
         .resizable(false)
         .collapsible(false)
         .anchor(Align2::CENTER_TOP, vec2(0.0, 16.0))
         .show(ui.ctx(), |ui| {
            ui.spacing_mut().item_spacing = vec2(0.0, 10.0);
            ui.set_max_width(self.size.0);
            ui.set_max_height(self.size.1);

            ui.vertical_centered(|ui| {
               let title = RichText::new(&self.title).size(16.0).color(self.kind.color());
               ui.label(title);

               if !self.message.is_empty() {
                  ui.label(RichText::new(&self.message).size(14.0));
               }

               ui.add(
                  ProgressBar::new(progress)
                     .animate(true)
                     .fill(bar_color)
                     .desired_width(bar_width)
                     .desired_height(8.0),
               );
            });
         });
   }
}
