use eframe::{egui, App};
use vpkman_core::{detect_deadlock_install, AppSettings, GamePaths, SettingsStore};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab { Mods, Setup, Logs, About }

pub struct Toast { pub msg: String, pub color: egui::Color32, pub until: std::time::Instant }

pub struct ManagerApp {
	pub log: String,
	pub settings_store: SettingsStore,
	pub settings: AppSettings,
	pub selected: Tab,
	pub show_error_modal: Option<String>,
	pub toasts: Vec<Toast>,
	pub mods: crate::ui::mods::ModsState,
	pub setup: crate::ui::setup::SetupState,
}

impl Default for ManagerApp {
	fn default() -> Self {
		let store = SettingsStore::new().unwrap_or_else(|_| panic!("settings store init failed"));
		let mut settings = store.load().unwrap_or_default();
		if settings.game_install_path.is_none() {
			if let Some(p) = detect_deadlock_install() {
				settings.game_install_path = Some(p.display().to_string());
				let _ = store.save(&settings);
			}
		}
		Self {
			log: String::new(),
			settings_store: store,
			settings,
			selected: Tab::Mods,
			show_error_modal: None,
			toasts: Vec::new(),
			mods: Default::default(),
			setup: Default::default(),
		}
	}
}

impl ManagerApp {
	pub fn game_paths(&self) -> Option<GamePaths> {
		self.settings.game_install_path.as_ref().map(GamePaths::new)
	}

	pub fn append_global_log(&mut self, msg: &str) {
		if !self.log.is_empty() {
			self.log.push('\n');
		}
		self.log.push_str(msg);
	}

	pub fn add_toast(&mut self, msg: &str, color: egui::Color32) {
		self.toasts.push(Toast { msg: msg.to_string(), color, until: std::time::Instant::now() + std::time::Duration::from_secs(4) });
	}

	fn draw_toasts(&mut self, ctx: &egui::Context) {
		let now = std::time::Instant::now();
		self.toasts.retain(|t| t.until > now);
		let mut y = 12.0;
		for (i, t) in self.toasts.iter().enumerate() {
			egui::Area::new(egui::Id::new(format!("toast-{i}"))).fixed_pos(egui::pos2(220.0, y)).show(ctx, |ui| { ui.colored_label(t.color, &t.msg); });
			y += 22.0;
		}
	}

	fn render_error_modal(&mut self, ctx: &egui::Context) {
		if let Some(msg) = self.show_error_modal.clone() {
			egui::Window::new("Error").collapsible(false).resizable(true).show(ctx, |ui| {
				ui.colored_label(egui::Color32::RED, &msg);
				ui.horizontal(|ui| {
					if ui.button("Copy details").clicked() { ui.output_mut(|o| o.copied_text = msg.clone()); self.add_toast("Copied error", egui::Color32::LIGHT_GREEN); }
					if ui.button("Close").clicked() { self.show_error_modal = None; }
				});
			});
		}
	}
}

impl App for ManagerApp {
	fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
		let is_focused = ctx.input(|i| i.focused);
		if is_focused { ctx.request_repaint_after(std::time::Duration::from_millis(1000)); }

		egui::SidePanel::left("nav").resizable(true).min_width(160.0).show(ctx, |ui| {
			ui.heading("VPK Mod Manager");
			ui.separator();
			ui.selectable_value(&mut self.selected, Tab::Mods, "Mods");
			ui.selectable_value(&mut self.selected, Tab::Setup, "Setup");
			ui.selectable_value(&mut self.selected, Tab::Logs, "Logs");
			ui.selectable_value(&mut self.selected, Tab::About, "About");
			ui.add_space(8.0);
			ui.separator();
			let path_ok = self.game_paths().map(|p| p.looks_valid()).unwrap_or(false);
			let col = if path_ok { egui::Color32::from_rgb(0, 200, 0) } else { egui::Color32::from_rgb(200, 0, 0) };
			ui.colored_label(col, if path_ok { "Game folder OK" } else { "Game folder not set" });
			if self.setup.is_running {
				ui.add_space(6.0);
				let pct = self.setup.progress as f32 / 100.0;
				let width = ui.available_width().min(220.0);
				let bar = egui::ProgressBar::new(pct).text(format!("Setup: {}%", self.setup.progress));
				ui.add_sized(egui::vec2(width, 18.0), bar);
			}
		});

		egui::CentralPanel::default().show(ctx, |ui| {
			match self.selected {
				Tab::Mods => { crate::ui::mods::render_mods_tab(self, ui); }
				Tab::Setup => { crate::ui::setup::render_setup_tab(self, ui); }
				Tab::Logs => { crate::ui::logs::render_logs_tab(self, ui); }
				Tab::About => { crate::ui::about::render_about_tab(self, ui); }
			}
		});
		self.render_error_modal(ctx);
		self.draw_toasts(ctx);
	}
}
