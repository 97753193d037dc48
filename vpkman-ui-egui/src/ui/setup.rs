use eframe::egui;
use vpkman_core::{detect_deadlock_install, is_patched, run_initial_setup, JobProgress};

pub struct SetupState {
	pub is_running: bool,
	pub current_job: Option<std::sync::mpsc::Receiver<JobProgress>>,
	pub progress: u8,
	pub setup_completed: bool,
}

impl Default for SetupState {
	fn default() -> Self {
		Self { is_running: false, current_job: None, progress: 0, setup_completed: false }
	}
}

impl SetupState {
	pub fn poll_job(&mut self, global_log: &mut String) -> bool {
		if self.current_job.is_none() { return false; }
		let mut finished = false;
		if let Some(rx) = self.current_job.take() {
			while let Ok(p) = rx.try_recv() {
				self.progress = p.percent;
				if !global_log.is_empty() { global_log.push('\n'); }
				global_log.push_str(&p.message);
				if p.percent >= 100 {
					self.is_running = false;
					self.setup_completed = true;
					finished = true;
				}
			}
			if !finished { self.current_job = Some(rx); }
		}
		finished
	}
}

pub fn render_setup_tab(app: &mut crate::app::ManagerApp, ui: &mut egui::Ui) {
	let job_finished = {
		let st = &mut app.setup;
		st.poll_job(&mut app.log)
	};
	if job_finished {
		app.settings.setup_completed = Some(true);
		let _ = app.settings_store.save(&app.settings);
		app.add_toast("Setup finished", egui::Color32::LIGHT_GREEN);
	}

	ui.heading("Setup");
	let mut path_display = app.settings.game_install_path.clone().unwrap_or_default();
	ui.horizontal(|ui| {
		ui.label("Game install folder:");
		if ui.text_edit_singleline(&mut path_display).changed() {
			app.settings.game_install_path = if path_display.trim().is_empty() { None } else { Some(path_display.clone()) };
			let _ = app.settings_store.save(&app.settings);
		}
		if ui.add_enabled(!app.setup.is_running, egui::Button::new("Browse")).clicked() {
			if let Some(p) = rfd::FileDialog::new().pick_folder() {
				app.settings.game_install_path = Some(p.display().to_string());
				let _ = app.settings_store.save(&app.settings);
			}
		}
		if ui.add_enabled(!app.setup.is_running, egui::Button::new("Auto-detect (Steam)")).clicked() {
			if let Some(p) = detect_deadlock_install() {
				app.settings.game_install_path = Some(p.display().to_string());
				let _ = app.settings_store.save(&app.settings);
			} else {
				app.add_toast("No Steam install found", egui::Color32::YELLOW);
			}
		}
	});

	let Some(paths) = app.game_paths() else {
		ui.colored_label(egui::Color32::YELLOW, "Select the game install folder to continue.");
		return;
	};
	let path_ok = paths.looks_valid();
	let col = if path_ok { egui::Color32::from_rgb(0, 200, 0) } else { egui::Color32::from_rgb(200, 0, 0) };
	ui.colored_label(col, if path_ok { "Game folder OK" } else { "citadel folder not found under this path" });

	let patched = is_patched(&paths.gameinfo_path());
	let col = if patched { egui::Color32::from_rgb(0, 200, 0) } else { egui::Color32::GRAY };
	ui.colored_label(col, if patched { "gameinfo.gi is configured for mods" } else { "gameinfo.gi not configured yet" });
	ui.separator();

	ui.label("Initial setup creates the addons folder and registers it in gameinfo.gi.");
	ui.add_space(6.0);
	if app.setup.is_running {
		let pct = app.setup.progress as f32 / 100.0;
		ui.add(egui::ProgressBar::new(pct).text(format!("{}%", app.setup.progress)).desired_width(300.0));
	} else if ui.add_enabled(path_ok, egui::Button::new("Run Initial Setup")).clicked() {
		let (tx, rx) = std::sync::mpsc::channel::<JobProgress>();
		app.setup.current_job = Some(rx);
		app.setup.is_running = true;
		app.setup.progress = 0;
		let job_paths = paths.clone();
		std::thread::spawn(move || {
			let result = run_initial_setup(&job_paths, |m, p| {
				let _ = tx.send(JobProgress { message: m.to_string(), percent: p.min(99) });
			});
			let message = match result {
				Ok(report) if report.gameinfo_patched => "Initial setup complete".to_string(),
				Ok(_) => "Game was already configured for mods".to_string(),
				Err(e) => format!("Setup failed: {e:#}"),
			};
			let _ = tx.send(JobProgress { message, percent: 100 });
		});
	}
}
