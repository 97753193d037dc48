use eframe::egui;

pub fn render_about_tab(app: &mut crate::app::ManagerApp, ui: &mut egui::Ui) {
	ui.heading("About");
	ui.separator();
	ui.label("Manages VPK mod packages for Deadlock: enable or disable mods with a click and wire the addons folder into gameinfo.gi.");
	ui.separator();
	let git = option_env!("GIT_COMMIT_HASH").unwrap_or("unknown");
	ui.label(format!("Manager version: {}", git));
	if let Some(paths) = app.game_paths() {
		ui.label(format!("Game install: {}", paths.install_dir().display()));
		if let Ok(meta) = std::fs::metadata(paths.install_dir()) {
			if let Ok(modified) = meta.modified() {
				use chrono::{DateTime, Local};
				let dt: DateTime<Local> = modified.into();
				ui.label(format!("Install modified: {}", dt.format("%d/%m/%Y %H:%M")));
			}
		}
	}
	let configured = matches!(app.settings.setup_completed, Some(true));
	ui.label(format!("Initial setup: {}", if configured { "completed" } else { "not run yet" }));
}
