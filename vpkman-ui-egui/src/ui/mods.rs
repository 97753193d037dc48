use eframe::egui;
use vpkman_core::{ModEntry, ModLibrary, MOD_EXTENSION};

#[derive(Default)]
pub struct ModsState {
	pub entries: Vec<ModEntry>,
	pub loaded: bool,
}

enum ModAction {
	Enable(String),
	Disable(String),
	Uninstall(String),
}

fn refresh(app: &mut crate::app::ManagerApp, library: &ModLibrary) {
	match library.list() {
		Ok(entries) => { app.mods.entries = entries; }
		Err(e) => {
			app.mods.entries.clear();
			app.append_global_log(&format!("Failed to list mods: {e:#}"));
		}
	}
	app.mods.loaded = true;
}

pub fn render_mods_tab(app: &mut crate::app::ManagerApp, ui: &mut egui::Ui) {
	ui.heading("Mods");
	let Some(paths) = app.game_paths() else {
		ui.label("Set the game folder on the Setup tab first.");
		return;
	};
	let library = ModLibrary::new(paths.addons_dir());
	if !app.mods.loaded { refresh(app, &library); }

	ui.horizontal(|ui| {
		if ui.button("Refresh").clicked() { refresh(app, &library); }
		if ui.button("Install VPK…").clicked() {
			if let Some(file) = rfd::FileDialog::new().add_filter("VPK package", &[MOD_EXTENSION]).pick_file() {
				match library.install(&file) {
					Ok(entry) => {
						app.add_toast(&format!("Installed {}", entry.name), egui::Color32::LIGHT_GREEN);
						refresh(app, &library);
					}
					Err(e) => { app.show_error_modal = Some(format!("{e:#}")); }
				}
			}
		}
	});
	ui.separator();

	if app.mods.entries.is_empty() {
		ui.label(format!("No mods found in {}", library.addons_dir().display()));
		return;
	}

	let mut actions: Vec<ModAction> = Vec::new();
	let entries = app.mods.entries.clone();
	egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
		for entry in &entries {
			ui.horizontal(|ui| {
				let mut enabled = entry.enabled;
				if ui.checkbox(&mut enabled, "").changed() {
					if enabled {
						actions.push(ModAction::Enable(entry.name.clone()));
					} else {
						actions.push(ModAction::Disable(entry.name.clone()));
					}
				}
				ui.label(&entry.name);
				ui.weak(humansize::format_size(entry.size, humansize::BINARY));
				if !entry.enabled { ui.weak("(disabled)"); }
				ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
					if ui.small_button("Uninstall").clicked() {
						actions.push(ModAction::Uninstall(entry.name.clone()));
					}
				});
			});
		}
	});

	for action in actions {
		let result = match &action {
			ModAction::Enable(name) => library.enable(name),
			ModAction::Disable(name) => library.disable(name),
			ModAction::Uninstall(name) => library.uninstall(name),
		};
		match (result, action) {
			(Ok(()), ModAction::Enable(name)) => { app.add_toast(&format!("Enabled {name}"), egui::Color32::LIGHT_GREEN); }
			(Ok(()), ModAction::Disable(name)) => { app.add_toast(&format!("Disabled {name}"), egui::Color32::LIGHT_BLUE); }
			(Ok(()), ModAction::Uninstall(name)) => { app.add_toast(&format!("Uninstalled {name}"), egui::Color32::LIGHT_BLUE); }
			(Err(e), _) => { app.show_error_modal = Some(format!("{e:#}")); }
		}
		app.mods.loaded = false;
	}
}
