use eframe::egui;

pub fn render_logs_tab(app: &mut crate::app::ManagerApp, ui: &mut egui::Ui) {
	ui.heading("Logs");
	ui.separator();

	ui.horizontal(|ui| {
		if ui.small_button("Copy").clicked() {
			ui.output_mut(|o| o.copied_text = app.log.clone());
		}
		if ui.small_button("Clear").clicked() {
			app.log.clear();
		}
		if !app.log.is_empty() {
			ui.weak(format!("{} line(s)", app.log.lines().count()));
		}
	});

	ui.separator();

	let available_height = ui.available_height();
	egui::ScrollArea::vertical()
		.stick_to_bottom(true)
		.auto_shrink([false, false])
		.max_height(available_height)
		.show(ui, |ui| {
			ui.set_min_height(available_height - 20.0);
			ui.monospace(&app.log);
		});
}
