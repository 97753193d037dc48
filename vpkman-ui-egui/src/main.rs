#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod app;
mod ui;

fn main() -> anyhow::Result<()> {
	vpkman_core::init_logging();
	let native_options = eframe::NativeOptions::default();
	eframe::run_native(
		"VPK Mod Manager",
		native_options,
		Box::new(|_cc| Ok(Box::new(app::ManagerApp::default()))),
	).unwrap();
	Ok(())
}
