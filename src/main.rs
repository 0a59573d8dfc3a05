mod api;
mod app;
mod utils;

use app::OpinionDesk;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([540.0, 720.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Document Opinion Desk",
        options,
        Box::new(|cc| Box::new(OpinionDesk::new(cc))),
    )
}
