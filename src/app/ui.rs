use super::OpinionDesk;
use crate::api::AnalysisReport;
use crate::utils::color::{confidence_color, ColorExt};
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Align, Color32, RichText, Stroke};
use rfd::FileDialog;

const ACCENT_HEX: &str = "#4f8fe8";
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);

impl OpinionDesk {
    pub fn render(&mut self, ctx: &egui::Context) {
        self.handle_file_drops(ctx);

        let accent = Color32::from_hex(ACCENT_HEX).unwrap_or(Color32::LIGHT_BLUE);

        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 48.0;
            let footer_margin = 12.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Document Opinion Desk");
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new("Upload a document and get an AI-generated opinion")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(16.0);
                    self.render_drop_zone(ui, accent);
                    ui.add_space(12.0);

                    if self.state.is_busy() {
                        ui.vertical_centered(|ui| {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(self.state.phase_label());
                            });
                        });
                        ui.add_space(12.0);
                    }

                    self.render_documents(ui);

                    if let Some(report) = &self.state.report {
                        Self::render_report(ui, report);
                        ui.add_space(12.0);
                    }

                    self.render_server_files(ui);
                    ui.add_space(16.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    /// Drag state and drops come in through egui's raw input. Only the
    /// first file of a multi-file drop is used.
    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        self.state.dragging = ctx.input(|i| !i.raw.hovered_files.is_empty());

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            if let Some(path) = file.path {
                self.submit_document(path);
            }
        }
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, accent: Color32) {
        let busy = self.state.is_busy();
        let highlighted = self.state.dragging && !busy;
        let stroke = if highlighted {
            Stroke::new(2.0, accent)
        } else {
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };

        egui::Frame::none()
            .stroke(stroke)
            .rounding(6.0)
            .inner_margin(18.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let prompt = if highlighted {
                        "Release to upload"
                    } else {
                        "Drag & drop a document here"
                    };
                    ui.label(RichText::new(prompt).strong());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new("PDF, DOC, DOCX or TXT, up to 10MB")
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                    ui.add_space(8.0);

                    ui.add_enabled_ui(!busy, |ui| {
                        if ui.button("📄 Choose File").clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("Documents", &["pdf", "doc", "docx", "txt"])
                                .pick_file()
                            {
                                self.submit_document(path);
                            }
                        }
                    });
                });
            });
    }

    fn render_documents(&self, ui: &mut egui::Ui) {
        if self.state.documents.is_empty() {
            return;
        }

        ui.group(|ui| {
            ui.label(RichText::new("Uploaded Documents").strong());
            ui.add_space(6.0);
            for document in &self.state.documents {
                ui.horizontal(|ui| {
                    ui.label("📄");
                    ui.label(format!(
                        "{}, {}",
                        document.filename,
                        FileSizeUtils::format_size(document.file_size)
                    ));
                    if let Some(time) = &document.upload_time {
                        ui.label(
                            RichText::new(time.as_str())
                                .small()
                                .color(ui.visuals().text_color().gamma_multiply(0.5)),
                        );
                    }
                });
            }
        });
        ui.add_space(12.0);
    }

    fn render_report(ui: &mut egui::Ui, report: &AnalysisReport) {
        ui.group(|ui| {
            ui.label(RichText::new("Analysis").heading());
            ui.add_space(6.0);
            ui.label(&report.summary);

            Self::render_section(ui, "Key Points", &report.key_points);
            Self::render_section(ui, "Recommendations", &report.recommendations);
            Self::render_section(ui, "Risks", &report.risks);
            Self::render_section(ui, "Next Steps", &report.next_steps);

            ui.add_space(10.0);
            ui.label(RichText::new("Confidence").strong());
            let bar = egui::ProgressBar::new(report.confidence_fraction())
                .show_percentage()
                .fill(confidence_color(report.confidence_score));
            ui.add(bar);
        });
    }

    fn render_section(ui: &mut egui::Ui, title: &str, items: &[String]) {
        // Empty sections are omitted entirely.
        if items.is_empty() {
            return;
        }
        ui.add_space(8.0);
        ui.label(RichText::new(title).strong());
        for item in items {
            ui.label(format!("• {}", item));
        }
    }

    fn render_server_files(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("On the server").strong());
                if ui.button("⟳ Refresh").clicked() {
                    self.refresh_server_files();
                }
            });

            if let Some(error) = &self.state.remote_error {
                ui.colored_label(ERROR_COLOR, error);
            }

            if let Some(documents) = &self.state.remote_documents {
                if documents.is_empty() {
                    ui.label("No documents stored yet.");
                }
                for document in documents {
                    ui.horizontal(|ui| {
                        ui.label("📄");
                        ui.label(format!(
                            "{}, {}",
                            document.filename,
                            FileSizeUtils::format_size(document.file_size)
                        ));
                        if let Some(time) = &document.upload_time {
                            ui.label(
                                RichText::new(time.as_str())
                                    .small()
                                    .color(ui.visuals().text_color().gamma_multiply(0.5)),
                            );
                        }
                    });
                }
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let footer_width = 320.0;
        let indent = (ui.available_width() - footer_width) / 2.0;

        ui.horizontal(|ui| {
            ui.add_space(indent);
            ui.scope(|ui| {
                ui.set_width(footer_width);
                ui.horizontal_centered(|ui| {
                    ui.label(
                        RichText::new(format!("Backend: {}", self.client.base_url()))
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                    if ui.link(RichText::new("API docs").small()).clicked() {
                        let _ = open::that(self.client.docs_url());
                    }
                });
            });
        });

        if let Some(error) = &self.state.error_message {
            ui.add_space(5.0);
            ui.vertical_centered(|ui| {
                ui.colored_label(ERROR_COLOR, error);
            });
        }
    }
}
