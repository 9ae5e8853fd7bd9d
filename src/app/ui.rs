use super::ImageUploader;
use super::UploadPhase;
use crate::upload::{UploadOutcome, UPLOAD_ENDPOINT};
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS_GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl ImageUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Image Uploader");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Pick images and send them off in one go")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    ui.label("Only WEBP, JPEG and PNG images up to 1 MB are accepted");
                    ui.add_space(10.0);
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.add_enabled_ui(self.state.picker_enabled(), |ui| {
                                if ui.button("🖼 Select Images").clicked() {
                                    self.select_files();
                                }
                            });
                            let files = self.state.files();
                            if !files.is_empty() {
                                let total: u64 = files.iter().map(|file| file.size).sum();
                                ui.label(format!(
                                    "{} file(s), {} in total",
                                    files.len(),
                                    format_size(total)
                                ));
                            }
                        });
                    });

                    ui.add_space(20.0);

                    self.render_status_line(ui);

                    ui.add_space(10.0);

                    ui.vertical_centered(|ui| {
                        ui.add_enabled_ui(self.state.can_submit(), |ui| {
                            let label = if self.state.phase() == UploadPhase::Pending {
                                "⏳ Uploading..."
                            } else {
                                "📤 Upload Images"
                            };
                            let button =
                                egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                            if ui.add(button).clicked() {
                                self.start_upload();
                            }
                        });
                    });

                    ui.add_space(10.0);

                    let progress = self.state.get_progress_percentage() as f32 / 100.0;
                    let progress_bar = egui::ProgressBar::new(progress)
                        .show_percentage()
                        .animate(self.state.phase() == UploadPhase::Pending)
                        .fill(ACCENT);
                    ui.add(progress_bar);

                    if !self.state.uploaded_files().is_empty() {
                        ui.add_space(10.0);
                        self.render_uploaded(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_status_line(&self, ui: &mut egui::Ui) {
        let status = self.state.get_status_text();
        if self.state.validation_failed() {
            ui.colored_label(ERROR_RED, status);
            return;
        }
        match self.state.phase() {
            UploadPhase::Done(UploadOutcome::Success) => {
                ui.colored_label(SUCCESS_GREEN, status);
            }
            UploadPhase::Done(UploadOutcome::Error) => {
                ui.colored_label(ERROR_RED, status);
            }
            _ => {
                ui.label(status);
            }
        }
    }

    fn render_uploaded(&self, ui: &mut egui::Ui) {
        let uploaded = self.state.uploaded_files();
        ui.label(format!("Uploaded {} file(s)", uploaded.len()));

        egui::ScrollArea::vertical()
            .max_height(200.0)
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        for file in uploaded {
                            ui.horizontal(|ui| {
                                ui.label("🖼");
                                ui.vertical(|ui| {
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new("Name:").strong());
                                        ui.label(&file.name);
                                    });
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new("Type:").strong());
                                        ui.label(&file.mime_type);
                                    });
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new("Size:").strong());
                                        ui.label(format!("{} bytes", file.size));
                                    });
                                });
                            });
                            ui.add_space(4.0);
                        }
                        ui.add_space(8.0);
                    });
            });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let footer_width = 240.0;
        let indent = (ui.available_width() - footer_width) / 2.0;

        ui.horizontal(|ui| {
            ui.add_space(indent);
            ui.scope(|ui| {
                ui.set_width(footer_width);
                ui.horizontal_centered(|ui| {
                    ui.label("Uploads go to");
                    if ui
                        .add(
                            egui::Label::new(RichText::new("httpbin.org/post").color(ACCENT))
                                .sense(egui::Sense::click()),
                        )
                        .clicked()
                    {
                        let _ = open::that(UPLOAD_ENDPOINT);
                    }
                });
            });
        });
    }
}
