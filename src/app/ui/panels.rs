use eframe::egui::{self, Align, Color32, Context, Layout};

use crate::config::Config;
use crate::util::format_bytes;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, config: &Config) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Graph View");
                    ui.separator();
                    ui.label(format!("root: {}", config.root_path.display()));
                    ui.label(format!("seed: {}", config.seed));
                    ui.label(format!("nodes: {}", self.tree.node_count()));
                    ui.label(format!("total: {}", format_bytes(self.tree.root().size)));
                    ui.separator();
                    ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("search names")
                            .desired_width(180.0),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.visible_graph_text());
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
