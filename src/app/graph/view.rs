use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::format_bytes;

use super::super::render_utils::{
    EDGE_COLOR, HOVER_COLOR, MATCH_COLOR, NODE_COLOR, circle_visible, edge_visible, label_size,
    world_to_screen,
};
use super::super::{SearchMatchCache, ViewModel, ViewScratch};
use crate::tree::FileTree;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub(in crate::app) fn search_matches(tree: &FileTree, query: &str) -> HashSet<usize> {
    let matcher = SkimMatcherV2::default();
    tree.nodes()
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.name, query).map(|_| index)
        })
        .collect()
}

impl ViewModel {
    fn update_screen_space(
        rect: egui::Rect,
        target: egui::Vec2,
        zoom: f32,
        tree: &FileTree,
        scratch: &mut ViewScratch,
    ) {
        let node_count = tree.node_count();
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        scratch.visible_mask.clear();
        scratch.screen_positions.reserve(node_count);
        scratch.screen_radii.reserve(node_count);
        scratch.visible_mask.reserve(node_count);

        for node in tree.nodes() {
            let position = world_to_screen(rect, target, zoom, node.position);
            let radius = node.radius * zoom;
            scratch.screen_positions.push(position);
            scratch.screen_radii.push(radius);
            scratch
                .visible_mask
                .push(circle_visible(rect, position, radius));
        }

        if scratch.draw_order.len() != node_count {
            scratch.draw_order = tree.pre_order();
        }
    }

    /// Matches are keyed by query only; the tree never changes after load.
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matches = Arc::new(search_matches(&self.tree, query));
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        self.handle_camera_keys(ui);
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        // The layout never settles, so every frame advances it.
        self.simulation.tick(&mut self.tree);
        ui.ctx().request_repaint();

        let matches = self.cached_search_matches();
        let target = self.camera_target;
        let zoom = self.zoom;
        Self::update_screen_space(rect, target, zoom, &self.tree, &mut self.view_scratch);

        let scratch = &self.view_scratch;
        self.visible_node_count = scratch.visible_mask.iter().filter(|&&visible| visible).count();

        let hovered = Self::hovered_index(
            ui,
            &scratch.visible_mask,
            &scratch.screen_positions,
            &scratch.screen_radii,
        );
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let edge_stroke = Stroke::new(1.0, EDGE_COLOR);
        for (index, node) in self.tree.nodes().iter().enumerate() {
            let Some(parent) = node.parent else {
                continue;
            };
            let start = scratch.screen_positions[index];
            let end = scratch.screen_positions[parent];
            if edge_visible(rect, start, end) {
                painter.line_segment([start, end], edge_stroke);
            }
        }

        for &index in &scratch.draw_order {
            if !scratch.visible_mask[index] {
                continue;
            }

            let node = self.tree.node(index);
            let position = scratch.screen_positions[index];
            let radius = scratch.screen_radii[index];
            let is_match = matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let color = if hovered == Some(index) {
                HOVER_COLOR
            } else if is_match {
                MATCH_COLOR
            } else {
                NODE_COLOR
            };
            painter.circle_filled(position, radius, color);

            if let Some(font_size) = label_size(node.radius, zoom) {
                painter.text(
                    position,
                    Align2::LEFT_TOP,
                    &node.name,
                    FontId::proportional(font_size),
                    Color32::WHITE,
                );
            }
        }

        if let Some(index) = hovered {
            let node = self.tree.node(index);
            let force = self
                .simulation
                .forces()
                .get(index)
                .map(|force| force.length())
                .unwrap_or(0.0);
            let panel_text = format!(
                "{}  |  {}  |  {}  |  children {}  |  force {:.0}",
                node.name,
                node.kind.label(),
                format_bytes(node.size),
                node.children.len(),
                force
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
