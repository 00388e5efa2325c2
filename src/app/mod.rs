use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::config::{Config, LayoutConfig};
use crate::tree::{FileTree, FsSource, Placement, load_tree};

mod graph;
mod physics;
mod render_utils;
mod ui;

use physics::Simulation;

pub struct GraphViewApp {
    config: Config,
    state: AppState,
}

enum AppState {
    Loading { rx: Receiver<FileTree> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    tree: FileTree,
    simulation: Simulation,
    camera_target: Vec2,
    zoom: f32,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
    visible_node_count: usize,
    view_scratch: ViewScratch,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    visible_mask: Vec<bool>,
    draw_order: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PhysicsConfig {
    pub(crate) gravity: f32,
    pub(crate) repulsion: f32,
}

impl From<&LayoutConfig> for PhysicsConfig {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            gravity: layout.gravity,
            repulsion: layout.repulsion,
        }
    }
}

impl GraphViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let state = Self::start_load(&config);
        Self { config, state }
    }

    fn spawn_load(config: &Config) -> Receiver<FileTree> {
        let (tx, rx) = mpsc::channel();
        let root_path: PathBuf = config.root_path.clone();
        let seed = config.seed;
        let layout = config.layout;

        thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut placement = Placement::new(&mut rng, layout.spread, layout.window_size);
            let tree = load_tree(&FsSource, &root_path, &mut placement, layout.radius);
            let _ = tx.send(tree);
        });

        rx
    }

    fn start_load(config: &Config) -> AppState {
        info!(root = %config.root_path.display(), seed = config.seed, "starting scan");
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }
}

impl eframe::App for GraphViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(tree) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            tree,
                            &self.config.layout,
                        ))));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        error!("scan worker exited without a result");
                        transition = Some(AppState::Error(
                            "Background scan worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!(
                            "Scanning {}...",
                            self.config.root_path.display()
                        ));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to scan the directory tree");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.config));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.config);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    const INITIAL_ZOOM: f32 = 0.1;

    fn new(tree: FileTree, layout: &LayoutConfig) -> Self {
        let simulation = Simulation::new(&tree, PhysicsConfig::from(layout));
        let half_window = layout.window_size / 2.0;
        Self {
            tree,
            simulation,
            // puts the world origin half a window right of and below the view centre
            camera_target: vec2(-half_window, -half_window),
            zoom: Self::INITIAL_ZOOM,
            search: String::new(),
            search_match_cache: None,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            visible_node_count: 0,
            view_scratch: ViewScratch::default(),
        }
    }
}
