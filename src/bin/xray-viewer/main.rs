#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod colors;
mod constants;
mod image_watcher;
mod images;
mod ui;

use clap::Parser;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use image_watcher::ImageWatcher;
use images::{ImageLoadState, spawn_load};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use xray_viewer::{ConfigError, Geometry, GestureEvent, ScrollLock, ViewerConfig, ViewerSession};

/// Pan/zoom viewer for patient X-ray images.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image files to open (PNG or JPEG)
    images: Vec<PathBuf>,

    /// Config file (defaults to <config dir>/xray-viewer/config.ron)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main application state for the X-ray viewer.
pub struct XrayViewerApp {
    images: Vec<PathBuf>,
    config: ViewerConfig,
    /// Open viewer, keyed by index into `images`.
    session: Option<ViewerSession<usize>>,
    scroll_lock: ScrollLock,
    /// Container and image size measured during the last frame.
    geometry: Geometry,
    asset_cache: HashMap<PathBuf, ImageLoadState>,
    texture_cache: HashMap<PathBuf, TextureHandle>,
    toasts: Toasts,
    watcher: Option<ImageWatcher>,
}

impl XrayViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let config = match ViewerConfig::load_or_default(args.config.as_deref()) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default config: {err}");
                toasts.add(error_toast(config_error_message(&err), 10.0));
                ViewerConfig::default()
            }
        };

        let images: Vec<PathBuf> = args
            .images
            .into_iter()
            .map(|path| path.canonicalize().unwrap_or(path))
            .collect();

        // Decode every image up front in background threads
        let asset_cache = images
            .iter()
            .map(|path| (path.clone(), spawn_load(&cc.egui_ctx, path)))
            .collect();

        let watcher = ImageWatcher::new(cc.egui_ctx.clone(), &images);
        if watcher.is_none() && !images.is_empty() {
            log::info!("Image watcher not available - changed files will not be reloaded");
        }

        let mut app = Self {
            images,
            config,
            session: None,
            scroll_lock: ScrollLock::default(),
            geometry: Geometry::default(),
            asset_cache,
            texture_cache: HashMap::new(),
            toasts,
            watcher,
        };

        if !app.images.is_empty() {
            app.open_image(0);
        }

        app
    }

    /// Opens `idx` in the viewer, or switches the open viewer to it.
    fn open_image(&mut self, idx: usize) {
        let Some(path) = self.images.get(idx) else {
            return;
        };

        match &mut self.session {
            Some(session) => {
                if session.show(idx) {
                    log::info!("Showing {}", path.display());
                }
            }
            None => {
                log::info!("Opening viewer on {}", path.display());
                self.session = Some(ViewerSession::open(
                    idx,
                    self.config.clone(),
                    &mut self.scroll_lock,
                ));
            }
        }
    }

    fn close_viewer(&mut self) {
        if let Some(session) = self.session.take() {
            let idx = session.close(&mut self.scroll_lock);
            log::info!("Closed viewer on image {idx}");
        }
        self.geometry = Geometry::default();
    }

    fn open_path(&self) -> Option<&PathBuf> {
        self.session
            .as_ref()
            .and_then(|session| self.images.get(*session.image()))
    }

    /// Feeds a gesture to the open viewer using the most recently measured geometry.
    fn apply(&mut self, event: GestureEvent) {
        if let Some(session) = &mut self.session {
            session.viewport_mut().handle(event, &self.geometry);
        }
    }

    /// Polls all loading images and creates textures for ready ones.
    fn poll_all_images(&mut self, ctx: &egui::Context) {
        let mut updates: Vec<(PathBuf, ImageLoadState)> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (path, state) in &mut self.asset_cache {
            if let ImageLoadState::Loading(rx) = state {
                match rx.try_recv() {
                    Ok(Ok(decoded)) => {
                        log::info!(
                            "Loaded {} ({}x{})",
                            path.display(),
                            decoded.width,
                            decoded.height
                        );
                        updates.push((path.clone(), ImageLoadState::Ready(decoded)));
                    }
                    Ok(Err(err)) => {
                        let msg = err.to_string();
                        errors.push(msg.clone());
                        updates.push((path.clone(), ImageLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Disconnected) => {
                        let msg = format!("{}: loader thread exited", path.display());
                        errors.push(msg.clone());
                        updates.push((path.clone(), ImageLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Empty) => {}
                }
            }
        }

        for (path, new_state) in updates {
            self.asset_cache.insert(path, new_state);
        }

        for err in errors {
            log::error!("{err}");
            self.toasts.add(error_toast(err, 8.0));
        }

        for (path, state) in &self.asset_cache {
            if let ImageLoadState::Ready(decoded) = state
                && !self.texture_cache.contains_key(path)
            {
                let image = ColorImage::from_rgba_unmultiplied(
                    [decoded.width as usize, decoded.height as usize],
                    &decoded.pixels,
                );
                let name = path.to_string_lossy();
                let texture = ctx.load_texture(name, image, TextureOptions::LINEAR);
                self.texture_cache.insert(path.clone(), texture);
            }
        }
    }

    /// Reloads images that changed on disk; the open one gets a fresh viewport.
    fn poll_file_changes(&mut self, ctx: &egui::Context) {
        let Some(watcher) = &mut self.watcher else {
            return;
        };

        for path in watcher.poll() {
            log::info!("Reloading {}", path.display());
            self.texture_cache.remove(&path);
            self.asset_cache.insert(path.clone(), spawn_load(ctx, &path));

            if self.open_path() == Some(&path)
                && let Some(session) = &mut self.session
            {
                session.image_changed();
            }
        }
    }

    fn get_texture(&self, path: &Path) -> Option<&TextureHandle> {
        self.texture_cache.get(path)
    }
}

impl eframe::App for XrayViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_file_changes(ctx);
        self.poll_all_images(ctx);
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn error_toast(text: String, seconds: f64) -> Toast {
    Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(seconds)
            .show_icon(true),
        ..Default::default()
    }
}

fn config_error_message(err: &ConfigError) -> String {
    match err {
        ConfigError::Io { path, .. } => format!("Could not read {}", path.display()),
        _ => err.to_string(),
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "X-ray Viewer",
        options,
        Box::new(|cc| Ok(Box::new(XrayViewerApp::new(cc, args)))),
    )
}
