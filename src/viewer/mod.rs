//! Interactive annotated-image viewer: pan/zoom surface with bounding-box
//! outlines, hover tooltips and progressive preview-to-full loading.

pub mod hit_test;
pub mod interaction;
pub mod loader;
pub mod render;
pub mod transform;

use crate::annotation::Annotation;
use crate::class_colors::ClassPalette;
use crate::settings::ViewerSettings;
use egui::{Color32, Pos2, Rect, Sense, Vec2};
use hit_test::HoverState;
use interaction::{collect_pointer_events, Scene, ViewState};
use loader::{ImageLoader, ImageRequest, LoadStatus, ProgressiveImage};
use render::{render_frame, ActiveImage, EguiSurface, FrameInput, Surface};
use transform::{fit_rect, SurfaceGeometry, ViewportTransform, ZoomLimits};

/// Everything the page-level data loader hands to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerInput {
    pub image_url: String,
    pub preview_url: Option<String>,
    pub annotations: Vec<Annotation>,
}

pub struct AnnotatedViewer {
    ctx: egui::Context,
    loader: ImageLoader,
    image: ProgressiveImage,
    request: Option<ImageRequest>,
    annotations: Vec<Annotation>,
    state: ViewState,
    /// Placement of the surface in the last shown frame
    geometry: Option<SurfaceGeometry>,
    pointer_inside: bool,

    zoom_limits: ZoomLimits,
    palette: ClassPalette,
    stroke_width: f32,
    background: Color32,
}

impl AnnotatedViewer {
    pub fn new(ctx: &egui::Context, settings: &ViewerSettings) -> Self {
        Self {
            ctx: ctx.clone(),
            loader: ImageLoader::new(Some(ctx.clone()), settings.asset_base_url.clone()),
            image: ProgressiveImage::default(),
            request: None,
            annotations: Vec::new(),
            state: ViewState::default(),
            geometry: None,
            pointer_inside: false,
            zoom_limits: settings.zoom,
            palette: settings.palette.clone(),
            stroke_width: settings.stroke_width,
            background: settings.background_color.0,
        }
    }

    /// Show a new image and/or annotation list. A different image URL is a
    /// new identity: the view resets and loading starts over.
    pub fn set_input(&mut self, input: ViewerInput) {
        let request = ImageRequest {
            image_url: input.image_url,
            preview_url: input.preview_url,
        };
        self.annotations = input.annotations;
        self.state.hover = None;

        let same_image = self
            .request
            .as_ref()
            .is_some_and(|current| current.image_url == request.image_url);
        if same_image {
            return;
        }

        self.state.reset();
        self.geometry = None;
        let generation = self.loader.request(&request);
        self.image.begin(generation);
        self.request = Some(request);
    }

    pub fn zoom_in(&mut self) {
        let geometry = self.zoom_geometry();
        self.state.zoom_in(&self.zoom_limits, &geometry);
    }

    pub fn zoom_out(&mut self) {
        let geometry = self.zoom_geometry();
        self.state.zoom_out(&self.zoom_limits, &geometry);
    }

    /// Last drawn placement; an empty surface at the origin before the
    /// first frame, which anchors zoom at (0,0).
    fn zoom_geometry(&self) -> SurfaceGeometry {
        self.geometry
            .unwrap_or_else(|| SurfaceGeometry::new(Rect::from_min_size(Pos2::ZERO, Vec2::ZERO), Vec2::ZERO))
    }

    pub fn reset_view(&mut self) {
        self.state.transform = ViewportTransform::default();
    }

    /// Apply finished loads. Returns true when the image changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(message) = self.loader.try_recv() {
            changed |= self.image.apply(&self.ctx, message);
        }
        changed
    }

    pub fn transform(&self) -> ViewportTransform {
        self.state.transform
    }

    pub fn hover(&self) -> Option<&HoverState> {
        self.state.hover.as_ref()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.image.status()
    }

    /// Native size of the image currently drawn.
    pub fn active_size(&self) -> Option<Vec2> {
        self.image.active().map(|r| r.size)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn active_image(&self) -> Option<ActiveImage> {
        self.image.active().map(|r| ActiveImage {
            texture: r.texture.id(),
            size: r.size,
        })
    }

    /// Run the full draw pass against any surface.
    pub fn render_to<S: Surface + ?Sized>(&self, surface: &mut S, pixels_per_point: f32) {
        render_frame(
            surface,
            &FrameInput {
                image: self.active_image(),
                error: self.image.error(),
                annotations: &self.annotations,
                transform: self.state.transform,
                palette: &self.palette,
                stroke_width: self.stroke_width,
                pixels_per_point,
            },
        );
    }

    /// Fill the remaining space of `ui` with the viewer.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let region = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(region, Sense::click_and_drag());

        self.geometry = self
            .active_image()
            .map(|image| SurfaceGeometry::new(fit_rect(region, image.size), image.size));
        let bounds = self.geometry.map_or(region, |g| g.bounds);

        let events = collect_pointer_events(&response, bounds, &mut self.pointer_inside);
        let scene = Scene {
            geometry: self.geometry,
            annotations: &self.annotations,
        };
        for event in events {
            self.state.handle_pointer(event, &scene);
        }

        let mut surface = EguiSurface::new(ui.painter().clone(), region, self.background);
        self.render_to(&mut surface, ui.ctx().pixels_per_point());

        if self.state.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }
        if let Some(hover) = &self.state.hover {
            show_hover_tooltip(ui, response.id, hover);
        }

        response
    }
}

fn show_hover_tooltip(ui: &egui::Ui, id: egui::Id, hover: &HoverState) {
    egui::show_tooltip_at(ui.ctx(), ui.layer_id(), id.with("hover-tooltip"), hover.screen_pos, |ui| {
        ui.label(egui::RichText::new(hover.annotation.tooltip_text()).size(15.0));
    });
}
