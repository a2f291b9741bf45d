//! Background image loading with preview-then-full progression.
//!
//! Each request gets a new [`LoadGeneration`]. Preview and full loads run on
//! their own threads and report back over a channel; [`ProgressiveImage`]
//! applies the results on the UI thread and drops anything from an older
//! generation.

use crate::errors::{Result, ViewerError};
use egui::{ColorImage, TextureHandle, Vec2};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

const MAX_FILE_BYTES: u64 = 500 * 1024 * 1024;
const MMAP_THRESHOLD_BYTES: u64 = 50 * 1024 * 1024;
const MAX_MEGAPIXELS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub image_url: String,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Http(String),
    File(PathBuf),
}

impl ImageSource {
    /// Absolute http(s) URLs are fetched as-is; a relative URL is joined to
    /// `base_url` when one is configured; anything else is a local path.
    pub fn resolve(url: &str, base_url: Option<&str>) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            return ImageSource::Http(url.to_string());
        }
        if let Some(base) = base_url {
            let base = base.trim_end_matches('/');
            let path = url.trim_start_matches('.').trim_start_matches('/');
            return ImageSource::Http(format!("{}/{}", base, path));
        }
        let path = url.strip_prefix("file://").unwrap_or(url);
        ImageSource::File(PathBuf::from(path))
    }

    pub fn describe(&self) -> String {
        match self {
            ImageSource::Http(url) => url.clone(),
            ImageSource::File(path) => path.display().to_string(),
        }
    }
}

pub fn load_image(source: &ImageSource) -> Result<DynamicImage> {
    let image = match source {
        ImageSource::Http(url) => {
            let bytes = fetch_http(url)?;
            decode_bytes(&bytes, url)?
        }
        ImageSource::File(path) => load_file(path)?,
    };
    check_dimensions(&image, &source.describe())?;
    Ok(image)
}

fn fetch_http(url: &str) -> Result<Vec<u8>> {
    let network = |e: reqwest::Error| ViewerError::NetworkError {
        url: url.to_string(),
        message: e.to_string(),
    };
    // No request timeout: a hung load keeps the last frame.
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(network)?;
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(network)?;

    if let Some(len) = response.content_length() {
        if len > MAX_FILE_BYTES {
            return Err(ViewerError::TooLarge {
                source_name: url.to_string(),
                details: format!("{}MB (max 500MB)", len / (1024 * 1024)),
            });
        }
    }
    let bytes = response.bytes().map_err(network)?;
    Ok(bytes.to_vec())
}

fn load_file(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file_size = std::fs::metadata(path)?.len();
    if file_size > MAX_FILE_BYTES {
        return Err(ViewerError::TooLarge {
            source_name: path.display().to_string(),
            details: format!("{}MB (max 500MB)", file_size / (1024 * 1024)),
        });
    }

    if file_size > MMAP_THRESHOLD_BYTES {
        return load_file_memory_mapped(path);
    }

    image::open(path).map_err(|e| ViewerError::ImageLoadError {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

fn load_file_memory_mapped(path: &Path) -> Result<DynamicImage> {
    use memmap2::Mmap;
    use std::fs::File;

    let file = File::open(path)?;
    // SAFETY: the map is read-only and dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| ViewerError::ImageLoadError {
        source_name: path.display().to_string(),
        message: format!("Memory mapping failed: {}", e),
    })?;

    decode_bytes(&mmap, &path.display().to_string())
}

fn decode_bytes(bytes: &[u8], source_name: &str) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| ViewerError::DecodingError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

fn check_dimensions(image: &DynamicImage, source_name: &str) -> Result<()> {
    let (width, height) = image.dimensions();
    let megapixels = (width as u64 * height as u64) / 1_000_000;
    if megapixels > MAX_MEGAPIXELS {
        return Err(ViewerError::TooLarge {
            source_name: source_name.to_string(),
            details: format!("{}MP (max 100MP)", megapixels),
        });
    }
    Ok(())
}

pub fn to_color_image(image: &DynamicImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    let pixels = rgba.as_flat_samples();
    ColorImage::from_rgba_unmultiplied(size, pixels.as_slice())
}

/// Identity of one image request. Bumped whenever the image URL changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadGeneration(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Preview,
    Full,
}

pub struct LoaderMessage {
    pub generation: LoadGeneration,
    pub kind: LoadKind,
    pub result: Result<ColorImage>,
}

pub struct ImageLoader {
    tx: Sender<LoaderMessage>,
    rx: Receiver<LoaderMessage>,
    generation: LoadGeneration,
    asset_base_url: Option<String>,
    ctx: Option<egui::Context>,
}

impl ImageLoader {
    pub fn new(ctx: Option<egui::Context>, asset_base_url: Option<String>) -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            generation: LoadGeneration(0),
            asset_base_url,
            ctx,
        }
    }

    /// Start a new load. The preview (if any) is spawned first; the full
    /// image is spawned right after, so both run concurrently.
    pub fn request(&mut self, request: &ImageRequest) -> LoadGeneration {
        self.generation = LoadGeneration(self.generation.0 + 1);
        let base = self.asset_base_url.as_deref();

        if let Some(preview_url) = &request.preview_url {
            self.spawn_loader(LoadKind::Preview, ImageSource::resolve(preview_url, base));
        }
        self.spawn_loader(LoadKind::Full, ImageSource::resolve(&request.image_url, base));

        log::debug!(
            "Requested {} (preview: {:?}) as generation {}",
            request.image_url,
            request.preview_url,
            self.generation.0
        );
        self.generation
    }

    fn spawn_loader(&self, kind: LoadKind, source: ImageSource) {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        let generation = self.generation;
        let name = format!("loader-{}-{:?}", generation.0, kind).to_lowercase();
        let spawned = std::thread::Builder::new().name(name).spawn(move || {
            let started = Instant::now();
            let result = load_image(&source).map(|image| to_color_image(&image));
            tracing::debug!(
                generation = generation.0,
                kind = ?kind,
                source = %source.describe(),
                ok = result.is_ok(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "image load finished"
            );
            let _ = tx.send(LoaderMessage {
                generation,
                kind,
                result,
            });
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
        if let Err(e) = spawned {
            log::error!("Failed to start {:?} loader thread: {}", kind, e);
        }
    }

    pub fn try_recv(&self) -> Option<LoaderMessage> {
        self.rx.try_recv().ok()
    }
}

pub struct ImageResource {
    pub texture: TextureHandle,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Preview,
    Ready,
    Failed(String),
}

/// The drawable image for the current generation.
#[derive(Default)]
pub struct ProgressiveImage {
    generation: Option<LoadGeneration>,
    preview: Option<ImageResource>,
    full: Option<ImageResource>,
    /// Once set, never unset for this generation
    full_active: bool,
    error: Option<String>,
}

impl ProgressiveImage {
    /// Forget everything about the previous image and wait for `generation`.
    pub fn begin(&mut self, generation: LoadGeneration) {
        *self = Self {
            generation: Some(generation),
            ..Self::default()
        };
    }

    /// Apply a finished load. Returns true when the visible frame changed.
    pub fn apply(&mut self, ctx: &egui::Context, message: LoaderMessage) -> bool {
        if self.generation != Some(message.generation) {
            log::debug!(
                "Dropping {:?} result for stale generation {}",
                message.kind,
                message.generation.0
            );
            return false;
        }

        match (message.kind, message.result) {
            (LoadKind::Full, Ok(pixels)) => {
                self.full = Some(upload(ctx, message.generation, LoadKind::Full, pixels));
                self.full_active = true;
                self.preview = None;
                self.error = None;
                true
            }
            (LoadKind::Preview, Ok(pixels)) => {
                if self.full_active || self.error.is_some() {
                    return false;
                }
                self.preview = Some(upload(ctx, message.generation, LoadKind::Preview, pixels));
                true
            }
            (kind, Err(e)) => {
                log::error!("{:?} image load failed: {}", kind, e);
                if kind == LoadKind::Preview && self.full_active {
                    return false;
                }
                self.error = Some(e.to_string());
                true
            }
        }
    }

    pub fn active(&self) -> Option<&ImageResource> {
        if self.error.is_some() {
            return None;
        }
        if self.full_active {
            self.full.as_ref()
        } else {
            self.preview.as_ref()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_full_active(&self) -> bool {
        self.full_active
    }

    pub fn status(&self) -> LoadStatus {
        if let Some(e) = &self.error {
            LoadStatus::Failed(e.clone())
        } else if self.full_active {
            LoadStatus::Ready
        } else if self.preview.is_some() {
            LoadStatus::Preview
        } else if self.generation.is_some() {
            LoadStatus::Loading
        } else {
            LoadStatus::Idle
        }
    }
}

fn upload(ctx: &egui::Context, generation: LoadGeneration, kind: LoadKind, pixels: ColorImage) -> ImageResource {
    let size = Vec2::new(pixels.size[0] as f32, pixels.size[1] as f32);
    let texture = ctx.load_texture(
        format!("annotated-{:?}-{}", kind, generation.0),
        pixels,
        egui::TextureOptions::LINEAR,
    );
    ImageResource { texture, size }
}
