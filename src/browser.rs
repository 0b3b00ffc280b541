//! Browser Adapters
//!
//! `web-sys` implementations of the storage, resource, camera and file seams
//! used by the core modules. JS errors are mapped to strings at this boundary.

use chrono::{NaiveDate, NaiveDateTime};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, File, HtmlAnchorElement, HtmlCanvasElement,
    HtmlInputElement, HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack, Storage, Url,
};

use crate::attachment::SelectedFile;
use crate::capture::{FrameEncoder, MediaTracks};
use crate::config::{AppConfig, CONFIG_KEY};
use crate::draft::DraftBackend;
use crate::error::{AttachmentError, CaptureError, StorageError};
use crate::library::{DeferredRelease, ResourceReleaser, DOWNLOAD_RELEASE_DELAY_MS};

fn js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| js_sys::Reflect::get(err, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()))
        .unwrap_or_else(|| format!("{:?}", err))
}

// ========================
// Storage
// ========================

/// `window.localStorage`; every call degrades to a no-op when it is missing
#[derive(Clone)]
pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[STORAGE] localStorage unavailable, drafts will not survive reload");
        }
        Self { storage }
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        // Quota errors land here for large embedded photos
        storage.set_item(key, value).map_err(|e| StorageError::Write(js_error(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage.remove_item(key).map_err(|e| StorageError::Write(js_error(&e)))
    }
}

/// Config from a `window.qualityConsoleConfig` object, else from local storage
pub fn load_config(backend: &LocalStorageBackend) -> AppConfig {
    let global = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(CONFIG_KEY)).ok())
        .filter(|v| v.is_object());
    if let Some(value) = global {
        match serde_wasm_bindgen::from_value::<AppConfig>(value) {
            Ok(config) if config.level_filter().is_ok() => return config,
            Ok(config) => log::warn!("[CONFIG] Ignoring window config, bad log level {}", config.log_level),
            Err(e) => log::warn!("[CONFIG] Ignoring window config: {}", e),
        }
    }
    AppConfig::load(backend)
}

// ========================
// Object URLs
// ========================

pub struct ObjectUrlReleaser;

impl ResourceReleaser for ObjectUrlReleaser {
    fn revoke(&self, href: &str) {
        match Url::revoke_object_url(href) {
            Ok(()) => log::debug!("[LIBRARY] Revoked {}", href),
            Err(e) => log::warn!("[LIBRARY] Could not revoke {}: {}", href, js_error(&e)),
        }
    }
}

pub fn create_object_url(blob: &Blob) -> Option<String> {
    match Url::create_object_url_with_blob(blob) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("[LIBRARY] Could not create object URL: {}", js_error(&e));
            None
        }
    }
}

// ========================
// Camera
// ========================

/// Owned camera stream
pub struct BrowserStream(pub MediaStream);

impl MediaTracks for BrowserStream {
    fn stop_all(&mut self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

fn capture_error(err: &JsValue) -> CaptureError {
    let name = js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "NotFoundError" | "OverconstrainedError" => CaptureError::Unavailable,
        _ => CaptureError::PermissionDenied(if name.is_empty() { js_error(err) } else { name }),
    }
}

/// Ask for a video-only stream
pub async fn request_camera() -> Result<BrowserStream, CaptureError> {
    let window = web_sys::window().ok_or(CaptureError::Unavailable)?;
    let devices = window.navigator().media_devices().map_err(|_| CaptureError::Unavailable)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| capture_error(&e))?;
    let stream = JsFuture::from(promise).await.map_err(|e| capture_error(&e))?;
    stream
        .dyn_into::<MediaStream>()
        .map(BrowserStream)
        .map_err(|_| CaptureError::Unavailable)
}

/// Draws the current video frame to an offscreen canvas
pub struct VideoFrameEncoder {
    pub video: HtmlVideoElement,
}

impl FrameEncoder for VideoFrameEncoder {
    fn encode_jpeg(&self) -> Result<String, CaptureError> {
        let encode = |e: JsValue| CaptureError::Encode(js_error(&e));
        let (width, height) = (self.video.video_width(), self.video.video_height());
        if width == 0 || height == 0 {
            return Err(CaptureError::Encode("no frame yet".to_string()));
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CaptureError::Encode("no document".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(encode)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| CaptureError::Encode("not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        let context = canvas
            .get_context("2d")
            .map_err(encode)?
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CaptureError::Encode("no 2d context".to_string()))?;
        context
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, width as f64, height as f64)
            .map_err(encode)?;
        canvas.to_data_url_with_type("image/jpeg").map_err(encode)
    }
}

/// Show a live stream in a `<video>` element, or clear it
pub fn attach_stream(video: &HtmlVideoElement, stream: Option<&MediaStream>) {
    video.set_src_object(stream);
}

// ========================
// Files
// ========================

impl SelectedFile for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn size(&self) -> u64 {
        Blob::size(self) as u64
    }

    fn media_type(&self) -> String {
        self.type_()
    }
}

/// Files chosen in an `<input type="file">` change event
pub fn files_from_input(ev: &web_sys::Event) -> Vec<File> {
    let Some(files) = leptos::prelude::event_target::<HtmlInputElement>(ev).files() else {
        return Vec::new();
    };
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

pub fn clear_input(ev: &web_sys::Event) {
    leptos::prelude::event_target::<HtmlInputElement>(ev).set_value("");
}

pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, AttachmentError> {
    let read_error = |e: JsValue| AttachmentError::Read { name: file.name(), reason: js_error(&e) };
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(read_error)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

// ========================
// Window
// ========================

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Blocking native confirm; false when there is no window
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn open_in_tab(href: &str) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.open_with_url_and_target(href, "_blank") {
        log::warn!("[LIBRARY] Could not open {}: {}", href, js_error(&e));
    }
}

/// Click a temporary `<a download>` for `href`
pub fn trigger_download(href: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| js_error(&e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

/// Download generated text as a file
pub fn download_text(file_name: &str, contents: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(|e| js_error(&e))?;
    let href = Url::create_object_url_with_blob(&blob).map_err(|e| js_error(&e))?;
    let result = trigger_download(&href, file_name);
    // Revoking right after the click can cancel the download
    let pending = DeferredRelease::new(href, ObjectUrlReleaser);
    Timeout::new(DOWNLOAD_RELEASE_DELAY_MS, move || pending.run()).forget();
    result
}
