//! Camera Modal Component
//!
//! Live preview with a capture button. The device is requested when the modal
//! mounts and released when it unmounts, whichever way it closes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::{attach_stream, request_camera, BrowserStream, VideoFrameEncoder};
use crate::capture::{CaptureSession, CaptureState, MediaTracks};
use crate::context::use_app_context;
use crate::error::CaptureError;
use crate::notifications::ToastKind;

#[component]
pub fn CameraModal(
    /// Receives the captured frame as a data URI
    #[prop(into)] on_capture: Callback<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let session = StoredValue::new_local(CaptureSession::<BrowserStream>::new());
    let status = RwSignal::new(CaptureState::Closed);

    let ticket = session.try_update_value(|s| s.open()).and_then(|r| r.ok());
    if let Some(ticket) = ticket {
        status.set(CaptureState::Requesting);
        spawn_local(async move {
            match request_camera().await {
                Ok(stream) => {
                    let media = stream.0.clone();
                    let mut pending = Some(stream);
                    let accepted = session
                        .try_update_value(|s| pending.take().map_or(false, |stream| s.granted(ticket, stream)));
                    // Still here means the modal is gone and the session with it
                    if let Some(mut orphan) = pending {
                        orphan.stop_all();
                    }
                    if accepted == Some(true) {
                        if let Some(video) = video_ref.get_untracked() {
                            attach_stream(&video, Some(&media));
                        }
                        status.try_set(CaptureState::Streaming);
                    }
                }
                Err(e) => {
                    let shown = session.try_update_value(|s| s.denied(ticket, e)).flatten();
                    if let Some(e) = shown {
                        let message = match &e {
                            CaptureError::Unavailable => "No se encontró una cámara disponible.".to_string(),
                            other => format!("No se pudo acceder a la cámara: {}", other),
                        };
                        ctx.notify(ToastKind::Error, "Cámara", &message);
                        status.try_set(CaptureState::Failed(e));
                    }
                }
            }
        });
    }

    on_cleanup(move || {
        session.try_update_value(|s| s.close());
    });

    let close = move || {
        session.try_update_value(|s| s.close());
        if let Some(video) = video_ref.get_untracked() {
            attach_stream(&video, None);
        }
        on_close.run(());
    };

    let capture = move |_: web_sys::MouseEvent| {
        let Some(video) = video_ref.get_untracked() else { return };
        let encoder = VideoFrameEncoder { video: video.clone() };
        match session.try_update_value(|s| s.capture(&encoder)) {
            Some(Ok(uri)) => {
                attach_stream(&video, None);
                on_capture.run(uri);
                on_close.run(());
            }
            Some(Err(e)) => {
                log::warn!("[CAMERA] {}", e);
                ctx.notify(ToastKind::Error, "Cámara", "No se pudo capturar la imagen.");
                close();
            }
            None => {}
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| close()>
            <div class="modal camera-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Capturar Foto"</h2>
                    <button class="icon-btn" on:click=move |_| close()>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <div class="camera-preview">
                    <video node_ref=video_ref autoplay playsinline muted></video>
                    {move || match status.get() {
                        CaptureState::Requesting => Some(view! { <p class="camera-status">"Solicitando acceso a la cámara..."</p> }.into_any()),
                        CaptureState::Failed(_) => Some(view! { <p class="camera-status error">"Cámara no disponible"</p> }.into_any()),
                        _ => None,
                    }}
                </div>
                <div class="modal-footer">
                    <button class="btn btn-secondary" on:click=move |_| close()>"Cancelar"</button>
                    <button
                        class="btn btn-primary"
                        disabled=move || status.get() != CaptureState::Streaming
                        on:click=capture
                    >
                        <i class="fas fa-camera"></i>
                        " Capturar"
                    </button>
                </div>
            </div>
        </div>
    }
}
