//! Media Capture
//!
//! Camera session state machine: `Closed -> Requesting -> Streaming -> Closed`,
//! with `Requesting -> Failed -> Closed` on denial. The stream is released on
//! every path back to `Closed`, including drop.

use crate::error::CaptureError;

/// A live stream whose device tracks can be stopped
pub trait MediaTracks {
    fn stop_all(&mut self);
}

/// Encodes the frame currently shown by the stream's surface
pub trait FrameEncoder {
    /// Returns an embeddable image (a `data:image/jpeg` URI)
    fn encode_jpeg(&self) -> Result<String, CaptureError>;
}

/// Identifies one open request; stale grants carry an old ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Observable state, for views
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Closed,
    Requesting,
    Streaming,
    Failed(CaptureError),
}

enum Phase<S> {
    Closed,
    Requesting(Ticket),
    Streaming(Ticket, S),
    Failed(CaptureError),
}

pub struct CaptureSession<S: MediaTracks> {
    phase: Phase<S>,
    issued: u64,
}

impl<S: MediaTracks> Default for CaptureSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MediaTracks> CaptureSession<S> {
    pub fn new() -> Self {
        Self { phase: Phase::Closed, issued: 0 }
    }

    pub fn state(&self) -> CaptureState {
        match &self.phase {
            Phase::Closed => CaptureState::Closed,
            Phase::Requesting(_) => CaptureState::Requesting,
            Phase::Streaming(..) => CaptureState::Streaming,
            Phase::Failed(e) => CaptureState::Failed(e.clone()),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Requesting(_) | Phase::Streaming(..))
    }

    /// Start a device request. Only one session may be open at a time.
    pub fn open(&mut self) -> Result<Ticket, CaptureError> {
        if self.is_open() {
            return Err(CaptureError::AlreadyOpen);
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.phase = Phase::Requesting(ticket);
        log::debug!("[CAMERA] Requesting device (ticket {})", ticket.0);
        Ok(ticket)
    }

    /// Device granted. Returns false, after stopping the stream, when the
    /// request was closed or superseded before the grant arrived.
    pub fn granted(&mut self, ticket: Ticket, mut stream: S) -> bool {
        match self.phase {
            Phase::Requesting(current) if current == ticket => {
                self.phase = Phase::Streaming(ticket, stream);
                log::info!("[CAMERA] Streaming");
                true
            }
            _ => {
                log::debug!("[CAMERA] Late grant for ticket {}, releasing", ticket.0);
                stream.stop_all();
                false
            }
        }
    }

    /// Device denied or missing. Returns the error to show when it belongs to
    /// the current request.
    pub fn denied(&mut self, ticket: Ticket, error: CaptureError) -> Option<CaptureError> {
        match self.phase {
            Phase::Requesting(current) if current == ticket => {
                log::warn!("[CAMERA] {}", error);
                self.phase = Phase::Failed(error.clone());
                Some(error)
            }
            _ => None,
        }
    }

    /// Encode the current frame, release the device and close.
    pub fn capture<E: FrameEncoder>(&mut self, encoder: &E) -> Result<String, CaptureError> {
        if !matches!(self.phase, Phase::Streaming(..)) {
            return Err(CaptureError::NotStreaming);
        }
        let image = encoder.encode_jpeg();
        self.close();
        image
    }

    /// Release whatever is held and return to `Closed`
    pub fn close(&mut self) {
        if let Phase::Streaming(_, mut stream) = std::mem::replace(&mut self.phase, Phase::Closed) {
            stream.stop_all();
            log::debug!("[CAMERA] Tracks stopped");
        }
    }
}

impl<S: MediaTracks> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeStream {
        stops: Rc<Cell<u32>>,
    }

    impl MediaTracks for FakeStream {
        fn stop_all(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    struct FakeEncoder(Result<String, CaptureError>);

    impl FrameEncoder for FakeEncoder {
        fn encode_jpeg(&self) -> Result<String, CaptureError> {
            self.0.clone()
        }
    }

    fn stream() -> (FakeStream, Rc<Cell<u32>>) {
        let stops = Rc::new(Cell::new(0));
        (FakeStream { stops: stops.clone() }, stops)
    }

    #[test]
    fn test_capture_releases_and_closes() {
        let mut session = CaptureSession::new();
        let ticket = session.open().unwrap();
        assert_eq!(session.state(), CaptureState::Requesting);

        let (s, stops) = stream();
        assert!(session.granted(ticket, s));
        assert_eq!(session.state(), CaptureState::Streaming);

        let image = session.capture(&FakeEncoder(Ok("data:image/jpeg;base64,AA==".to_string())));
        assert_eq!(image.unwrap(), "data:image/jpeg;base64,AA==");
        assert_eq!(session.state(), CaptureState::Closed);
        assert_eq!(stops.get(), 1);

        drop(session);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_failed_encode_still_releases() {
        let mut session = CaptureSession::new();
        let ticket = session.open().unwrap();
        let (s, stops) = stream();
        session.granted(ticket, s);

        let result = session.capture(&FakeEncoder(Err(CaptureError::Encode("no context".to_string()))));
        assert!(result.is_err());
        assert_eq!(stops.get(), 1);
        assert!(!session.is_open());
    }

    #[test]
    fn test_close_button_releases() {
        let mut session = CaptureSession::new();
        let ticket = session.open().unwrap();
        let (s, stops) = stream();
        session.granted(ticket, s);
        session.close();
        session.close();
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let (s, stops) = stream();
        {
            let mut session = CaptureSession::new();
            let ticket = session.open().unwrap();
            session.granted(ticket, s);
        }
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_late_grant_after_close() {
        let mut session = CaptureSession::new();
        let ticket = session.open().unwrap();
        session.close();

        let (s, stops) = stream();
        assert!(!session.granted(ticket, s));
        assert_eq!(stops.get(), 1);
        assert_eq!(session.state(), CaptureState::Closed);
    }

    #[test]
    fn test_stale_ticket_after_reopen() {
        let mut session = CaptureSession::new();
        let first = session.open().unwrap();
        session.close();
        let second = session.open().unwrap();

        let (old, old_stops) = stream();
        assert!(!session.granted(first, old));
        assert_eq!(old_stops.get(), 1);
        assert_eq!(session.state(), CaptureState::Requesting);

        let (new, new_stops) = stream();
        assert!(session.granted(second, new));
        assert_eq!(new_stops.get(), 0);
    }

    #[test]
    fn test_denied_then_closed() {
        let mut session: CaptureSession<FakeStream> = CaptureSession::new();
        let ticket = session.open().unwrap();
        let err = session.denied(ticket, CaptureError::PermissionDenied("NotAllowedError".to_string()));
        assert!(matches!(err, Some(CaptureError::PermissionDenied(_))));
        assert!(matches!(session.state(), CaptureState::Failed(_)));
        assert!(session.capture(&FakeEncoder(Ok(String::new()))).is_err());

        session.close();
        assert_eq!(session.state(), CaptureState::Closed);
        // Denial is terminal; the user reopens
        assert!(session.open().is_ok());
    }

    #[test]
    fn test_single_session() {
        let mut session: CaptureSession<FakeStream> = CaptureSession::new();
        session.open().unwrap();
        assert_eq!(session.open(), Err(CaptureError::AlreadyOpen));
    }
}
