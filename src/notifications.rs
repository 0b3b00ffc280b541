//! Toast queue. Auto-dismiss timers live in the store; this is just the list.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Error => "toast toast-error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "fas fa-info-circle",
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
            ToastKind::Error => "fas fa-times-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest last
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn push(&mut self, id: u64, kind: ToastKind, title: &str, message: &str) -> u64 {
        self.toasts.push(Toast { id, kind, title: title.to_string(), message: message.to_string() });
        id
    }

    /// Returns false if the toast was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = Notifications::new();
        queue.push(1, ToastKind::Info, "Borrador", "Borrador guardado");
        queue.push(2, ToastKind::Error, "Cámara", "Permiso denegado");
        assert_eq!(queue.toasts().len(), 2);
        assert_eq!(queue.toasts()[1].kind, ToastKind::Error);

        assert!(queue.dismiss(1));
        // Timer firing after a manual dismiss
        assert!(!queue.dismiss(1));
        assert_eq!(queue.toasts().iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }
}
