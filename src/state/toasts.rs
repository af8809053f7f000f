//! Transient toast notifications. Every session operation reports its
//! outcome here; the `Toaster` component renders and expires them.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

/// Queue of live toasts, newest last. Ids are monotonic per page load so
/// a timer can dismiss exactly the toast it was armed for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastsState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

/// A single transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastsState {
    pub fn push(&mut self, kind: ToastKind, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.to_owned(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
