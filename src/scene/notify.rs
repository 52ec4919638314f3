//! User-facing notices raised by store mutations. Fire-and-forget: the store
//! behaves identically whether or not anyone listens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Default sink: routes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Warning => log::warn!("{}", message),
            NoticeLevel::Info | NoticeLevel::Success => log::info!("{}", message),
        }
    }
}
