use std::path::PathBuf;

/// Events emitted while a batch of conversions runs.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A job begins; `total_files` inputs will follow as converted or failed events.
    JobStart { name: &'static str, total_files: u64 },
    FileConverted { input: PathBuf, output: PathBuf },
    FileFailed { input: PathBuf, reason: String },
    JobFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that discards every event.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
