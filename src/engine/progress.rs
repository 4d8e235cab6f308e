use crate::model::Project;

/// Receives the progress of a batch operation.
///
/// Every method is called synchronously on the thread running the batch.
/// `progress` is the cumulative percentage reached when the event fires.
pub trait ProgressListener {
    /// The batch is about to visit its first item
    fn on_start(&mut self) {}

    fn on_success(&mut self, progress: u32, project: Option<&Project>);

    /// An item failed or was skipped; `project` is `None` when the whole
    /// batch was refused
    fn on_error(&mut self, progress: u32, project: Option<&Project>, message: &str);

    fn on_finish(&mut self, message: Option<&str>);
}

/// Listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentListener;

impl ProgressListener for SilentListener {
    fn on_success(&mut self, _progress: u32, _project: Option<&Project>) {}

    fn on_error(&mut self, _progress: u32, _project: Option<&Project>, _message: &str) {}

    fn on_finish(&mut self, _message: Option<&str>) {}
}
