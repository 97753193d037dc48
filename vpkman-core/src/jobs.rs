/// Progress message sent from a worker thread to the UI over an mpsc channel.
/// A percent of 100 marks the job as finished.
#[derive(Debug, Clone)]
pub struct JobProgress {
    pub message: String,
    pub percent: u8,
}
