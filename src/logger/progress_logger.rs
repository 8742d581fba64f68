use std::io::Write;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Terminal spinner with a live message, used to show which issue or
/// network phase is currently being worked on.
pub struct ProgressLogger {
    message_sender: Option<watch::Sender<String>>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl ProgressLogger {
    pub fn new() -> Self {
        Self {
            message_sender: None,
            stop_sender: None,
            task_handle: None,
        }
    }

    pub fn start(&mut self, message: &str) {
        let (message_tx, message_rx) = watch::channel(message.to_string());
        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(150));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let message = message_rx.borrow().clone();
                        eprint!("\r\x1b[K{} {} ", message, frames[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % frames.len();
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.message_sender = Some(message_tx);
        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    /// Replace the spinner message in place, e.g. "Analyzing issue #42 (3/10)".
    pub fn update(&self, message: String) {
        if let Some(sender) = &self.message_sender {
            let _ = sender.send(message);
        }
    }

    pub async fn stop(&mut self, final_message: &str) {
        self.finish(&format!("✅  {}", final_message)).await;
    }

    pub async fn error(&mut self, error_message: &str) {
        self.finish(&format!("❌ {}", error_message)).await;
    }

    async fn finish(&mut self, line: &str) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }
        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
        self.message_sender = None;
        eprint!("\r\x1b[K{}\n", line);
        let _ = std::io::stderr().flush();
    }
}

impl Default for ProgressLogger {
    fn default() -> Self {
        Self::new()
    }
}
