mod state;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::mpsc::TryRecvError;

use eframe::{egui, App};

use crate::api::ApiClient;
pub use state::{AnalysisPhase, FlowEvent, SessionState};

pub struct OpinionDesk {
    client: ApiClient,
    state: SessionState,
}

impl OpinionDesk {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let client = ApiClient::from_env();
        println!(
            "Initializing Document Opinion Desk (backend: {})",
            client.base_url()
        );
        Self {
            client,
            state: SessionState::default(),
        }
    }

    /// Entry point for both the drop zone and the file picker.
    /// Ignored while a flow is already running.
    pub fn submit_document(&mut self, path: PathBuf) {
        if self.state.is_busy() {
            println!(
                "Ignoring '{}': a submission is already in flight",
                path.display()
            );
            return;
        }

        println!("Submitting document: {}", path.display());
        self.state.begin_submission();

        let (sender, receiver) = std_mpsc::channel();
        self.state.flow_receiver = Some(receiver);

        let client = self.client.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(run_flow(&client, &path, &sender));
        });
    }

    /// Fetch the list of documents already stored on the backend.
    pub fn refresh_server_files(&mut self) {
        let (sender, receiver) = std_mpsc::channel();
        self.state.remote_receiver = Some(receiver);

        let client = self.client.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let _ = sender.send(client.list_documents().await);
            });
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let mut had_updates = self.state.drain_events();

        if let Some(receiver) = self.state.remote_receiver.take() {
            match receiver.try_recv() {
                Ok(Ok(documents)) => {
                    had_updates = true;
                    self.state.remote_documents = Some(documents);
                    self.state.remote_error = None;
                }
                Ok(Err(e)) => {
                    had_updates = true;
                    eprintln!("Failed to list server files: {}", e);
                    self.state.remote_error = Some("Could not load server files.".to_string());
                }
                Err(TryRecvError::Empty) => {
                    self.state.remote_receiver = Some(receiver);
                }
                Err(TryRecvError::Disconnected) => {}
            }
        }

        if had_updates || self.state.is_busy() {
            ctx.request_repaint();
        }
    }
}

/// Upload the file, then request analysis of it. Analysis runs only
/// after a successful upload; each stage emits exactly one event.
async fn run_flow(client: &ApiClient, path: &Path, sender: &std_mpsc::Sender<FlowEvent>) {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());

    let uploaded = match std::fs::read(path) {
        Ok(bytes) => client.upload_document(&filename, bytes).await,
        Err(e) => Err(e.into()),
    };

    let file_id = match &uploaded {
        Ok(document) => Some(document.file_id.clone()),
        Err(_) => None,
    };
    let _ = sender.send(FlowEvent::UploadFinished(uploaded));

    if let Some(file_id) = file_id {
        let report = client.request_analysis(&file_id).await;
        let _ = sender.send(FlowEvent::AnalysisFinished(report));
    }
}

impl App for OpinionDesk {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
