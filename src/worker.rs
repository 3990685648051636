use crate::auth::{AuthGate, Authenticator};
use crate::error::EngineResult;
use crate::messages::{EngineEvent, EngineRequest, EngineResponse};
use crate::store::{MatchBackend, MatchStore};
use campa_api::client::StoreClient;
use log::{debug, error};
use tokio::sync::mpsc;

/// Owns the match store and the auth gate, and applies every request to
/// completion before starting the next. One in-flight write at a time falls
/// out of the serial loop; a racing refresh resolves to whichever request
/// was queued last, which converges on the remote-authoritative state.
pub struct EngineWorker<B = StoreClient, A = StoreClient> {
    store: MatchStore<B>,
    gate: AuthGate<A>,
    requests: mpsc::Receiver<EngineRequest>,
    events: mpsc::Sender<EngineEvent>,
}

impl EngineWorker {
    /// Production wiring: both halves talk to the same Supabase project.
    pub fn connect(
        client: StoreClient,
        requests: mpsc::Receiver<EngineRequest>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self::new(
            MatchStore::new(client.clone()),
            AuthGate::new(client),
            requests,
            events,
        )
    }
}

impl<B: MatchBackend, A: Authenticator> EngineWorker<B, A> {
    pub fn new(
        store: MatchStore<B>,
        gate: AuthGate<A>,
        requests: mpsc::Receiver<EngineRequest>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            store,
            gate,
            requests,
            events,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let epoch = self.gate.epoch();
            let response = self
                .handle(request)
                .await
                .unwrap_or_else(|err| EngineResponse::Error {
                    message: err.to_string(),
                });

            debug!("engine request complete");
            if let Err(e) = self.events.send(EngineEvent { epoch, response }).await {
                error!("Failed to send engine event: {e}");
                break;
            }
        }
    }

    async fn handle(&mut self, request: EngineRequest) -> EngineResult<EngineResponse> {
        match request {
            EngineRequest::Refresh => Ok(EngineResponse::Matches {
                matches: self.store.refresh().await,
            }),
            EngineRequest::SubmitMatch { candidate } => {
                let stored = self.store.insert(candidate).await?;
                Ok(EngineResponse::MatchRecorded { stored })
            }
            EngineRequest::ResetAll => {
                self.store.reset_all().await?;
                Ok(EngineResponse::ResetDone)
            }
            EngineRequest::Login { id, password, role } => {
                let identity = self.gate.login(id, &password, role).await?;
                Ok(EngineResponse::LoggedIn {
                    identity,
                    epoch: self.gate.epoch(),
                })
            }
            EngineRequest::Logout => {
                self.gate.logout();
                Ok(EngineResponse::LoggedOut {
                    epoch: self.gate.epoch(),
                })
            }
        }
    }
}
