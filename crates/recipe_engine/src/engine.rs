use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use recipe_core::Ingredient;
use recipe_logging::{recipe_debug, recipe_error, recipe_info};
use tokio_util::sync::CancellationToken;

use crate::client::{RecipeService, ReqwestRecipeService};
use crate::config::ClientSettings;
use crate::error::EngineError;
use crate::generate::generate_recipe;
use crate::normalize::{Normalizer, ResponseNormalizer};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    Generate {
        request_id: RequestId,
        ingredients: Vec<Ingredient>,
    },
    Cancel {
        request_id: RequestId,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs generation requests on a background tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let service = ReqwestRecipeService::new(settings)?;
        Self::with_service(Arc::new(service), Arc::new(ResponseNormalizer))
    }

    pub fn with_service(
        service: Arc<dyn RecipeService>,
        normalizer: Arc<dyn Normalizer>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Generate {
                        request_id,
                        ingredients,
                    } => {
                        let token = CancellationToken::new();
                        if let Ok(mut tokens) = in_flight.lock() {
                            tokens.insert(request_id, token.clone());
                        }
                        runtime.spawn(run_generation(
                            service.clone(),
                            normalizer.clone(),
                            request_id,
                            ingredients,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Cancel { request_id } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut tokens| tokens.remove(&request_id));
                        match token {
                            Some(token) => token.cancel(),
                            None => recipe_debug!("cancel for finished request {}", request_id),
                        }
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, request_id: RequestId, ingredients: Vec<Ingredient>) {
        let sent = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            ingredients,
        });
        if sent.is_err() {
            recipe_error!("engine thread stopped; request {} dropped", request_id);
        }
    }

    pub fn cancel(&self, request_id: RequestId) {
        if self.cmd_tx.send(EngineCommand::Cancel { request_id }).is_err() {
            recipe_error!("engine thread stopped; cancel for {} dropped", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_generation(
    service: Arc<dyn RecipeService>,
    normalizer: Arc<dyn Normalizer>,
    request_id: RequestId,
    ingredients: Vec<Ingredient>,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    recipe_info!(
        "request {} started with {} ingredient(s)",
        request_id,
        ingredients.len()
    );
    let event = tokio::select! {
        _ = token.cancelled() => {
            recipe_info!("request {} cancelled", request_id);
            EngineEvent::Cancelled { request_id }
        }
        result = generate_recipe(service.as_ref(), normalizer.as_ref(), &ingredients) => {
            EngineEvent::GenerationCompleted { request_id, result }
        }
    };
    if let Ok(mut tokens) = in_flight.lock() {
        tokens.remove(&request_id);
    }
    let _ = event_tx.send(event);
}
