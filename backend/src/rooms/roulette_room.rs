use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::{sink::SinkExt, stream::StreamExt};
use rand::thread_rng;
use serde::Deserialize;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use shared::roulette::{ClientMessage, RouletteState};
use shared::wheel::{spin_outcome, SPIN_DURATION_MS};

const MAX_CLIENTS_PER_ROOM: usize = 8;
const MAX_ROOMS: usize = 1024;
const MAX_MESSAGE_BYTES: usize = 1024;
const MAX_MESSAGES_PER_SECOND: u32 = 20;
const BROADCAST_CAPACITY: usize = 64;

/// One session's authority: the canonical document, a broadcast
/// channel pushing the serialized document to every subscriber, and
/// the subscriber count.
///
/// All mutations go through [`RouletteRoom::apply`], which serializes
/// them behind one async mutex and broadcasts while still holding it,
/// so subscribers observe changes in receipt order.
pub struct RouletteRoom {
    state: Mutex<RouletteState>,
    tx: broadcast::Sender<String>,
    clients: Mutex<usize>,
}

impl RouletteRoom {
    pub fn new() -> Arc<Self> {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Arc::new(Self {
            state: Mutex::new(RouletteState::new()),
            tx,
            clients: Mutex::new(0),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub async fn snapshot(&self) -> RouletteState {
        self.state.lock().await.clone()
    }

    fn push_state(&self, state: &RouletteState) {
        match serde_json::to_string(state) {
            // send only fails when no subscriber is connected, which is fine
            Ok(doc) => {
                let _ = self.tx.send(doc);
            }
            Err(e) => error!("failed to serialize room document: {}", e),
        }
    }

    /// Applies one client request. Invalid or out-of-precondition
    /// requests leave the document untouched and send nothing back.
    pub async fn apply(self: &Arc<Self>, request: ClientMessage) {
        let mut state = self.state.lock().await;
        match request {
            ClientMessage::AddItem { item } => {
                if state.add_item(&item) {
                    self.push_state(&state);
                }
            }
            ClientMessage::RemoveItem { item } => {
                if state.remove_item(&item) {
                    self.push_state(&state);
                }
            }
            ClientMessage::Spin => {
                if !state.can_spin() {
                    return;
                }
                if let Some((index, target)) = spin_outcome(state.items.len(), &mut thread_rng()) {
                    state.begin_spin(index, target);
                    info!("spin accepted: \"{}\" landing at {:.1}°", state.result, target);
                    self.push_state(&state);
                    self.schedule_spin_end();
                }
            }
        }
    }

    /// Fixed-duration lockout window: once a spin is accepted the
    /// timer is never cancelled and never reset by later add/remove
    /// requests. If the winner is removed mid-spin the result blanks
    /// immediately but the flag still clears on schedule.
    fn schedule_spin_end(self: &Arc<Self>) {
        let room = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(SPIN_DURATION_MS as u64)).await;
            let mut state = room.state.lock().await;
            state.finish_spin();
            info!("spin window closed, result \"{}\"", state.result);
            room.push_state(&state);
        });
    }
}

/// Rooms keyed by Activity instance id. Rooms are created on first
/// join and dropped once the last client leaves; they share no state.
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<HashMap<String, Arc<RouletteRoom>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn join(&self, instance: &str) -> Option<Arc<RouletteRoom>> {
        let mut rooms = self.rooms.lock().await;
        if !rooms.contains_key(instance) && rooms.len() >= MAX_ROOMS {
            return None;
        }
        let room = rooms
            .entry(instance.to_string())
            .or_insert_with(RouletteRoom::new)
            .clone();
        let mut clients = room.clients.lock().await;
        if *clients >= MAX_CLIENTS_PER_ROOM {
            return None;
        }
        *clients += 1;
        drop(clients);
        Some(room)
    }

    async fn leave(&self, instance: &str, room: &Arc<RouletteRoom>) {
        let mut rooms = self.rooms.lock().await;
        let mut clients = room.clients.lock().await;
        *clients = clients.saturating_sub(1);
        if *clients == 0 {
            drop(clients);
            rooms.remove(instance);
            info!("room {} emptied and dropped", instance);
        }
    }
}

#[derive(Deserialize)]
pub struct JoinParams {
    #[serde(default)]
    instance: String,
}

pub fn create_router() -> Router<RoomRegistry> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<JoinParams>,
    State(registry): State<RoomRegistry>,
) -> impl IntoResponse {
    let instance = if params.instance.is_empty() {
        "local".to_string()
    } else {
        params.instance
    };

    match registry.join(&instance).await {
        Some(room) => ws
            .on_upgrade(move |socket| handle_socket(socket, room, registry, instance))
            .into_response(),
        None => {
            warn!("join refused for room {}: at capacity", instance);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    room: Arc<RouletteRoom>,
    registry: RoomRegistry,
    instance: String,
) {
    let connection_id = uuid::Uuid::new_v4();
    info!("client {} joined room {}", connection_id, instance);

    let (mut sender, mut receiver) = socket.split();
    let mut updates = room.subscribe();

    // Late joiners get the current document right away instead of
    // waiting for the next mutation.
    match serde_json::to_string(&room.snapshot().await) {
        Ok(doc) => {
            if sender.send(Message::Text(doc)).await.is_err() {
                registry.leave(&instance, &room).await;
                return;
            }
        }
        Err(e) => error!("failed to serialize initial snapshot: {}", e),
    }

    // Forward document pushes to this client.
    let forward = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(doc) => {
                    if sender.send(Message::Text(doc)).await.is_err() {
                        break;
                    }
                }
                // Every push carries the full document, so a lagged
                // subscriber just picks up from the latest one.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("slow subscriber skipped {} updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        let _ = sender.close().await;
    });

    let mut message_count: u32 = 0;
    let mut window_start = tokio::time::Instant::now();

    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else { continue };

        if text.len() > MAX_MESSAGE_BYTES {
            warn!("oversized message from client {} dropped", connection_id);
            continue;
        }

        let now = tokio::time::Instant::now();
        if now.duration_since(window_start) >= Duration::from_secs(1) {
            message_count = 0;
            window_start = now;
        }
        message_count += 1;
        if message_count > MAX_MESSAGES_PER_SECOND {
            warn!("rate limit exceeded for client {}", connection_id);
            continue;
        }

        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(request) => room.apply(request).await,
            Err(_) => warn!("unparseable request from client {}", connection_id),
        }
    }

    forward.abort();
    registry.leave(&instance, &room).await;
    info!("client {} left room {}", connection_id, instance);
}
