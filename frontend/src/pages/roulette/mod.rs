mod controls;
mod wheel_canvas;

use std::cell::RefCell;
use std::rc::Rc;

use futures::lock::Mutex;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use shared::roulette::{ClientMessage, RouletteState};
use shared::wheel::{end_rotation, rotation_at, SPIN_DURATION_MS};

use crate::config::{get_instance_id, get_ws_url};
use controls::{ItemPanel, ResultBanner, SpinButton};
use wheel_canvas::WheelCanvas;

/// Client-local animation phase. Deliberately an explicit state
/// machine rather than comparing booleans between pushes: a single
/// push can flip the spinning flag and change the target at once.
#[derive(Clone, Copy, PartialEq)]
enum SpinPhase {
    Idle,
    Animating,
}

pub enum Msg {
    Connect,
    Received(RouletteState),
    ConnectionError(String),
    InputChanged(String),
    AddItem,
    RemoveItem(String),
    Spin,
    Frame,
}

pub struct RoulettePage {
    /// Latest replicated document; defaults until the first push lands.
    doc: RouletteState,
    ws_write: Option<Rc<Mutex<SplitSink<WebSocket, Message>>>>,
    error_message: Option<String>,
    input: String,
    phase: SpinPhase,
    /// Current on-screen rotation in degrees; never reset between spins.
    rotation: f64,
    /// Items frozen at spin start so the wheel face does not reshuffle
    /// mid-animation; the sidebar keeps tracking the live document.
    wheel_items: Vec<String>,
    start_rotation: f64,
    end_rotation: f64,
    animation_started: f64,
    last_target: f64,
    was_spinning: bool,
    frame_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Component for RoulettePage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let frame_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
            Rc::new(RefCell::new(None));
        *frame_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            link.send_message(Msg::Frame);
        }) as Box<dyn FnMut()>));

        ctx.link().send_message(Msg::Connect);

        Self {
            doc: RouletteState::default(),
            ws_write: None,
            error_message: None,
            input: String::new(),
            phase: SpinPhase::Idle,
            rotation: 0.0,
            wheel_items: Vec::new(),
            start_rotation: 0.0,
            end_rotation: 0.0,
            animation_started: 0.0,
            last_target: 0.0,
            was_spinning: false,
            frame_closure,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Connect => {
                let instance = get_instance_id();
                let ws_url = get_ws_url(&instance);
                info!("connecting to room {} at {}", instance, ws_url);

                match WebSocket::open(&ws_url) {
                    Ok(ws) => {
                        let (write, mut read) = ws.split();
                        self.ws_write = Some(Rc::new(Mutex::new(write)));

                        let link = ctx.link().clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            while let Some(msg) = read.next().await {
                                match msg {
                                    Ok(Message::Text(text)) => {
                                        match serde_json::from_str::<RouletteState>(&text) {
                                            Ok(doc) => link.send_message(Msg::Received(doc)),
                                            Err(e) => warn!("ignoring malformed push: {:?}", e),
                                        }
                                    }
                                    Ok(_) => {}
                                    Err(e) => {
                                        error!("WebSocket error: {:?}", e);
                                        link.send_message(Msg::ConnectionError(
                                            "Lost connection to the session".to_string(),
                                        ));
                                        break;
                                    }
                                }
                            }
                        });

                        self.error_message = None;
                    }
                    Err(e) => {
                        error!("failed to open WebSocket: {:?}", e);
                        self.error_message = Some("Could not reach the session".to_string());
                    }
                }
                true
            }
            Msg::Received(doc) => {
                let spin_started = doc.is_spinning && !self.was_spinning;
                let target_changed =
                    doc.is_spinning && doc.target_rotation != self.last_target;
                self.was_spinning = doc.is_spinning;
                self.last_target = doc.target_rotation;
                self.doc = doc;
                self.error_message = None;

                if self.phase == SpinPhase::Idle {
                    self.wheel_items = self.doc.items.clone();
                    // A single push may carry spin start and target
                    // together, so either signal enters Animating.
                    if spin_started || target_changed {
                        self.begin_animation();
                    }
                }
                true
            }
            Msg::Frame => {
                if self.phase != SpinPhase::Animating {
                    return false;
                }
                let elapsed = js_sys::Date::now() - self.animation_started;
                let progress = elapsed / SPIN_DURATION_MS as f64;
                self.rotation = rotation_at(self.start_rotation, self.end_rotation, progress);
                if progress >= 1.0 {
                    self.phase = SpinPhase::Idle;
                    self.wheel_items = self.doc.items.clone();
                } else {
                    self.request_frame();
                }
                true
            }
            Msg::InputChanged(value) => {
                self.input = value;
                true
            }
            Msg::AddItem => {
                let item = self.input.trim().to_string();
                if item.is_empty() {
                    return false;
                }
                self.send(ClientMessage::AddItem { item });
                self.input.clear();
                true
            }
            Msg::RemoveItem(item) => {
                self.send(ClientMessage::RemoveItem { item });
                false
            }
            Msg::Spin => {
                // Guard locally too; the server ignores the request anyway.
                if self.phase == SpinPhase::Animating
                    || self.doc.is_spinning
                    || self.doc.items.is_empty()
                {
                    return false;
                }
                self.send(ClientMessage::Spin);
                false
            }
            Msg::ConnectionError(message) => {
                self.ws_write = None;
                self.error_message = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let spinning = self.phase == SpinPhase::Animating || self.doc.is_spinning;
        let show_result =
            !spinning && self.phase == SpinPhase::Idle && !self.doc.result.is_empty();

        let oninput = ctx.link().callback(Msg::InputChanged);
        let onadd = ctx.link().callback(|_| Msg::AddItem);
        let onremove = ctx.link().callback(Msg::RemoveItem);
        let onspin = ctx.link().callback(|_| Msg::Spin);

        html! {
            <div class="container mx-auto px-4 py-8">
                <h1 class="text-3xl font-bold mb-6 text-center">
                    <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"Roulette Picker"}</span>
                </h1>

                if let Some(error) = &self.error_message {
                    <div class="mb-6 text-center">
                        <p class="text-red-400 bg-red-900/20 p-3 rounded-lg">{error}</p>
                    </div>
                }

                <div class="flex flex-col lg:flex-row gap-8 items-start justify-center">
                    <div class="bg-gray-800 p-6 rounded-2xl shadow-xl">
                        <WheelCanvas
                            rotation={self.rotation}
                            items={self.wheel_items.clone()}
                            is_spinning={spinning}
                        />
                        <div class="mt-6 flex justify-center">
                            <SpinButton
                                is_spinning={spinning}
                                can_spin={!self.doc.items.is_empty()}
                                onclick={onspin}
                            />
                        </div>
                        <ResultBanner
                            result={self.doc.result.clone()}
                            visible={show_result}
                        />
                    </div>

                    <ItemPanel
                        items={self.doc.items.clone()}
                        input={self.input.clone()}
                        disabled={self.ws_write.is_none()}
                        {oninput}
                        {onadd}
                        {onremove}
                    />
                </div>
            </div>
        }
    }
}

impl RoulettePage {
    /// Enters Animating: snapshots the current on-screen angle and item
    /// list, computes the trajectory to the server's landing angle, and
    /// kicks off the frame loop.
    fn begin_animation(&mut self) {
        self.phase = SpinPhase::Animating;
        self.wheel_items = self.doc.items.clone();
        self.start_rotation = self.rotation;
        self.end_rotation = end_rotation(self.rotation, self.doc.target_rotation);
        self.animation_started = js_sys::Date::now();
        self.request_frame();
    }

    fn request_frame(&self) {
        if let Some(window) = web_sys::window() {
            if let Some(callback) = self.frame_closure.borrow().as_ref() {
                let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        }
    }

    fn send(&self, request: ClientMessage) {
        let Some(write) = self.ws_write.clone() else {
            warn!("not connected, dropping request");
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match serde_json::to_string(&request) {
                Ok(text) => {
                    if let Err(e) = write.lock().await.send(Message::Text(text)).await {
                        error!("failed to send request: {:?}", e);
                    }
                }
                Err(e) => error!("failed to serialize request: {:?}", e),
            }
        });
    }
}
