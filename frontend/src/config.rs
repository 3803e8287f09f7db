use web_sys::window;

/// WebSocket endpoint for a room, derived from wherever the page was
/// served so the app works both behind the Discord proxy and locally.
pub fn get_ws_url(instance: &str) -> String {
    if let Some(window) = window() {
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let host = location.host().unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        // Convert http/https to ws/wss
        let ws_protocol = if protocol.starts_with("https") {
            "wss"
        } else {
            "ws"
        };

        format!("{}://{}/roulette/ws?instance={}", ws_protocol, host, instance)
    } else {
        format!("ws://127.0.0.1:3000/roulette/ws?instance={}", instance)
    }
}

/// Activity instance id from the embed query string. Everyone launched
/// from the same voice channel shares one id, which is what keys the
/// room server-side. Falls back to a fixed id for local development.
pub fn get_instance_id() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("instance_id"))
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| "local".to_string())
}
