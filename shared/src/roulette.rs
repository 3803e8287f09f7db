use serde::{Serialize, Deserialize};

/// Upper bound on wheel entries so segments stay readable.
pub const MAX_ITEMS: usize = 32;
/// Upper bound on a single entry's length in characters.
pub const MAX_ITEM_LEN: usize = 64;

/// The replicated session document. The server owns the canonical copy
/// and pushes the full document to every subscriber after each change;
/// clients only ever read it.
///
/// `result` and `target_rotation` are set together the moment a spin is
/// accepted so every client can compute the same landing angle up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouletteState {
    pub items: Vec<String>,
    pub is_spinning: bool,
    pub result: String,
    /// Absolute angle in degrees, [0, 360), that must sit under the
    /// pointer when the spin completes.
    pub target_rotation: f64,
}

impl Default for RouletteState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_spinning: false,
            result: String::new(),
            target_rotation: 0.0,
        }
    }
}

impl RouletteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trimmed entry. Blank, duplicate (exact match) and
    /// over-limit entries are ignored. Returns whether the document
    /// changed.
    pub fn add_item(&mut self, raw: &str) -> bool {
        let item = raw.trim();
        if item.is_empty() || item.chars().count() > MAX_ITEM_LEN {
            return false;
        }
        if self.items.len() >= MAX_ITEMS || self.items.iter().any(|i| i == item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    /// Removes the first exact occurrence. If the removed entry is the
    /// current winner, the result is blanked immediately, whether or
    /// not a spin window is still open.
    pub fn remove_item(&mut self, item: &str) -> bool {
        let Some(idx) = self.items.iter().position(|i| i == item) else {
            return false;
        };
        self.items.remove(idx);
        if self.result == item {
            self.result.clear();
        }
        true
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning && !self.items.is_empty()
    }

    /// Locks in the winner and the landing angle and raises the
    /// spinning flag, all in one step. Returns false when a spin is
    /// already in flight, the wheel is empty, or the index is stale.
    pub fn begin_spin(&mut self, index: usize, target_rotation: f64) -> bool {
        if !self.can_spin() || index >= self.items.len() {
            return false;
        }
        self.result = self.items[index].clone();
        self.target_rotation = target_rotation;
        self.is_spinning = true;
        true
    }

    /// Clears the spinning flag only; the result and landing angle
    /// stay visible until the next spin overwrites them.
    pub fn finish_spin(&mut self) {
        self.is_spinning = false;
    }
}

/// Requests a client may send. Anything malformed or out of
/// precondition is dropped by the server without a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    AddItem { item: String },
    RemoveItem { item: String },
    Spin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_trims_and_rejects_blanks() {
        let mut state = RouletteState::new();
        assert!(state.add_item("  pizza  "));
        assert_eq!(state.items, vec!["pizza"]);
        assert!(!state.add_item("   "));
        assert!(!state.add_item(""));
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn add_item_rejects_duplicates_case_sensitively() {
        let mut state = RouletteState::new();
        assert!(state.add_item("tacos"));
        assert!(!state.add_item("tacos"));
        assert!(!state.add_item(" tacos "));
        assert!(state.add_item("Tacos"));
        assert_eq!(state.items, vec!["tacos", "Tacos"]);
    }

    #[test]
    fn add_item_enforces_caps() {
        let mut state = RouletteState::new();
        for i in 0..MAX_ITEMS {
            assert!(state.add_item(&format!("item-{i}")));
        }
        assert!(!state.add_item("one-too-many"));
        assert!(!state.add_item(&"x".repeat(MAX_ITEM_LEN + 1)));
        assert_eq!(state.items.len(), MAX_ITEMS);
    }

    #[test]
    fn remove_item_preserves_order_and_clears_result() {
        let mut state = RouletteState::new();
        state.add_item("a");
        state.add_item("b");
        state.add_item("c");
        state.result = "b".to_string();

        assert!(state.remove_item("b"));
        assert_eq!(state.items, vec!["a", "c"]);
        assert_eq!(state.result, "");

        assert!(!state.remove_item("b"));
    }

    #[test]
    fn remove_item_keeps_unrelated_result() {
        let mut state = RouletteState::new();
        state.add_item("a");
        state.add_item("b");
        state.result = "a".to_string();
        state.remove_item("b");
        assert_eq!(state.result, "a");
    }

    #[test]
    fn begin_spin_guards_and_sets_fields_atomically() {
        let mut state = RouletteState::new();
        assert!(!state.begin_spin(0, 120.0));

        state.add_item("a");
        state.add_item("b");
        assert!(state.begin_spin(1, 120.0));
        assert!(state.is_spinning);
        assert_eq!(state.result, "b");
        assert_eq!(state.target_rotation, 120.0);

        // one spin at a time
        assert!(!state.begin_spin(0, 45.0));
        assert_eq!(state.result, "b");

        state.finish_spin();
        assert!(!state.is_spinning);
        assert_eq!(state.result, "b");
    }

    #[test]
    fn begin_spin_rejects_stale_index() {
        let mut state = RouletteState::new();
        state.add_item("a");
        assert!(!state.begin_spin(5, 10.0));
        assert!(!state.is_spinning);
    }

    #[test]
    fn document_serializes_with_camel_case_fields() {
        let mut state = RouletteState::new();
        state.add_item("a");
        state.begin_spin(0, 355.5);
        let doc = serde_json::to_string(&state).unwrap();
        assert!(doc.contains("\"isSpinning\":true"));
        assert!(doc.contains("\"targetRotation\":355.5"));
        assert!(doc.contains("\"result\":\"a\""));

        let back: RouletteState = serde_json::from_str(&doc).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn client_messages_use_tagged_wire_names() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"add_item","item":"pizza"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::AddItem { ref item } if item == "pizza"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"spin"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Spin));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"reset"}"#).is_err());
    }
}
