//! The interactive view: seed input, one submission at a time, and the
//! rendered result or error.
//!
//! State changes only through [`update`], which returns the effects the
//! driver must run. [`View`] wraps the state and notifies subscribers after
//! every change so they can re-render.

use crate::error::UnfoldError;
use crate::types::SeedPayload;
use serde_json::Value;

pub const TITLE: &str = "Butterfly Face";
pub const SEED_PLACEHOLDER: &str = "Drop your raw seed here...";
pub const SUBMIT_LABEL: &str = "Unfold Logic";
pub const LOADING_LABEL: &str = "Metamorphosing...";
pub const RESULT_HEADING: &str = "Synthetic Logic Formed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the seed text.
    SeedEdited(String),
    /// User pressed the submit control.
    SubmitClicked,
    /// The outstanding request resolved.
    ResponseArrived(Result<Value, UnfoldError>),
    /// User asked for the result on the clipboard.
    CopyClicked,
    /// The view is going away; late responses are dropped.
    Unmounted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendRequest(SeedPayload),
    CopyToClipboard(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    seed: String,
    result: Option<Value>,
    loading: bool,
    error: String,
    request: RequestState,
    mounted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            seed: String::new(),
            result: None,
            loading: false,
            error: String::new(),
            request: RequestState::Idle,
            mounted: true,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Empty when no error is displayed.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mirrors the enabled state of the submit control.
    pub fn can_submit(&self) -> bool {
        self.mounted && !self.loading && !self.seed.trim().is_empty()
    }

    /// Pretty-printed result with two-space indentation. Empty payloads
    /// (`null`, `false`, `0`, `""`) are stored but not displayed.
    pub fn rendered_result(&self) -> Option<String> {
        self.result
            .as_ref()
            .filter(|value| is_displayable(value))
            .map(pretty_json)
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            LOADING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}

/// Whether a payload gets the result block and copy control.
pub fn is_displayable(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

pub fn pretty_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: map keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Applies a message and returns the effects to run.
pub fn update(state: &mut ViewState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::SeedEdited(seed) => {
            state.seed = seed;
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return Vec::new();
            }
            state.loading = true;
            state.request = RequestState::InFlight;
            state.error.clear();
            state.result = None;
            vec![Effect::SendRequest(SeedPayload {
                seed_logic: state.seed.clone(),
            })]
        }
        Msg::ResponseArrived(outcome) => {
            if !state.mounted || state.request != RequestState::InFlight {
                log::debug!("Dropping response for a view that is not waiting on one");
                return Vec::new();
            }
            match outcome {
                Ok(data) => {
                    state.result = Some(data);
                    state.request = RequestState::Succeeded;
                }
                Err(err) => {
                    state.error = err.to_string();
                    state.request = RequestState::Failed;
                }
            }
            // Loading is cleared only once the outcome is recorded.
            state.loading = false;
            Vec::new()
        }
        Msg::CopyClicked => match state.rendered_result() {
            Some(text) => vec![Effect::CopyToClipboard(text)],
            None => Vec::new(),
        },
        Msg::Unmounted => {
            state.mounted = false;
            Vec::new()
        }
    }
}

type Observer = Box<dyn FnMut(&ViewState) + Send>;

/// State container with a "state changed, re-render" contract.
#[derive(Default)]
pub struct View {
    state: ViewState,
    observers: Vec<Observer>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ViewState) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let before = self.state.clone();
        let effects = update(&mut self.state, msg);
        if self.state != before {
            for observer in &mut self.observers {
                observer(&self.state);
            }
        }
        effects
    }
}

/// Plain-text frame of the view.
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {TITLE} ===\n"));
    if state.seed().is_empty() {
        out.push_str(&format!("seed: ({SEED_PLACEHOLDER})\n"));
    } else {
        out.push_str(&format!("seed: {}\n", state.seed()));
    }
    let marker = if state.can_submit() || state.is_loading() {
        ""
    } else {
        " (disabled)"
    };
    out.push_str(&format!("[ {} ]{marker}\n", state.button_label()));

    if !state.error().is_empty() {
        out.push_str(&format!("! {}\n", state.error()));
    }
    if let Some(json) = state.rendered_result() {
        out.push_str(&format!("--- {RESULT_HEADING} ---\n{json}\n"));
    }
    out
}
