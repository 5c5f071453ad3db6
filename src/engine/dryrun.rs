//! engine::dryrun
//!
//! Dry-run short-circuiting.
//!
//! # Design
//!
//! Mutating handlers call [`DryRun::emit`] before opening a session, so a
//! dry-run never touches the network or the credential store and works with
//! no credentials configured. The payload names the would-be action and its
//! parameters in whatever output mode is active.

use serde_json::{json, Map, Value};

use super::Context;
use crate::ui::output;

/// A would-be action captured instead of performed.
#[derive(Debug, Clone)]
pub struct DryRun {
    action: String,
    params: Map<String, Value>,
}

impl DryRun {
    /// Start a dry-run payload for the named action (a command path).
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Map::new(),
        }
    }

    /// Attach a parameter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Attach a parameter only when present.
    pub fn param_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// The structured payload as emitted in JSON mode.
    pub fn to_value(&self) -> Value {
        json!({
            "dry_run": true,
            "action": self.action,
            "params": Value::Object(self.params.clone()),
        })
    }

    /// Render the payload in the context's output mode.
    pub fn emit(&self, ctx: &Context) {
        match ctx.output {
            output::OutputMode::Json => output::emit_json(&self.to_value()),
            output::OutputMode::Plain => {
                let mut pairs = vec![
                    ("dry_run".to_string(), "true".to_string()),
                    ("action".to_string(), self.action.clone()),
                ];
                for (key, value) in &self.params {
                    pairs.push((key.clone(), output::scalar_to_string(value)));
                }
                output::emit_plain_record(&pairs);
            }
            output::OutputMode::Human => {
                let rendered: Vec<String> = self
                    .params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, output::scalar_to_string(v)))
                    .collect();
                println!("[dry-run] {} {}", self.action, rendered.join(" "));
            }
        }
    }
}
