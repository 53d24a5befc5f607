//! Routing Decision Engine
//!
//! Asks the completion backend whether Track Scout should be consulted.
//! Any ambiguity (backend failure, no JSON, missing or non-boolean
//! `use_scout`) resolves to delegating.

use std::sync::Arc;

use serde_json::Value;

use super::prompts::{routing_prompt, ROUTER_HINT, ROUTER_PROMPT};
use crate::llm::{CompletionRequest, Llm};
use crate::remote::CardFetcher;

/// Outcome of one routing decision
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub use_secondary: bool,
    pub reason: Option<String>,
}

impl RoutingDecision {
    fn fail_open(reason: impl Into<String>) -> Self {
        Self {
            use_secondary: true,
            reason: Some(reason.into()),
        }
    }
}

pub struct RoutingEngine {
    llm: Arc<dyn Llm>,
    cards: Arc<dyn CardFetcher>,
    scout_url: String,
}

impl RoutingEngine {
    pub fn new(llm: Arc<dyn Llm>, cards: Arc<dyn CardFetcher>, scout_url: impl Into<String>) -> Self {
        Self {
            llm,
            cards,
            scout_url: scout_url.into(),
        }
    }

    /// Decide whether `request` should be delegated
    pub async fn decide(&self, request: &str) -> RoutingDecision {
        let descriptor = self.cards.fetch(&self.scout_url).await;
        let agent_info = serde_json::to_string_pretty(&descriptor).unwrap_or_else(|_| "{}".to_string());

        let completion = CompletionRequest::new(routing_prompt(request, &agent_info))
            .with_system_prompt(ROUTER_PROMPT)
            .with_temperature(0.0)
            .with_routing_hint(ROUTER_HINT);

        let decision = match self.llm.complete(completion).await {
            Ok(text) => interpret(&text),
            Err(e) => {
                tracing::warn!("Router call failed, delegating: {}", e);
                RoutingDecision::fail_open(format!("router error: {}", e))
            }
        };

        tracing::info!(
            use_scout = decision.use_secondary,
            reason = decision.reason.as_deref().unwrap_or(""),
            "Routing decision"
        );
        decision
    }
}

/// Turn raw router output into a decision
pub fn interpret(text: &str) -> RoutingDecision {
    let Some(value) = extract_json(text) else {
        tracing::warn!("Router output had no JSON object: {:?}", text);
        return RoutingDecision::fail_open("router returned no JSON");
    };

    match value.get("use_scout") {
        Some(Value::Bool(use_scout)) => RoutingDecision {
            use_secondary: *use_scout,
            reason: value
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        _ => {
            tracing::warn!("Router JSON lacks a boolean use_scout: {}", value);
            RoutingDecision::fail_open("router JSON missing boolean use_scout")
        }
    }
}

/// The first balanced `{...}` span in `text`, parsed as a JSON object
///
/// Braces inside JSON strings do not count toward balance. A first span
/// that is unbalanced or not valid JSON yields `None`; later spans are
/// never consulted.
pub fn extract_json(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let len = balanced_end(&text[start..])?;

    match serde_json::from_str::<Value>(&text[start..start + len]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// Byte length of the balanced object at the start of `s`
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
