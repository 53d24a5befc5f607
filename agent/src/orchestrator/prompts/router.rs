//! Routing decision prompt

pub const ROUTER_PROMPT: &str = r#"You are a routing assistant. Decide whether to call the Track Scout agent to help build a playlist. Respond with strict JSON only: {"use_scout": true/false, "reason": "short reason"}"#;

/// User content for the routing call: the request plus the agent summary
pub fn routing_prompt(request: &str, agent_info: &str) -> String {
    format!("User request: {}\n\nAvailable agent:\n{}", request, agent_info)
}
