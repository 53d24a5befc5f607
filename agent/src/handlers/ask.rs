//! Ask command handler
//!
//! Client for a running orchestrator: streams one request and prints each
//! message as it arrives.

use std::io::{self, BufRead, Write};

use a2a_common::{Message, SendMessageRequest};
use anyhow::Result;

use super::{join_prompt, CommandContext};
use crate::remote::AgentSession;

/// Handle the `ask` command
pub async fn run_ask(ctx: &CommandContext, prompt: &[String]) -> Result<()> {
    let mut request = join_prompt(prompt);
    if request.is_empty() {
        request = read_request()?;
    }
    if request.is_empty() {
        println!("Please provide a request.");
        return Ok(());
    }

    let http_client = reqwest::Client::new();
    let payload = SendMessageRequest {
        message: Message::user_text(request),
    };
    let mut session =
        AgentSession::open(&http_client, &ctx.settings.orchestrator_url, &payload).await?;

    while let Some(message) = session.next_message().await {
        let text = message?.text();
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}

fn read_request() -> Result<String> {
    print!("Playlist request: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
