//! Capability Descriptor Fetcher
//!
//! Best effort: every failure is logged and degrades to an empty descriptor.

use std::time::Duration;

use a2a_common::{endpoint, resolve_url, AgentCard, AGENT_CARD_PATH};
use async_trait::async_trait;
use serde::Serialize;

/// Summary of a remote agent used as routing context
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapabilityDescriptor {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
}

impl CapabilityDescriptor {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.skills.is_empty()
    }
}

impl From<AgentCard> for CapabilityDescriptor {
    fn from(card: AgentCard) -> Self {
        Self {
            name: card.name,
            description: card.description,
            url: (!card.url.is_empty()).then_some(card.url),
            skills: card
                .skills
                .into_iter()
                .map(|s| SkillSummary {
                    name: s.name,
                    description: s.description,
                    examples: s.examples,
                })
                .collect(),
        }
    }
}

/// Source of capability descriptors
#[async_trait]
pub trait CardFetcher: Send + Sync {
    /// Fetch the descriptor published at `address`; never fails
    async fn fetch(&self, address: &str) -> CapabilityDescriptor;
}

/// Fetches the agent card over HTTP with a short timeout
pub struct HttpCardFetcher {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpCardFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<AgentCard, String> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        response.json::<AgentCard>().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl CardFetcher for HttpCardFetcher {
    async fn fetch(&self, address: &str) -> CapabilityDescriptor {
        let url = endpoint(address, AGENT_CARD_PATH);
        let call = async {
            let target = resolve_url(&url).await;
            tracing::info!(
                url = %url,
                host = ?target.host,
                port = ?target.port,
                ips = ?target.ips,
                "Fetching agent card"
            );
            self.try_fetch(&url).await
        };

        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(format!("timed out after {:?}", self.timeout)),
        };

        match result {
            Ok(card) => {
                tracing::debug!(agent = %card.name, skills = card.skills.len(), "Agent card fetched");
                card.into()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch agent card from {}: {}", url, e);
                CapabilityDescriptor::default()
            }
        }
    }
}
