//! Address diagnostics for outbound calls

use std::collections::BTreeSet;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Upper bound on a diagnostic DNS lookup
pub const DNS_TIMEOUT: Duration = Duration::from_secs(2);

/// Host, port and resolved IPs of a target URL, for logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTarget {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub ips: Vec<String>,
}

/// Resolve a URL's host for diagnostics
///
/// Never fails: an unparseable URL yields an empty target and a DNS
/// failure or a lookup slower than [`DNS_TIMEOUT`] is reported inline as a
/// `<dns_error:...>` entry.
pub async fn resolve_url(raw: &str) -> ResolvedTarget {
    let Ok(url) = url::Url::parse(raw) else {
        return ResolvedTarget::default();
    };

    let host = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string());
    let port = url.port_or_known_default();

    let ips = match (host.as_deref(), port) {
        (Some(h), Some(p)) => collect_ips(tokio::net::lookup_host((h, p)), DNS_TIMEOUT).await,
        _ => Vec::new(),
    };

    ResolvedTarget { host, port, ips }
}

/// Sorted unique IPs from `lookup`, or a single `<dns_error:...>` entry
async fn collect_ips<F, I>(lookup: F, timeout: Duration) -> Vec<String>
where
    F: Future<Output = io::Result<I>>,
    I: Iterator<Item = SocketAddr>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(addrs)) => {
            let unique: BTreeSet<String> = addrs.map(|a| a.ip().to_string()).collect();
            unique.into_iter().collect()
        }
        Ok(Err(e)) => vec![format!("<dns_error:{}>", e)],
        Err(_) => vec![format!("<dns_error:timed out after {:?}>", timeout)],
    }
}
