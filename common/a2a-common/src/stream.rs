//! Client-side decoding of the streaming endpoint
//!
//! The server emits server-sent events whose `data:` payloads are
//! [`StreamResponse`] JSON documents. [`SseDecoder`] turns raw body chunks
//! into complete event payloads; [`MessageStream`] pulls messages off a
//! byte stream one at a time.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use crate::types::{Message, StreamResponse};

/// Errors while reading a message stream
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("stream transport failed: {0}")]
    Transport(String),

    #[error("malformed stream event: {0}")]
    Decode(String),
}

/// Incremental server-sent-events decoder
///
/// Only `data` fields are kept. Comment lines (`:`) and other fields
/// (`event`, `id`, `retry`) are ignored.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes of the current, not yet terminated line
    line_buffer: Vec<u8>,
    /// `data` lines of the event being assembled
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk, returning every event payload it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut events = Vec::new();

        self.line_buffer.extend_from_slice(chunk);
        while let Some(newline_pos) = self.line_buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.line_buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.trim_end_matches('\r');

            if let Some(payload) = self.process_line(line) {
                events.push(payload);
            }
        }

        events
    }

    /// Flush a trailing event that was not terminated by a blank line
    pub fn finish(&mut self) -> Option<String> {
        if !self.line_buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.line_buffer).into_owned();
            self.line_buffer.clear();
            if let Some(payload) = self.process_line(line.trim_end_matches('\r')) {
                return Some(payload);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let payload = self.data.join("\n");
        self.data.clear();
        Some(payload)
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, String>> + Send>>;

/// Pulls [`Message`]s off a streamed response body
pub struct MessageStream {
    inner: ByteStream,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    done: bool,
}

impl MessageStream {
    pub fn new<S, B, E>(inner: S) -> Self
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]>,
        E: Display,
    {
        let inner = inner.map(|chunk| {
            chunk
                .map(|bytes| bytes.as_ref().to_vec())
                .map_err(|e| e.to_string())
        });

        Self {
            inner: Box::pin(inner),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Next message, `None` once the stream has ended
    ///
    /// Events that carry no message are skipped.
    pub async fn next_message(&mut self) -> Option<Result<Message, StreamError>> {
        loop {
            if let Some(payload) = self.pending.pop_front() {
                match serde_json::from_str::<StreamResponse>(&payload) {
                    Ok(StreamResponse {
                        message: Some(message),
                    }) => return Some(Ok(message)),
                    Ok(StreamResponse { message: None }) => continue,
                    Err(e) => return Some(Err(StreamError::Decode(e.to_string()))),
                }
            }

            if self.done {
                return None;
            }

            match self.inner.next().await {
                Some(Ok(chunk)) => self.pending.extend(self.decoder.push(&chunk)),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(StreamError::Transport(e)));
                }
                None => {
                    self.done = true;
                    self.pending.extend(self.decoder.finish());
                }
            }
        }
    }
}
