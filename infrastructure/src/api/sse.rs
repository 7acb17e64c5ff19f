//! Incremental event-stream parsing.
//!
//! The chat endpoint answers with a chunked body of `data: `-prefixed
//! records separated by blank lines. Chunk boundaries carry no meaning —
//! a record may span several chunks and one chunk may hold several
//! records — so [`SseParser`] buffers the unterminated tail between
//! [`feed`](SseParser::feed) calls. Parsing the same bytes under any
//! chunking yields the same event sequence.
//!
//! One record may carry several independent JSON fields and therefore
//! expand to several [`StreamEvent`]s. A record with malformed JSON is
//! logged and skipped; it never aborts the stream.

use ragchat_domain::StreamEvent;
use serde::Deserialize;
use tracing::warn;

/// End-of-stream sentinel payload.
const DONE_SENTINEL: &str = "[DONE]";

/// Record separator: two consecutive newlines.
const RECORD_SEPARATOR: &str = "\n\n";

/// The independent optional fields one stream record may carry.
#[derive(Debug, Deserialize)]
struct StreamRecord {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    full_response: Option<String>,
    #[serde(default)]
    new_conversation_id: Option<serde_json::Value>,
    #[serde(default)]
    conversation_title: Option<String>,
}

/// Incremental parser for the chat event stream.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    finished: bool,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `[DONE]` has been seen; further input is ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed one chunk of decoded body text, returning the events of every
    /// record completed by it.
    pub fn feed(&mut self, chunk: &str) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.buffer.push_str(chunk);

        while let Some(pos) = self.buffer.find(RECORD_SEPARATOR) {
            let record: String = self.buffer.drain(..pos + RECORD_SEPARATOR.len()).collect();
            self.parse_record(record.trim(), &mut events);
            if self.finished {
                self.buffer.clear();
                break;
            }
        }
        events
    }

    /// Signal end-of-input, flushing a trailing record that never got its
    /// blank-line terminator.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        let tail = std::mem::take(&mut self.buffer);
        let tail = tail.trim();
        if !tail.is_empty() {
            self.parse_record(tail, &mut events);
        }
        self.finished = true;
        events
    }

    fn parse_record(&mut self, record: &str, out: &mut Vec<StreamEvent>) {
        let Some(payload) = record.strip_prefix("data: ") else {
            // Not a data record (empty keep-alive, comment) — skip.
            return;
        };
        let payload = payload.trim();

        if payload == DONE_SENTINEL {
            self.finished = true;
            out.push(StreamEvent::Done);
            return;
        }

        let fields: StreamRecord = match serde_json::from_str(payload) {
            Ok(fields) => fields,
            Err(e) => {
                // A single corrupt record must never abort the assembly.
                warn!(error = %e, "Skipping malformed stream record");
                return;
            }
        };

        if let Some(token) = fields.token {
            out.push(StreamEvent::Token(token));
        }
        if let Some(full) = fields.full_response {
            out.push(StreamEvent::FullResponse(full));
        }
        if let Some(id) = fields.new_conversation_id.and_then(id_to_string) {
            out.push(StreamEvent::NewConversation(id));
        }
        if let Some(title) = fields.conversation_title {
            out.push(StreamEvent::Title(title));
        }
    }
}

/// Conversation ids are strings today but were numeric in older server
/// builds; accept both.
fn id_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(input: &str) -> Vec<StreamEvent> {
        let mut parser = SseParser::new();
        let mut events = parser.feed(input);
        events.extend(parser.finish());
        events
    }

    #[test]
    fn tokens_parse_in_order() {
        let events = parse_all("data: {\"token\":\"ab\"}\n\ndata: {\"token\":\"cd\"}\n\n");
        assert_eq!(
            events,
            vec![
                StreamEvent::Token("ab".to_string()),
                StreamEvent::Token("cd".to_string()),
            ]
        );
    }

    #[test]
    fn one_record_may_expand_to_several_events() {
        let events = parse_all(
            "data: {\"full_response\":\"done\",\"new_conversation_id\":\"c-1\",\"conversation_title\":\"T\"}\n\n",
        );
        assert_eq!(
            events,
            vec![
                StreamEvent::FullResponse("done".to_string()),
                StreamEvent::NewConversation("c-1".to_string()),
                StreamEvent::Title("T".to_string()),
            ]
        );
    }

    #[test]
    fn done_sentinel_terminates_and_suppresses_later_records() {
        let mut parser = SseParser::new();
        let events =
            parser.feed("data: {\"token\":\"a\"}\n\ndata: [DONE]\n\ndata: {\"token\":\"late\"}\n\n");
        assert_eq!(
            events,
            vec![StreamEvent::Token("a".to_string()), StreamEvent::Done]
        );
        assert!(parser.is_finished());
        // Further chunks after [DONE] are ignored entirely.
        assert!(parser.feed("data: {\"token\":\"more\"}\n\n").is_empty());
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn malformed_json_is_skipped_between_valid_records() {
        let events = parse_all(
            "data: {\"token\":\"a\"}\n\ndata: {not json}\n\ndata: {\"token\":\"b\"}\n\n",
        );
        assert_eq!(
            events,
            vec![
                StreamEvent::Token("a".to_string()),
                StreamEvent::Token("b".to_string()),
            ]
        );
    }

    #[test]
    fn non_data_records_are_ignored() {
        let events = parse_all(": keep-alive\n\ndata: {\"token\":\"x\"}\n\n");
        assert_eq!(events, vec![StreamEvent::Token("x".to_string())]);
    }

    #[test]
    fn record_split_across_chunks_reassembles() {
        let mut parser = SseParser::new();
        assert!(parser.feed("data: {\"tok").is_empty());
        assert!(parser.feed("en\":\"hel").is_empty());
        let events = parser.feed("lo\"}\n\n");
        assert_eq!(events, vec![StreamEvent::Token("hello".to_string())]);
    }

    #[test]
    fn trailing_record_without_separator_flushes_on_finish() {
        let mut parser = SseParser::new();
        assert!(parser.feed("data: {\"token\":\"tail\"}").is_empty());
        let events = parser.finish();
        assert_eq!(events, vec![StreamEvent::Token("tail".to_string())]);
    }

    #[test]
    fn numeric_conversation_ids_are_stringified() {
        let events = parse_all("data: {\"new_conversation_id\":42}\n\n");
        assert_eq!(events, vec![StreamEvent::NewConversation("42".to_string())]);
    }

    #[test]
    fn chunk_boundary_independence() {
        let input = "data: {\"token\":\"ab\"}\n\ndata: {\"token\":\"cd\"}\n\ndata: {\"full_response\":\"abcd!\",\"conversation_title\":\"T\"}\n\ndata: [DONE]\n\n";
        let expected = parse_all(input);
        assert_eq!(expected.last(), Some(&StreamEvent::Done));

        // Split the same bytes at every possible offset, and into
        // three-way splits at a few stride combinations.
        for split in 0..=input.len() {
            let (a, b) = input.split_at(split);
            let mut parser = SseParser::new();
            let mut events = parser.feed(a);
            events.extend(parser.feed(b));
            events.extend(parser.finish());
            assert_eq!(events, expected, "two-way split at {split}");
        }

        for stride in 1..7 {
            let mut parser = SseParser::new();
            let mut events = Vec::new();
            let bytes = input.as_bytes();
            let mut start = 0;
            while start < bytes.len() {
                let end = (start + stride).min(bytes.len());
                events.extend(parser.feed(std::str::from_utf8(&bytes[start..end]).unwrap()));
                start = end;
            }
            events.extend(parser.finish());
            assert_eq!(events, expected, "stride {stride}");
        }
    }

    #[test]
    fn empty_input_finishes_cleanly() {
        let mut parser = SseParser::new();
        assert!(parser.feed("").is_empty());
        assert!(parser.finish().is_empty());
        assert!(parser.is_finished());
    }
}
