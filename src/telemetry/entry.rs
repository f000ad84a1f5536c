use serde_json::{Map, Value};
use strum_macros::EnumString;

pub const PEER_LIST_KEY: &str = "konumBilgileri";

#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum EntryKind {
    /// Request sent by our own aircraft, carrying its telemetry.
    #[strum(serialize = "REQ")]
    Req,
    /// Server response listing the positions of the other aircraft.
    #[strum(serialize = "RESP")]
    Resp,
    #[strum(default)]
    Other(String),
}

impl EntryKind {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            // `Other` is the default variant, so parsing cannot fail.
            Some(s) => s.parse().unwrap_or_else(|_| EntryKind::Other(s.to_string())),
            None => EntryKind::Other(String::new()),
        }
    }
}

/// What an entry's `data` turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    SelfReport(&'a Map<String, Value>),
    PeerBatch(&'a [Value]),
    Ignored,
}

/// Borrowed view of one raw log entry that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry<'a> {
    pub timestamp: &'a str,
    pub payload: Payload<'a>,
}

/// Why an entry was dropped before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    NotAnObject,
    MissingTimestamp,
    MissingData,
}

impl<'a> LogEntry<'a> {
    pub fn classify(value: &'a Value) -> Result<Self, Discard> {
        let entry = value.as_object().ok_or(Discard::NotAnObject)?;

        let timestamp = entry
            .get("timestamp")
            .and_then(Value::as_str)
            .filter(|ts| !ts.is_empty())
            .ok_or(Discard::MissingTimestamp)?;

        let data = entry
            .get("data")
            .filter(|data| !is_empty_value(data))
            .ok_or(Discard::MissingData)?;

        let kind = EntryKind::from_value(entry.get("type"));
        let payload = match (&kind, data) {
            (EntryKind::Req, Value::Object(report)) => Payload::SelfReport(report),
            (EntryKind::Resp, Value::Object(response)) => match response.get(PEER_LIST_KEY) {
                Some(Value::Array(observations)) => Payload::PeerBatch(observations),
                _ => Payload::Ignored,
            },
            _ => Payload::Ignored,
        };

        Ok(LogEntry { timestamp, payload })
    }
}

/// Null, `false`, zero and empty strings/collections count as no data.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_entry_kinds() {
        assert_eq!("REQ".parse::<EntryKind>().unwrap(), EntryKind::Req);
        assert_eq!("RESP".parse::<EntryKind>().unwrap(), EntryKind::Resp);
        assert_eq!(
            "PING".parse::<EntryKind>().unwrap(),
            EntryKind::Other("PING".to_string())
        );
    }

    #[test]
    fn request_object_is_a_self_report() {
        let raw = json!({ "timestamp": "t1", "type": "REQ", "data": { "takim_numarasi": 1 } });
        let entry = LogEntry::classify(&raw).unwrap();

        assert_eq!(entry.timestamp, "t1");
        assert!(matches!(entry.payload, Payload::SelfReport(_)));
    }

    #[test]
    fn response_with_list_is_a_peer_batch() {
        let raw = json!({
            "timestamp": "t1",
            "type": "RESP",
            "data": { "konumBilgileri": [{ "takim_numarasi": 2 }, { "takim_numarasi": 3 }] }
        });
        let entry = LogEntry::classify(&raw).unwrap();

        match entry.payload {
            Payload::PeerBatch(list) => assert_eq!(list.len(), 2),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn wrong_shapes_are_ignored() {
        let cases = [
            json!({ "timestamp": "t", "type": "REQ", "data": [1, 2] }),
            json!({ "timestamp": "t", "type": "RESP", "data": { "konumBilgileri": "none" } }),
            json!({ "timestamp": "t", "type": "RESP", "data": { "sunucusaati": 1 } }),
            json!({ "timestamp": "t", "type": "LOG", "data": { "takim_numarasi": 1 } }),
            json!({ "timestamp": "t", "data": { "takim_numarasi": 1 } }),
        ];

        for raw in &cases {
            let entry = LogEntry::classify(raw).unwrap();
            assert_eq!(entry.payload, Payload::Ignored, "{}", raw);
        }
    }

    #[test]
    fn discards_entries_without_timestamp_or_data() {
        let cases = [
            (json!("REQ"), Discard::NotAnObject),
            (json!({ "type": "REQ", "data": { "a": 1 } }), Discard::MissingTimestamp),
            (json!({ "timestamp": null, "type": "REQ", "data": { "a": 1 } }), Discard::MissingTimestamp),
            (json!({ "timestamp": "", "type": "REQ", "data": { "a": 1 } }), Discard::MissingTimestamp),
            (json!({ "timestamp": "t", "type": "REQ" }), Discard::MissingData),
            (json!({ "timestamp": "t", "type": "REQ", "data": null }), Discard::MissingData),
            (json!({ "timestamp": "t", "type": "REQ", "data": {} }), Discard::MissingData),
        ];

        for (raw, reason) in &cases {
            assert_eq!(LogEntry::classify(raw), Err(*reason), "{}", raw);
        }
    }
}
