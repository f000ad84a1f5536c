use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::entry::{Discard, LogEntry, Payload};
use super::sample::{entity_id, EntityId, FieldKeys, Sample, PEER_OBSERVATION_KEYS, SELF_REPORT_KEYS};
use super::store::SeriesStore;
use super::timestamp::is_iso8601;

/// What happened to the raw entries during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub entries: usize,
    pub samples: usize,
    pub not_objects: usize,
    pub missing_timestamp: usize,
    pub missing_data: usize,
    /// Entries of an unknown type or with a `data` shape we do not read.
    pub ignored: usize,
    pub records_without_id: usize,
    pub non_iso_timestamps: usize,
}

impl NormalizeReport {
    /// Entries dropped before classification, for any reason.
    pub fn discarded(&self) -> usize {
        self.not_objects + self.missing_timestamp + self.missing_data
    }
}

#[derive(Debug)]
pub struct Normalized {
    pub store: SeriesStore,
    pub report: NormalizeReport,
}

#[derive(Default)]
struct Builder {
    series: BTreeMap<EntityId, Vec<Sample>>,
    report: NormalizeReport,
}

impl Builder {
    fn push(&mut self, timestamp: &str, record: &Map<String, Value>, keys: &FieldKeys) {
        match entity_id(record) {
            Some(id) => {
                self.series
                    .entry(id)
                    .or_default()
                    .push(Sample::from_record(timestamp, record, keys));
                self.report.samples += 1;
            }
            None => self.report.records_without_id += 1,
        }
    }

    fn discard(&mut self, reason: Discard) {
        let counter = match reason {
            Discard::NotAnObject => &mut self.report.not_objects,
            Discard::MissingTimestamp => &mut self.report.missing_timestamp,
            Discard::MissingData => &mut self.report.missing_data,
        };
        *counter += 1;
    }

    fn accept(&mut self, entry: LogEntry<'_>) {
        if !is_iso8601(entry.timestamp) {
            self.report.non_iso_timestamps += 1;
        }

        match entry.payload {
            Payload::SelfReport(report) => self.push(entry.timestamp, report, &SELF_REPORT_KEYS),
            Payload::PeerBatch(observations) => {
                for observation in observations {
                    match observation.as_object() {
                        Some(record) => self.push(entry.timestamp, record, &PEER_OBSERVATION_KEYS),
                        None => self.report.records_without_id += 1,
                    }
                }
            }
            Payload::Ignored => self.report.ignored += 1,
        }
    }

    fn finish(mut self) -> Normalized {
        // `sort_by` is stable: equal timestamps keep their log order.
        for samples in self.series.values_mut() {
            samples.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        }

        Normalized {
            store: SeriesStore::from_series(self.series),
            report: self.report,
        }
    }
}

/// Groups raw log entries into per-entity series sorted by timestamp.
///
/// Malformed entries never fail the run; they are only counted in the report.
pub fn normalize(entries: &[Value]) -> Normalized {
    let mut builder = Builder::default();
    builder.report.entries = entries.len();

    for raw in entries {
        match LogEntry::classify(raw) {
            Ok(entry) => builder.accept(entry),
            Err(reason) => builder.discard(reason),
        }
    }

    builder.finish()
}
