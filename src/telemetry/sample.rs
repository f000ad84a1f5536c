use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Team number (`takim_numarasi`) naming one tracked aircraft. Wide enough for
/// every integer JSON can carry, signed or unsigned.
pub type EntityId = i128;

pub const ENTITY_ID_KEY: &str = "takim_numarasi";

/// One point-in-time state of a single aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Sample {
    pub timestamp: String,
    // Numbers are kept as logged, so integers stay integers on the way out.
    #[schema(value_type = Option<f64>)]
    pub lat: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub lon: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub alt: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub heading: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub roll: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub pitch: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub speed: Option<Number>,
    /// `None` when the record kind carries no battery (peer observations), so
    /// the key is omitted. `Some(None)` is a self-report without a reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub battery: Option<Option<Number>>,
}

/// Source keys for the sample fields of one record shape.
pub struct FieldKeys {
    pub lat: &'static str,
    pub lon: &'static str,
    pub alt: &'static str,
    pub heading: &'static str,
    pub roll: &'static str,
    pub pitch: &'static str,
    pub speed: &'static str,
    pub battery: Option<&'static str>,
}

pub const SELF_REPORT_KEYS: FieldKeys = FieldKeys {
    lat: "iha_enlem",
    lon: "iha_boylam",
    alt: "iha_irtifa",
    heading: "iha_yonelme",
    roll: "iha_yatis",
    pitch: "iha_dikilme",
    speed: "iha_hiz",
    battery: Some("iha_batarya"),
};

// Peer observations spell speed differently and never carry a battery level.
pub const PEER_OBSERVATION_KEYS: FieldKeys = FieldKeys {
    lat: "iha_enlem",
    lon: "iha_boylam",
    alt: "iha_irtifa",
    heading: "iha_yonelme",
    roll: "iha_yatis",
    pitch: "iha_dikilme",
    speed: "iha_hizi",
    battery: None,
};

impl Sample {
    pub fn from_record(timestamp: &str, record: &Map<String, Value>, keys: &FieldKeys) -> Self {
        let number = |key: &str| match record.get(key) {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        Sample {
            timestamp: timestamp.to_string(),
            lat: number(keys.lat),
            lon: number(keys.lon),
            alt: number(keys.alt),
            heading: number(keys.heading),
            roll: number(keys.roll),
            pitch: number(keys.pitch),
            speed: number(keys.speed),
            battery: keys.battery.map(number),
        }
    }
}

// Largest magnitude an `f64` id may have and still fit an `EntityId`.
const MAX_FLOAT_ID: f64 = 1.7e38;

/// Reads the entity id of a record. Any integral JSON number is accepted,
/// including floats such as `7.0`.
pub fn entity_id(record: &Map<String, Value>) -> Option<EntityId> {
    let Some(Value::Number(n)) = record.get(ENTITY_ID_KEY) else {
        return None;
    };

    if let Some(id) = n.as_i64() {
        return Some(EntityId::from(id));
    }
    if let Some(id) = n.as_u64() {
        return Some(EntityId::from(id));
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_FLOAT_ID)
        .map(|f| f as EntityId)
}
