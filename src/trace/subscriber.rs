//! Provides a JSON logger for chase runs, collecting per-round records of
//! fired triggers and the instances they produce.

use serde_derive::{Deserialize, Serialize};
use std::{fmt, fs::File, io::Write, sync::Mutex};
use tracing::span::Id;
use tracing::{field, span, subscriber, Event, Metadata};

/// Thread safe json logger that writes records of `ChaseRoundRecord` into a
/// given log file.
pub struct JsonLogger {
    log_file: Mutex<File>,
    round_record: Mutex<ChaseRoundRecord>,
}

impl JsonLogger {
    pub fn new(log_file: File) -> Self {
        Self {
            log_file: Mutex::new(log_file),
            round_record: Mutex::new(ChaseRoundRecord::new()),
        }
    }
}

impl subscriber::Subscriber for JsonLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true // for now
    }

    fn new_span(&self, span: &span::Attributes) -> Id {
        let mut record = Recorder::new();
        span.record(&mut record);
        Id::from_u64(record.instance_id.unwrap_or(1))
    }

    fn record(&self, _span: &Id, _values: &span::Record) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event) {
        let mut event_record = Recorder::new();
        event.record(&mut event_record);

        if let Some(event_type) = &event_record.event {
            match event_type.as_ref() {
                super::EXTEND | super::QUOTIENT | super::FIXPOINT | super::CAPPED
                | super::MODEL => {
                    drop(self.round_record.lock().map(|mut record| {
                        record.set_instance(InstanceRecord::try_from(event_record).ok());
                        record
                    }));
                }
                super::FIRE => {
                    drop(self.round_record.lock().map(|mut record| {
                        record.set_fire(FireRecord::try_from(event_record).ok());
                        record
                    }));
                }
                _ => (),
            }
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {
        let record = self.round_record.lock().unwrap();
        if record.fire_record.is_none() && record.instance_record.is_none() {
            return;
        }
        let serialized =
            serde_json::to_string_pretty(&*record).unwrap_or_else(|_| String::from("{}"));
        self.log_file
            .lock()
            .unwrap()
            .write_all(serialized.as_bytes())
            .expect("unable to write chase log");
    }
}

/// Log information associated to one chase round, including the trigger
/// that fired and the instance produced by the round.
#[derive(Serialize)]
struct ChaseRoundRecord {
    #[serde(rename = "fire")]
    fire_record: Option<FireRecord>,
    #[serde(rename = "instance")]
    instance_record: Option<InstanceRecord>,
}

impl ChaseRoundRecord {
    fn new() -> Self {
        Self {
            fire_record: None,
            instance_record: None,
        }
    }

    /// Set the `FireRecord` of the round, triggered by a FIRE event.
    fn set_fire(&mut self, fire_record: Option<FireRecord>) {
        self.fire_record = fire_record;
    }

    /// Set the `InstanceRecord` of the round, triggered by EXTEND,
    /// QUOTIENT, FIXPOINT, CAPPED and MODEL events.
    fn set_instance(&mut self, instance_record: Option<InstanceRecord>) {
        self.instance_record = instance_record;
    }
}

/// A record, containing information about the working instance as the
/// chase rewrites it or hands it back.
#[derive(Serialize, Deserialize)]
struct InstanceRecord {
    event: String,
    round: Option<u64>,
    instance: String,
}

impl InstanceRecord {
    fn try_from(value: Recorder) -> Result<Self, ()> {
        if value.event.is_none() | value.instance.is_none() {
            Err(())
        } else {
            Ok(InstanceRecord {
                event: value.event.unwrap(),
                round: value.round,
                instance: value.instance.unwrap(),
            })
        }
    }
}

/// A record, containing information about the trigger fired by a chase
/// round and the mapping of its environment.
#[derive(Serialize, Deserialize)]
struct FireRecord {
    dependency: u64,
    mapping: String,
}

impl FireRecord {
    fn try_from(value: Recorder) -> Result<Self, ()> {
        if value.dependency.is_none() | value.mapping.is_none() {
            Err(())
        } else {
            Ok(FireRecord {
                dependency: value.dependency.unwrap(),
                mapping: value.mapping.unwrap(),
            })
        }
    }
}

/// Generic trace visitor to collect as many fields as it can. Based on the
/// triggering event, `Recorder` will be converted to its corresponding log
/// record.
struct Recorder {
    event: Option<String>,
    instance_id: Option<u64>,
    round: Option<u64>,
    instance: Option<String>,
    dependency: Option<u64>,
    mapping: Option<String>,
}

impl Recorder {
    fn new() -> Recorder {
        Recorder {
            event: None,
            instance_id: None,
            round: None,
            instance: None,
            dependency: None,
            mapping: None,
        }
    }
}

impl field::Visit for Recorder {
    fn record_u64(&mut self, field: &field::Field, value: u64) {
        match field.name() {
            super::INSTANCE_ID_FIELD => self.instance_id = Some(value),
            super::ROUND_FIELD => self.round = Some(value),
            super::DEPENDENCY_FIELD => self.dependency = Some(value),
            _ => (),
        }
    }

    fn record_str(&mut self, field: &field::Field, value: &str) {
        if field.name() == super::EVENT_FIELD {
            self.event = Some(value.to_owned())
        }
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        match field.name() {
            super::INSTANCE_FIELD => self.instance = Some(format!("{:?}", value)),
            super::MAPPING_FIELD => self.mapping = Some(format!("{:?}", value)),
            _ => (),
        }
    }
}
