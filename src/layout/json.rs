// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use jiff::tz::TimeZone;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value as JsonValue;

use crate::Error;
use crate::kv::Key;
use crate::kv::Value;
use crate::kv::Visitor;
use crate::layout::Layout;
use crate::layout::format_timestamp;
use crate::record::Record;
use crate::scope::Scope;

/// A JSON layout for formatting log records, one object per line.
///
/// Output format:
///
/// ```json
/// {"time":"2025-10-23T17:29:28Z","level":"INFO","msg":"server started","caller":"cmd/main.rs:42","port":8080}
/// {"time":"2025-10-23T17:29:29Z","level":"DEBUG","msg":"ping","req":{"id":7}}
/// ```
///
/// Attributes recorded under groups are nested in objects named after the groups. When a key
/// repeats, the first occurrence is kept, so call-site attributes win over inherited ones. This
/// holds for group names too: once a plain attribute took a name, attributes grouped under
/// that name are left out.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logweave::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone)]
pub struct JsonLayout {
    tz: TimeZone,
}

impl Default for JsonLayout {
    fn default() -> Self {
        JsonLayout {
            tz: TimeZone::system(),
        }
    }
}

impl JsonLayout {
    /// Sets the timezone for timestamps. Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }
}

struct KvCollector {
    kvs: Map<String, JsonValue>,
}

impl Visitor for KvCollector {
    fn visit(&mut self, groups: &[String], key: &Key, value: &Value) -> Result<(), Error> {
        let mut map = &mut self.kvs;
        for group in groups {
            let entry = map
                .entry(group.clone())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            // a plain attribute already holds the group's name
            let Some(inner) = entry.as_object_mut() else {
                return Ok(());
            };
            map = inner;
        }
        map.entry(key.as_str()).or_insert_with(|| value.to_json());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    time: String,
    level: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
    #[serde(flatten)]
    kvs: Map<String, JsonValue>,
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error> {
        let mut visitor = KvCollector { kvs: Map::new() };
        scope.visit(record, &mut visitor)?;

        let record_line = RecordLine {
            time: format_timestamp(record.time(), &self.tz)?,
            level: record.level().as_str(),
            msg: record.message(),
            caller: record.caller().map(|caller| caller.to_string()),
            kvs: visitor.kvs,
        };

        let mut bytes = serde_json::to_vec(&record_line)
            .map_err(|err| Error::new("failed to serialize log record").with_source(err))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;
    use std::time::SystemTime;

    use serde_json::json;

    use super::*;
    use crate::Level;
    use crate::caller::Caller;
    use crate::pretty::Pretty;

    fn format(record: &Record, scope: &Scope) -> String {
        let layout = JsonLayout::default().timezone(TimeZone::UTC);
        String::from_utf8(layout.format(record, scope).unwrap()).unwrap()
    }

    fn builder() -> crate::record::RecordBuilder {
        Record::builder().time(SystemTime::UNIX_EPOCH + Duration::from_secs(1_761_240_568))
    }

    #[test]
    fn one_object_per_line() {
        let record = builder()
            .level(Level::Warn)
            .caller(Some(Caller::new("src/app/main.rs", 9)))
            .message("disk \"low\"")
            .key_values(vec![
                (Key::new("free"), Value::from(0.5)),
                (Key::new("mount"), Value::from("/var")),
            ])
            .build();
        assert_eq!(
            format(&record, &Scope::default()),
            "{\"time\":\"2025-10-23T17:29:28Z\",\"level\":\"WARN\",\"msg\":\"disk \\\"low\\\"\",\"caller\":\"app/main.rs:9\",\"free\":0.5,\"mount\":\"/var\"}\n"
        );
    }

    #[test]
    fn groups_nest_objects() {
        let scope = Scope::default()
            .with_attrs([(Key::new("svc"), Value::from("api"))])
            .with_group("req")
            .with_attrs([(Key::new("id"), Value::from(7))]);
        let record = builder()
            .message("done")
            .key_values(vec![(Key::new("status"), Value::from(200))])
            .build();

        let line: JsonValue = serde_json::from_str(&format(&record, &scope)).unwrap();
        assert_eq!(
            line,
            json!({
                "time": "2025-10-23T17:29:28Z",
                "level": "INFO",
                "msg": "done",
                "req": {"status": 200, "id": 7},
                "svc": "api",
            })
        );
    }

    #[test]
    fn structured_and_pretty_values() {
        let record = builder()
            .key_values(vec![
                (
                    Key::new("labels"),
                    Value::serde(&BTreeMap::from([("app", "web")])),
                ),
                (Key::new("spec"), Value::from(Pretty::new(&vec![1]))),
                (Key::new("none"), Value::Null),
            ])
            .build();

        let line: JsonValue = serde_json::from_str(&format(&record, &Scope::default())).unwrap();
        assert_eq!(line["labels"], json!({"app": "web"}));
        assert_eq!(line["spec"], json!("[\n  1\n]"));
        assert_eq!(line["none"], JsonValue::Null);
        assert!(line.get("caller").is_none());
    }

    #[test]
    fn first_occurrence_wins() {
        let scope = Scope::default().with_attrs([(Key::new("k"), Value::from("inherited"))]);
        let record = builder()
            .key_values(vec![(Key::new("k"), Value::from("call"))])
            .build();

        let line: JsonValue = serde_json::from_str(&format(&record, &scope)).unwrap();
        assert_eq!(line["k"], json!("call"));
    }

    #[test]
    fn plain_attribute_keeps_its_name_against_a_later_group() {
        let scope = Scope::default()
            .with_attrs([(Key::new("req"), Value::from(1))])
            .with_group("req")
            .with_attrs([(Key::new("id"), Value::from(7))]);
        let record = builder().message("x").build();

        let line: JsonValue = serde_json::from_str(&format(&record, &scope)).unwrap();
        assert_eq!(line["req"], json!(1));

        let scope = Scope::default()
            .with_group("req")
            .with_attrs([(Key::new("id"), Value::from(7))]);
        let record = builder()
            .message("x")
            .key_values(vec![(Key::new("status"), Value::from(200))])
            .build();
        let line: JsonValue = serde_json::from_str(&format(&record, &scope)).unwrap();
        assert_eq!(line["req"], json!({"status": 200, "id": 7}));
    }
}
