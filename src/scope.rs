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

//! Inherited context of a derived handler.

use std::sync::Arc;

use crate::Error;
use crate::kv::Key;
use crate::kv::Value;
use crate::kv::Visitor;
use crate::record::Record;

/// An inherited attribute, together with the groups that were open when it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    groups: Arc<[String]>,
    key: Key,
    value: Value,
}

impl Attr {
    /// The group path the attribute lives under, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The attribute key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The attribute value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The attributes and groups a handler accumulated through derivation.
///
/// A scope is never mutated after construction: [`Scope::with_attrs`] and
/// [`Scope::with_group`] copy the parent's lists into a new scope and extend the copy, so any
/// number of threads may derive from one parent at the same time.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    attrs: Arc<[Attr]>,
    groups: Arc<[String]>,
}

impl Scope {
    /// Inherited attributes, oldest first.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Open groups, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// A new scope with `attrs` appended under the currently open groups.
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = (Key, Value)>) -> Scope {
        let mut extended = self.attrs.to_vec();
        let before = extended.len();
        extended.extend(attrs.into_iter().map(|(key, value)| Attr {
            groups: self.groups.clone(),
            key,
            value,
        }));
        if extended.len() == before {
            return self.clone();
        }

        Scope {
            attrs: Arc::from(extended),
            groups: self.groups.clone(),
        }
    }

    /// A new scope with group `name` opened. An empty name opens nothing.
    pub fn with_group(&self, name: &str) -> Scope {
        if name.is_empty() {
            return self.clone();
        }

        let mut groups = self.groups.to_vec();
        groups.push(name.to_string());
        Scope {
            attrs: self.attrs.clone(),
            groups: Arc::from(groups),
        }
    }

    /// Visit the record's own attributes in call order, then the inherited ones oldest first.
    pub fn visit(&self, record: &Record, visitor: &mut dyn Visitor) -> Result<(), Error> {
        for (key, value) in record.key_values() {
            visitor.visit(&self.groups, key, value)?;
        }
        for attr in self.attrs.iter() {
            visitor.visit(&attr.groups, &attr.key, &attr.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl Visitor for Collect {
        fn visit(&mut self, groups: &[String], key: &Key, value: &Value) -> Result<(), Error> {
            let mut path = groups.to_vec();
            path.push(key.to_string());
            self.0.push(format!("{}={value}", path.join(".")));
            Ok(())
        }
    }

    fn collect(scope: &Scope, record: &Record) -> Vec<String> {
        let mut visitor = Collect::default();
        scope.visit(record, &mut visitor).unwrap();
        visitor.0
    }

    #[test]
    fn derivation_leaves_parent_untouched() {
        let parent = Scope::default();
        let a = parent.with_attrs([(Key::new("a"), Value::from(1))]);
        let b = parent.with_attrs([(Key::new("b"), Value::from(2))]);

        assert!(parent.attrs().is_empty());
        assert_eq!(a.attrs().len(), 1);
        assert_eq!(a.attrs()[0].key().as_str(), "a");
        assert_eq!(b.attrs().len(), 1);
        assert_eq!(b.attrs()[0].key().as_str(), "b");
    }

    #[test]
    fn groups_qualify_later_attributes_only() {
        let scope = Scope::default()
            .with_attrs([(Key::new("outer"), Value::from(1))])
            .with_group("req")
            .with_attrs([(Key::new("id"), Value::from(7))])
            .with_group("");

        assert_eq!(scope.groups(), ["req".to_string()]);
        let record = Record::builder()
            .key_values(vec![(Key::new("path"), Value::from("/"))])
            .build();
        assert_eq!(
            collect(&scope, &record),
            ["req.path=/", "outer=1", "req.id=7"]
        );
    }

    #[test]
    fn concurrent_derivation() {
        let parent = Scope::default().with_attrs([(Key::new("base"), Value::from(0))]);
        std::thread::scope(|s| {
            for i in 0..8 {
                let parent = &parent;
                s.spawn(move || {
                    let child = parent.with_attrs([(Key::new("worker"), Value::from(i))]);
                    assert_eq!(child.attrs().len(), 2);
                    assert_eq!(child.attrs()[1].value(), &Value::from(i));
                });
            }
        });
        assert_eq!(parent.attrs().len(), 1);
    }
}
