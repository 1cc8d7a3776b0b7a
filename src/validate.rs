//! Version Compatibility Validator
//!
//! Walks a populated entity tree and reports every field whose value needs a
//! newer schema version than the one the document declares.
//!
//! ## Rules
//! 1. A field without an explicit requirement is available from 1.0.
//! 2. Only populated fields count; values at their zero default are ignored.
//! 3. The whole tree is visited and all violations are returned in traversal
//!    order. Nothing short-circuits.
//! 4. An unparseable declared version yields a single violation on `version`.

use serde::Serialize;
use std::fmt;

use crate::version::CardVersion;
use crate::wire::{FieldRole, FieldSpec, Walk};

/// What kind of problem a violation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A field needs a newer version than declared
    Feature,
    /// The declared version itself could not be parsed
    UnparseableVersion,
}

/// A populated field that the declared version does not support
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire path of the field, e.g. `body[0].items[2].style`
    pub field_path: String,
    pub required: CardVersion,
    /// The version string the document declares, verbatim
    pub declared: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Feature => write!(
                f,
                "field {} requires version {} but card version is {}",
                self.field_path, self.required, self.declared
            ),
            ViolationKind::UnparseableVersion => {
                write!(f, "card version {:?} cannot be parsed", self.declared)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Traversal state threaded through [`Walk::walk`].
#[derive(Debug)]
pub struct VersionWalker {
    declared: CardVersion,
    declared_raw: String,
    path: Vec<Segment>,
    violations: Vec<Violation>,
}

impl VersionWalker {
    fn new(declared: CardVersion, declared_raw: &str) -> Self {
        Self {
            declared,
            declared_raw: declared_raw.to_string(),
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Visit the declared fields of one entity.
    ///
    /// `values` must be in the same order as `specs`. Groups are walked at the
    /// current path level since their keys are siblings of the owner's.
    pub fn visit_fields(&mut self, specs: &'static [FieldSpec], values: &[&dyn Walk]) {
        for (spec, value) in specs.iter().zip(values) {
            match spec.role {
                FieldRole::Group => value.walk(self),
                FieldRole::Field => {
                    if value.is_empty() {
                        continue;
                    }
                    self.path.push(Segment::Key(spec.key));
                    if !self.declared.supports(spec.since) {
                        self.record(spec.since);
                    }
                    value.walk(self);
                    self.path.pop();
                }
            }
        }
    }

    /// Visit one element of a sequence
    pub fn visit_index(&mut self, index: usize, value: &dyn Walk) {
        self.path.push(Segment::Index(index));
        value.walk(self);
        self.path.pop();
    }

    fn record(&mut self, required: CardVersion) {
        self.violations.push(Violation {
            field_path: self.current_path(),
            required,
            declared: self.declared_raw.clone(),
            kind: ViolationKind::Feature,
        });
    }

    fn current_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Segment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

/// Check `entity` against a declared version string.
///
/// Pure: the entity is only read, so the result is the same on every call.
pub fn validate<T: Walk + ?Sized>(entity: &T, declared: &str) -> Vec<Violation> {
    let version = match CardVersion::parse(declared) {
        Ok(v) => v,
        Err(_) => {
            tracing::debug!(declared, "declared card version is unparseable");
            return vec![Violation {
                field_path: "version".to_string(),
                required: CardVersion::BASELINE,
                declared: declared.to_string(),
                kind: ViolationKind::UnparseableVersion,
            }];
        }
    };

    let mut walker = VersionWalker::new(version, declared);
    entity.walk(&mut walker);

    tracing::debug!(
        declared = %version,
        violations = walker.violations.len(),
        "version validation finished"
    );
    walker.violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ContainerStyle;
    use crate::model::{AdaptiveCard, ColumnSet, Container, Element, TextBlock};
    use crate::version::{V1_0, V1_2, V1_5};

    fn card(version: &str) -> AdaptiveCard {
        AdaptiveCard {
            version: version.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rtl_requires_1_5() {
        let mut doc = card("1.0");
        doc.rtl = Some(true);

        let violations = validate(&doc, "1.0");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "rtl");
        assert_eq!(violations[0].required, V1_5);
        assert_eq!(violations[0].declared, "1.0");
        assert_eq!(violations[0].kind, ViolationKind::Feature);
    }

    #[test]
    fn test_empty_fields_are_ignored() {
        let doc = card("1.0");
        assert!(validate(&doc, "1.0").is_empty());
    }

    #[test]
    fn test_nested_paths() {
        let mut doc = card("1.0");
        let mut inner = Container::default();
        inner.items.push(Element::from(TextBlock {
            text: Some("hi".to_string()),
            label_for: "name".to_string(),
            ..Default::default()
        }));
        inner.common.is_visible = Some(false);
        doc.body.push(Element::from(TextBlock::default()));
        doc.body.push(Element::from(inner));

        let paths: Vec<_> = validate(&doc, "1.0")
            .into_iter()
            .map(|v| (v.field_path, v.required))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("body[1].isVisible".to_string(), V1_2),
                ("body[1].items[0].labelFor".to_string(), V1_5),
            ]
        );
    }

    #[test]
    fn test_column_set_style_requires_1_2() {
        let mut set = ColumnSet::default();
        set.style = Some(ContainerStyle::Emphasis);
        let mut doc = card("1.1");
        doc.body.push(Element::from(set));

        let violations = validate(&doc, "1.1");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "body[0].style");
        assert_eq!(violations[0].required, V1_2);

        assert!(validate(&doc, "1.2").is_empty());
    }

    #[test]
    fn test_unparseable_version_sentinel() {
        let mut doc = card("one point five");
        doc.rtl = Some(true);

        let violations = validate(&doc, "one point five");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "version");
        assert_eq!(violations[0].required, V1_0);
        assert_eq!(violations[0].kind, ViolationKind::UnparseableVersion);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut doc = card("1.1");
        doc.rtl = Some(false);
        doc.min_height = "100px".to_string();

        let first = validate(&doc, "1.1");
        let second = validate(&doc, "1.1");
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation {
            field_path: "body[0].style".to_string(),
            required: V1_5,
            declared: "1.2".to_string(),
            kind: ViolationKind::Feature,
        };
        assert_eq!(
            violation.to_string(),
            "field body[0].style requires version 1.5 but card version is 1.2"
        );
    }
}
