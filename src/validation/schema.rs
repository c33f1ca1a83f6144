//! Structural checks of the mapping form, selected by schema version.

use serde_json::Value;

use super::report::{IssueCode, IssueContext, ValidationIssue, ValidationReport};
use crate::error::FdlError;
use crate::model::{
    AlignmentHorizontal, AlignmentVertical, Direction, Evenness, FitMethod, FitSource, Mapping,
    PreserveFromSourceCanvas,
};

/// Checks a document's mapping form against one schema version.
pub trait SchemaValidator: Send + Sync {
    /// `(major, minor)` this validator implements.
    fn version(&self) -> (u64, u64);

    /// Adds every violation found in `document` to `report`.
    fn validate(&self, document: &Mapping, report: &mut ValidationReport);
}

static VALIDATORS: &[&dyn SchemaValidator] = &[&SchemaV1_0];

/// Looks up the validator for a schema version.
pub fn schema_validator(major: u64, minor: u64) -> Result<&'static dyn SchemaValidator, FdlError> {
    VALIDATORS
        .iter()
        .copied()
        .find(|v| v.version() == (major, minor))
        .ok_or(FdlError::UnsupportedSchemaVersion { major, minor })
}

/// Built-in validator for FDL schema v1.0.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaV1_0;

impl SchemaValidator for SchemaV1_0 {
    fn version(&self) -> (u64, u64) {
        (1, 0)
    }

    fn validate(&self, document: &Mapping, report: &mut ValidationReport) {
        let mut walker = Walker { report };
        walker.document(document);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Number {
    Integer,
    Any,
}

struct Walker<'a> {
    report: &'a mut ValidationReport,
}

impl Walker<'_> {
    fn violation(&mut self, code: IssueCode, path: &str, message: String) {
        self.report.add(ValidationIssue::error(
            code,
            message,
            IssueContext::Path(path.to_string()),
        ));
    }

    fn document(&mut self, doc: &Mapping) {
        if let Some(uuid) = self.string(doc, "", "uuid") {
            if uuid::Uuid::parse_str(uuid).is_err() {
                self.violation(
                    IssueCode::InvalidUuid,
                    "uuid",
                    format!("{uuid:?} is not a valid uuid"),
                );
            }
        }
        if let Some(version) = self.object(doc, "", "version") {
            for key in ["major", "minor"] {
                self.number(version, "version", key, Number::Integer);
            }
        }
        self.string(doc, "", "fdl_creator");
        self.string(doc, "", "default_framing_intent");

        for (path, intent) in self.items(doc, "", "framing_intents") {
            self.framing_intent(&path, intent);
        }
        for (path, context) in self.items(doc, "", "contexts") {
            self.string(context, &path, "label");
            self.string(context, &path, "context_creator");
            for (canvas_path, canvas) in self.items(context, &path, "canvases") {
                self.canvas(&canvas_path, canvas);
            }
        }
        for (path, template) in self.items(doc, "", "canvas_templates") {
            self.canvas_template(&path, template);
        }
    }

    fn framing_intent(&mut self, path: &str, intent: &Mapping) {
        self.string(intent, path, "id");
        self.string(intent, path, "label");
        self.dimensions(intent, path, "aspect_ratio", Number::Integer);
        if let Some(protection) = self.number(intent, path, "protection", Number::Any) {
            if !(0.0..1.0).contains(&protection) {
                self.violation(
                    IssueCode::InvalidProtection,
                    &join(path, "protection"),
                    format!("protection {protection} must be within [0, 1)"),
                );
            }
        }
    }

    fn canvas(&mut self, path: &str, canvas: &Mapping) {
        for key in ["label", "id", "source_canvas_id"] {
            self.string(canvas, path, key);
        }
        for key in ["dimensions", "effective_dimensions", "photosite_dimensions"] {
            self.dimensions(canvas, path, key, Number::Integer);
        }
        self.dimensions(canvas, path, "physical_dimensions", Number::Any);
        self.point(canvas, path, "effective_anchor_point");
        self.positive(canvas, path, "anamorphic_squeeze");

        for (fd_path, decision) in self.items(canvas, path, "framing_decisions") {
            for key in ["label", "id", "framing_intent_id"] {
                self.string(decision, &fd_path, key);
            }
            for key in ["dimensions", "protection_dimensions"] {
                self.dimensions(decision, &fd_path, key, Number::Any);
            }
            for key in ["anchor_point", "protection_anchor_point"] {
                self.point(decision, &fd_path, key);
            }
        }
    }

    fn canvas_template(&mut self, path: &str, template: &Mapping) {
        self.string(template, path, "label");
        self.string(template, path, "id");
        self.dimensions(template, path, "target_dimensions", Number::Integer);
        self.dimensions(template, path, "maximum_dimensions", Number::Integer);
        if let Some(squeeze) = self.number(template, path, "target_anamorphic_squeeze", Number::Any) {
            if squeeze < 0.0 {
                self.violation(
                    IssueCode::SchemaViolation,
                    &join(path, "target_anamorphic_squeeze"),
                    format!("target_anamorphic_squeeze {squeeze} must not be negative"),
                );
            }
        }

        self.option(template, path, FitSource::FIELD, FitSource::OPTIONS);
        self.option(template, path, FitMethod::FIELD, FitMethod::OPTIONS);
        self.option(template, path, AlignmentVertical::FIELD, AlignmentVertical::OPTIONS);
        self.option(template, path, AlignmentHorizontal::FIELD, AlignmentHorizontal::OPTIONS);
        self.option(
            template,
            path,
            PreserveFromSourceCanvas::FIELD,
            PreserveFromSourceCanvas::OPTIONS,
        );

        if let Some(value) = template.get("pad_to_maximum") {
            if !value.is_boolean() {
                self.type_violation(&join(path, "pad_to_maximum"), "a boolean", value);
            }
        }
        if let Some(round) = self.object(template, path, "round") {
            let round_path = join(path, "round");
            self.option(round, &round_path, Evenness::FIELD, Evenness::OPTIONS);
            self.option(round, &round_path, Direction::FIELD, Direction::OPTIONS);
        }
    }

    fn type_violation(&mut self, path: &str, expected: &str, found: &Value) {
        self.violation(
            IssueCode::SchemaViolation,
            path,
            format!("expected {expected}, found {found}"),
        );
    }

    fn string<'m>(&mut self, map: &'m Mapping, path: &str, key: &str) -> Option<&'m str> {
        let value = map.get(key)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.type_violation(&join(path, key), "a string", value);
                None
            }
        }
    }

    fn object<'m>(&mut self, map: &'m Mapping, path: &str, key: &str) -> Option<&'m Mapping> {
        let value = map.get(key)?;
        match value.as_object() {
            Some(o) => Some(o),
            None => {
                self.type_violation(&join(path, key), "an object", value);
                None
            }
        }
    }

    fn number(&mut self, map: &Mapping, path: &str, key: &str, kind: Number) -> Option<f64> {
        let value = map.get(key)?;
        let valid = match kind {
            Number::Integer => value.is_i64() || value.is_u64(),
            Number::Any => value.is_number(),
        };
        if !valid {
            let expected = match kind {
                Number::Integer => "an integer",
                Number::Any => "a number",
            };
            self.type_violation(&join(path, key), expected, value);
            return None;
        }
        value.as_f64()
    }

    fn positive(&mut self, map: &Mapping, path: &str, key: &str) {
        if let Some(n) = self.number(map, path, key, Number::Any) {
            if n <= 0.0 {
                self.violation(
                    IssueCode::SchemaViolation,
                    &join(path, key),
                    format!("{key} {n} must be positive"),
                );
            }
        }
    }

    fn dimensions(&mut self, map: &Mapping, path: &str, key: &str, kind: Number) {
        let Some(dims) = self.object(map, path, key) else {
            return;
        };
        let dims_path = join(path, key);
        for axis in ["width", "height"] {
            if !dims.contains_key(axis) {
                self.violation(
                    IssueCode::MissingRequired,
                    &dims_path,
                    format!("missing required field {axis:?}"),
                );
                continue;
            }
            if let Some(n) = self.number(dims, &dims_path, axis, kind) {
                if !n.is_finite() || n <= 0.0 {
                    self.violation(
                        IssueCode::InvalidDimensions,
                        &join(&dims_path, axis),
                        format!("{axis} {n} must be positive"),
                    );
                }
            }
        }
    }

    fn point(&mut self, map: &Mapping, path: &str, key: &str) {
        let Some(point) = self.object(map, path, key) else {
            return;
        };
        let point_path = join(path, key);
        for axis in ["x", "y"] {
            if !point.contains_key(axis) {
                self.violation(
                    IssueCode::MissingRequired,
                    &point_path,
                    format!("missing required field {axis:?}"),
                );
                continue;
            }
            self.number(point, &point_path, axis, Number::Any);
        }
    }

    fn option(&mut self, map: &Mapping, path: &str, key: &str, options: &[&str]) {
        let Some(value) = self.string(map, path, key) else {
            return;
        };
        if !options.contains(&value) {
            self.violation(
                IssueCode::SchemaViolation,
                &join(path, key),
                format!(
                    "{value:?} is not a valid option for {key:?}; expected one of: {}",
                    options.join(", ")
                ),
            );
        }
    }

    /// Array items that are objects, with their paths. Non-object items and
    /// non-array values are reported.
    fn items<'m>(&mut self, map: &'m Mapping, path: &str, key: &str) -> Vec<(String, &'m Mapping)> {
        let Some(value) = map.get(key) else {
            return Vec::new();
        };
        let base = join(path, key);
        let Some(array) = value.as_array() else {
            self.type_violation(&base, "an array", value);
            return Vec::new();
        };

        let mut items = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let item_path = format!("{base}[{idx}]");
            match item.as_object() {
                Some(object) => items.push((item_path, object)),
                None => self.type_violation(&item_path, "an object", item),
            }
        }
        items
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
