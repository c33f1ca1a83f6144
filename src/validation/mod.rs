//! Document validation.
//!
//! Validation checks, in order:
//! - Identifier uniqueness inside every collection
//! - Required fields of every entity
//! - Relations between entities (source canvases, framing intents)
//! - The structure of the mapping form against the schema of the
//!   document's version
//!
//! All findings are aggregated into one [`ValidationReport`].

mod report;
mod schema;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};
pub use schema::{schema_validator, SchemaV1_0, SchemaValidator};

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{Fdl, Record, TypedCollection, FDL_SCHEMA_MAJOR, FDL_SCHEMA_MINOR};

/// Validates a document and returns a report of all issues found.
pub fn validate_fdl(fdl: &Fdl) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_required(fdl, &mut report);
    validate_framing_intents(fdl, &mut report);
    validate_contexts(fdl, &mut report);
    validate_canvas_templates(fdl, &mut report);
    validate_schema(fdl, &mut report);

    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated document"
    );
    report
}

/// Reports every identifier that occurs more than once, with its first
/// position.
fn duplicates<T: Record>(collection: &TypedCollection<T>) -> Vec<(String, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut found = Vec::new();

    for (idx, item) in collection.iter().enumerate() {
        let Some(id) = item.identifier() else {
            continue;
        };
        match seen.get(id) {
            Some(first_idx) => found.push((id.to_string(), *first_idx)),
            None => {
                seen.insert(id, idx);
            }
        }
    }
    found
}

fn missing_required<T: Record>(record: &T, context: IssueContext, report: &mut ValidationReport) {
    for field in record.check_required() {
        report.add(ValidationIssue::error(
            IssueCode::MissingRequired,
            format!("{} is missing required field {:?}", T::schema().name, field),
            context.clone(),
        ));
    }
}

fn label_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Checks required fields of every entity in the document.
fn validate_required(fdl: &Fdl, report: &mut ValidationReport) {
    missing_required(fdl, IssueContext::Document, report);

    for intent in &fdl.framing_intents {
        let context = IssueContext::FramingIntent {
            id: label_of(&intent.id),
        };
        missing_required(intent, context, report);
    }

    for ctx in &fdl.contexts {
        let label = label_of(&ctx.label);
        missing_required(ctx, IssueContext::Context { label: label.clone() }, report);

        for canvas in &ctx.canvases {
            let canvas_id = label_of(&canvas.id);
            let context = IssueContext::Canvas {
                context: label.clone(),
                id: canvas_id.clone(),
            };
            missing_required(canvas, context, report);

            for decision in &canvas.framing_decisions {
                let context = IssueContext::FramingDecision {
                    canvas: canvas_id.clone(),
                    id: label_of(&decision.id),
                };
                missing_required(decision, context, report);
            }
        }
    }

    for template in &fdl.canvas_templates {
        let context = IssueContext::CanvasTemplate {
            id: label_of(&template.id),
        };
        missing_required(template, context.clone(), report);
        if let Some(round) = &template.round {
            missing_required(round, context, report);
        }
    }
}

/// Validates framing intents and the header's default framing intent.
fn validate_framing_intents(fdl: &Fdl, report: &mut ValidationReport) {
    for (id, first_idx) in duplicates(&fdl.framing_intents) {
        report.add(ValidationIssue::error(
            IssueCode::DuplicateFramingIntentId,
            format!("Duplicate framing intent id {id:?} (first seen at index {first_idx})"),
            IssueContext::FramingIntent { id },
        ));
    }

    if let Some(default) = &fdl.default_framing_intent {
        if !fdl.framing_intents.contains(default) {
            report.add(ValidationIssue::error(
                IssueCode::UnresolvedDefaultFramingIntent,
                format!("Default framing intent {default:?} not found in framing_intents"),
                IssueContext::Document,
            ));
        }
    }
}

/// Validates contexts, their canvases and framing decisions.
fn validate_contexts(fdl: &Fdl, report: &mut ValidationReport) {
    for (label, first_idx) in duplicates(&fdl.contexts) {
        report.add(ValidationIssue::error(
            IssueCode::DuplicateContextLabel,
            format!("Duplicate context label {label:?} (first seen at index {first_idx})"),
            IssueContext::Context { label },
        ));
    }

    for ctx in &fdl.contexts {
        let label = label_of(&ctx.label);

        for (id, first_idx) in duplicates(&ctx.canvases) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateCanvasId,
                format!("Duplicate canvas id {id:?} (first seen at index {first_idx})"),
                IssueContext::Canvas {
                    context: label.clone(),
                    id,
                },
            ));
        }

        let canvas_ids: HashSet<&str> = ctx.canvases.ids().into_iter().collect();

        for canvas in &ctx.canvases {
            let canvas_id = label_of(&canvas.id);

            if let Some(source_id) = &canvas.source_canvas_id {
                if !canvas_ids.contains(source_id.as_str()) {
                    report.add(ValidationIssue::error(
                        IssueCode::UnresolvedSourceCanvas,
                        format!(
                            "Source canvas id {source_id:?} matches neither this canvas nor any other canvas in the context"
                        ),
                        IssueContext::Canvas {
                            context: label.clone(),
                            id: canvas_id.clone(),
                        },
                    ));
                }
            }

            for (id, first_idx) in duplicates(&canvas.framing_decisions) {
                report.add(ValidationIssue::error(
                    IssueCode::DuplicateFramingDecisionId,
                    format!("Duplicate framing decision id {id:?} (first seen at index {first_idx})"),
                    IssueContext::FramingDecision {
                        canvas: canvas_id.clone(),
                        id,
                    },
                ));
            }

            for decision in &canvas.framing_decisions {
                let Some(intent_id) = &decision.framing_intent_id else {
                    continue;
                };
                if !fdl.framing_intents.contains(intent_id) {
                    report.add(ValidationIssue::error(
                        IssueCode::UnresolvedFramingIntent,
                        format!("Framing intent id {intent_id:?} not found in framing_intents"),
                        IssueContext::FramingDecision {
                            canvas: canvas_id.clone(),
                            id: label_of(&decision.id),
                        },
                    ));
                }
            }
        }
    }
}

fn validate_canvas_templates(fdl: &Fdl, report: &mut ValidationReport) {
    for (id, first_idx) in duplicates(&fdl.canvas_templates) {
        report.add(ValidationIssue::error(
            IssueCode::DuplicateCanvasTemplateId,
            format!("Duplicate canvas template id {id:?} (first seen at index {first_idx})"),
            IssueContext::CanvasTemplate { id },
        ));
    }
}

/// Runs the schema validator for the document's version over its mapping
/// form. Skipped when required fields are missing, since the mapping form
/// cannot be built; those are already reported.
fn validate_schema(fdl: &Fdl, report: &mut ValidationReport) {
    let version = fdl.version.unwrap_or_default();
    let major = version.major.unwrap_or(FDL_SCHEMA_MAJOR);
    let minor = version.minor.unwrap_or(FDL_SCHEMA_MINOR);

    let validator = match schema_validator(major, minor) {
        Ok(validator) => validator,
        Err(e) => {
            report.add(ValidationIssue::error(
                IssueCode::UnsupportedSchemaVersion,
                e.to_string(),
                IssueContext::Document,
            ));
            return;
        }
    };

    if !report.has(IssueCode::MissingRequired) {
        match fdl.to_mapping() {
            Ok(mapping) => validator.validate(&mapping, report),
            Err(e) => report.add(ValidationIssue::error(
                IssueCode::SchemaViolation,
                e.to_string(),
                IssueContext::Document,
            )),
        }
    }
}
