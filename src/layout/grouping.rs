//! Field grouping for tab and accordion layouts.
//!
//! Explicit grouping is the primary path: fields that declare a `group` UI
//! hint are collected under their declared titles, in first-appearance
//! order. Only when *no* field in the model declares a group does the
//! best-effort keyword heuristic apply.
//!
//! # The Heuristic Is Best-Effort
//!
//! The fallback matches field names against two fixed keyword lists
//! (personal and contact vocabulary) using subsequence matching, and buckets
//! everything else under "Additional". It is deterministic but inherently
//! fuzzy; callers who care about grouping should declare `group` hints and
//! not rely on it.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::schema::metadata::{FieldDescriptor, SchemaMetadata};

/// Keywords whose presence suggests a personal-information field.
const PERSONAL_KEYWORDS: &[&str] = &["name", "username", "password", "bio", "role"];

/// Keywords whose presence suggests a contact-details field.
const CONTACT_KEYWORDS: &[&str] = &["email", "phone", "address", "subject", "message"];

/// Group titles produced by the heuristic.
const PERSONAL_TITLE: &str = "Personal Info";
const CONTACT_TITLE: &str = "Contact Details";
const OTHER_TITLE: &str = "Additional";

/// Title used when the heuristic produces no groups at all.
const FALLBACK_TITLE: &str = "Form Fields";

/// Title collecting ungrouped fields when explicit groups are in play.
const UNGROUPED_TITLE: &str = "Other";

/// Partitions a schema's fields into ordered `(title, fields)` groups.
///
/// Uses declared `group` hints when any field carries one; otherwise falls
/// back to the keyword heuristic. Always returns at least one group when the
/// schema has at least one field, and group order is deterministic for a
/// given schema.
pub fn group_fields(metadata: &SchemaMetadata) -> Vec<(String, Vec<&FieldDescriptor>)> {
    let has_explicit = metadata.fields.iter().any(|f| f.hints.group.is_some());
    if has_explicit {
        group_by_declared(metadata)
    } else {
        group_by_keywords(metadata)
    }
}

/// Groups by declared `group` hints, titles in first-appearance order.
/// Fields without a hint trail in an "Other" group.
fn group_by_declared(metadata: &SchemaMetadata) -> Vec<(String, Vec<&FieldDescriptor>)> {
    let mut groups: Vec<(String, Vec<&FieldDescriptor>)> = Vec::new();
    let mut ungrouped: Vec<&FieldDescriptor> = Vec::new();

    for field in &metadata.fields {
        match &field.hints.group {
            Some(title) => {
                if let Some(entry) = groups.iter_mut().find(|(t, _)| t == title) {
                    entry.1.push(field);
                } else {
                    groups.push((title.clone(), vec![field]));
                }
            }
            None => ungrouped.push(field),
        }
    }

    if !ungrouped.is_empty() {
        groups.push((UNGROUPED_TITLE.to_string(), ungrouped));
    }
    groups
}

/// Best-effort keyword grouping for models with no declared groups.
fn group_by_keywords(metadata: &SchemaMetadata) -> Vec<(String, Vec<&FieldDescriptor>)> {
    let matcher = SkimMatcherV2::default();
    let mut personal: Vec<&FieldDescriptor> = Vec::new();
    let mut contact: Vec<&FieldDescriptor> = Vec::new();
    let mut other: Vec<&FieldDescriptor> = Vec::new();

    for field in &metadata.fields {
        let name = field.name.to_lowercase();
        if matches_any(&matcher, &name, PERSONAL_KEYWORDS) {
            personal.push(field);
        } else if matches_any(&matcher, &name, CONTACT_KEYWORDS) {
            contact.push(field);
        } else {
            other.push(field);
        }
    }

    let mut groups = Vec::new();
    if !personal.is_empty() {
        groups.push((PERSONAL_TITLE.to_string(), personal));
    }
    if !contact.is_empty() {
        groups.push((CONTACT_TITLE.to_string(), contact));
    }
    if !other.is_empty() {
        groups.push((OTHER_TITLE.to_string(), other));
    }

    if groups.is_empty() && !metadata.fields.is_empty() {
        groups.push((FALLBACK_TITLE.to_string(), metadata.fields.iter().collect()));
    }
    groups
}

fn matches_any(matcher: &SkimMatcherV2, field_name: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|keyword| matcher.fuzzy_match(field_name, keyword).is_some())
}
