//! Field-name translation between the store's snake_case records and the
//! camelCase shape dashboard clients consume.
//!
//! Only the names in [`FIELD_MAP`] are renamed; everything else passes
//! through untouched so single-word fields (`id`, `stage`, `value`) keep
//! their names on both sides.

use serde_json::{Map, Value};

/// `(wire, view)` pairs.
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("created_at", "createdAt"),
    ("closed_at", "closedAt"),
    ("updated_at", "updatedAt"),
    ("revenue_splits", "revenueSplits"),
    ("post_date", "postDate"),
    ("start_date", "startDate"),
    ("program_type", "programType"),
    ("enrollment_count", "enrollmentCount"),
    ("guest_name", "guestName"),
    ("episode_number", "episodeNumber"),
    ("record_date", "recordDate"),
    ("client_name", "clientName"),
    ("due_date", "dueDate"),
    ("display_name", "displayName"),
    ("color_class", "colorClass"),
    ("growth_rate", "growthRate"),
    ("won_count", "wonCount"),
    // dashboard read models
    ("item_id", "itemId"),
    ("stage_count", "stageCount"),
    ("total_items", "totalItems"),
    ("total_value", "totalValue"),
    ("window_revenue", "windowRevenue"),
    ("generated_at", "generatedAt"),
];

pub fn wire_to_view(name: &str) -> &str {
    FIELD_MAP
        .iter()
        .find(|(wire, _)| *wire == name)
        .map(|(_, view)| *view)
        .unwrap_or(name)
}

pub fn view_to_wire(name: &str) -> &str {
    FIELD_MAP
        .iter()
        .find(|(_, view)| *view == name)
        .map(|(wire, _)| *wire)
        .unwrap_or(name)
}

fn rename_keys(value: Value, rename: fn(&str) -> &str) -> Value {
    match value {
        Value::Object(map) => {
            let renamed: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (rename(k.as_str()).to_string(), rename_keys(v, rename)))
                .collect();
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| rename_keys(v, rename))
                .collect(),
        ),
        other => other,
    }
}

/// Rename store keys to their camelCase view names, recursively.
pub fn to_view(value: Value) -> Value {
    rename_keys(value, wire_to_view)
}

/// Rename camelCase view keys back to store names, recursively.
pub fn to_wire(value: Value) -> Value {
    rename_keys(value, view_to_wire)
}
