//! Tests for the operation descriptor table.

use std::collections::HashSet;

use serde_json::{json, Value};
use sheets_gateway::operations::{find_operation, operations};
use sheets_gateway::requests::JsonObject;

/// A well-typed sample value for a body field, chosen by name.
fn sample_value(field: &str) -> Value {
    match field {
        "sheet_id" | "index" | "chart_id" | "object_id" | "source_sheet_id" | "length"
        | "filter_id" | "protected_range_id" | "slicer_id" | "new_index"
        | "insert_sheet_index" | "new_sheet_id" => json!(1),
        "fields_string" | "dimension" | "named_range_id" | "merge_type" | "paste_type"
        | "paste_orientation" | "new_sheet_name" => json!("*"),
        "rows_data_list" | "sort_specs_list" => json!([]),
        "inherit_from_before" | "use_alternate_series" => json!(true),
        _ => json!({
            "sheetId": 0,
            "filterId": 1,
            "protectedRangeId": 2,
            "namedRangeId": "range-1"
        }),
    }
}

fn required_only_args(name: &str) -> JsonObject {
    let descriptor = find_operation(name).unwrap();
    descriptor
        .required_fields()
        .map(|field| (field.to_string(), sample_value(field)))
        .collect()
}

/// Keys of the nested request object when only required fields are given,
/// with defaults filled in.
const NESTED_KEYS: &[(&str, &[&str])] = &[
    ("repeatCell", &["cell", "fields", "range"]),
    ("updateCells", &["fields", "range", "rows"]),
    ("updateBorders", &["range"]),
    ("mergeCells", &["mergeType", "range"]),
    ("unmergeCells", &["range"]),
    ("addConditionalFormatRule", &["index", "rule"]),
    ("updateConditionalFormatRule", &["index", "rule"]),
    ("deleteConditionalFormatRule", &["index", "sheetId"]),
    ("addChart", &["chart"]),
    ("updateChartSpec", &["chartId", "spec"]),
    ("deleteEmbeddedObject", &["objectId"]),
    ("updateSheetProperties", &["fields", "properties"]),
    ("deleteSheet", &["sheetId"]),
    ("addSheet", &["properties"]),
    ("duplicateSheet", &["sourceSheetId"]),
    ("updateDimensionProperties", &["fields", "properties", "range"]),
    ("deleteDimension", &["range"]),
    ("appendDimension", &["dimension", "length", "sheetId"]),
    ("insertDimension", &["inheritFromBefore", "range"]),
    ("autoResizeDimensions", &["dimensions"]),
    ("sortRange", &["range", "sortSpecs"]),
    ("setBasicFilter", &["filter"]),
    ("clearBasicFilter", &["sheetId"]),
    ("addFilterView", &["filter"]),
    ("updateFilterView", &["fields", "filter"]),
    ("deleteFilterView", &["filterId"]),
    ("duplicateFilterView", &["filterId"]),
    ("setDataValidation", &["range", "rule"]),
    ("addProtectedRange", &["protectedRange"]),
    ("updateProtectedRange", &["fields", "protectedRange"]),
    ("deleteProtectedRange", &["protectedRangeId"]),
    (
        "findReplace",
        &["filterId", "namedRangeId", "protectedRangeId", "sheetId"],
    ),
    ("autoFill", &["sourceAndDestination", "useAlternateSeries"]),
    ("cutPaste", &["destination", "pasteType", "source"]),
    (
        "copyPaste",
        &["destination", "pasteOrientation", "pasteType", "source"],
    ),
    ("addNamedRange", &["namedRange"]),
    ("updateNamedRange", &["fields", "namedRange"]),
    ("deleteNamedRange", &["namedRangeId"]),
    ("addSlicer", &["slicer"]),
    ("updateSlicerSpec", &["fields", "slicerId", "spec"]),
];

mod table {
    use super::*;

    #[test]
    fn names_are_unique_and_routable() {
        let mut seen = HashSet::new();
        for descriptor in operations() {
            assert!(seen.insert(descriptor.name), "duplicate {}", descriptor.name);
            assert!(std::ptr::eq(
                find_operation(descriptor.name).unwrap(),
                descriptor
            ));
        }
        assert_eq!(seen.len(), 40);
    }

    #[test]
    fn field_names_are_unique_per_operation() {
        for descriptor in operations() {
            let names: HashSet<_> = descriptor.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), descriptor.fields.len(), "{}", descriptor.name);
        }
    }

    #[test]
    fn descriptions_drive_success_messages() {
        let descriptor = find_operation("findReplace").unwrap();
        assert_eq!(
            descriptor.success_message(),
            "Find and replace operation successful."
        );
    }
}

mod building {
    use super::*;

    #[test]
    fn required_fields_alone_build_the_tagged_request() {
        for descriptor in operations() {
            if descriptor.name == "updateCells" {
                continue;
            }
            let request = descriptor
                .build(required_only_args(descriptor.name))
                .unwrap_or_else(|e| panic!("{} failed: {}", descriptor.name, e));
            let value = serde_json::to_value(request).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1, "{}", descriptor.name);
            assert!(
                object.contains_key(descriptor.name),
                "{} serialized as {}",
                descriptor.name,
                value
            );
        }
    }

    #[test]
    fn nested_object_carries_exactly_the_supplied_fields() {
        assert_eq!(NESTED_KEYS.len(), operations().len());
        for (name, expected) in NESTED_KEYS {
            let descriptor = find_operation(name).unwrap_or_else(|| panic!("no {}", name));
            let mut args = required_only_args(name);
            if *name == "updateCells" {
                args.insert("range_dict".to_string(), sample_value("range_dict"));
            }
            let value = serde_json::to_value(descriptor.build(args).unwrap()).unwrap();
            let mut keys: Vec<&str> = value[*name]
                .as_object()
                .unwrap_or_else(|| panic!("{} serialized as {}", name, value))
                .keys()
                .map(String::as_str)
                .collect();
            keys.sort_unstable();
            assert_eq!(keys, *expected, "{}", name);
        }
    }

    #[test]
    fn update_cells_empty_start_counts_as_absent() {
        let descriptor = find_operation("updateCells").unwrap();
        let mut args = required_only_args("updateCells");
        args.insert("start_coordinate_dict".to_string(), json!({}));
        assert!(descriptor.build(args.clone()).is_err());

        args.insert("range_dict".to_string(), json!({"sheetId": 0}));
        let value = serde_json::to_value(descriptor.build(args).unwrap()).unwrap();
        assert!(value["updateCells"].get("start").is_none());
        assert_eq!(value["updateCells"]["range"]["sheetId"], 0);
    }

    #[test]
    fn add_sheet_null_properties_become_empty() {
        let descriptor = find_operation("addSheet").unwrap();
        let mut args = JsonObject::new();
        args.insert("properties".to_string(), Value::Null);
        assert_eq!(
            serde_json::to_value(descriptor.build(args).unwrap()).unwrap(),
            json!({"addSheet": {"properties": {}}})
        );
    }

    #[test]
    fn empty_border_sides_are_omitted() {
        let descriptor = find_operation("updateBorders").unwrap();
        let mut args = required_only_args("updateBorders");
        args.insert("top".to_string(), json!({}));
        args.insert("bottom".to_string(), json!({"style": "SOLID"}));
        let value = serde_json::to_value(descriptor.build(args).unwrap()).unwrap();
        assert!(value["updateBorders"].get("top").is_none());
        assert_eq!(value["updateBorders"]["bottom"]["style"], "SOLID");
    }

    #[test]
    fn update_cells_needs_an_address() {
        let descriptor = find_operation("updateCells").unwrap();
        assert!(descriptor.build(required_only_args("updateCells")).is_err());

        let mut args = required_only_args("updateCells");
        args.insert("range_dict".to_string(), sample_value("range_dict"));
        let value = serde_json::to_value(descriptor.build(args).unwrap()).unwrap();
        assert!(value["updateCells"]["range"].is_object());
    }

    #[test]
    fn optional_fields_are_forwarded() {
        let descriptor = find_operation("duplicateSheet").unwrap();
        let body: JsonObject = json!({
            "spreadsheet_id": "S1",
            "refresh_token": "R1",
            "source_sheet_id": 7,
            "new_sheet_name": "Copy",
            "unrelated": [1, 2, 3]
        })
        .as_object()
        .cloned()
        .unwrap();

        let request = descriptor.build(descriptor.bind_arguments(&body)).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"duplicateSheet": {"sourceSheetId": 7, "newSheetName": "Copy"}})
        );
    }

    #[test]
    fn paste_defaults() {
        let descriptor = find_operation("copyPaste").unwrap();
        let value = serde_json::to_value(
            descriptor
                .build(required_only_args("copyPaste"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(value["copyPaste"]["pasteType"], "PASTE_NORMAL");
        assert_eq!(value["copyPaste"]["pasteOrientation"], "NORMAL");
    }
}
