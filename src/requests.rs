//! Request builders for `spreadsheets.batchUpdate`.
//!
//! Every builder is a pure function producing one [`Request`]. A `Request`
//! serializes externally tagged, so each object carries exactly one operation
//! key, e.g. `{"mergeCells": {"range": {...}, "mergeType": "MERGE_ALL"}}`.
//! Nested Sheets API objects (ranges, formats, rules) are passed through as
//! JSON objects.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{GatewayError, Result};

/// A JSON object passed through to the Sheets API unchanged.
pub type JsonObject = Map<String, Value>;

/// One entry of a batch update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    RepeatCell(RepeatCellRequest),
    UpdateCells(UpdateCellsRequest),
    UpdateBorders(UpdateBordersRequest),
    MergeCells(MergeCellsRequest),
    UnmergeCells(RangeRequest),
    AddConditionalFormatRule(AddConditionalFormatRuleRequest),
    UpdateConditionalFormatRule(UpdateConditionalFormatRuleRequest),
    DeleteConditionalFormatRule(DeleteConditionalFormatRuleRequest),
    AddChart(AddChartRequest),
    UpdateChartSpec(UpdateChartSpecRequest),
    DeleteEmbeddedObject(DeleteEmbeddedObjectRequest),
    UpdateSheetProperties(UpdateSheetPropertiesRequest),
    DeleteSheet(SheetIdRequest),
    AddSheet(AddSheetRequest),
    DuplicateSheet(DuplicateSheetRequest),
    UpdateDimensionProperties(UpdateDimensionPropertiesRequest),
    DeleteDimension(RangeRequest),
    AppendDimension(AppendDimensionRequest),
    InsertDimension(InsertDimensionRequest),
    AutoResizeDimensions(AutoResizeDimensionsRequest),
    SortRange(SortRangeRequest),
    SetBasicFilter(FilterRequest),
    ClearBasicFilter(SheetIdRequest),
    AddFilterView(FilterRequest),
    UpdateFilterView(UpdateFilterViewRequest),
    DeleteFilterView(FilterIdRequest),
    DuplicateFilterView(FilterIdRequest),
    SetDataValidation(SetDataValidationRequest),
    AddProtectedRange(ProtectedRangeRequest),
    UpdateProtectedRange(UpdateProtectedRangeRequest),
    DeleteProtectedRange(DeleteProtectedRangeRequest),
    FindReplace(JsonObject),
    AutoFill(AutoFillRequest),
    CutPaste(CutPasteRequest),
    CopyPaste(CopyPasteRequest),
    AddNamedRange(NamedRangeRequest),
    UpdateNamedRange(UpdateNamedRangeRequest),
    DeleteNamedRange(DeleteNamedRangeRequest),
    AddSlicer(AddSlicerRequest),
    UpdateSlicerSpec(UpdateSlicerSpecRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRequest {
    pub range: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetIdRequest {
    pub sheet_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterIdRequest {
    pub filter_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRequest {
    pub filter: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatCellRequest {
    pub range: JsonObject,
    pub cell: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateCellsRequest {
    pub rows: Vec<Value>,
    pub fields: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Borders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_horizontal: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_vertical: Option<JsonObject>,
}

impl Borders {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn without_empty_sides(self) -> Self {
        let side = |s: Option<JsonObject>| s.filter(|s| !s.is_empty());
        Self {
            top: side(self.top),
            bottom: side(self.bottom),
            left: side(self.left),
            right: side(self.right),
            inner_horizontal: side(self.inner_horizontal),
            inner_vertical: side(self.inner_vertical),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateBordersRequest {
    pub range: JsonObject,
    #[serde(flatten)]
    pub borders: Borders,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCellsRequest {
    pub range: JsonObject,
    pub merge_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddConditionalFormatRuleRequest {
    pub rule: JsonObject,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConditionalFormatRuleRequest {
    pub rule: JsonObject,
    pub index: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConditionalFormatRuleRequest {
    pub sheet_id: i64,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedChart {
    pub spec: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddChartRequest {
    pub chart: EmbeddedChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChartSpecRequest {
    pub chart_id: i64,
    pub spec: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmbeddedObjectRequest {
    pub object_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSheetPropertiesRequest {
    pub properties: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddSheetRequest {
    pub properties: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSheetRequest {
    pub source_sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_sheet_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_sheet_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_sheet_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateDimensionPropertiesRequest {
    pub range: JsonObject,
    pub properties: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendDimensionRequest {
    pub sheet_id: i64,
    pub dimension: String,
    pub length: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDimensionRequest {
    pub range: JsonObject,
    pub inherit_from_before: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoResizeDimensionsRequest {
    pub dimensions: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRangeRequest {
    pub range: JsonObject,
    pub sort_specs: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateFilterViewRequest {
    pub filter: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetDataValidationRequest {
    pub range: JsonObject,
    pub rule: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedRangeRequest {
    pub protected_range: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProtectedRangeRequest {
    pub protected_range: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProtectedRangeRequest {
    pub protected_range_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFillRequest {
    pub source_and_destination: JsonObject,
    pub use_alternate_series: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutPasteRequest {
    pub source: JsonObject,
    pub destination: JsonObject,
    pub paste_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPasteRequest {
    pub source: JsonObject,
    pub destination: JsonObject,
    pub paste_type: String,
    pub paste_orientation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRangeRequest {
    pub named_range: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNamedRangeRequest {
    pub named_range: JsonObject,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNamedRangeRequest {
    pub named_range_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddSlicerRequest {
    pub slicer: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlicerSpecRequest {
    pub slicer_id: i64,
    pub spec: JsonObject,
    pub fields: String,
}

/// Fails unless `object` carries the identifier `key`.
fn require_key(object: &JsonObject, key: &str, what: &str, operation: &str) -> Result<()> {
    if object.contains_key(key) {
        Ok(())
    } else {
        Err(GatewayError::validation(format!(
            "{} must contain '{}' for {}.",
            what, key, operation
        )))
    }
}

pub fn build_repeat_cell_request(range: JsonObject, cell: JsonObject, fields: &str) -> Request {
    Request::RepeatCell(RepeatCellRequest {
        range,
        cell,
        fields: fields.to_string(),
    })
}

/// Exactly one of `start` and `range` must be given. An empty object counts
/// as not given.
pub fn build_update_cells_request(
    rows: Vec<Value>,
    fields: &str,
    start: Option<JsonObject>,
    range: Option<JsonObject>,
) -> Result<Request> {
    let start = start.filter(|s| !s.is_empty());
    let range = range.filter(|r| !r.is_empty());
    match (&start, &range) {
        (Some(_), Some(_)) => Err(GatewayError::validation(
            "Use either start_coordinate_dict or range_dict for updateCells, not both.",
        )),
        (None, None) => Err(GatewayError::validation(
            "Either start_coordinate_dict or range_dict is required for updateCells.",
        )),
        _ => Ok(Request::UpdateCells(UpdateCellsRequest {
            rows,
            fields: fields.to_string(),
            start,
            range,
        })),
    }
}

/// Empty border sides are dropped.
pub fn build_update_borders_request(range: JsonObject, borders: Borders) -> Request {
    let borders = borders.without_empty_sides();
    if borders.is_empty() {
        warn!("updateBorders built with a range but no border specifications");
    }
    Request::UpdateBorders(UpdateBordersRequest { range, borders })
}

pub fn build_merge_cells_request(range: JsonObject, merge_type: &str) -> Request {
    Request::MergeCells(MergeCellsRequest {
        range,
        merge_type: merge_type.to_string(),
    })
}

pub fn build_unmerge_cells_request(range: JsonObject) -> Request {
    Request::UnmergeCells(RangeRequest { range })
}

pub fn build_add_conditional_format_rule_request(rule: JsonObject, index: i64) -> Request {
    Request::AddConditionalFormatRule(AddConditionalFormatRuleRequest { rule, index })
}

pub fn build_update_conditional_format_rule_request(
    rule: JsonObject,
    index: i64,
    new_index: Option<i64>,
) -> Request {
    Request::UpdateConditionalFormatRule(UpdateConditionalFormatRuleRequest {
        rule,
        index,
        new_index,
    })
}

pub fn build_delete_conditional_format_rule_request(sheet_id: i64, index: i64) -> Request {
    Request::DeleteConditionalFormatRule(DeleteConditionalFormatRuleRequest { sheet_id, index })
}

pub fn build_add_chart_request(spec: JsonObject) -> Request {
    Request::AddChart(AddChartRequest {
        chart: EmbeddedChart { spec },
    })
}

pub fn build_update_chart_spec_request(chart_id: i64, spec: JsonObject) -> Request {
    Request::UpdateChartSpec(UpdateChartSpecRequest { chart_id, spec })
}

/// Deletes charts, images and other embedded objects.
pub fn build_delete_embedded_object_request(object_id: i64) -> Request {
    Request::DeleteEmbeddedObject(DeleteEmbeddedObjectRequest { object_id })
}

/// `properties` must carry `sheetId`.
pub fn build_update_sheet_properties_request(
    properties: JsonObject,
    fields: &str,
) -> Result<Request> {
    require_key(&properties, "sheetId", "properties_dict", "updateSheetProperties")?;
    Ok(Request::UpdateSheetProperties(UpdateSheetPropertiesRequest {
        properties,
        fields: fields.to_string(),
    }))
}

pub fn build_delete_sheet_request(sheet_id: i64) -> Request {
    Request::DeleteSheet(SheetIdRequest { sheet_id })
}

/// Empty properties let the API pick the title and id.
pub fn build_add_sheet_request(properties: JsonObject) -> Request {
    Request::AddSheet(AddSheetRequest { properties })
}

pub fn build_duplicate_sheet_request(
    source_sheet_id: i64,
    insert_sheet_index: Option<i64>,
    new_sheet_id: Option<i64>,
    new_sheet_name: Option<String>,
) -> Request {
    Request::DuplicateSheet(DuplicateSheetRequest {
        source_sheet_id,
        insert_sheet_index,
        new_sheet_id,
        new_sheet_name: new_sheet_name.filter(|name| !name.is_empty()),
    })
}

/// `fields` names the dimension properties to update and must not be empty.
pub fn build_update_dimension_properties_request(
    range: JsonObject,
    properties: JsonObject,
    fields: &str,
) -> Result<Request> {
    if fields.trim().is_empty() {
        return Err(GatewayError::validation(
            "fields_string must specify which dimension properties to update.",
        ));
    }
    Ok(Request::UpdateDimensionProperties(
        UpdateDimensionPropertiesRequest {
            range,
            properties,
            fields: fields.to_string(),
        },
    ))
}

pub fn build_delete_dimension_request(range: JsonObject) -> Request {
    Request::DeleteDimension(RangeRequest { range })
}

pub fn build_append_dimension_request(sheet_id: i64, dimension: &str, length: i64) -> Request {
    Request::AppendDimension(AppendDimensionRequest {
        sheet_id,
        dimension: dimension.to_string(),
        length,
    })
}

pub fn build_insert_dimension_request(range: JsonObject, inherit_from_before: bool) -> Request {
    Request::InsertDimension(InsertDimensionRequest {
        range,
        inherit_from_before,
    })
}

pub fn build_auto_resize_dimensions_request(dimensions: JsonObject) -> Request {
    Request::AutoResizeDimensions(AutoResizeDimensionsRequest { dimensions })
}

pub fn build_sort_range_request(range: JsonObject, sort_specs: Vec<Value>) -> Request {
    Request::SortRange(SortRangeRequest { range, sort_specs })
}

/// `filter` is a complete `BasicFilter` object.
pub fn build_set_basic_filter_request(filter: JsonObject) -> Request {
    Request::SetBasicFilter(FilterRequest { filter })
}

pub fn build_clear_basic_filter_request(sheet_id: i64) -> Request {
    Request::ClearBasicFilter(SheetIdRequest { sheet_id })
}

pub fn build_add_filter_view_request(filter: JsonObject) -> Request {
    Request::AddFilterView(FilterRequest { filter })
}

/// `filter` must carry `filterId`.
pub fn build_update_filter_view_request(filter: JsonObject, fields: &str) -> Result<Request> {
    require_key(&filter, "filterId", "filter_view_object", "updateFilterView")?;
    Ok(Request::UpdateFilterView(UpdateFilterViewRequest {
        filter,
        fields: fields.to_string(),
    }))
}

pub fn build_delete_filter_view_request(filter_id: i64) -> Request {
    Request::DeleteFilterView(FilterIdRequest { filter_id })
}

/// The new filter's id and sheet come back in the reply, not the request.
pub fn build_duplicate_filter_view_request(filter_id: i64) -> Request {
    Request::DuplicateFilterView(FilterIdRequest { filter_id })
}

pub fn build_set_data_validation_request(range: JsonObject, rule: JsonObject) -> Request {
    Request::SetDataValidation(SetDataValidationRequest { range, rule })
}

pub fn build_add_protected_range_request(protected_range: JsonObject) -> Request {
    Request::AddProtectedRange(ProtectedRangeRequest { protected_range })
}

/// `protected_range` must carry `protectedRangeId`.
pub fn build_update_protected_range_request(
    protected_range: JsonObject,
    fields: &str,
) -> Result<Request> {
    require_key(
        &protected_range,
        "protectedRangeId",
        "protected_range_object",
        "updateProtectedRange",
    )?;
    Ok(Request::UpdateProtectedRange(UpdateProtectedRangeRequest {
        protected_range,
        fields: fields.to_string(),
    }))
}

pub fn build_delete_protected_range_request(protected_range_id: i64) -> Request {
    Request::DeleteProtectedRange(DeleteProtectedRangeRequest { protected_range_id })
}

/// `details` is the full `FindReplaceRequest` body.
pub fn build_find_replace_request(details: JsonObject) -> Request {
    Request::FindReplace(details)
}

pub fn build_auto_fill_request(
    source_and_destination: JsonObject,
    use_alternate_series: bool,
) -> Request {
    Request::AutoFill(AutoFillRequest {
        source_and_destination,
        use_alternate_series,
    })
}

pub fn build_cut_paste_request(
    source: JsonObject,
    destination: JsonObject,
    paste_type: &str,
) -> Request {
    Request::CutPaste(CutPasteRequest {
        source,
        destination,
        paste_type: paste_type.to_string(),
    })
}

pub fn build_copy_paste_request(
    source: JsonObject,
    destination: JsonObject,
    paste_type: &str,
    paste_orientation: &str,
) -> Request {
    Request::CopyPaste(CopyPasteRequest {
        source,
        destination,
        paste_type: paste_type.to_string(),
        paste_orientation: paste_orientation.to_string(),
    })
}

pub fn build_add_named_range_request(named_range: JsonObject) -> Request {
    Request::AddNamedRange(NamedRangeRequest { named_range })
}

/// `named_range` must carry `namedRangeId`.
pub fn build_update_named_range_request(named_range: JsonObject, fields: &str) -> Result<Request> {
    require_key(&named_range, "namedRangeId", "named_range_object", "updateNamedRange")?;
    Ok(Request::UpdateNamedRange(UpdateNamedRangeRequest {
        named_range,
        fields: fields.to_string(),
    }))
}

pub fn build_delete_named_range_request(named_range_id: &str) -> Request {
    Request::DeleteNamedRange(DeleteNamedRangeRequest {
        named_range_id: named_range_id.to_string(),
    })
}

/// `slicer` is a `Slicer` object including its `spec`.
pub fn build_add_slicer_request(slicer: JsonObject) -> Request {
    Request::AddSlicer(AddSlicerRequest { slicer })
}

pub fn build_update_slicer_spec_request(
    slicer_id: i64,
    spec: JsonObject,
    fields: &str,
) -> Request {
    Request::UpdateSlicerSpec(UpdateSlicerSpecRequest {
        slicer_id,
        spec,
        fields: fields.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn grid_range() -> JsonObject {
        object(json!({
            "sheetId": 1,
            "startRowIndex": 0,
            "endRowIndex": 1,
            "startColumnIndex": 0,
            "endColumnIndex": 2
        }))
    }

    #[test]
    fn test_merge_cells() {
        let request = build_merge_cells_request(grid_range(), "MERGE_ALL");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "mergeCells": {
                    "range": {
                        "sheetId": 1,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": 2
                    },
                    "mergeType": "MERGE_ALL"
                }
            })
        );
    }

    #[test]
    fn test_update_cells_requires_exactly_one_address() {
        let rows = vec![json!({"values": [{"userEnteredValue": {"stringValue": "x"}}]})];

        let both = build_update_cells_request(
            rows.clone(),
            "userEnteredValue",
            Some(object(json!({"sheetId": 0}))),
            Some(grid_range()),
        );
        assert!(matches!(both, Err(GatewayError::Validation(_))));

        let neither = build_update_cells_request(rows.clone(), "userEnteredValue", None, None);
        assert!(matches!(neither, Err(GatewayError::Validation(_))));

        let start = build_update_cells_request(
            rows,
            "userEnteredValue",
            Some(object(json!({"sheetId": 0, "rowIndex": 2}))),
            None,
        )
        .unwrap();
        let value = serde_json::to_value(start).unwrap();
        assert_eq!(value["updateCells"]["start"]["rowIndex"], 2);
        assert!(value["updateCells"].get("range").is_none());
    }

    #[test]
    fn test_update_cells_empty_address_counts_as_absent() {
        let with_range = build_update_cells_request(
            vec![],
            "*",
            Some(JsonObject::new()),
            Some(object(json!({"sheetId": 0}))),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(with_range).unwrap(),
            json!({"updateCells": {"rows": [], "fields": "*", "range": {"sheetId": 0}}})
        );

        let empty_only = build_update_cells_request(vec![], "*", Some(JsonObject::new()), None);
        let err = empty_only.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        assert!(err.to_string().starts_with("Either start_coordinate_dict"));
    }

    #[test]
    fn test_update_borders_omits_unset_sides() {
        let solid = object(json!({"style": "SOLID"}));
        let request = build_update_borders_request(
            grid_range(),
            Borders {
                top: Some(solid.clone()),
                inner_horizontal: Some(solid),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(request).unwrap();
        let body = value["updateBorders"].as_object().unwrap();
        let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["innerHorizontal", "range", "top"]);
    }

    #[test]
    fn test_update_borders_drops_empty_sides() {
        let request = build_update_borders_request(
            grid_range(),
            Borders {
                top: Some(JsonObject::new()),
                left: Some(object(json!({"style": "DOTTED"}))),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(request).unwrap();
        assert!(value["updateBorders"].get("top").is_none());
        assert_eq!(value["updateBorders"]["left"]["style"], "DOTTED");
    }

    #[test]
    fn test_update_sheet_properties_requires_sheet_id() {
        let err = build_update_sheet_properties_request(object(json!({"title": "x"})), "title")
            .unwrap_err();
        assert!(err.to_string().contains("sheetId"));

        let ok = build_update_sheet_properties_request(
            object(json!({"sheetId": 3, "title": "x"})),
            "title",
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_identifier_preconditions() {
        let empty = JsonObject::new();
        assert!(build_update_named_range_request(empty.clone(), "*").is_err());
        assert!(build_update_protected_range_request(empty.clone(), "*").is_err());
        assert!(build_update_filter_view_request(empty, "*").is_err());

        let named = object(json!({"namedRangeId": "n"}));
        assert!(build_update_named_range_request(named, "*").is_ok());
        let protected = object(json!({"protectedRangeId": 7}));
        assert!(build_update_protected_range_request(protected, "*").is_ok());
        assert!(build_update_filter_view_request(object(json!({"filterId": 9})), "*").is_ok());
    }

    #[test]
    fn test_update_dimension_properties_requires_fields() {
        let err = build_update_dimension_properties_request(
            grid_range(),
            object(json!({"pixelSize": 40})),
            "",
        );
        assert!(matches!(err, Err(GatewayError::Validation(_))));
    }

    #[test]
    fn test_add_chart_nests_spec() {
        let request = build_add_chart_request(object(json!({"title": "Sales"})));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"addChart": {"chart": {"spec": {"title": "Sales"}}}})
        );
    }

    #[test]
    fn test_find_replace_passes_details_through() {
        let details = object(json!({"find": "a", "replacement": "b", "allSheets": true}));
        let request = build_find_replace_request(details.clone());
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"findReplace": Value::Object(details)})
        );
    }

    #[test]
    fn test_duplicate_sheet_skips_unset_fields() {
        let request = build_duplicate_sheet_request(5, Some(0), None, Some(String::new()));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"duplicateSheet": {"sourceSheetId": 5, "insertSheetIndex": 0}})
        );
    }

    #[test]
    fn test_delete_sheet() {
        assert_eq!(
            serde_json::to_value(build_delete_sheet_request(42)).unwrap(),
            json!({"deleteSheet": {"sheetId": 42}})
        );
    }
}
