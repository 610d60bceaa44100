//! Descriptor table for the `POST /sheets/op/{operation}` endpoints.
//!
//! Each [`OperationDescriptor`] names one batch update operation, lists the
//! body fields it accepts and binds a builder that parses those fields into a
//! typed parameter struct before calling the matching `build_*_request`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::requests::*;

/// Body fields every operation endpoint requires, ahead of its own.
pub const COMMON_REQUIRED_FIELDS: [&str; 2] = ["spreadsheet_id", "refresh_token"];

/// One accepted body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

type Builder = fn(JsonObject) -> Result<Request>;

/// Static metadata for one batch update operation.
#[derive(Debug)]
pub struct OperationDescriptor {
    /// Route suffix and request tag, e.g. `mergeCells`.
    pub name: &'static str,
    /// Human readable name used in success and error messages.
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    builder: Builder,
}

impl OperationDescriptor {
    /// Names of the operation's own required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Every field a request body must carry to reach this operation.
    pub fn required_request_fields(&self) -> Vec<&'static str> {
        COMMON_REQUIRED_FIELDS
            .into_iter()
            .chain(self.required_fields())
            .collect()
    }

    /// Keep only the body entries this operation accepts.
    pub fn bind_arguments(&self, body: &JsonObject) -> JsonObject {
        self.fields
            .iter()
            .filter_map(|field| {
                body.get(field.name)
                    .map(|value| (field.name.to_string(), value.clone()))
            })
            .collect()
    }

    /// Build the request from bound arguments.
    ///
    /// Arguments that do not fit the operation's parameter types are reported
    /// as a validation error naming the operation.
    pub fn build(&self, args: JsonObject) -> Result<Request> {
        debug!(operation = self.name, ?args, "building request");
        (self.builder)(args).map_err(|err| match err {
            GatewayError::JsonError(e) => GatewayError::validation(format!(
                "Incorrect or missing parameters for {}. Details: {}",
                self.description, e
            )),
            other => other,
        })
    }

    pub fn success_message(&self) -> String {
        format!("{} operation successful.", self.description)
    }
}

/// All operations, in route registration order.
pub fn operations() -> &'static [OperationDescriptor] {
    OPERATIONS
}

/// Look up an operation by its route suffix.
pub fn find_operation(name: &str) -> Option<&'static OperationDescriptor> {
    OPERATION_INDEX.get(name).copied()
}

static OPERATION_INDEX: LazyLock<HashMap<&'static str, &'static OperationDescriptor>> =
    LazyLock::new(|| OPERATIONS.iter().map(|op| (op.name, op)).collect());

fn params<T: DeserializeOwned>(args: JsonObject) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(args))?)
}

fn default_merge_type() -> String {
    "MERGE_ALL".to_string()
}

fn default_fields() -> String {
    "*".to_string()
}

fn default_paste_type() -> String {
    "PASTE_NORMAL".to_string()
}

fn default_paste_orientation() -> String {
    "NORMAL".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct RepeatCellParams {
    range_dict: JsonObject,
    cell_data_dict: JsonObject,
    fields_string: String,
}

fn repeat_cell(args: JsonObject) -> Result<Request> {
    let p: RepeatCellParams = params(args)?;
    Ok(build_repeat_cell_request(p.range_dict, p.cell_data_dict, &p.fields_string))
}

#[derive(Deserialize)]
struct UpdateCellsParams {
    rows_data_list: Vec<Value>,
    fields_string: String,
    #[serde(default)]
    start_coordinate_dict: Option<JsonObject>,
    #[serde(default)]
    range_dict: Option<JsonObject>,
}

fn update_cells(args: JsonObject) -> Result<Request> {
    let p: UpdateCellsParams = params(args)?;
    build_update_cells_request(
        p.rows_data_list,
        &p.fields_string,
        p.start_coordinate_dict,
        p.range_dict,
    )
}

#[derive(Deserialize)]
struct UpdateBordersParams {
    range_dict: JsonObject,
    #[serde(default)]
    top: Option<JsonObject>,
    #[serde(default)]
    bottom: Option<JsonObject>,
    #[serde(default)]
    left: Option<JsonObject>,
    #[serde(default)]
    right: Option<JsonObject>,
    #[serde(default)]
    inner_horizontal: Option<JsonObject>,
    #[serde(default)]
    inner_vertical: Option<JsonObject>,
}

fn update_borders(args: JsonObject) -> Result<Request> {
    let p: UpdateBordersParams = params(args)?;
    Ok(build_update_borders_request(
        p.range_dict,
        Borders {
            top: p.top,
            bottom: p.bottom,
            left: p.left,
            right: p.right,
            inner_horizontal: p.inner_horizontal,
            inner_vertical: p.inner_vertical,
        },
    ))
}

#[derive(Deserialize)]
struct MergeCellsParams {
    range_dict: JsonObject,
    #[serde(default = "default_merge_type")]
    merge_type: String,
}

fn merge_cells(args: JsonObject) -> Result<Request> {
    let p: MergeCellsParams = params(args)?;
    Ok(build_merge_cells_request(p.range_dict, &p.merge_type))
}

#[derive(Deserialize)]
struct RangeParams {
    range_dict: JsonObject,
}

fn unmerge_cells(args: JsonObject) -> Result<Request> {
    let p: RangeParams = params(args)?;
    Ok(build_unmerge_cells_request(p.range_dict))
}

#[derive(Deserialize)]
struct AddConditionalFormatRuleParams {
    rule_dict: JsonObject,
    #[serde(default)]
    index: i64,
}

fn add_conditional_format_rule(args: JsonObject) -> Result<Request> {
    let p: AddConditionalFormatRuleParams = params(args)?;
    Ok(build_add_conditional_format_rule_request(p.rule_dict, p.index))
}

#[derive(Deserialize)]
struct UpdateConditionalFormatRuleParams {
    rule_dict: JsonObject,
    index: i64,
    #[serde(default)]
    new_index: Option<i64>,
}

fn update_conditional_format_rule(args: JsonObject) -> Result<Request> {
    let p: UpdateConditionalFormatRuleParams = params(args)?;
    Ok(build_update_conditional_format_rule_request(
        p.rule_dict,
        p.index,
        p.new_index,
    ))
}

#[derive(Deserialize)]
struct DeleteConditionalFormatRuleParams {
    sheet_id: i64,
    index: i64,
}

fn delete_conditional_format_rule(args: JsonObject) -> Result<Request> {
    let p: DeleteConditionalFormatRuleParams = params(args)?;
    Ok(build_delete_conditional_format_rule_request(p.sheet_id, p.index))
}

#[derive(Deserialize)]
struct AddChartParams {
    chart_spec_dict: JsonObject,
}

fn add_chart(args: JsonObject) -> Result<Request> {
    let p: AddChartParams = params(args)?;
    Ok(build_add_chart_request(p.chart_spec_dict))
}

#[derive(Deserialize)]
struct UpdateChartSpecParams {
    chart_id: i64,
    spec_dict: JsonObject,
}

fn update_chart_spec(args: JsonObject) -> Result<Request> {
    let p: UpdateChartSpecParams = params(args)?;
    Ok(build_update_chart_spec_request(p.chart_id, p.spec_dict))
}

#[derive(Deserialize)]
struct DeleteEmbeddedObjectParams {
    object_id: i64,
}

fn delete_embedded_object(args: JsonObject) -> Result<Request> {
    let p: DeleteEmbeddedObjectParams = params(args)?;
    Ok(build_delete_embedded_object_request(p.object_id))
}

#[derive(Deserialize)]
struct UpdateSheetPropertiesParams {
    properties_dict: JsonObject,
    fields_string: String,
}

fn update_sheet_properties(args: JsonObject) -> Result<Request> {
    let p: UpdateSheetPropertiesParams = params(args)?;
    build_update_sheet_properties_request(p.properties_dict, &p.fields_string)
}

#[derive(Deserialize)]
struct SheetIdParams {
    sheet_id: i64,
}

fn delete_sheet(args: JsonObject) -> Result<Request> {
    let p: SheetIdParams = params(args)?;
    Ok(build_delete_sheet_request(p.sheet_id))
}

#[derive(Deserialize)]
struct AddSheetParams {
    #[serde(default)]
    properties: Option<JsonObject>,
}

fn add_sheet(args: JsonObject) -> Result<Request> {
    let p: AddSheetParams = params(args)?;
    Ok(build_add_sheet_request(p.properties.unwrap_or_default()))
}

#[derive(Deserialize)]
struct DuplicateSheetParams {
    source_sheet_id: i64,
    #[serde(default)]
    insert_sheet_index: Option<i64>,
    #[serde(default)]
    new_sheet_id: Option<i64>,
    #[serde(default)]
    new_sheet_name: Option<String>,
}

fn duplicate_sheet(args: JsonObject) -> Result<Request> {
    let p: DuplicateSheetParams = params(args)?;
    Ok(build_duplicate_sheet_request(
        p.source_sheet_id,
        p.insert_sheet_index,
        p.new_sheet_id,
        p.new_sheet_name,
    ))
}

#[derive(Deserialize)]
struct UpdateDimensionPropertiesParams {
    range_dict: JsonObject,
    properties_dict: JsonObject,
    fields_string: String,
}

fn update_dimension_properties(args: JsonObject) -> Result<Request> {
    let p: UpdateDimensionPropertiesParams = params(args)?;
    build_update_dimension_properties_request(p.range_dict, p.properties_dict, &p.fields_string)
}

fn delete_dimension(args: JsonObject) -> Result<Request> {
    let p: RangeParams = params(args)?;
    Ok(build_delete_dimension_request(p.range_dict))
}

#[derive(Deserialize)]
struct AppendDimensionParams {
    sheet_id: i64,
    dimension: String,
    length: i64,
}

fn append_dimension(args: JsonObject) -> Result<Request> {
    let p: AppendDimensionParams = params(args)?;
    Ok(build_append_dimension_request(p.sheet_id, &p.dimension, p.length))
}

#[derive(Deserialize)]
struct InsertDimensionParams {
    range_dict: JsonObject,
    #[serde(default = "default_true")]
    inherit_from_before: bool,
}

fn insert_dimension(args: JsonObject) -> Result<Request> {
    let p: InsertDimensionParams = params(args)?;
    Ok(build_insert_dimension_request(p.range_dict, p.inherit_from_before))
}

#[derive(Deserialize)]
struct AutoResizeDimensionsParams {
    dimensions_range_dict: JsonObject,
}

fn auto_resize_dimensions(args: JsonObject) -> Result<Request> {
    let p: AutoResizeDimensionsParams = params(args)?;
    Ok(build_auto_resize_dimensions_request(p.dimensions_range_dict))
}

#[derive(Deserialize)]
struct SortRangeParams {
    range_dict: JsonObject,
    sort_specs_list: Vec<Value>,
}

fn sort_range(args: JsonObject) -> Result<Request> {
    let p: SortRangeParams = params(args)?;
    Ok(build_sort_range_request(p.range_dict, p.sort_specs_list))
}

#[derive(Deserialize)]
struct SetBasicFilterParams {
    filter_settings_dict: JsonObject,
}

fn set_basic_filter(args: JsonObject) -> Result<Request> {
    let p: SetBasicFilterParams = params(args)?;
    Ok(build_set_basic_filter_request(p.filter_settings_dict))
}

fn clear_basic_filter(args: JsonObject) -> Result<Request> {
    let p: SheetIdParams = params(args)?;
    Ok(build_clear_basic_filter_request(p.sheet_id))
}

#[derive(Deserialize)]
struct FilterViewParams {
    filter_view_object: JsonObject,
    #[serde(default = "default_fields")]
    fields_string: String,
}

fn add_filter_view(args: JsonObject) -> Result<Request> {
    let p: FilterViewParams = params(args)?;
    Ok(build_add_filter_view_request(p.filter_view_object))
}

fn update_filter_view(args: JsonObject) -> Result<Request> {
    let p: FilterViewParams = params(args)?;
    build_update_filter_view_request(p.filter_view_object, &p.fields_string)
}

#[derive(Deserialize)]
struct FilterIdParams {
    filter_id: i64,
}

fn delete_filter_view(args: JsonObject) -> Result<Request> {
    let p: FilterIdParams = params(args)?;
    Ok(build_delete_filter_view_request(p.filter_id))
}

fn duplicate_filter_view(args: JsonObject) -> Result<Request> {
    let p: FilterIdParams = params(args)?;
    Ok(build_duplicate_filter_view_request(p.filter_id))
}

#[derive(Deserialize)]
struct SetDataValidationParams {
    range_dict: JsonObject,
    rule_dict: JsonObject,
}

fn set_data_validation(args: JsonObject) -> Result<Request> {
    let p: SetDataValidationParams = params(args)?;
    Ok(build_set_data_validation_request(p.range_dict, p.rule_dict))
}

#[derive(Deserialize)]
struct ProtectedRangeParams {
    protected_range_object: JsonObject,
    #[serde(default = "default_fields")]
    fields_string: String,
}

fn add_protected_range(args: JsonObject) -> Result<Request> {
    let p: ProtectedRangeParams = params(args)?;
    Ok(build_add_protected_range_request(p.protected_range_object))
}

fn update_protected_range(args: JsonObject) -> Result<Request> {
    let p: ProtectedRangeParams = params(args)?;
    build_update_protected_range_request(p.protected_range_object, &p.fields_string)
}

#[derive(Deserialize)]
struct DeleteProtectedRangeParams {
    protected_range_id: i64,
}

fn delete_protected_range(args: JsonObject) -> Result<Request> {
    let p: DeleteProtectedRangeParams = params(args)?;
    Ok(build_delete_protected_range_request(p.protected_range_id))
}

#[derive(Deserialize)]
struct FindReplaceParams {
    find_replace_details_dict: JsonObject,
}

fn find_replace(args: JsonObject) -> Result<Request> {
    let p: FindReplaceParams = params(args)?;
    Ok(build_find_replace_request(p.find_replace_details_dict))
}

#[derive(Deserialize)]
struct AutoFillParams {
    source_and_destination_dict: JsonObject,
    #[serde(default)]
    use_alternate_series: bool,
}

fn auto_fill(args: JsonObject) -> Result<Request> {
    let p: AutoFillParams = params(args)?;
    Ok(build_auto_fill_request(p.source_and_destination_dict, p.use_alternate_series))
}

#[derive(Deserialize)]
struct CutPasteParams {
    source_range: JsonObject,
    destination_coordinate: JsonObject,
    #[serde(default = "default_paste_type")]
    paste_type: String,
}

fn cut_paste(args: JsonObject) -> Result<Request> {
    let p: CutPasteParams = params(args)?;
    Ok(build_cut_paste_request(
        p.source_range,
        p.destination_coordinate,
        &p.paste_type,
    ))
}

#[derive(Deserialize)]
struct CopyPasteParams {
    source_range: JsonObject,
    destination_range: JsonObject,
    #[serde(default = "default_paste_type")]
    paste_type: String,
    #[serde(default = "default_paste_orientation")]
    paste_orientation: String,
}

fn copy_paste(args: JsonObject) -> Result<Request> {
    let p: CopyPasteParams = params(args)?;
    Ok(build_copy_paste_request(
        p.source_range,
        p.destination_range,
        &p.paste_type,
        &p.paste_orientation,
    ))
}

#[derive(Deserialize)]
struct NamedRangeParams {
    named_range_object: JsonObject,
    #[serde(default = "default_fields")]
    fields_string: String,
}

fn add_named_range(args: JsonObject) -> Result<Request> {
    let p: NamedRangeParams = params(args)?;
    Ok(build_add_named_range_request(p.named_range_object))
}

fn update_named_range(args: JsonObject) -> Result<Request> {
    let p: NamedRangeParams = params(args)?;
    build_update_named_range_request(p.named_range_object, &p.fields_string)
}

#[derive(Deserialize)]
struct DeleteNamedRangeParams {
    named_range_id: String,
}

fn delete_named_range(args: JsonObject) -> Result<Request> {
    let p: DeleteNamedRangeParams = params(args)?;
    Ok(build_delete_named_range_request(&p.named_range_id))
}

#[derive(Deserialize)]
struct AddSlicerParams {
    slicer_object_with_spec: JsonObject,
}

fn add_slicer(args: JsonObject) -> Result<Request> {
    let p: AddSlicerParams = params(args)?;
    Ok(build_add_slicer_request(p.slicer_object_with_spec))
}

#[derive(Deserialize)]
struct UpdateSlicerSpecParams {
    slicer_id: i64,
    spec_dict: JsonObject,
    #[serde(default = "default_fields")]
    fields_string: String,
}

fn update_slicer_spec(args: JsonObject) -> Result<Request> {
    let p: UpdateSlicerSpecParams = params(args)?;
    Ok(build_update_slicer_spec_request(p.slicer_id, p.spec_dict, &p.fields_string))
}

const fn req(name: &'static str) -> FieldSpec {
    FieldSpec::required(name)
}

const fn opt(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name)
}

static OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "repeatCell",
        description: "Repeat cell",
        fields: &[req("range_dict"), req("cell_data_dict"), req("fields_string")],
        builder: repeat_cell,
    },
    OperationDescriptor {
        name: "updateCells",
        description: "Update cells",
        fields: &[
            req("rows_data_list"),
            req("fields_string"),
            opt("start_coordinate_dict"),
            opt("range_dict"),
        ],
        builder: update_cells,
    },
    OperationDescriptor {
        name: "updateBorders",
        description: "Update borders",
        fields: &[
            req("range_dict"),
            opt("top"),
            opt("bottom"),
            opt("left"),
            opt("right"),
            opt("inner_horizontal"),
            opt("inner_vertical"),
        ],
        builder: update_borders,
    },
    OperationDescriptor {
        name: "mergeCells",
        description: "Merge cells",
        fields: &[req("range_dict"), opt("merge_type")],
        builder: merge_cells,
    },
    OperationDescriptor {
        name: "unmergeCells",
        description: "Unmerge cells",
        fields: &[req("range_dict")],
        builder: unmerge_cells,
    },
    OperationDescriptor {
        name: "addConditionalFormatRule",
        description: "Add conditional format rule",
        fields: &[req("rule_dict"), opt("index")],
        builder: add_conditional_format_rule,
    },
    OperationDescriptor {
        name: "updateConditionalFormatRule",
        description: "Update conditional format rule",
        fields: &[req("rule_dict"), req("index"), opt("new_index")],
        builder: update_conditional_format_rule,
    },
    OperationDescriptor {
        name: "deleteConditionalFormatRule",
        description: "Delete conditional format rule",
        fields: &[req("sheet_id"), req("index")],
        builder: delete_conditional_format_rule,
    },
    OperationDescriptor {
        name: "addChart",
        description: "Add chart",
        fields: &[req("chart_spec_dict")],
        builder: add_chart,
    },
    OperationDescriptor {
        name: "updateChartSpec",
        description: "Update chart spec",
        fields: &[req("chart_id"), req("spec_dict")],
        builder: update_chart_spec,
    },
    OperationDescriptor {
        name: "deleteEmbeddedObject",
        description: "Delete embedded object",
        fields: &[req("object_id")],
        builder: delete_embedded_object,
    },
    OperationDescriptor {
        name: "updateSheetProperties",
        description: "Update sheet properties",
        fields: &[req("properties_dict"), req("fields_string")],
        builder: update_sheet_properties,
    },
    OperationDescriptor {
        name: "deleteSheet",
        description: "Delete sheet",
        fields: &[req("sheet_id")],
        builder: delete_sheet,
    },
    OperationDescriptor {
        name: "addSheet",
        description: "Add sheet",
        fields: &[opt("properties")],
        builder: add_sheet,
    },
    OperationDescriptor {
        name: "duplicateSheet",
        description: "Duplicate sheet",
        fields: &[
            req("source_sheet_id"),
            opt("insert_sheet_index"),
            opt("new_sheet_id"),
            opt("new_sheet_name"),
        ],
        builder: duplicate_sheet,
    },
    OperationDescriptor {
        name: "updateDimensionProperties",
        description: "Update dimension properties",
        fields: &[
            req("range_dict"),
            req("properties_dict"),
            req("fields_string"),
        ],
        builder: update_dimension_properties,
    },
    OperationDescriptor {
        name: "deleteDimension",
        description: "Delete dimension",
        fields: &[req("range_dict")],
        builder: delete_dimension,
    },
    OperationDescriptor {
        name: "appendDimension",
        description: "Append dimension",
        fields: &[req("sheet_id"), req("dimension"), req("length")],
        builder: append_dimension,
    },
    OperationDescriptor {
        name: "insertDimension",
        description: "Insert dimension",
        fields: &[req("range_dict"), opt("inherit_from_before")],
        builder: insert_dimension,
    },
    OperationDescriptor {
        name: "autoResizeDimensions",
        description: "Auto-resize dimensions",
        fields: &[req("dimensions_range_dict")],
        builder: auto_resize_dimensions,
    },
    OperationDescriptor {
        name: "sortRange",
        description: "Sort range",
        fields: &[req("range_dict"), req("sort_specs_list")],
        builder: sort_range,
    },
    OperationDescriptor {
        name: "setBasicFilter",
        description: "Set basic filter",
        fields: &[req("filter_settings_dict")],
        builder: set_basic_filter,
    },
    OperationDescriptor {
        name: "clearBasicFilter",
        description: "Clear basic filter",
        fields: &[req("sheet_id")],
        builder: clear_basic_filter,
    },
    OperationDescriptor {
        name: "addFilterView",
        description: "Add filter view",
        fields: &[req("filter_view_object")],
        builder: add_filter_view,
    },
    OperationDescriptor {
        name: "updateFilterView",
        description: "Update filter view",
        fields: &[req("filter_view_object"), opt("fields_string")],
        builder: update_filter_view,
    },
    OperationDescriptor {
        name: "deleteFilterView",
        description: "Delete filter view",
        fields: &[req("filter_id")],
        builder: delete_filter_view,
    },
    OperationDescriptor {
        name: "duplicateFilterView",
        description: "Duplicate filter view",
        fields: &[req("filter_id")],
        builder: duplicate_filter_view,
    },
    OperationDescriptor {
        name: "setDataValidation",
        description: "Set data validation",
        fields: &[req("range_dict"), req("rule_dict")],
        builder: set_data_validation,
    },
    OperationDescriptor {
        name: "addProtectedRange",
        description: "Add protected range",
        fields: &[req("protected_range_object")],
        builder: add_protected_range,
    },
    OperationDescriptor {
        name: "updateProtectedRange",
        description: "Update protected range",
        fields: &[req("protected_range_object"), opt("fields_string")],
        builder: update_protected_range,
    },
    OperationDescriptor {
        name: "deleteProtectedRange",
        description: "Delete protected range",
        fields: &[req("protected_range_id")],
        builder: delete_protected_range,
    },
    OperationDescriptor {
        name: "findReplace",
        description: "Find and replace",
        fields: &[req("find_replace_details_dict")],
        builder: find_replace,
    },
    OperationDescriptor {
        name: "autoFill",
        description: "Auto-fill",
        fields: &[req("source_and_destination_dict"), opt("use_alternate_series")],
        builder: auto_fill,
    },
    OperationDescriptor {
        name: "cutPaste",
        description: "Cut and paste",
        fields: &[
            req("source_range"),
            req("destination_coordinate"),
            opt("paste_type"),
        ],
        builder: cut_paste,
    },
    OperationDescriptor {
        name: "copyPaste",
        description: "Copy and paste",
        fields: &[
            req("source_range"),
            req("destination_range"),
            opt("paste_type"),
            opt("paste_orientation"),
        ],
        builder: copy_paste,
    },
    OperationDescriptor {
        name: "addNamedRange",
        description: "Add named range",
        fields: &[req("named_range_object")],
        builder: add_named_range,
    },
    OperationDescriptor {
        name: "updateNamedRange",
        description: "Update named range",
        fields: &[req("named_range_object"), opt("fields_string")],
        builder: update_named_range,
    },
    OperationDescriptor {
        name: "deleteNamedRange",
        description: "Delete named range",
        fields: &[req("named_range_id")],
        builder: delete_named_range,
    },
    OperationDescriptor {
        name: "addSlicer",
        description: "Add slicer",
        fields: &[req("slicer_object_with_spec")],
        builder: add_slicer,
    },
    OperationDescriptor {
        name: "updateSlicerSpec",
        description: "Update slicer spec",
        fields: &[req("slicer_id"), req("spec_dict"), opt("fields_string")],
        builder: update_slicer_spec,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_table_size() {
        assert_eq!(operations().len(), 40);
        assert!(find_operation("copySheet").is_none());
    }

    #[test]
    fn test_required_request_fields_order() {
        let op = find_operation("deleteConditionalFormatRule").unwrap();
        assert_eq!(
            op.required_request_fields(),
            vec!["spreadsheet_id", "refresh_token", "sheet_id", "index"]
        );
    }

    #[test]
    fn test_bind_drops_unknown_fields() {
        let op = find_operation("mergeCells").unwrap();
        let args = op.bind_arguments(&body(json!({
            "spreadsheet_id": "S1",
            "refresh_token": "R1",
            "range_dict": {"sheetId": 0},
            "bogus": true
        })));
        let mut keys: Vec<&str> = args.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["range_dict"]);
    }

    #[test]
    fn test_defaults_applied() {
        let op = find_operation("mergeCells").unwrap();
        let request = op.build(body(json!({"range_dict": {"sheetId": 0}}))).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"mergeCells": {"range": {"sheetId": 0}, "mergeType": "MERGE_ALL"}})
        );

        let op = find_operation("insertDimension").unwrap();
        let request = op.build(body(json!({"range_dict": {"sheetId": 0}}))).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap()["insertDimension"]["inheritFromBefore"],
            true
        );
    }

    #[test]
    fn test_type_mismatch_is_validation_error() {
        let op = find_operation("deleteSheet").unwrap();
        let err = op.build(body(json!({"sheet_id": "not-a-number"}))).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        assert!(err
            .to_string()
            .starts_with("Incorrect or missing parameters for Delete sheet."));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_builder_validation_passes_through() {
        let op = find_operation("updateNamedRange").unwrap();
        let err = op
            .build(body(json!({"named_range_object": {"name": "x"}})))
            .unwrap_err();
        assert!(err.to_string().contains("namedRangeId"));
    }

    #[test]
    fn test_bound_arguments_never_carry_credentials() {
        for op in operations() {
            let args = op.bind_arguments(&body(json!({
                "spreadsheet_id": "S1",
                "refresh_token": "R1"
            })));
            assert!(!args.contains_key("refresh_token"), "{}", op.name);
        }
    }

    #[test]
    fn test_success_message() {
        let op = find_operation("autoFill").unwrap();
        assert_eq!(op.success_message(), "Auto-fill operation successful.");
    }
}
