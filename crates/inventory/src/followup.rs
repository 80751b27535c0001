//! Asset-administration metadata attached to an item.

use serde::{Deserialize, Serialize};

use itemtrack_core::ValueObject;

/// Followup record: asset tag, location, cost and custodian fields.
///
/// Every field is optional and there are no cross-field rules. The same type
/// doubles as the partial update passed to [`Followup::merged`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Followup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_nur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_adm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maint_bh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_place_in_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, rename = "PONo", skip_serializing_if = "Option::is_none")]
    pub po_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl ValueObject for Followup {}

fn take_text(target: &mut Option<String>, patch: &Option<String>) {
    if let Some(v) = patch.as_deref().filter(|v| !v.is_empty()) {
        *target = Some(v.to_string());
    }
}

fn take_flag(target: &mut Option<bool>, patch: Option<bool>) {
    if patch == Some(true) {
        *target = Some(true);
    }
}

// NaN and zero both count as "not supplied".
fn take_amount(target: &mut Option<f64>, patch: Option<f64>) {
    if let Some(v) = patch.filter(|v| *v != 0.0 && !v.is_nan()) {
        *target = Some(v);
    }
}

impl Followup {
    /// Merge `patch` over `self`, field by field, by presence.
    ///
    /// A field is taken from `patch` only when it is set to a non-empty string,
    /// `true`, or a non-zero number. Anything else leaves the current value in
    /// place, so a field cannot be cleared once set; it can only be overwritten.
    /// Strings are not trimmed.
    pub fn merged(&self, patch: &Followup) -> Followup {
        let mut out = self.clone();

        take_text(&mut out.asset_no, &patch.asset_no);
        take_text(&mut out.tag_number, &patch.tag_number);
        take_text(&mut out.serial_number, &patch.serial_number);
        take_text(&mut out.model_nur, &patch.model_nur);
        take_flag(&mut out.taggable, patch.taggable);
        take_text(&mut out.category, &patch.category);
        take_text(&mut out.sub_category, &patch.sub_category);
        take_text(&mut out.asset_adm, &patch.asset_adm);
        take_text(&mut out.maint_bh, &patch.maint_bh);
        take_text(&mut out.date_place_in_service, &patch.date_place_in_service);
        take_amount(&mut out.asset_cost, patch.asset_cost);
        take_text(&mut out.department, &patch.department);
        take_text(&mut out.campus, &patch.campus);
        take_text(&mut out.block, &patch.block);
        take_text(&mut out.floor, &patch.floor);
        take_text(&mut out.room, &patch.room);
        take_text(&mut out.po_no, &patch.po_no);
        take_text(&mut out.invoice_no, &patch.invoice_no);
        take_text(&mut out.project_code, &patch.project_code);
        take_text(&mut out.remarks, &patch.remarks);

        out
    }
}
