//! Component and title block data models.
//!
//! These structures map directly to the JSON request format. A request
//! carries the product decomposition as a flat list of [`Component`]
//! records with explicit parent references; the hierarchy is rebuilt and
//! validated by [`crate::scheme::hierarchy::HierarchyBuilder`].

use serde::{Deserialize, Serialize};

/// One part or assembly in the product decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Position number, unique within a request. Positions start at 1.
    pub position: u32,

    /// Display name ("Корпус", "Вал ведущий", ...).
    pub name: String,

    /// ESKD designation (`XXXX.XX.XX.XXX`).
    pub designation: String,

    /// Number of units of this component in its parent. At least 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Hierarchy depth (0 = the product itself). Derived from the parent
    /// chain when omitted; when supplied it must match the derived value.
    #[serde(default)]
    pub level: Option<u32>,

    /// Position of the parent component. Absent marks a root.
    #[serde(default)]
    pub parent_position: Option<u32>,

    /// Free-text notes, forwarded to the BOM untouched.
    #[serde(default)]
    pub notes: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl Component {
    /// Creates a root component (no parent, quantity 1).
    #[must_use]
    pub fn root(position: u32, name: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            designation: designation.into(),
            quantity: 1,
            level: None,
            parent_position: None,
            notes: None,
        }
    }

    /// Creates a child component under `parent_position` (quantity 1).
    #[must_use]
    pub fn child(
        position: u32,
        name: impl Into<String>,
        designation: impl Into<String>,
        parent_position: u32,
    ) -> Self {
        Self {
            position,
            name: name.into(),
            designation: designation.into(),
            quantity: 1,
            level: None,
            parent_position: Some(parent_position),
            notes: None,
        }
    }

    /// Returns `true` when this component has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_position.is_none()
    }
}

/// Title block (stamp) metadata per GOST 2.104.
///
/// Only `designation` and `name` are validated; the remaining fields are
/// attached to the output for the renderer to place into the stamp.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleBlock {
    /// Product designation (`XXXX.XX.XX.XXX`). Required.
    #[serde(default)]
    pub designation: Option<String>,

    /// Product name. Required.
    #[serde(default)]
    pub name: Option<String>,

    /// Developer ("Разработал"). Recommended.
    #[serde(default)]
    pub developer: Option<String>,

    /// Checker ("Проверил").
    #[serde(default)]
    pub checker: Option<String>,

    /// Approver ("Утвердил").
    #[serde(default)]
    pub approver: Option<String>,

    /// Organisation name. Recommended.
    #[serde(default)]
    pub organization: Option<String>,

    /// Drawing scale ("1:1", "1:2", ...).
    #[serde(default)]
    pub scale: Option<String>,

    /// Sheet number within the document set.
    #[serde(default)]
    pub sheet_number: Option<u32>,

    /// Total sheet count of the document set.
    #[serde(default)]
    pub total_sheets: Option<u32>,

    /// Issue date. Filled by the CLI with today's date when absent.
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_defaults_from_json() {
        let json = r#"{
            "position": 1,
            "name": "Корпус",
            "designation": "1234.01.00.000"
        }"#;
        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.quantity, 1);
        assert_eq!(component.level, None);
        assert_eq!(component.parent_position, None);
        assert!(component.is_root());
    }

    #[test]
    fn component_full_from_json() {
        let json = r#"{
            "position": 3,
            "name": "Шестерня",
            "designation": "1234.01.02.000",
            "quantity": 2,
            "level": 2,
            "parent_position": 2,
            "notes": "покупное изделие"
        }"#;
        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.quantity, 2);
        assert_eq!(component.level, Some(2));
        assert_eq!(component.parent_position, Some(2));
        assert_eq!(component.notes.as_deref(), Some("покупное изделие"));
        assert!(!component.is_root());
    }

    #[test]
    fn component_constructors() {
        let root = Component::root(1, "Редуктор", "1234.00.00.000");
        assert!(root.is_root());
        assert_eq!(root.quantity, 1);

        let child = Component::child(2, "Корпус", "1234.01.00.000", 1);
        assert_eq!(child.parent_position, Some(1));
    }

    #[test]
    fn title_block_all_fields_optional() {
        let block: TitleBlock = serde_json::from_str("{}").unwrap();
        assert_eq!(block, TitleBlock::default());
    }

    #[test]
    fn title_block_roundtrip() {
        let json = r#"{
            "designation": "1234.00.00.000",
            "name": "Редуктор цилиндрический",
            "developer": "Иванов И.И.",
            "organization": "ООО Механика",
            "scale": "1:2",
            "sheet_number": 1,
            "total_sheets": 1,
            "date": "23.08.2026"
        }"#;
        let block: TitleBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.designation.as_deref(), Some("1234.00.00.000"));
        assert_eq!(block.sheet_number, Some(1));
        let back = serde_json::to_string(&block).unwrap();
        let reparsed: TitleBlock = serde_json::from_str(&back).unwrap();
        assert_eq!(block, reparsed);
    }
}
