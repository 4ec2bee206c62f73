//! Compiled schema nodes

use serde::{Deserialize, Serialize};

use crate::model::{AtomicCategory, OperatorSet, ShapeTag};

/// Compiled description of one type or field.
///
/// At most one of `enum_values`, `properties` and `collection_element`
/// is populated, matching `shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSchema {
    /// Field name, or the type name for a root node
    pub name: String,
    /// Declared Rust type, including `Option`/`Vec` wrappers
    pub declared_type_name: String,
    pub nullable: bool,
    pub shape: ShapeTag,
    /// Atomic category, for atomic nodes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AtomicCategory>,
    /// Declared value names, for enumerations only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Child fields, for composites within the depth budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<TypeSchema>>,
    /// Element schema, for collections only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_element: Option<Box<TypeSchema>>,
    pub allowed_operators: OperatorSet,
}

impl TypeSchema {
    /// Looks up a direct child property by name
    pub fn property(&self, name: &str) -> Option<&TypeSchema> {
        self.properties
            .as_ref()?
            .iter()
            .find(|p| p.name == name)
    }

    /// Resolves a dot-delimited path through nested properties
    pub fn find(&self, path: &str) -> Option<&TypeSchema> {
        path.split('.')
            .try_fold(self, |node, segment| node.property(segment))
    }

    /// Returns the number of nested `properties` levels below this node.
    ///
    /// Collection elements are followed without adding a level.
    pub fn nesting_depth(&self) -> usize {
        if let Some(element) = &self.collection_element {
            return element.nesting_depth();
        }
        match &self.properties {
            Some(props) => 1 + props.iter().map(TypeSchema::nesting_depth).max().unwrap_or(0),
            None => 0,
        }
    }
}
