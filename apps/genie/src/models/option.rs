use serde::{Deserialize, Serialize};

/// One selectable choice in a single- or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
}

impl OptionRecord {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// A user-created entry: the label mirrors the value.
    pub fn custom(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Flattens selected option records to their bare values, preserving order.
pub fn option_values(options: &[OptionRecord]) -> Vec<String> {
    options.iter().map(|o| o.value.clone()).collect()
}
