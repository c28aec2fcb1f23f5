//! Description records returned by the query operations.
//!
//! Records are snapshots: they own their data, hold no reference back to the
//! type they describe and compare by value.

use serde::{Deserialize, Serialize};

use crate::annotation::Annotations;

/// Name and optional description shared by methods and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonDescription {
    pub name: String,
    pub description: Option<String>,
}

impl CommonDescription {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Full description of a parameter or return value.
///
/// `min_value` and `max_value` are either both set or both `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDescription {
    pub common: CommonDescription,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub required: Option<bool>,
}

impl ParamDescription {
    /// Start from the common part with no validation data.
    pub fn new(common: CommonDescription) -> Self {
        Self {
            common,
            ..Self::default()
        }
    }

    /// Copy range and requiredness from a declaration's tags. Missing tags
    /// leave the fields untouched.
    pub(crate) fn apply_validation(&mut self, annotations: Option<&Annotations>) {
        let Some(annotations) = annotations else {
            return;
        };

        if let Some(range) = annotations.int_range() {
            self.min_value = Some(range.min);
            self.max_value = Some(range.max);
        }

        if let Some(required) = annotations.required() {
            self.required = Some(required);
        }
    }

    /// Declared bounds as an inclusive pair.
    pub fn range(&self) -> Option<(i64, i64)> {
        self.min_value.zip(self.max_value)
    }
}

/// Full description of an API method.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescription {
    pub common: CommonDescription,
    /// In declaration order.
    pub params: Vec<ParamDescription>,
    /// `None` when the method returns `()`.
    pub return_description: Option<ParamDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{DescriptionTag, IntRangeTag, RequiredTag};

    #[test]
    fn apply_validation_copies_range_and_required() {
        let annotations = Annotations::new()
            .with(IntRangeTag::new(1, 10))
            .with(RequiredTag::new(true));

        let mut description = ParamDescription::new(CommonDescription::new("n", None));
        description.apply_validation(Some(&annotations));

        assert_eq!(description.min_value, Some(1));
        assert_eq!(description.max_value, Some(10));
        assert_eq!(description.range(), Some((1, 10)));
        assert_eq!(description.required, Some(true));
    }

    #[test]
    fn apply_validation_ignores_missing_declaration() {
        let mut description = ParamDescription::new(CommonDescription::new("n", None));
        description.apply_validation(None);
        assert_eq!(description, ParamDescription::new(CommonDescription::new("n", None)));
    }

    #[test]
    fn apply_validation_ignores_description_tags() {
        let annotations = Annotations::new().with(DescriptionTag::new("count"));

        let mut description = ParamDescription::default();
        description.apply_validation(Some(&annotations));

        assert_eq!(description.range(), None);
        assert_eq!(description.required, None);
        assert_eq!(description.common.description, None);
    }
}
