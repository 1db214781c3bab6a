#![forbid(unsafe_code)]

//! Binding and validation configuration.

use fmask_text::{DateValidator, ValidationStrategy};
use fmask_text::validate::DEFAULT_YEAR;

use crate::error::ConfigError;

/// Which host elements get masked and how dates are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaskConfig {
    /// Id of the phone input.
    pub phone_element_id: String,
    /// Value of the `data-mask` attribute that marks a date input.
    pub date_mask_attribute: String,
    /// Class that marks a date input.
    pub date_mask_class: String,
    /// Id of the element receiving the ISO date.
    pub mirror_element_id: String,
    /// Year assumed while the typed year is incomplete.
    pub default_year: u32,
    /// How rejected date digits are rolled back.
    pub validation: ValidationStrategy,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            phone_element_id: "telefone-celular".into(),
            date_mask_attribute: "date".into(),
            date_mask_class: "date-mask".into(),
            mirror_element_id: "data-nascimento-hidden".into(),
            default_year: DEFAULT_YEAR,
            validation: ValidationStrategy::default(),
        }
    }
}

impl MaskConfig {
    /// Set the phone element id.
    #[must_use]
    pub fn phone_element_id(mut self, id: impl Into<String>) -> Self {
        self.phone_element_id = id.into();
        self
    }

    /// Set the `data-mask` value for date inputs.
    #[must_use]
    pub fn date_mask_attribute(mut self, value: impl Into<String>) -> Self {
        self.date_mask_attribute = value.into();
        self
    }

    /// Set the date input class.
    #[must_use]
    pub fn date_mask_class(mut self, class: impl Into<String>) -> Self {
        self.date_mask_class = class.into();
        self
    }

    /// Set the mirror element id.
    #[must_use]
    pub fn mirror_element_id(mut self, id: impl Into<String>) -> Self {
        self.mirror_element_id = id.into();
        self
    }

    /// Set the year used for incomplete years.
    #[must_use]
    pub fn default_year(mut self, year: u32) -> Self {
        self.default_year = year;
        self
    }

    /// Set the validation strategy.
    #[must_use]
    pub fn validation(mut self, strategy: ValidationStrategy) -> Self {
        self.validation = strategy;
        self
    }

    /// Check selectors and the default year.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("phone_element_id", &self.phone_element_id),
            ("date_mask_attribute", &self.date_mask_attribute),
            ("date_mask_class", &self.date_mask_class),
            ("mirror_element_id", &self.mirror_element_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector(name));
            }
        }
        if !(1..=9999).contains(&self.default_year) {
            return Err(ConfigError::DefaultYearOutOfRange(self.default_year));
        }
        if self.phone_element_id == self.mirror_element_id {
            return Err(ConfigError::ConflictingIds(self.phone_element_id.clone()));
        }
        Ok(())
    }

    /// The date validator this configuration describes.
    #[must_use]
    pub fn validator(&self) -> DateValidator {
        DateValidator::new(self.validation).with_default_year(self.default_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MaskConfig::default();
        assert_eq!(config.phone_element_id, "telefone-celular");
        assert_eq!(config.mirror_element_id, "data-nascimento-hidden");
        assert_eq!(config.default_year, 2000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder_overrides() {
        let config = MaskConfig::default()
            .phone_element_id("phone")
            .date_mask_class("dob")
            .default_year(1996)
            .validation(ValidationStrategy::LastKeystroke);
        assert_eq!(config.phone_element_id, "phone");
        assert_eq!(config.date_mask_class, "dob");
        let validator = config.validator();
        assert_eq!(validator.default_year(), 1996);
        assert_eq!(validator.strategy(), ValidationStrategy::LastKeystroke);
    }

    #[test]
    fn empty_selector_is_rejected() {
        let config = MaskConfig::default().date_mask_attribute(" ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySelector("date_mask_attribute"))
        );
    }

    #[test]
    fn year_zero_is_rejected() {
        let config = MaskConfig::default().default_year(0);
        assert_eq!(config.validate(), Err(ConfigError::DefaultYearOutOfRange(0)));
    }

    #[test]
    fn phone_and_mirror_must_differ() {
        let config = MaskConfig::default().mirror_element_id("telefone-celular");
        assert!(matches!(config.validate(), Err(ConfigError::ConflictingIds(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let config: MaskConfig =
            serde_json::from_str(r#"{"validation":"last-keystroke"}"#).expect("parse");
        assert_eq!(config.validation, ValidationStrategy::LastKeystroke);
        assert_eq!(config.phone_element_id, "telefone-celular");
    }
}
