//! Session configuration and validation.
//!
//! Validates the package list before any filesystem mutation happens.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a sandbox session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Packages to install, in install order.
    pub packages: Vec<String>,

    /// PHP binary used for the version banner.
    #[serde(default = "default_php_bin")]
    pub php_bin: String,
}

fn default_php_bin() -> String {
    "php".to_string()
}

impl SessionConfig {
    /// Creates a configuration for the given package list.
    pub fn new(packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            php_bin: default_php_bin(),
        }
    }

    /// Sets the PHP binary.
    pub fn with_php_bin(mut self, php_bin: impl Into<String>) -> Self {
        self.php_bin = php_bin.into();
        self
    }
}

/// Validation result containing all found issues.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors (fatal).
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal).
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Converts to a Result, failing if there are errors.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.is_valid() {
            Ok(self.warnings)
        } else {
            Err(Error::Config(self.errors.join("; ")))
        }
    }
}

/// Trait for validatable configuration types.
pub trait Validate {
    /// Validates the configuration and returns any issues found.
    fn validate(&self) -> ValidationResult;
}

impl Validate for SessionConfig {
    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.packages.is_empty() {
            result.add_error("at least one package is required");
        }

        for package in &self.packages {
            if package.trim().is_empty() {
                result.add_error("package names cannot be empty");
            } else if !package.contains('/') {
                // Composer package names are vendor/name; anything else is
                // probably a typo, but Composer gets the final say.
                result.add_warning(format!("'{}' does not look like vendor/name", package));
            }
        }

        if self.php_bin.trim().is_empty() {
            result.add_error("php binary name cannot be empty");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = SessionConfig::new(["acme/foo", "acme/bar"]).with_php_bin("php8.3");

        assert_eq!(config.packages, vec!["acme/foo", "acme/bar"]);
        assert_eq!(config.php_bin, "php8.3");
    }

    #[test]
    fn empty_package_list_is_invalid() {
        let config = SessionConfig::new(Vec::<String>::new());
        let result = config.validate();

        assert!(!result.is_valid());
        assert!(result.into_result().is_err());
    }

    #[test]
    fn blank_package_name_is_invalid() {
        let config = SessionConfig::new(["  "]);
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn bare_package_name_warns() {
        let config = SessionConfig::new(["monolog"]);
        let result = config.validate();

        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn valid_config_passes() {
        let config = SessionConfig::new(["acme/foo"]);
        let warnings = config.validate().into_result().expect("should be valid");
        assert!(warnings.is_empty());
    }
}
