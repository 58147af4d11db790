use serde::Deserialize;
use std::path::Path;

use crate::core::{AppError, Result};

/// Letterhead data printed on generated legal documents
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct CompanyProfile {
    pub name_ar: String,
    pub name_en: String,
    pub commercial_registration: String,
    pub address_ar: String,
    #[serde(default)]
    pub address_en: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Prefix of document reference numbers
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
    #[serde(default)]
    pub authorized_signatory: Option<String>,
}

fn default_reference_prefix() -> String {
    "ALR".to_string()
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name_ar: "شركة العراف لتأجير السيارات".to_string(),
            name_en: "Al-Araf Car Rental".to_string(),
            commercial_registration: "146832".to_string(),
            address_ar: "أم صلال محمد – الشارع التجاري – مبنى (79) – الطابق الأول – مكتب (2)"
                .to_string(),
            address_en: Some(
                "Umm Salal Mohammed, Commercial St., Bldg (79), 1st Floor, Office (2)".to_string(),
            ),
            phone: None,
            email: None,
            reference_prefix: default_reference_prefix(),
            authorized_signatory: None,
        }
    }
}

impl CompanyProfile {
    /// Parse a YAML company profile
    pub fn from_yaml(content: &str) -> Result<Self> {
        let profile: CompanyProfile = serde_yaml::from_str(content)
            .map_err(|e| AppError::Configuration(format!("Invalid company profile: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load from `path`, or fall back to the built-in profile when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Configuration(format!(
                        "Cannot read company profile {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_yaml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name_ar.trim().is_empty() {
            return Err(AppError::Configuration(
                "Company Arabic name must not be empty".to_string(),
            ));
        }
        if self.commercial_registration.trim().is_empty() {
            return Err(AppError::Configuration(
                "Commercial registration must not be empty".to_string(),
            ));
        }
        if self.reference_prefix.trim().is_empty() {
            return Err(AppError::Configuration(
                "Reference prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
