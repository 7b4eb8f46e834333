//! Edit-gitlink validation
//!
//! A submitted edit is checked here before anything is sent to the backend.
//! Only a draft that passes becomes an [`UpdateGitLink`] request.

use crate::client::UpdateGitLink;
use crate::config::GitlinkConfig;

/// Confidence assumed when the form leaves it blank
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

/// Form fields of the edit modal
#[derive(Debug, Clone, Default)]
pub struct EditDraft {
    pub package: String,
    pub table: String,
    pub link: String,
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Please enter a new git link")]
    MissingLink,
    #[error("Missing package name")]
    MissingPackage,
    #[error("Please enter a link confidence")]
    MissingConfidence,
    #[error("Link confidence must be a number between 0 and 1")]
    InvalidConfidence,
    #[error("Unknown package table: {0}")]
    UnknownTable(String),
}

impl EditDraft {
    /// Validate against the configured tables and build the backend request
    pub fn validate(&self, tables: &GitlinkConfig) -> Result<UpdateGitLink, EditError> {
        let table = tables
            .table(&self.table)
            .ok_or_else(|| EditError::UnknownTable(self.table.clone()))?;

        let package = self.package.trim();
        if package.is_empty() {
            return Err(EditError::MissingPackage);
        }

        let link = self.link.trim();
        if link.is_empty() {
            return Err(EditError::MissingLink);
        }

        let link_confidence = if table.confidence {
            Some(parse_confidence(self.confidence.as_deref())?)
        } else {
            None
        };

        Ok(UpdateGitLink {
            package_name: package.to_string(),
            table_name: table.name.clone(),
            new_git_link: link.to_string(),
            link_confidence,
        })
    }
}

/// `None` means the field was not rendered at all and takes the default;
/// a rendered but blank field is an error
fn parse_confidence(raw: Option<&str>) -> Result<f64, EditError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_CONFIDENCE);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(EditError::MissingConfidence);
    }

    let value: f64 = raw.parse().map_err(|_| EditError::InvalidConfidence)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(EditError::InvalidConfidence);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;

    fn tables() -> GitlinkConfig {
        GitlinkConfig {
            tables: vec![
                TableConfig {
                    name: "arch_packages".to_string(),
                    confidence: true,
                },
                TableConfig {
                    name: "debian_packages".to_string(),
                    confidence: false,
                },
            ],
            default_table: "arch_packages".to_string(),
        }
    }

    fn draft(table: &str, link: &str, confidence: Option<&str>) -> EditDraft {
        EditDraft {
            package: "bash".to_string(),
            table: table.to_string(),
            link: link.to_string(),
            confidence: confidence.map(String::from),
        }
    }

    #[test]
    fn test_blank_link_rejected() {
        let err = draft("arch_packages", "   ", Some("1"))
            .validate(&tables())
            .unwrap_err();
        assert_eq!(err, EditError::MissingLink);
    }

    #[test]
    fn test_confidence_defaults_to_one() {
        let request = draft("arch_packages", " https://git.example/bash ", None)
            .validate(&tables())
            .unwrap();
        assert_eq!(request.link_confidence, Some(1.0));
        assert_eq!(request.new_git_link, "https://git.example/bash");
    }

    #[test]
    fn test_confidence_range() {
        assert_eq!(
            draft("arch_packages", "x", Some("1.5")).validate(&tables()),
            Err(EditError::InvalidConfidence)
        );
        assert_eq!(
            draft("arch_packages", "x", Some("high")).validate(&tables()),
            Err(EditError::InvalidConfidence)
        );
        assert_eq!(
            draft("arch_packages", "x", Some("")).validate(&tables()),
            Err(EditError::MissingConfidence)
        );
        let ok = draft("arch_packages", "x", Some("0.25"))
            .validate(&tables())
            .unwrap();
        assert_eq!(ok.link_confidence, Some(0.25));
    }

    #[test]
    fn test_table_without_confidence() {
        let request = draft("debian_packages", "x", Some("garbage"))
            .validate(&tables())
            .unwrap();
        assert_eq!(request.link_confidence, None);
    }

    #[test]
    fn test_unknown_table() {
        let err = draft("nope", "x", None).validate(&tables()).unwrap_err();
        assert_eq!(err, EditError::UnknownTable("nope".to_string()));
    }
}
