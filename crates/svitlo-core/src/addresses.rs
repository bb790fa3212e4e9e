//! The monitored-address registry: one [`AddressProfile`] per address the
//! process knows how to query, loaded once at startup from a YAML file and
//! immutable afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Static configuration for one monitored address.
///
/// `page_url` is the provider's shutdowns page (the GET that establishes the
/// session); `ajax_url` is the JSON endpoint queried afterwards. `house_id`
/// is the provider's key for the building inside its outage-data mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressProfile {
    pub key: String,
    pub label: String,
    pub page_url: String,
    pub ajax_url: String,
    pub city: String,
    pub street: String,
    pub house_id: String,
}

/// All configured addresses, in file order.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressBook {
    pub addresses: Vec<AddressProfile>,
}

impl AddressBook {
    /// Looks up a profile by key, case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AddressProfile> {
        self.addresses
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
    }
}

/// Load and validate the address registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty fields, duplicate keys, non-http(s) URLs).
pub fn load_addresses(path: &Path) -> Result<AddressBook, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AddressesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let book: AddressBook = serde_yaml::from_str(&content)?;

    validate_addresses(&book)?;

    Ok(book)
}

fn validate_addresses(book: &AddressBook) -> Result<(), ConfigError> {
    if book.addresses.is_empty() {
        return Err(ConfigError::Validation(
            "addresses file contains no addresses".to_string(),
        ));
    }

    let mut seen_keys = HashSet::new();

    for profile in &book.addresses {
        for (field, value) in [
            ("key", &profile.key),
            ("label", &profile.label),
            ("city", &profile.city),
            ("street", &profile.street),
            ("house_id", &profile.house_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "address '{}' has an empty {field}",
                    profile.key
                )));
            }
        }

        for (field, url) in [("page_url", &profile.page_url), ("ajax_url", &profile.ajax_url)] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::Validation(format!(
                    "address '{}' has a non-http(s) {field}: '{url}'",
                    profile.key
                )));
            }
        }

        if !seen_keys.insert(profile.key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate address key: '{}'",
                profile.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(key: &str) -> AddressProfile {
        AddressProfile {
            key: key.to_string(),
            label: format!("Світло — {key}"),
            page_url: "https://www.dtek-krem.com.ua/ua/shutdowns".to_string(),
            ajax_url: "https://www.dtek-krem.com.ua/ua/ajax".to_string(),
            city: "с. Нове".to_string(),
            street: "вул. Незалежності".to_string(),
            house_id: "26".to_string(),
        }
    }

    #[test]
    fn valid_book_passes_validation() {
        let book = AddressBook {
            addresses: vec![profile("home"), profile("mom")],
        };
        assert!(validate_addresses(&book).is_ok());
    }

    #[test]
    fn empty_book_fails() {
        let book = AddressBook { addresses: vec![] };
        let err = validate_addresses(&book).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn duplicate_keys_fail_case_insensitively() {
        let book = AddressBook {
            addresses: vec![profile("home"), profile("HOME")],
        };
        let err = validate_addresses(&book).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "expected duplicate-key error, got: {err:?}"
        );
    }

    #[test]
    fn empty_city_fails() {
        let mut bad = profile("home");
        bad.city = "  ".to_string();
        let book = AddressBook {
            addresses: vec![bad],
        };
        let err = validate_addresses(&book).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("city")),
            "expected empty-city error, got: {err:?}"
        );
    }

    #[test]
    fn non_http_ajax_url_fails() {
        let mut bad = profile("home");
        bad.ajax_url = "ftp://example.com/ajax".to_string();
        let book = AddressBook {
            addresses: vec![bad],
        };
        let err = validate_addresses(&book).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("ajax_url")),
            "expected bad-url error, got: {err:?}"
        );
    }

    #[test]
    fn get_is_case_insensitive() {
        let book = AddressBook {
            addresses: vec![profile("home")],
        };
        assert!(book.get("HOME").is_some());
        assert!(book.get("home").is_some());
        assert!(book.get("office").is_none());
    }

    #[test]
    fn repo_addresses_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("addresses.yaml");
        assert!(
            path.exists(),
            "addresses.yaml missing at {path:?} — required for this test"
        );
        let book = load_addresses(&path).expect("repo addresses.yaml should validate");
        assert!(!book.addresses.is_empty());
    }

    #[test]
    fn parses_yaml_document() {
        let yaml = r#"
addresses:
  - key: home
    label: "💡 Світло — Дім"
    page_url: "https://www.dtek-krem.com.ua/ua/shutdowns"
    ajax_url: "https://www.dtek-krem.com.ua/ua/ajax"
    city: "с. Нове"
    street: "вул. Незалежності"
    house_id: "26"
"#;
        let book: AddressBook = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(book.addresses.len(), 1);
        assert_eq!(book.addresses[0].house_id, "26");
        assert!(validate_addresses(&book).is_ok());
    }
}
