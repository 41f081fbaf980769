#![forbid(unsafe_code)]

//! The `links` section of a license document.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::{LicenseError, LicenseResult};

/// Name of the passphrase hint link (mandatory).
pub const HINT: &str = "hint";
/// Name of the protected publication link (mandatory).
pub const PUBLICATION: &str = "publication";
/// Name of the canonical license location link (mandatory).
pub const SELF: &str = "self";

const LINKS: &str = "links";
const HREF: &str = "href";
const TITLE: &str = "title";
const TYPE: &str = "type";
const TEMPLATED: &str = "templated";
const LENGTH: &str = "length";
const HASH: &str = "hash";

/// One link entry of a license document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target location. Mandatory.
    pub href: String,
    pub title: Option<String>,
    /// Media type hint (the `type` member).
    pub media_type: Option<String>,
    pub templated: Option<String>,
    pub length: Option<String>,
    pub hash: Option<String>,
}

impl Link {
    fn parse(name: &str, value: &Value) -> LicenseResult<Self> {
        let Some(href) = value.get(HREF).and_then(Value::as_str) else {
            return Err(LicenseError::NotValid(format!("link {name:?} has no href")));
        };
        Ok(Self {
            href: href.to_owned(),
            title: string_member(value, TITLE),
            media_type: string_member(value, TYPE),
            templated: string_member(value, TEMPLATED),
            length: string_member(value, LENGTH),
            hash: string_member(value, HASH),
        })
    }
}

/// Optional members are read as strings; any other value counts as absent.
fn string_member(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Parsed, validated `links` section: named single links plus named ordered
/// link lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    single: HashMap<String, Link>,
    lists: HashMap<String, Vec<Link>>,
}

impl Links {
    /// Parse the `links` member of a license document root.
    ///
    /// `hint`, `publication` and `self` must all be present; any other
    /// member parses opportunistically. An object value maps to one link,
    /// an array value to an ordered list with one entry per element; any
    /// other shape fails validation, as does a missing `href` anywhere.
    pub fn parse(license_root: &Value) -> LicenseResult<Self> {
        let Some(links) = license_root.get(LINKS) else {
            return Err(LicenseError::NotValid("links member is missing".into()));
        };
        let Some(members) = links.as_object() else {
            return Err(LicenseError::NotValid(
                "links member is not an object".into(),
            ));
        };

        for required in [HINT, PUBLICATION, SELF] {
            if !members.contains_key(required) {
                return Err(LicenseError::NotValid(format!(
                    "links member {required:?} is missing"
                )));
            }
        }

        let mut parsed = Links::default();
        for (name, value) in members {
            match value {
                Value::Object(_) => {
                    parsed
                        .single
                        .insert(name.clone(), Link::parse(name, value)?);
                }
                Value::Array(elements) => {
                    let list = elements
                        .iter()
                        .map(|element| Link::parse(name, element))
                        .collect::<LicenseResult<Vec<_>>>()?;
                    parsed.lists.insert(name.clone(), list);
                }
                _ => {
                    return Err(LicenseError::NotValid(format!(
                        "link {name:?} is neither an object nor an array"
                    )));
                }
            }
        }

        debug!(
            single = parsed.single.len(),
            lists = parsed.lists.len(),
            "license links parsed"
        );
        Ok(parsed)
    }

    /// Whether `name` is present as a single link.
    pub fn has(&self, name: &str) -> bool {
        self.single.contains_key(name)
    }

    /// Whether `name` is present as a link list.
    pub fn has_many(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        self.single.get(name)
    }

    pub fn links(&self, name: &str) -> Option<&[Link]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    /// The passphrase hint page.
    pub fn hint(&self) -> Option<&Link> {
        self.link(HINT)
    }

    /// The protected publication.
    pub fn publication(&self) -> Option<&Link> {
        self.link(PUBLICATION)
    }

    /// The canonical location of the license itself.
    pub fn self_link(&self) -> Option<&Link> {
        self.link(SELF)
    }
}
