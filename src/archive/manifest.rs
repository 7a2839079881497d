//! JAR manifest rendering

use crate::error::{ExtractError, Result};

/// Path of the manifest inside a JAR.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Maximum manifest line length in bytes, excluding the line break.
const MAX_LINE_BYTES: usize = 72;

/// Maximum attribute name length in bytes.
const MAX_NAME_BYTES: usize = 70;

/// Main section of a JAR manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    version: String,
    attributes: Vec<(String, String)>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new("1.0").with_attribute("Clazz", "ClassExtractor")
    }
}

impl Manifest {
    /// Create a manifest with the given `Manifest-Version` and no other attributes.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            attributes: Vec::new(),
        }
    }

    /// Add or replace a custom attribute.
    ///
    /// Attribute names are case-insensitive, so an existing attribute with
    /// the same name in a different case is replaced.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();

        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// The `Manifest-Version` value.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Custom attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up a custom attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Reject manifests that would not round-trip through a JAR reader.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ExtractError::InvalidManifest(
                "Manifest-Version cannot be empty".to_string(),
            ));
        }
        validate_value("Manifest-Version", &self.version)?;

        for (name, value) in &self.attributes {
            validate_name(name)?;
            if name.eq_ignore_ascii_case("Manifest-Version") {
                return Err(ExtractError::InvalidManifest(
                    "Manifest-Version must be set through the version field".to_string(),
                ));
            }
            validate_value(name, value)?;
        }

        Ok(())
    }

    /// Render the manifest as it is stored in `META-INF/MANIFEST.MF`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_attribute(&mut out, "Manifest-Version", &self.version);
        for (name, value) in &self.attributes {
            write_attribute(&mut out, name, value);
        }
        out.push_str("\r\n");
        out
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ExtractError::InvalidManifest(
            "attribute name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(ExtractError::InvalidManifest(format!(
            "attribute name '{}' is longer than {} bytes",
            name, MAX_NAME_BYTES
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ExtractError::InvalidManifest(format!(
            "attribute name '{}' contains invalid characters",
            name
        )));
    }
    Ok(())
}

fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.contains(['\r', '\n', '\0']) {
        return Err(ExtractError::InvalidManifest(format!(
            "value of '{}' contains a line break or NUL",
            name
        )));
    }
    Ok(())
}

/// Append `name: value`, folding lines longer than 72 bytes.
///
/// Continuation lines start with a single space.
fn write_attribute(out: &mut String, name: &str, value: &str) {
    let line = format!("{}: {}", name, value);
    let mut rest = line.as_str();
    let mut limit = MAX_LINE_BYTES;

    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }

        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }

        out.push_str(&rest[..split]);
        out.push_str("\r\n ");
        rest = &rest[split..];
        // The leading space counts towards the next line
        limit = MAX_LINE_BYTES - 1;
    }
}
