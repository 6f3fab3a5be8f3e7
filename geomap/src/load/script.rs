//! Script tag descriptions handed to the host.

/// A `<script>` tag to inject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    src: String,
    data: Vec<(String, String)>,
}

impl ScriptRequest {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            data: Vec::new(),
        }
    }

    /// Adds a `data-{key}` attribute.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Raw data entries, keys without the `data-` prefix.
    pub fn data(&self) -> &[(String, String)] {
        &self.data
    }

    /// Attributes as they appear on the tag, `data-` prefixed.
    pub fn attributes(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.data
            .iter()
            .map(|(key, value)| (format!("data-{}", key), value.as_str()))
    }
}

/// Percent-encodes everything outside the URI component unreserved set.
pub fn encode_uri_component(input: &str) -> String {
    const UNRESERVED: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
