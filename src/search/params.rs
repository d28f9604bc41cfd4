// Query parameter module
// Ordered multi-value parameter map with single/many read helpers

/// Query parameter map preserving insertion order
///
/// A parameter may carry one value or many; `single` and `many` read both
/// encodings uniformly so callers never branch on the source shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    params: Vec<(String, Vec<String>)>,
}

impl ParamMap {
    /// Create an empty parameter map
    pub fn new() -> Self {
        ParamMap { params: Vec::new() }
    }

    /// Parse a raw query string ("a=1&b=2") into a parameter map
    ///
    /// A leading '?' is tolerated. A pair without '=' becomes a name with an
    /// empty value. Tokens are kept verbatim, without percent-decoding.
    pub fn from_query(raw: &str) -> Self {
        let mut map = ParamMap::new();
        for pair in raw.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((name, value)) => map.append(name, value),
                None => map.append(pair, ""),
            }
        }
        map
    }

    /// Add a single value, appending when the name already exists
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.append(name, value);
        self
    }

    /// Add several values under one name
    pub fn with_all(mut self, name: &str, values: &[&str]) -> Self {
        for value in values {
            self.append(name, value);
        }
        self
    }

    /// Append a value to a name's sequence
    pub fn append(&mut self, name: &str, value: &str) {
        if let Some((_, values)) = self.params.iter_mut().find(|(n, _)| n == name) {
            values.push(value.to_string());
        } else {
            self.params
                .push((name.to_string(), vec![value.to_string()]));
        }
    }

    /// First value for a name, if any
    pub fn single(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// All values for a name, empty when absent
    pub fn many(&self, name: &str) -> &[String] {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Render back to a raw query string in insertion order
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::new();
        for (name, values) in &self.params {
            for value in values {
                pairs.push(format!("{}={}", name, value));
            }
        }
        pairs.join("&")
    }

    /// Number of distinct parameter names
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameters are present
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
