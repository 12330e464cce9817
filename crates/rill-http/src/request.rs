//! The per-dispatch request view.

use crate::scope::Scope;

/// Parsed query arguments.
///
/// A key → value-list multimap preserving the insertion order of each key's
/// first occurrence. Values are percent-decoded, with `+` as space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryArgs {
    /// Parses raw query string bytes (without the leading `?`).
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the core never fails
    /// on a malformed query string.
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let mut args = Self::default();
        for pair in text.split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let Some(key) = parts.next() else { continue };
            let value = parts.next().unwrap_or("");
            args.push(percent_decode(key), percent_decode(value));
        }
        args
    }

    fn push(&mut self, key: String, value: String) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            values.push(value);
        } else {
            self.entries.push((key, vec![value]));
        }
    }

    /// Returns the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_list(key).first().map(String::as_str)
    }

    /// Returns all values for a key, empty when absent.
    pub fn get_list(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Iterates keys and their values in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the query string held no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes percent escapes and `+`-as-space.
fn percent_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                    continue;
                }
            }
            result.push('%');
            result.push_str(&hex);
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

/// A read-only view of one inbound request.
///
/// Built from the transport scope at the start of a dispatch call, owned
/// exclusively by that call, and dropped once the response is sent.
#[derive(Debug, Clone)]
pub struct Request {
    scope: Scope,
    args: QueryArgs,
}

impl Request {
    /// Builds a request from a transport scope, parsing the query string.
    pub fn from_scope(scope: Scope) -> Self {
        let args = QueryArgs::parse(&scope.query_string);
        Self { scope, args }
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.scope.path
    }

    /// Returns the parsed query arguments.
    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    /// Returns the URL scheme.
    pub fn scheme(&self) -> &str {
        &self.scope.scheme
    }

    /// Returns the mount prefix.
    pub fn root_path(&self) -> &str {
        &self.scope.root_path
    }

    /// Returns the server host and port, when known.
    pub fn server(&self) -> Option<(&str, u16)> {
        self.scope
            .server
            .as_ref()
            .map(|(host, port)| (host.as_str(), *port))
    }

    /// Reassembles the full request URL from the scope components.
    pub fn url(&self) -> String {
        let mut url = String::new();
        if let Some((host, port)) = self.server() {
            url.push_str(self.scheme());
            url.push_str("://");
            url.push_str(host);
            url.push(':');
            url.push_str(&port.to_string());
        }
        url.push_str(self.root_path());
        url.push_str(self.path());
        if !self.scope.query_string.is_empty() {
            url.push('?');
            url.push_str(&String::from_utf8_lossy(&self.scope.query_string));
        }
        url
    }
}
