use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::field;

/// Fields parsed from a gateway response body.
///
/// The body is a sequence of `Key=Value` lines separated by any run of `\r`
/// or `\n`. Parsing never fails: a malformed or empty body gives an empty
/// mapping, and callers treat missing fields as the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseFields {
    fields: BTreeMap<String, String>,
}

impl ResponseFields {
    /// Parse a raw response body.
    ///
    /// Each line is split on its first `=`; key and value are trimmed. A line
    /// without `=` is a key with an empty value. Lines whose key is empty are
    /// dropped. A repeated key keeps the last value.
    pub fn parse(body: &str) -> Self {
        let mut fields = BTreeMap::new();

        for line in body.split(['\r', '\n']).filter(|l| !l.is_empty()) {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let key = key.trim();
            if key.is_empty() {
                tracing::trace!(line, "discarding response line without a key");
                continue;
            }
            fields.insert(key.to_string(), value.trim().to_string());
        }

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `Status` field, e.g. `OK`, `NOTAUTHED`, `INVALID`.
    pub fn status(&self) -> Option<&str> {
        self.get(field::STATUS)
    }

    /// Human-readable explanation accompanying the status.
    pub fn status_detail(&self) -> Option<&str> {
        self.get(field::STATUS_DETAIL)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for ResponseFields {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crlf_body_with_blank_line() {
        let fields = ResponseFields::parse("Status=OK\r\nStatusDetail=Approved\r\n\r\n");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.status(), Some("OK"));
        assert_eq!(fields.status_detail(), Some("Approved"));
    }

    #[test]
    fn test_parse_mixed_separators() {
        let fields = ResponseFields::parse("A=1\nB=2\r\rC=3\n\r\nD=4");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, [("A", "1"), ("B", "2"), ("C", "3"), ("D", "4")]);
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let fields = ResponseFields::parse("StatusDetail=3DAuth=Y needed\nVPSTxId={ABC=}");
        assert_eq!(fields.status_detail(), Some("3DAuth=Y needed"));
        assert_eq!(fields.get("VPSTxId"), Some("{ABC=}"));
    }

    #[test]
    fn test_empty_value_and_bare_key() {
        let fields = ResponseFields::parse("Key=\ngarbage\n");
        assert_eq!(fields.get("Key"), Some(""));
        assert_eq!(fields.get("garbage"), Some(""));
    }

    #[test]
    fn test_trims_keys_and_values() {
        let fields = ResponseFields::parse("  Status =  OK  \n\tTxAuthNo\t= 1234 ");
        assert_eq!(fields.status(), Some("OK"));
        assert_eq!(fields.get("TxAuthNo"), Some("1234"));
    }

    #[test]
    fn test_drops_lines_with_empty_key() {
        let fields = ResponseFields::parse("=orphan\n   =x\n   \nStatus=OK");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.status(), Some("OK"));
    }

    #[test]
    fn test_duplicate_key_keeps_last() {
        let fields = ResponseFields::parse("Status=INVALID\nStatus=OK");
        assert_eq!(fields.status(), Some("OK"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_empty_body() {
        assert!(ResponseFields::parse("").is_empty());
        assert!(ResponseFields::parse("\r\n\r\n").is_empty());
        assert_eq!(ResponseFields::parse("").status(), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let fields = ResponseFields::parse("Status=OK\nVPSTxId={1}");
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"Status": "OK", "VPSTxId": "{1}"}));
    }
}
