use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single spreadsheet cell as handed over by the row source.
///
/// Spreadsheet exports mix types freely: the same column can hold `12`,
/// `"Tập 12"` or nothing at all depending on who edited the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Bool(_) | CellValue::Number(_) => false,
        }
    }

    /// Trimmed textual form, `None` when the cell is blank.
    ///
    /// Integral numbers render without a fractional part so a year typed as
    /// `2023` does not come out as `2023.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    /// Integer value of the cell, if it holds one.
    ///
    /// Numbers must be integral; text must be a plain (optionally signed)
    /// decimal integer after trimming.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                if *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    Some(*n as i64)
                } else {
                    None
                }
            }
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Spreadsheet-style truthiness: boolean true, the number 1, or the text
    /// `true` / `1` in any case.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n == 1.0,
            CellValue::Text(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
            CellValue::Empty => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// One input row: column labels in sheet order, each with its cell value.
///
/// Order matters for columns matched by substring (several `Poster*`
/// columns), so the row keeps a list instead of a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((label.into(), value.into()));
    }

    /// Builder-style `push`, handy for fixtures.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(label, value);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank (or the row has no cells).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Exact label lookup; the first column wins on duplicate labels.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == label).map(|(_, v)| v)
    }

    /// First non-blank value among the given label aliases.
    ///
    /// Exact labels are tried first, in alias order; only then are labels
    /// compared trimmed and case-insensitively.
    pub fn lookup<S: AsRef<str>>(&self, aliases: &[S]) -> Option<&CellValue> {
        for alias in aliases {
            let alias = alias.as_ref();
            if let Some(v) = self
                .cells
                .iter()
                .filter(|(k, _)| k == alias)
                .map(|(_, v)| v)
                .find(|v| !v.is_blank())
            {
                return Some(v);
            }
        }
        for alias in aliases {
            let wanted = normalize_label(alias.as_ref());
            if let Some(v) = self
                .cells
                .iter()
                .filter(|(k, _)| normalize_label(k) == wanted)
                .map(|(_, v)| v)
                .find(|v| !v.is_blank())
            {
                return Some(v);
            }
        }
        None
    }

    /// Trimmed text of the first non-blank alias column.
    pub fn lookup_text<S: AsRef<str>>(&self, aliases: &[S]) -> Option<String> {
        self.lookup(aliases).and_then(CellValue::as_text)
    }

    /// Values of every column whose label contains `needle`
    /// (case-insensitive), in column order.
    pub fn columns_containing<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let needle = needle.to_lowercase();
        self.cells
            .iter()
            .filter(move |(k, _)| !needle.is_empty() && k.to_lowercase().contains(&needle))
            .map(|(_, v)| v)
    }
}

fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column label to scalar cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut cells = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, CellValue>()? {
                    cells.push((k, v));
                }
                Ok(Row { cells })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}
