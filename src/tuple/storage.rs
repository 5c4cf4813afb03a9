// Wed Jan 14 2026 - Alex

use crate::tuple::access::Accessor;
use crate::tuple::error::{AccessError, AccessResult};
use serde_json::Value;
use std::fmt;

/// Row of text fields consumed front to back.
///
/// Fields are kept verbatim. Joining and [`TextRow::parse`] do no quoting, so
/// a field holding the separator comes back split, and an empty line parses
/// to an empty row rather than one empty field. Use [`TextRow::from_fields`]
/// when fields may contain either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRow {
    fields: Vec<String>,
    cursor: usize,
}

impl TextRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    pub fn parse(line: &str, separator: char) -> Self {
        if line.is_empty() {
            return Self::new();
        }
        Self::from_fields(line.split(separator))
    }

    pub fn push(&mut self, field: String) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn remaining(&self) -> usize {
        self.fields.len() - self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn join(&self, separator: &str) -> String {
        self.fields.join(separator)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    fn next_field(&mut self) -> AccessResult<(usize, &str)> {
        let index = self.cursor;
        let field = self.fields.get(index).ok_or(AccessError::Exhausted(index))?;
        self.cursor += 1;
        Ok((index, field.as_str()))
    }
}

impl fmt::Display for TextRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(","))
    }
}

/// Row of JSON values consumed front to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRow {
    values: Vec<Value>,
    cursor: usize,
}

impl JsonRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Accepts a JSON array; any other document is a single-value row.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::from_values(values),
            other => Self::from_values(vec![other]),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.values.clone())
    }

    fn next_value(&mut self) -> AccessResult<(usize, &Value)> {
        let index = self.cursor;
        let value = self.values.get(index).ok_or(AccessError::Exhausted(index))?;
        self.cursor += 1;
        Ok((index, value))
    }
}

/// Reads leaves with `FromStr`, writes them with `Display`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

/// Reads and writes leaves through serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

macro_rules! leaf_accessors {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Accessor<TextRow, $ty> for Text {
                fn read(row: &mut TextRow) -> AccessResult<$ty> {
                    let (index, raw) = row.next_field()?;
                    raw.parse::<$ty>().map_err(|e| AccessError::Parse {
                        index,
                        value: raw.to_string(),
                        expected: stringify!($ty),
                        reason: e.to_string(),
                    })
                }

                fn write(row: &mut TextRow, value: &$ty) -> AccessResult<()> {
                    row.push(value.to_string());
                    Ok(())
                }
            }

            impl Accessor<JsonRow, $ty> for Json {
                fn read(row: &mut JsonRow) -> AccessResult<$ty> {
                    let (index, value) = row.next_value()?;
                    <$ty as serde::Deserialize>::deserialize(value).map_err(|e| AccessError::TypeMismatch {
                        index,
                        expected: stringify!($ty),
                        reason: e.to_string(),
                    })
                }

                fn write(row: &mut JsonRow, value: &$ty) -> AccessResult<()> {
                    let encoded = serde_json::to_value(value)
                        .map_err(|e| AccessError::Encode(e.to_string()))?;
                    row.push(encoded);
                    Ok(())
                }
            }
        )+
    };
}

leaf_accessors!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::access::{convert, get, set};
    use crate::tuple::Record;
    use serde_json::json;

    crate::record! {
        struct Sample: SampleField {
            Id: u32 => "id",
            Pos: (f64, f64) => "pos",
            Label: String => "label",
        }
    }

    #[test]
    fn test_text_row_round_trip_flat() {
        let mut row = TextRow::new();
        Sample::store::<Text, _>(&mut row, &(7, (1.5, -2.0), "pt".to_string())).unwrap();
        assert_eq!(row.to_string(), "7,1.5,-2,pt");

        let value = Sample::load::<Text, _>(&mut row).unwrap();
        assert_eq!(value, (7, (1.5, -2.0), "pt".to_string()));
        assert_eq!(row.remaining(), 0);
    }

    #[test]
    fn test_text_fields_are_not_quoted() {
        let mut row = TextRow::new();
        set::<Text, _, _>(&mut row, &("a,b".to_string(), 1u8)).unwrap();
        assert_eq!(row.to_string(), "a,b,1");
        assert_eq!(TextRow::parse(&row.to_string(), ',').fields().len(), 3);

        assert_eq!(TextRow::parse("", ',').remaining(), 0);
        let mut single = TextRow::from_fields([""]);
        assert_eq!(get::<Text, (String,), _>(&mut single), Ok((String::new(),)));
    }

    #[test]
    fn test_text_parse_error() {
        let mut row = TextRow::parse("x,1", ',');
        let err = get::<Text, (u8, u8), _>(&mut row).unwrap_err();

        assert!(matches!(err, AccessError::Parse { index: 0, expected: "u8", .. }));
    }

    #[test]
    fn test_text_exhausted() {
        let mut row = TextRow::from_fields(["1"]);
        assert_eq!(get::<Text, (u8, u8), _>(&mut row), Err(AccessError::Exhausted(1)));
    }

    #[test]
    fn test_json_row() {
        let mut row = JsonRow::from_json(json!([3, [0.5, 4.0], "a"]));
        let err = Sample::load::<Json, _>(&mut row).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { index: 1, expected: "f64", .. }));

        let mut row = JsonRow::new();
        set::<Json, _, _>(&mut row, &(3u32, (0.5f64, 4.0f64), "a".to_string())).unwrap();
        assert_eq!(row.to_json(), json!([3, 0.5, 4.0, "a"]));

        let value = Sample::load::<Json, _>(&mut row).unwrap();
        assert_eq!(value.2, "a");
    }

    #[test]
    fn test_convert_text_to_json() {
        let mut text = TextRow::parse("12,true,x", ',');
        let mut json_row = JsonRow::new();

        let value = convert::<Text, Json, _, _, (i64, bool, char)>(&mut text, &mut json_row).unwrap();
        assert_eq!(value, (12, true, 'x'));
        assert_eq!(json_row.to_json(), json!([12, true, "x"]));
    }
}
