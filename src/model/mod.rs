//! Declarative mapping from Pandora JSON payloads to typed models.
//!
//! Every entity is a plain data struct (`StationData`, `PlaylistItemData`, ...)
//! that declares a [`Schema`]: one [`Field`] per attribute, naming the JSON
//! key it is read from, the value used when the key is absent and an
//! optional formatter. [`Model`] pairs such a struct with the [`Client`] it
//! came from, so entity actions can call back into the API.

pub mod bookmark;
pub mod list;
pub mod playlist;
pub mod quality;
pub mod search;
pub mod station;

// Use 3rd party
use log::{debug, warn};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Number, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

// Use built-in library
use std::fmt;
use std::ops::Deref;

// Use local
use crate::client::{Client, ClientError, ClientResult};

/// Transforms a truthy raw value before it is assigned.
pub type Formatter = fn(Value) -> Value;

/// Writes a resolved value into its slot of the data struct.
pub type Assign<'a, D> = fn(&mut D, &'a dyn Client, Value) -> ClientResult<()>;

/// Binds one attribute of `D` to a JSON key.
pub struct Field<'a, D> {
    name: &'static str,
    key: &'static str,
    default: Value,
    formatter: Option<Formatter>,
    assign: Assign<'a, D>,
}

impl<'a, D> Field<'a, D> {
    pub fn new(name: &'static str, key: &'static str, assign: Assign<'a, D>) -> Self {
        Self {
            name,
            key,
            default: Value::Null,
            formatter: None,
            assign,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Raw value of the field's key. An explicit `null` is a present value.
    pub fn lookup(&self, data: &Map<String, Value>) -> Option<Value> {
        data.get(self.key).cloned()
    }

    /// Final value for a raw lookup result.
    ///
    /// Absent values resolve to the default as declared. Present values go
    /// through the formatter, unless they are falsy (`null`, `""`, `0`,
    /// `false`, empty containers), which are kept as they are.
    pub fn resolve(&self, raw: Option<Value>) -> Value {
        match (raw, self.formatter) {
            (Some(value), Some(format)) if is_truthy(&value) => format(value),
            (Some(value), _) => value,
            (None, _) => self.default.clone(),
        }
    }
}

impl<D> Clone for Field<'_, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            key: self.key,
            default: self.default.clone(),
            formatter: self.formatter,
            assign: self.assign,
        }
    }
}

impl<D> fmt::Debug for Field<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("default", &self.default)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Ordered field declarations of one model type.
pub struct Schema<'a, D> {
    fields: Vec<Field<'a, D>>,
}

impl<'a, D> Schema<'a, D> {
    pub fn new(fields: Vec<Field<'a, D>>) -> Self {
        Self { fields }
    }

    /// Merges `own` over this schema.
    ///
    /// A field with an already declared name replaces the inherited one in
    /// place; new names are appended in order.
    pub fn extend(mut self, own: Vec<Field<'a, D>>) -> Self {
        for field in own {
            match self.fields.iter_mut().find(|inherited| inherited.name == field.name) {
                Some(inherited) => *inherited = field,
                None => self.fields.push(field),
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field<'a, D>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a, D>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<D> Default for Schema<'_, D> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

/// A data struct that can be built from a JSON object.
pub trait Fields<'a>: Default {
    fn schema() -> Schema<'a, Self>;

    /// Raw value for `field`, before defaults and formatting apply.
    fn raw_value(
        _client: &'a dyn Client,
        field: &Field<'a, Self>,
        data: &Map<String, Value>,
    ) -> Option<Value> {
        field.lookup(data)
    }
}

/// An entity together with the client it was built from.
#[derive(Clone)]
pub struct Model<'a, D> {
    client: &'a dyn Client,
    data: D,
}

impl<'a, D: Fields<'a>> Model<'a, D> {
    pub fn from_json(client: &'a dyn Client, json: &Value) -> ClientResult<Self> {
        let data = json
            .as_object()
            .ok_or_else(|| ClientError::shape("$", "object"))?;
        Self::from_object(client, &D::schema(), data)
    }

    pub fn from_json_list(client: &'a dyn Client, json: &Value) -> ClientResult<Vec<Self>> {
        Self::from_array(client, &D::schema(), "$", Some(json))
    }

    pub(crate) fn from_object(
        client: &'a dyn Client,
        schema: &Schema<'a, D>,
        data: &Map<String, Value>,
    ) -> ClientResult<Self> {
        Self::from_object_keyed(client, schema, data, None).map(|(model, _)| model)
    }

    /// Like `from_object`, also returning the resolved value of the field
    /// named `key_field`, exactly as it was assigned.
    pub(crate) fn from_object_keyed(
        client: &'a dyn Client,
        schema: &Schema<'a, D>,
        data: &Map<String, Value>,
        key_field: Option<&str>,
    ) -> ClientResult<(Self, Option<Value>)> {
        let mut fields = D::default();
        let mut key = None;
        for field in schema.iter() {
            let value = field.resolve(D::raw_value(client, field, data));
            if key_field == Some(field.name) {
                key = Some(value.clone());
            }
            (field.assign)(&mut fields, client, value).map_err(|e| {
                debug!("cannot assign `{}` from `{}`: {}", field.name, field.key, e);
                e
            })?;
        }

        let model = Self {
            client,
            data: fields,
        };
        Ok((model, key))
    }

    pub(crate) fn from_array(
        client: &'a dyn Client,
        schema: &Schema<'a, D>,
        key: &str,
        json: Option<&Value>,
    ) -> ClientResult<Vec<Self>> {
        let elements = json
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::shape(key, "array"))?;

        elements
            .iter()
            .map(|element| {
                let data = element
                    .as_object()
                    .ok_or_else(|| ClientError::shape(key, "array of objects"))?;
                Self::from_object(client, schema, data)
            })
            .collect()
    }
}

impl<'a, D> Model<'a, D> {
    pub fn client(&self) -> &'a dyn Client {
        self.client
    }

    pub fn into_data(self) -> D {
        self.data
    }
}

impl<D> Deref for Model<'_, D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<D: fmt::Debug> fmt::Debug for Model<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}

impl<D: PartialEq> PartialEq for Model<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// Python-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// Pandora timestamp envelope:
//{
    //"date": 15,
    //"day": 6,
    //"hours": 14,
    //"minutes": 44,
    //"month": 5,
    //"nanos": 0,
    //"seconds": 57,
    //"time": 1402857897371,
    //"timezoneOffset": 420,
    //"year": 114
//}

/// Formats a timestamp envelope as an RFC 3339 string in UTC.
///
/// Only `time` (milliseconds since the epoch) is read. Envelopes without a
/// usable `time` become `null`.
pub fn timestamp_from_json(value: Value) -> Value {
    let formatted = value
        .get("time")
        .and_then(Value::as_i64)
        .and_then(|millis| OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok())
        .and_then(|date| date.format(&Rfc3339).ok());

    match formatted {
        Some(date) => Value::String(date),
        None => {
            warn!("unusable timestamp: {}", value);
            Value::Null
        }
    }
}

/// Turns numeric strings such as `"64"` or `"-1.23"` into JSON numbers.
pub fn number_from_string(value: Value) -> Value {
    let text = match value {
        Value::String(ref text) => text.trim(),
        _ => return value,
    };

    if let Ok(integer) = text.parse::<i64>() {
        return Value::from(integer);
    }
    match text.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => {
            warn!("not a number: {:?}", text);
            value
        }
    }
}

/// Assigns `value` to `slot` through serde. An explicit `null` empties the
/// slot (`None`, `false`, `0`, empty list).
pub fn set<T: DeserializeOwned + Default>(slot: &mut T, value: Value) -> ClientResult<()> {
    *slot = match value {
        Value::Null => T::default(),
        value => serde_json::from_value(value)?,
    };
    Ok(())
}

/// Assigns the output of a formatter.
///
/// Falsy raw values never reach the formatter, so `""` may arrive where a
/// number is expected. Those resolve to `None` instead of failing the
/// whole model.
pub fn set_formatted<T: DeserializeOwned>(slot: &mut Option<T>, value: Value) -> ClientResult<()> {
    if is_truthy(&value) {
        *slot = serde_json::from_value(value)?;
    } else {
        *slot = serde_json::from_value(value).ok().flatten();
    }
    Ok(())
}

/// Assigns an RFC 3339 string, as produced by [`timestamp_from_json`].
/// Falsy values (`null`, `""`, `{}`) clear the slot.
pub fn set_timestamp(slot: &mut Option<OffsetDateTime>, value: Value) -> ClientResult<()> {
    *slot = match value {
        ref value if !is_truthy(value) => None,
        Value::String(date) => Some(
            OffsetDateTime::parse(&date, &Rfc3339).map_err(serde_json::Error::custom)?,
        ),
        other => {
            return Err(serde_json::Error::custom(format!("expected a timestamp, got {}", other)).into())
        }
    };
    Ok(())
}

/// Assigns a list of nested models. A missing list leaves the slot empty.
pub fn set_models<'a, D: Fields<'a>>(
    slot: &mut Vec<Model<'a, D>>,
    client: &'a dyn Client,
    value: Value,
) -> ClientResult<()> {
    *slot = match value {
        Value::Null => Vec::new(),
        value => Model::from_json_list(client, &value)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::client::tests::client;

    fn upper(value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Song {
        title: Option<String>,
        artist: Option<String>,
        plays: u32,
        liked: bool,
    }

    impl<'a> Fields<'a> for Song {
        fn schema() -> Schema<'a, Self> {
            Schema::new(vec![
                Field::new("title", "songTitle", |d: &mut Song, _, v| set(&mut d.title, v))
                    .formatter(upper),
                Field::new("artist", "artistName", |d: &mut Song, _, v| set(&mut d.artist, v))
                    .with_default("unknown")
                    .formatter(upper),
                Field::new("plays", "plays", |d: &mut Song, _, v| set(&mut d.plays, v))
                    .with_default(0),
                Field::new("liked", "liked", |d: &mut Song, _, v| set(&mut d.liked, v))
                    .with_default(true),
            ])
        }
    }

    #[test]
    fn from_json() {
        let client = client();
        let song = Model::<Song>::from_json(
            &client,
            &json!({"songTitle": "Intro", "artistName": "xx", "plays": 3, "liked": false, "extra": 1}),
        )
        .unwrap();
        assert_eq!(song.title.as_deref(), Some("INTRO"));
        assert_eq!(song.artist.as_deref(), Some("XX"));
        assert_eq!(song.plays, 3);
        assert_eq!(song.liked, false);
    }

    #[test]
    fn defaults_skip_formatter() {
        let client = client();
        let song = Model::<Song>::from_json(&client, &json!({})).unwrap();
        assert_eq!(song.title, None);
        assert_eq!(song.artist.as_deref(), Some("unknown"));
        assert_eq!(song.plays, 0);
        assert_eq!(song.liked, true);
    }

    #[test]
    fn falsy_values_skip_formatter() {
        let client = client();
        let song = Model::<Song>::from_json(&client, &json!({"songTitle": ""})).unwrap();
        assert_eq!(song.title.as_deref(), Some(""));

        let field = Field::<Song>::new("title", "songTitle", |_, _, _| Ok(())).formatter(upper);
        assert_eq!(field.resolve(Some(json!(""))), json!(""));
        assert_eq!(field.resolve(Some(json!("a"))), json!("A"));
    }

    #[test]
    fn null_is_a_present_value() {
        let client = client();
        let song = Model::<Song>::from_json(
            &client,
            &json!({"liked": null, "artistName": null, "plays": null}),
        )
        .unwrap();
        assert_eq!(song.liked, false);
        assert_eq!(song.artist, None);
        assert_eq!(song.plays, 0);

        let field = Field::<Song>::new("liked", "liked", |_, _, _| Ok(())).with_default(true);
        assert_eq!(field.resolve(field.lookup(json!({"liked": null}).as_object().unwrap())), Value::Null);
        assert_eq!(field.resolve(field.lookup(&Map::new())), json!(true));
    }

    #[test]
    fn falsy_formatted_values_are_lenient() {
        let mut gain = Some(1.0);
        set_formatted::<f64>(&mut gain, json!("")).unwrap();
        assert_eq!(gain, None);

        let mut bitrate = None;
        set_formatted::<u32>(&mut bitrate, json!(0)).unwrap();
        assert_eq!(bitrate, Some(0));

        // truthy values that still do not fit are errors
        assert!(matches!(
            set_formatted::<u32>(&mut bitrate, json!("fast")),
            Err(ClientError::ParseJSON(_))
        ));

        let mut date = None;
        set_timestamp(&mut date, json!({})).unwrap();
        set_timestamp(&mut date, json!("")).unwrap();
        assert_eq!(date, None);
    }

    #[test]
    fn from_object_keyed_returns_assigned_value() {
        let client = client();
        let data = json!({"songTitle": "intro"});
        let (song, key) = Model::<Song>::from_object_keyed(
            &client,
            &Song::schema(),
            data.as_object().unwrap(),
            Some("title"),
        )
        .unwrap();
        assert_eq!(key, Some(json!("INTRO")));
        assert_eq!(song.title.as_deref(), Some("INTRO"));
    }

    #[test]
    fn from_json_list_keeps_order() {
        let client = client();
        let songs = Model::<Song>::from_json_list(
            &client,
            &json!([{"songTitle": "a"}, {"songTitle": "b"}, {"songTitle": "c"}]),
        )
        .unwrap();
        let titles: Vec<_> = songs.iter().map(|song| song.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn shape_errors() {
        let client = client();
        assert!(matches!(
            Model::<Song>::from_json(&client, &json!([])),
            Err(ClientError::Shape { .. })
        ));
        assert!(matches!(
            Model::<Song>::from_json_list(&client, &json!({})),
            Err(ClientError::Shape { .. })
        ));
        assert!(matches!(
            Model::<Song>::from_json_list(&client, &json!([1, 2])),
            Err(ClientError::Shape { .. })
        ));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let client = client();
        let result = Model::<Song>::from_json(&client, &json!({"plays": "many"}));
        assert!(matches!(result, Err(ClientError::ParseJSON(_))));
    }

    #[test]
    fn schema_extend_overrides_by_name() {
        let base = Song::schema();
        let extended = base.extend(vec![
            Field::new("plays", "playCount", |d: &mut Song, _, v| set(&mut d.plays, v))
                .with_default(7),
            Field::new("album", "albumName", |_, _, _| Ok(())),
        ]);

        let names: Vec<_> = extended.iter().map(Field::name).collect();
        assert_eq!(names, vec!["title", "artist", "plays", "liked", "album"]);
        assert_eq!(extended.get("plays").unwrap().key(), "playCount");
        assert_eq!(extended.get("plays").unwrap().default_value(), &json!(7));
    }

    #[test]
    fn truthiness() {
        for falsy in &[json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(falsy), "{} should be falsy", falsy);
        }
        for truthy in &[json!(true), json!(-1), json!("0"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn timestamp() {
        let value = timestamp_from_json(json!({"time": 1402857897371i64, "year": 114}));
        assert_eq!(value, json!("2014-06-15T18:44:57.371Z"));

        let mut slot = None;
        set_timestamp(&mut slot, value).unwrap();
        assert_eq!(slot.unwrap().unix_timestamp(), 1402857897);

        assert_eq!(timestamp_from_json(json!({"year": 114})), Value::Null);
    }

    #[test]
    fn numbers() {
        assert_eq!(number_from_string(json!("64")), json!(64));
        assert_eq!(number_from_string(json!("-1.25")), json!(-1.25));
        assert_eq!(number_from_string(json!("n/a")), json!("n/a"));
        assert_eq!(number_from_string(json!(3)), json!(3));
    }
}
