//! Models that own a sequence of sub-models.

// Use 3rd party
use log::debug;
use serde_json::{Map, Value};

// Use built-in library
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::ops::Deref;

// Use local
use crate::client::{Client, ClientError, ClientResult};
use crate::model::{Fields, Model};

/// Envelope of a list payload such as `{"checksum": ..., "stations": [...]}`.
pub trait ListFields<'a>: Fields<'a> {
    type Item: Fields<'a>;

    /// Key of the item array.
    const LIST_KEY: &'static str;

    /// Item attribute to index items by.
    const INDEX_KEY: Option<&'static str> = None;
}

/// Envelope of a payload grouping items, such as genre categories:
/// `{"categories": [{"categoryName": ..., "stations": [...]}, ...]}`.
pub trait GroupedFields<'a>: Fields<'a> {
    type Item: Fields<'a>;

    /// Key of the group array.
    const GROUPS_KEY: &'static str;

    /// Key of the label inside each group.
    const GROUP_KEY: &'static str;

    /// Key of the item array inside each group.
    const ITEMS_KEY: &'static str;
}

/// Lists whose freshness can be checked against the server.
pub trait Checksum {
    fn checksum(&self) -> Option<&str>;

    fn latest_checksum(client: &dyn Client) -> ClientResult<String>;
}

fn has_changed<'a, C: Checksum>(model: &Model<'a, C>) -> ClientResult<bool> {
    let latest = C::latest_checksum(model.client())?;
    Ok(model.checksum() != Some(latest.as_str()))
}

fn key_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn object<'v>(json: &'v Value) -> ClientResult<&'v Map<String, Value>> {
    json.as_object().ok_or_else(|| ClientError::shape("$", "object"))
}

pub struct List<'a, L: ListFields<'a>> {
    model: Model<'a, L>,
    items: Vec<Model<'a, L::Item>>,
    index: HashMap<String, usize>,
}

impl<'a, L: ListFields<'a>> List<'a, L> {
    /// Builds the envelope, then every item of `LIST_KEY` in order.
    ///
    /// With an `INDEX_KEY`, items are also indexed by that attribute. Items
    /// sharing a key leave the last one reachable by lookup.
    pub fn from_json(client: &'a dyn Client, json: &Value) -> ClientResult<Self> {
        let data = object(json)?;
        let model = Model::from_object(client, &L::schema(), data)?;

        let elements = data
            .get(L::LIST_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::shape(L::LIST_KEY, "array"))?;

        let schema = L::Item::schema();
        if let Some(name) = L::INDEX_KEY {
            schema.get(name).ok_or(ClientError::UnknownField(name))?;
        }

        let mut items = Vec::with_capacity(elements.len());
        let mut index = HashMap::new();
        for element in elements {
            let item = element
                .as_object()
                .ok_or_else(|| ClientError::shape(L::LIST_KEY, "array of objects"))?;

            let (model, value) = Model::from_object_keyed(client, &schema, item, L::INDEX_KEY)?;
            if let Some(key) = value.as_ref().and_then(key_of) {
                index.insert(key, items.len());
            }
            items.push(model);
        }
        debug!("built {} items from `{}`", items.len(), L::LIST_KEY);

        Ok(Self { model, items, index })
    }

    /// Looks an item up by the value of its `INDEX_KEY` attribute.
    pub fn get<K: fmt::Display>(&self, key: K) -> ClientResult<&Model<'a, L::Item>> {
        let key = key.to_string();
        match self.index.get(&key) {
            Some(&position) => Ok(&self.items[position]),
            None => Err(ClientError::NotFound(key)),
        }
    }

    pub fn items(&self) -> &[Model<'a, L::Item>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model<'a, L::Item>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Model<'a, L::Item>> {
        self.items
    }
}

impl<'a, L: ListFields<'a> + Checksum> List<'a, L> {
    /// Compares the stored checksum with a freshly fetched one.
    pub fn has_changed(&self) -> ClientResult<bool> {
        has_changed(&self.model)
    }
}

impl<'a, L: ListFields<'a>> Deref for List<'a, L> {
    type Target = Model<'a, L>;

    fn deref(&self) -> &Self::Target {
        &self.model
    }
}

impl<'a, 'l, L: ListFields<'a>> IntoIterator for &'l List<'a, L> {
    type Item = &'l Model<'a, L::Item>;
    type IntoIter = std::slice::Iter<'l, Model<'a, L::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, L> fmt::Debug for List<'a, L>
where
    L: ListFields<'a> + fmt::Debug,
    L::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("model", &self.model)
            .field("items", &self.items)
            .finish()
    }
}

pub struct GroupedList<'a, G: GroupedFields<'a>> {
    model: Model<'a, G>,
    groups: HashMap<String, Vec<Model<'a, G::Item>>>,
}

impl<'a, G: GroupedFields<'a>> GroupedList<'a, G> {
    /// Builds the envelope and flattens every group into label → items.
    ///
    /// Items keep their order within a group; groups are unordered. A label
    /// seen twice keeps the last group's items.
    pub fn from_json(client: &'a dyn Client, json: &Value) -> ClientResult<Self> {
        let data = object(json)?;
        let model = Model::from_object(client, &G::schema(), data)?;

        let groups = data
            .get(G::GROUPS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::shape(G::GROUPS_KEY, "array"))?;

        let schema = G::Item::schema();
        let mut grouped = HashMap::with_capacity(groups.len());
        for group in groups {
            let group = group
                .as_object()
                .ok_or_else(|| ClientError::shape(G::GROUPS_KEY, "array of objects"))?;
            let label = group
                .get(G::GROUP_KEY)
                .and_then(key_of)
                .ok_or_else(|| ClientError::shape(G::GROUP_KEY, "string"))?;
            let items = Model::from_array(client, &schema, G::ITEMS_KEY, group.get(G::ITEMS_KEY))?;
            grouped.insert(label, items);
        }
        debug!("built {} groups from `{}`", grouped.len(), G::GROUPS_KEY);

        Ok(Self {
            model,
            groups: grouped,
        })
    }

    pub fn get(&self, label: &str) -> ClientResult<&[Model<'a, G::Item>]> {
        self.groups
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| ClientError::NotFound(label.to_owned()))
    }

    pub fn groups(&self) -> &HashMap<String, Vec<Model<'a, G::Item>>> {
        &self.groups
    }

    pub fn labels(&self) -> hash_map::Keys<'_, String, Vec<Model<'a, G::Item>>> {
        self.groups.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Vec<Model<'a, G::Item>>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> HashMap<String, Vec<Model<'a, G::Item>>> {
        self.groups
    }
}

impl<'a, G: GroupedFields<'a> + Checksum> GroupedList<'a, G> {
    /// Compares the stored checksum with a freshly fetched one.
    pub fn has_changed(&self) -> ClientResult<bool> {
        has_changed(&self.model)
    }
}

impl<'a, G: GroupedFields<'a>> Deref for GroupedList<'a, G> {
    type Target = Model<'a, G>;

    fn deref(&self) -> &Self::Target {
        &self.model
    }
}

impl<'a, G> fmt::Debug for GroupedList<'a, G>
where
    G: GroupedFields<'a> + fmt::Debug,
    G::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedList")
            .field("model", &self.model)
            .field("groups", &self.groups)
            .finish()
    }
}
