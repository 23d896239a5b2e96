use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A member of the squad exactly as the client persisted it.
///
/// The record is kept as raw JSON. Only the `id` and `name` keys are ever
/// looked at, and nothing about its shape is checked: a foreign element is
/// stored and written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PlayerEntity(Value);

impl PlayerEntity {
    /// Build a `{ "id", "name" }` record.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut record = Map::new();
        record.insert("id".into(), Value::String(id.into()));
        record.insert("name".into(), Value::String(name.into()));
        Self(Value::Object(record))
    }

    /// Attach an attribute. Non-object records are left as they are.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Object(record) = &mut self.0 {
            record.insert(key.into(), value.into());
        }
        self
    }

    /// String identifier, when the record carries one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Raw JSON of the record.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn with_name(&self, name: &str) -> Self {
        let mut record = self.0.clone();
        if let Value::Object(fields) = &mut record {
            fields.insert("name".into(), Value::String(name.to_string()));
        }
        Self(record)
    }
}

impl From<Value> for PlayerEntity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Ordered roster, in storage order. The list never reorders its entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PlayerList(Vec<PlayerEntity>);

impl PlayerList {
    /// Wrap an already ordered sequence of players.
    pub fn new(players: Vec<PlayerEntity>) -> Self {
        Self(players)
    }

    pub fn players(&self) -> &[PlayerEntity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a copy where every player whose string id equals `player_id` is named `name`.
    ///
    /// Other players and every other attribute are left as they were. An
    /// unknown id yields an identical list. Ids are compared strictly, so a
    /// numeric id `1` never matches `"1"`.
    pub fn renamed(&self, player_id: &str, name: &str) -> Self {
        self.0
            .iter()
            .map(|player| {
                if player.id() == Some(player_id) {
                    player.with_name(name)
                } else {
                    player.clone()
                }
            })
            .collect()
    }
}

impl From<Vec<PlayerEntity>> for PlayerList {
    fn from(players: Vec<PlayerEntity>) -> Self {
        Self(players)
    }
}

impl FromIterator<PlayerEntity> for PlayerList {
    fn from_iter<I: IntoIterator<Item = PlayerEntity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PlayerList {
    type Item = PlayerEntity;
    type IntoIter = std::vec::IntoIter<PlayerEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roster() -> PlayerList {
        PlayerList::new(vec![PlayerEntity::new("1", "A"), PlayerEntity::new("2", "B")])
    }

    fn list(value: Value) -> PlayerList {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rename_targets_matching_id_only() {
        let renamed = roster().renamed("2", "Z");
        assert_eq!(
            renamed,
            PlayerList::new(vec![PlayerEntity::new("1", "A"), PlayerEntity::new("2", "Z")])
        );
    }

    #[test]
    fn rename_of_unknown_id_is_identity() {
        assert_eq!(roster().renamed("99", "new"), roster());
    }

    #[test]
    fn rename_accepts_empty_name() {
        let renamed = roster().renamed("1", "");
        assert_eq!(renamed.players()[0].name(), Some(""));
    }

    #[test]
    fn rename_updates_every_duplicate() {
        let list = PlayerList::new(vec![
            PlayerEntity::new("7", "first"),
            PlayerEntity::new("8", "other"),
            PlayerEntity::new("7", "second"),
        ]);
        let renamed = list.renamed("7", "same");
        let names: Vec<_> = renamed.players().iter().filter_map(PlayerEntity::name).collect();
        assert_eq!(names, ["same", "other", "same"]);
    }

    #[test]
    fn opaque_attributes_survive_rename_and_encoding() {
        let raw = json!([
            { "id": "1", "name": "A", "position": "GK", "stats": { "goals": 0 } },
            { "id": "2", "name": "B", "number": 9 }
        ]);
        let renamed = list(raw.clone()).renamed("1", "Keeper");
        let encoded = serde_json::to_value(&renamed).unwrap();

        assert_eq!(encoded[0]["name"], "Keeper");
        assert_eq!(encoded[0]["stats"], raw[0]["stats"]);
        assert_eq!(encoded[1], raw[1]);
    }

    #[test]
    fn foreign_elements_are_kept_verbatim() {
        let raw = json!([
            { "id": 1, "name": "A", "position": "GK" },
            { "id": "2", "name": "B" },
            "not a record",
            { "name": "no id" },
            null
        ]);
        let renamed = list(raw.clone()).renamed("2", "Z");
        let encoded = serde_json::to_value(&renamed).unwrap();

        assert_eq!(encoded[1], json!({ "id": "2", "name": "Z" }));
        for index in [0, 2, 3, 4] {
            assert_eq!(encoded[index], raw[index]);
        }
    }

    #[test]
    fn numeric_id_does_not_match_its_string_form() {
        let raw = json!([{ "id": 1, "name": "A" }]);
        assert_eq!(list(raw.clone()).renamed("1", "Z"), list(raw));
    }

    #[test]
    fn rename_adds_name_to_records_missing_one() {
        let renamed = list(json!([{ "id": "5" }])).renamed("5", "Five");
        assert_eq!(renamed.players()[0].as_value(), &json!({ "id": "5", "name": "Five" }));
    }
}
