// Use 3rd party
use time::OffsetDateTime;

// Use local
use crate::client::{Client, ClientError, ClientResult};
use crate::model::list::{Checksum, GroupedFields, GroupedList, List, ListFields};
use crate::model::playlist::Playlist;
use crate::model::{set, set_timestamp, timestamp_from_json, Field, Fields, Model, Schema};
use crate::request::CreateStation;

pub type Station<'a> = Model<'a, StationData>;
pub type GenreStation<'a> = Model<'a, GenreStationData>;
pub type StationList<'a> = List<'a, StationListData>;
pub type GenreStationList<'a> = GroupedList<'a, GenreStationListData>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationData {
    pub can_add_music: bool,
    pub can_delete: bool,
    pub can_rename: bool,
    pub is_shared: bool,
    pub art_url: Option<String>,
    pub date_created: Option<OffsetDateTime>,
    pub detail_url: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub sharing_url: Option<String>,
    pub token: Option<String>,
    pub genre: Vec<String>,
    pub quickmix_stations: Vec<String>,
}

impl<'a> Fields<'a> for StationData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("can_add_music", "allowAddMusic", |d: &mut Self, _, v| set(&mut d.can_add_music, v))
                .with_default(false),
            Field::new("can_delete", "allowDelete", |d: &mut Self, _, v| set(&mut d.can_delete, v))
                .with_default(true),
            Field::new("can_rename", "allowRename", |d: &mut Self, _, v| set(&mut d.can_rename, v))
                .with_default(true),
            Field::new("is_shared", "isShared", |d: &mut Self, _, v| set(&mut d.is_shared, v))
                .with_default(false),
            Field::new("art_url", "artUrl", |d: &mut Self, _, v| set(&mut d.art_url, v)),
            Field::new("date_created", "dateCreated", |d: &mut Self, _, v| {
                set_timestamp(&mut d.date_created, v)
            })
            .formatter(timestamp_from_json),
            Field::new("detail_url", "stationDetailUrl", |d: &mut Self, _, v| set(&mut d.detail_url, v)),
            Field::new("id", "stationId", |d: &mut Self, _, v| set(&mut d.id, v)),
            Field::new("name", "stationName", |d: &mut Self, _, v| set(&mut d.name, v)),
            Field::new("sharing_url", "stationSharingUrl", |d: &mut Self, _, v| set(&mut d.sharing_url, v)),
            Field::new("token", "stationToken", |d: &mut Self, _, v| set(&mut d.token, v)),
            Field::new("genre", "genre", |d: &mut Self, _, v| set(&mut d.genre, v))
                .with_default(Vec::<String>::new()),
            Field::new("quickmix_stations", "quickMixStationIds", |d: &mut Self, _, v| {
                set(&mut d.quickmix_stations, v)
            })
            .with_default(Vec::<String>::new()),
        ])
    }
}

impl<'a> Station<'a> {
    pub fn get_playlist(&self) -> ClientResult<Playlist<'a>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::shape("stationToken", "string"))?;
        let result = self.client().get_playlist(token)?;
        Playlist::from_json(self.client(), &result)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreStationData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub token: Option<String>,
    pub category: Option<String>,
}

impl<'a> Fields<'a> for GenreStationData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("id", "stationId", |d: &mut Self, _, v| set(&mut d.id, v)),
            Field::new("name", "stationName", |d: &mut Self, _, v| set(&mut d.name, v)),
            Field::new("token", "stationToken", |d: &mut Self, _, v| set(&mut d.token, v)),
            Field::new("category", "categoryName", |d: &mut Self, _, v| set(&mut d.category, v)),
        ])
    }
}

impl<'a> GenreStation<'a> {
    /// Genre stations have no playlist of their own; create a station from
    /// them first.
    pub fn get_playlist(&self) -> ClientResult<Playlist<'a>> {
        Err(ClientError::Unsupported("get_playlist on a genre station"))
    }

    pub fn create_station(&self) -> ClientResult<Station<'a>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::shape("stationToken", "string"))?;
        let result = self.client().create_station(&CreateStation::from_music_token(token))?;
        Station::from_json(self.client(), &result)
    }
}

// Station list example:
//{
    //"checksum": "99e3e1d0ba9bdd6dc31e1d9b5b1b5f1c",
    //"stations": [ { "stationId": "3914377363925265", ... } ]
//}
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationListData {
    pub checksum: Option<String>,
}

impl<'a> Fields<'a> for StationListData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![Field::new("checksum", "checksum", |d: &mut Self, _, v| {
            set(&mut d.checksum, v)
        })])
    }
}

impl<'a> ListFields<'a> for StationListData {
    type Item = StationData;
    const LIST_KEY: &'static str = "stations";
    const INDEX_KEY: Option<&'static str> = Some("id");
}

impl Checksum for StationListData {
    fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    fn latest_checksum(client: &dyn Client) -> ClientResult<String> {
        client.get_station_list_checksum()
    }
}

// Genre station list example:
//{
    //"checksum": "...",
    //"categories": [
        //{ "categoryName": "Rock", "stations": [ { "stationToken": "G123", ... } ] }
    //]
//}
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreStationListData {
    pub checksum: Option<String>,
}

impl<'a> Fields<'a> for GenreStationListData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![Field::new("checksum", "checksum", |d: &mut Self, _, v| {
            set(&mut d.checksum, v)
        })])
    }
}

impl<'a> GroupedFields<'a> for GenreStationListData {
    type Item = GenreStationData;
    const GROUPS_KEY: &'static str = "categories";
    const GROUP_KEY: &'static str = "categoryName";
    const ITEMS_KEY: &'static str = "stations";
}

impl Checksum for GenreStationListData {
    fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    fn latest_checksum(client: &dyn Client) -> ClientResult<String> {
        client.get_station_list_checksum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::client::tests::{client, fixture};

    #[test]
    fn station_list() {
        let client = client();
        let stations = StationList::from_json(&client, &fixture("tests/files/station_list.json")).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations.checksum.as_deref(), Some("99e3e1d0ba9bdd6dc31e1d9b5b1b5f1c"));

        let station = stations.get("3914377363925265").unwrap();
        assert_eq!(station.name.as_deref(), Some("Metal Radio"));
        assert_eq!(station.can_add_music, true);
        assert_eq!(station.can_delete, true);
        assert_eq!(station.can_rename, false);
        assert_eq!(station.is_shared, false);
        assert_eq!(station.genre, vec!["Rock".to_owned()]);
        assert_eq!(station.date_created.unwrap().unix_timestamp(), 1402857897);

        let quickmix = &stations.items()[1];
        assert_eq!(quickmix.name.as_deref(), Some("QuickMix"));
        assert_eq!(quickmix.quickmix_stations.len(), 2);
        assert!(quickmix.genre.is_empty());
        assert_eq!(quickmix.date_created, None);
    }

    #[test]
    fn station_falsy_values() {
        let client = client();
        let station = Station::from_json(
            &client,
            &json!({"stationId": "1", "allowDelete": null, "allowRename": null, "genre": null, "dateCreated": {}}),
        )
        .unwrap();
        assert_eq!(station.can_delete, false);
        assert_eq!(station.can_rename, false);
        assert!(station.genre.is_empty());
        assert_eq!(station.date_created, None);

        let stations = StationList::from_json(
            &client,
            &json!({"stations": [{"stationId": "1", "dateCreated": {}}, {"stationId": "2"}]}),
        )
        .unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations.get("2").unwrap().can_delete, true);
    }

    #[test]
    fn station_list_has_changed() {
        let json = fixture("tests/files/station_list.json");

        let client = client().respond(
            "user.getStationListChecksum",
            json!({"checksum": "99e3e1d0ba9bdd6dc31e1d9b5b1b5f1c"}),
        );
        let stations = StationList::from_json(&client, &json).unwrap();
        assert_eq!(stations.has_changed().unwrap(), false);
        assert_eq!(client.calls()[0].0, "user.getStationListChecksum");
    }

    #[test]
    fn get_playlist() {
        let client = client().respond("station.getPlaylist", fixture("tests/files/playlist.json"));
        let station = Station::from_json(&client, &json!({"stationToken": "S1", "stationId": "1"})).unwrap();

        let playlist = station.get_playlist().unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(
            client.calls(),
            vec![("station.getPlaylist".to_owned(), json!({"stationToken": "S1"}))]
        );
    }

    #[test]
    fn genre_station_list() {
        let client = client();
        let genres =
            GenreStationList::from_json(&client, &fixture("tests/files/genre_stations.json")).unwrap();

        assert_eq!(genres.len(), 2);
        let rock = genres.get("Rock").unwrap();
        let names: Vec<_> = rock.iter().map(|station| station.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Classic Rock", "Indie Rock"]);
        assert_eq!(genres.get("Jazz").unwrap()[0].token.as_deref(), Some("G300"));
    }

    #[test]
    fn genre_station_playlist_unsupported() {
        let client = client();
        let station = GenreStation::from_json(&client, &json!({"stationToken": "G100"})).unwrap();
        assert!(matches!(station.get_playlist(), Err(ClientError::Unsupported(_))));
        assert!(client.calls().is_empty());
    }

    #[test]
    fn genre_station_create_station() {
        let client = client().respond(
            "station.createStation",
            json!({"stationToken": "S9", "stationName": "Classic Rock Radio"}),
        );
        let genre = GenreStation::from_json(&client, &json!({"stationToken": "G100"})).unwrap();

        let station = genre.create_station().unwrap();
        assert_eq!(station.token.as_deref(), Some("S9"));
        assert_eq!(
            client.calls(),
            vec![("station.createStation".to_owned(), json!({"musicToken": "G100"}))]
        );
    }
}
