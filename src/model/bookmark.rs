// Use 3rd party
use time::OffsetDateTime;

// Use local
use crate::client::{ClientError, ClientResult};
use crate::model::{
    number_from_string, set, set_formatted, set_models, set_timestamp, timestamp_from_json, Field, Fields,
    Model, Schema,
};

pub type Bookmark<'a> = Model<'a, BookmarkData>;
pub type BookmarkList<'a> = Model<'a, BookmarkListData<'a>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookmarkData {
    pub music_token: Option<String>,
    pub artist_name: Option<String>,
    pub art_url: Option<String>,
    pub bookmark_token: Option<String>,
    pub date_created: Option<OffsetDateTime>,

    // song bookmarks only
    pub sample_url: Option<String>,
    pub sample_gain: Option<f64>,
    pub album_name: Option<String>,
    pub song_name: Option<String>,
}

impl<'a> Fields<'a> for BookmarkData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("music_token", "musicToken", |d: &mut Self, _, v| set(&mut d.music_token, v)),
            Field::new("artist_name", "artistName", |d: &mut Self, _, v| set(&mut d.artist_name, v)),
            Field::new("art_url", "artUrl", |d: &mut Self, _, v| set(&mut d.art_url, v)),
            Field::new("bookmark_token", "bookmarkToken", |d: &mut Self, _, v| {
                set(&mut d.bookmark_token, v)
            }),
            Field::new("date_created", "dateCreated", |d: &mut Self, _, v| {
                set_timestamp(&mut d.date_created, v)
            })
            .formatter(timestamp_from_json),
            Field::new("sample_url", "sampleUrl", |d: &mut Self, _, v| set(&mut d.sample_url, v)),
            Field::new("sample_gain", "sampleGain", |d: &mut Self, _, v| {
                set_formatted(&mut d.sample_gain, v)
            })
            .formatter(number_from_string),
            Field::new("album_name", "albumName", |d: &mut Self, _, v| set(&mut d.album_name, v)),
            Field::new("song_name", "songName", |d: &mut Self, _, v| set(&mut d.song_name, v)),
        ])
    }
}

impl BookmarkData {
    pub fn is_song_bookmark(&self) -> bool {
        self.song_name.is_some()
    }
}

impl Bookmark<'_> {
    /// Deletes this song or artist bookmark.
    pub fn delete(&self) -> ClientResult<()> {
        let token = self
            .bookmark_token
            .as_deref()
            .ok_or_else(|| ClientError::shape("bookmarkToken", "string"))?;
        if self.is_song_bookmark() {
            self.client().delete_song_bookmark(token)
        } else {
            self.client().delete_artist_bookmark(token)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookmarkListData<'a> {
    pub songs: Vec<Bookmark<'a>>,
    pub artists: Vec<Bookmark<'a>>,
}

impl<'a> Fields<'a> for BookmarkListData<'a> {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("songs", "songs", |d: &mut Self, client, v| set_models(&mut d.songs, client, v)),
            Field::new("artists", "artists", |d: &mut Self, client, v| {
                set_models(&mut d.artists, client, v)
            }),
        ])
    }
}
