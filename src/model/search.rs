// Use local
use crate::client::{ClientError, ClientResult};
use crate::model::station::Station;
use crate::model::{set, set_models, Field, Fields, Model, Schema};
use crate::request::{CreateStation, MusicType};

pub type SearchResultItem<'a> = Model<'a, SearchResultItemData>;
pub type SearchResult<'a> = Model<'a, SearchResultData<'a>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResultItemData {
    pub artist: Option<String>,
    pub song_name: Option<String>,
    pub score: Option<u32>,
    pub likely_match: bool,
    pub token: Option<String>,
}

impl<'a> Fields<'a> for SearchResultItemData {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("artist", "artistName", |d: &mut Self, _, v| set(&mut d.artist, v)),
            Field::new("song_name", "songName", |d: &mut Self, _, v| set(&mut d.song_name, v)),
            Field::new("score", "score", |d: &mut Self, _, v| set(&mut d.score, v)),
            Field::new("likely_match", "likelyMatch", |d: &mut Self, _, v| set(&mut d.likely_match, v))
                .with_default(false),
            Field::new("token", "musicToken", |d: &mut Self, _, v| set(&mut d.token, v)),
        ])
    }
}

impl SearchResultItemData {
    pub fn is_song(&self) -> bool {
        self.song_name.is_some()
    }
}

impl<'a> SearchResultItem<'a> {
    /// Creates a station seeded with this song or artist.
    pub fn create_station(&self) -> ClientResult<Station<'a>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::shape("musicToken", "string"))?;
        let music_type = if self.is_song() {
            MusicType::Song
        } else {
            MusicType::Artist
        };
        let result = self
            .client()
            .create_station(&CreateStation::from_track(token, music_type))?;
        Station::from_json(self.client(), &result)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResultData<'a> {
    pub nearest_matches_available: bool,
    pub explanation: Option<String>,
    pub songs: Vec<SearchResultItem<'a>>,
    pub artists: Vec<SearchResultItem<'a>>,
}

impl<'a> Fields<'a> for SearchResultData<'a> {
    fn schema() -> Schema<'a, Self> {
        Schema::new(vec![
            Field::new("nearest_matches_available", "nearMatchesAvailable", |d: &mut Self, _, v| {
                set(&mut d.nearest_matches_available, v)
            })
            .with_default(false),
            Field::new("explanation", "explanation", |d: &mut Self, _, v| set(&mut d.explanation, v)),
            Field::new("songs", "songs", |d: &mut Self, client, v| set_models(&mut d.songs, client, v)),
            Field::new("artists", "artists", |d: &mut Self, client, v| {
                set_models(&mut d.artists, client, v)
            }),
        ])
    }
}
