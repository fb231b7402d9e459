//! Request parameters sent back to Pandora by model actions.
//!
//! Each type serializes to the camelCase parameter object of one API method
//! and names that method through [`Method`].

use serde::Serialize;

/// An API method identified by Pandora's dot-notation name.
pub trait Method {
    const METHOD: &'static str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPlaylist<'a> {
    pub station_token: &'a str,
}

impl Method for GetPlaylist<'_> {
    const METHOD: &'static str = "station.getPlaylist";
}

#[derive(Debug, Serialize)]
pub struct GetStationListChecksum {}

impl Method for GetStationListChecksum {
    const METHOD: &'static str = "user.getStationListChecksum";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFeedback<'a> {
    pub track_token: &'a str,
    pub is_positive: bool,
}

impl Method for AddFeedback<'_> {
    const METHOD: &'static str = "station.addFeedback";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSongBookmark<'a> {
    pub track_token: &'a str,
}

impl Method for AddSongBookmark<'_> {
    const METHOD: &'static str = "bookmark.addSongBookmark";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddArtistBookmark<'a> {
    pub track_token: &'a str,
}

impl Method for AddArtistBookmark<'_> {
    const METHOD: &'static str = "bookmark.addArtistBookmark";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSong<'a> {
    pub track_token: &'a str,
}

impl Method for SleepSong<'_> {
    const METHOD: &'static str = "user.sleepSong";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAd<'a> {
    pub station_id: &'a str,
    pub ad_tracking_tokens: &'a [String],
}

impl Method for RegisterAd<'_> {
    const METHOD: &'static str = "ad.registerAd";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAdMetadata<'a> {
    pub ad_token: &'a str,
    pub return_ad_tracking_tokens: bool,
    pub support_audio_ads: bool,
}

impl Method for GetAdMetadata<'_> {
    const METHOD: &'static str = "ad.getAdMetadata";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSongBookmark<'a> {
    pub bookmark_token: &'a str,
}

impl Method for DeleteSongBookmark<'_> {
    const METHOD: &'static str = "bookmark.deleteSongBookmark";
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteArtistBookmark<'a> {
    pub bookmark_token: &'a str,
}

impl Method for DeleteArtistBookmark<'_> {
    const METHOD: &'static str = "bookmark.deleteArtistBookmark";
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicType {
    Song,
    Artist,
}

/// Seed for a new station.
///
/// Search results seed with their music token, playing tracks seed with
/// their track token plus whether the song or its artist is meant.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_type: Option<MusicType>,
}

impl<'a> CreateStation<'a> {
    pub fn from_music_token(music_token: &'a str) -> Self {
        Self {
            music_token: Some(music_token),
            ..Default::default()
        }
    }

    pub fn from_track(track_token: &'a str, music_type: MusicType) -> Self {
        Self {
            track_token: Some(track_token),
            music_type: Some(music_type),
            ..Default::default()
        }
    }
}

impl Method for CreateStation<'_> {
    const METHOD: &'static str = "station.createStation";
}
