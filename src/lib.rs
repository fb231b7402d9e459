//! Typed models for the Pandora radio API.
//!
//! Pandora answers with loosely shaped JSON: camelCase keys, numbers sent as
//! strings, timestamps wrapped in an envelope and media URLs spread over
//! quality tiers. This crate turns those payloads into plain Rust structs
//! and exposes the actions a listener performs on them (thumbs up, bookmark,
//! create a station, ...).
//!
//! Transport and authentication are left to the caller: implement
//! [`client::Client`] on top of your HTTP stack and every model action goes
//! through it.
//!
//! ## Getting Started
//!
//! ```toml
//! [dependencies]
//! pandora-models = "0.1.0"
//! ```
//!
//! ```rust
//! use pandora_models::client::{Client, ClientResult};
//! use pandora_models::config::Config;
//! use pandora_models::model::quality::AudioQuality;
//! use pandora_models::model::station::StationList;
//! use serde_json::{json, Value};
//!
//! struct Offline {
//!     config: Config,
//! }
//!
//! impl Client for Offline {
//!     fn audio_quality(&self) -> Option<AudioQuality> {
//!         self.config.audio_quality()
//!     }
//!
//!     fn call(&self, _method: &str, _params: Value) -> ClientResult<Value> {
//!         Ok(json!({"checksum": "c1"}))
//!     }
//!
//!     fn test_url(&self, _url: &str) -> bool {
//!         false
//!     }
//! }
//!
//! let client = Offline { config: Config::default() };
//! let stations = StationList::from_json(
//!     &client,
//!     &json!({"checksum": "c1", "stations": [{"stationId": "1", "stationName": "Metal Radio"}]}),
//! )
//! .unwrap();
//!
//! assert_eq!(stations.get("1").unwrap().name.as_deref(), Some("Metal Radio"));
//! assert_eq!(stations.has_changed().unwrap(), false);
//! ```

pub mod client;
pub mod config;
pub mod model;
pub mod request;
