//! Google Input Tools transliteration provider.

use serde_json::Value;

use super::suggest::{SuggestionCallback, SuggestionProvider, SuggestionRequest, parse_envelope};
use crate::error::SuggestionError;

const ENDPOINT: &str = "https://inputtools.google.com/request";
const CANDIDATES: &str = "5";

/// Query parameters for one lookup
fn query(request: &SuggestionRequest) -> Vec<(&'static str, String)> {
    vec![
        ("text", request.fragment.clone()),
        ("itc", format!("{}-t-i0-und", request.language)),
        ("num", CANDIDATES.to_owned()),
        ("cp", "0".to_owned()),
        ("cs", "1".to_owned()),
        ("ie", "utf-8".to_owned()),
        ("oe", "utf-8".to_owned()),
        ("app", "test".to_owned()),
    ]
}

/// Asks the public Input Tools endpoint for candidates.
///
/// Native builds run each request on its own thread with the blocking
/// client; the web build spawns a future on the browser's event loop.
#[derive(Debug, Clone, Default)]
pub struct InputToolsProvider {
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
    #[cfg(target_arch = "wasm32")]
    client: reqwest::Client,
}

impl InputToolsProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SuggestionProvider for InputToolsProvider {
    fn suggest(&self, request: SuggestionRequest, done: SuggestionCallback) {
        let client = self.client.clone();
        let spawned = std::thread::Builder::new()
            .name("transliterate".to_owned())
            .spawn(move || done(fetch_blocking(&client, &request)));
        if let Err(err) = spawned {
            log::warn!("could not start transliteration lookup: {err}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_blocking(
    client: &reqwest::blocking::Client,
    request: &SuggestionRequest,
) -> Result<Vec<String>, SuggestionError> {
    let response = client
        .get(ENDPOINT)
        .query(&query(request))
        .send()?
        .error_for_status()?;
    let value: Value = response.json()?;
    parse_envelope(&value)
}

#[cfg(target_arch = "wasm32")]
impl SuggestionProvider for InputToolsProvider {
    fn suggest(&self, request: SuggestionRequest, done: SuggestionCallback) {
        let client = self.client.clone();
        wasm_bindgen_futures::spawn_local(async move {
            done(fetch(&client, &request).await);
        });
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch(
    client: &reqwest::Client,
    request: &SuggestionRequest,
) -> Result<Vec<String>, SuggestionError> {
    let response = client
        .get(ENDPOINT)
        .query(&query(request))
        .send()
        .await?
        .error_for_status()?;
    let value: Value = response.json().await?;
    parse_envelope(&value)
}
