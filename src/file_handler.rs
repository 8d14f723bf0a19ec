//! Hands exported files to the host platform.

use crate::error::ExportError;
use crate::export::ExportedFile;

/// Saves exports where the user expects downloads to go.
///
/// Native builds write into the download directory (or the working directory
/// when there is none). The web build triggers a browser download.
#[derive(Debug, Clone)]
pub struct FileHandler {
    #[cfg(not(target_arch = "wasm32"))]
    directory: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileHandler {
    pub fn new() -> Self {
        let directory = dirs_next::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Self::with_directory(directory)
    }

    pub fn with_directory(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Write `file` and return where it went
    pub fn save(&self, file: &ExportedFile) -> Result<String, ExportError> {
        let path = self.directory.join(&file.file_name);
        std::fs::write(&path, &file.bytes)
            .map_err(|err| ExportError::Handoff(format!("{}: {err}", path.display())))?;
        log::info!("saved {}", path.display());
        Ok(path.display().to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl FileHandler {
    pub fn new() -> Self {
        Self {}
    }

    /// Offer `file` as a browser download
    pub fn save(&self, file: &ExportedFile) -> Result<String, ExportError> {
        use wasm_bindgen::JsCast as _;

        let handoff = |err: wasm_bindgen::JsValue| ExportError::Handoff(format!("{err:?}"));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Handoff("no document".to_owned()))?;

        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(file.mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(handoff)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(handoff)?;

        let anchor = document
            .create_element("a")
            .map_err(handoff)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Handoff("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&file.file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(handoff)?;
        log::info!("downloaded {}", file.file_name);
        Ok(file.file_name.clone())
    }
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}
