use url::Url;

use crate::http::response::StatusCode;

pub const DEFAULT_IMAGE_BASE: &str = "https://http.cat/";

/// Renders the HTML shown for every non-2xx response: a single image whose
/// URL is the image base followed by the numeric status code.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    image_base: Url,
}

impl ErrorPage {
    pub fn new(mut image_base: Url) -> Self {
        // The status code is appended as a final path segment.
        if !image_base.path().ends_with('/') {
            let path = format!("{}/", image_base.path());
            image_base.set_path(&path);
        }
        Self { image_base }
    }

    pub fn image_url(&self, status: StatusCode) -> String {
        format!("{}{}", self.image_base, status.as_u16())
    }

    pub fn render(&self, status: StatusCode) -> String {
        format!(
            "<html><body><img src=\"{}\"></body></html>",
            self.image_url(status)
        )
    }
}
