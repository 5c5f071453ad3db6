//! workspace::slides
//!
//! Google Slides API v1 client (read-only surface).

use std::sync::Arc;

use serde_json::Value;

use super::common::extract_array;
use super::transport::{ApiError, Transport};

const SLIDES_API_BASE: &str = "https://slides.googleapis.com/v1/presentations";

pub struct Slides {
    transport: Arc<dyn Transport>,
}

super::service_wrapper!(Slides);

impl Slides {
    /// Presentation metadata without the full page tree.
    pub async fn get_presentation(&self, id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/{}", SLIDES_API_BASE, id);
        let params = vec![(
            "fields",
            "presentationId,title,revisionId,slides(objectId)".to_string(),
        )];
        self.transport.get(&url, &params).await
    }

    /// The slide pages of a presentation.
    pub async fn pages(&self, id: &str) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/{}", SLIDES_API_BASE, id);
        let params = vec![("fields", "slides".to_string())];
        let response = self.transport.get(&url, &params).await?;
        Ok(extract_array(&response, "slides"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn pages_unwraps_slides_array() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(json!({"slides": [{"objectId": "p1"}, {"objectId": "p2"}]}));

        let pages = tokio_test::block_on(Slides::new(mock.clone()).pages("pres-1")).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(mock.calls()[0].url.ends_with("/presentations/pres-1"));
    }
}
