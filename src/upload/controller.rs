use anyhow::{bail, Result};

use super::{PixelifyResponse, SelectedImage};

/// State machine behind the upload view. Holds no I/O: the scene feeds
/// it selections and request outcomes, and it decides what the view
/// shows. Failures never touch the prior selection or result.
#[derive(Default)]
pub struct UploadController {
    selection: Option<SelectedImage>,
    processing: bool,
    result: Option<PixelifyResponse>,
    error: Option<String>,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&SelectedImage> {
        self.selection.as_ref()
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    pub fn result(&self) -> Option<&PixelifyResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Accept a validated image: it becomes the new selection and any
    /// previous result or error is cleared.
    pub fn select(&mut self, image: SelectedImage) {
        self.selection = Some(image);
        self.result = None;
        self.error = None;
    }

    /// Report a rejected file. Only the error banner changes.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Start a submission, returning the payload to send. Refuses when
    /// nothing is selected or a request is already in flight; neither
    /// case changes any state and no request must be issued.
    pub fn begin_submit(&mut self) -> Result<String> {
        if self.processing {
            bail!("a submission is already in progress");
        }
        let Some(selection) = &self.selection else {
            bail!("select an image first");
        };
        self.processing = true;
        self.error = None;
        Ok(selection.data_url.clone())
    }

    /// Apply the outcome of an in-flight submission.
    pub fn finish(&mut self, outcome: Result<PixelifyResponse>) {
        self.processing = false;
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Back to the initial empty state.
    pub fn reset(&mut self) {
        self.selection = None;
        self.processing = false;
        self.result = None;
        self.error = None;
    }
}
