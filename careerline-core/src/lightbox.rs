//! Shared image preview state.

/// The single image overlay. Closing hides it but keeps the last source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    visible_src: Option<String>,
    visible: bool,
}

impl Lightbox {
    pub fn open(&mut self, src: impl Into<String>) {
        self.visible_src = Some(src.into());
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn source(&self) -> Option<&str> {
        self.visible_src.as_deref()
    }
}
