//! Product image gallery.

use serde::{Deserialize, Serialize};

/// Image shown for products saved without one.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/600x600/e0f2fe/0369a1?text=No+Image";

/// Image given to products created by CSV import.
pub const IMPORT_PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/600x600/e0f2fe/0369a1?text=Product";

const BUILT_IN_PLACEHOLDERS: [&str; 2] = [DEFAULT_PLACEHOLDER_IMAGE, IMPORT_PLACEHOLDER_IMAGE];

/// An ordered, never-empty list of image references with a primary image.
///
/// The primary is always a member of the list. On the wire this is the flat
/// `image` / `images` pair; records that omit `images` (or send it empty)
/// are normalized to `[image]` when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGallery")]
pub struct Gallery {
    #[serde(rename = "image")]
    primary: String,
    images: Vec<String>,
}

#[derive(Deserialize)]
struct RawGallery {
    #[serde(default)]
    image: String,
    #[serde(default)]
    images: Vec<String>,
}

impl From<RawGallery> for Gallery {
    fn from(raw: RawGallery) -> Self {
        Gallery::new(raw.image, raw.images)
    }
}

impl Gallery {
    /// Build a gallery from a primary image and a list of images.
    ///
    /// Blank entries are dropped. A blank primary falls back to the first
    /// image, and an empty list falls back to the placeholder. A primary that
    /// is not in the list is prepended to it.
    pub fn new(primary: impl Into<String>, images: Vec<String>) -> Self {
        Self::with_placeholder(primary, images, DEFAULT_PLACEHOLDER_IMAGE)
    }

    /// Like [`Gallery::new`] with a custom placeholder.
    pub fn with_placeholder(
        primary: impl Into<String>,
        images: Vec<String>,
        placeholder: &str,
    ) -> Self {
        let mut images: Vec<String> = images
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();
        let primary = primary.into();

        let primary = if !primary.trim().is_empty() {
            primary
        } else if let Some(first) = images.first() {
            first.clone()
        } else {
            placeholder.to_string()
        };

        if !images.contains(&primary) {
            images.insert(0, primary.clone());
        }

        Self { primary, images }
    }

    /// A gallery holding only the given image.
    pub fn single(image: impl Into<String>) -> Self {
        Self::new(image, Vec::new())
    }

    /// The primary image.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// All images, in display order.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Never true for a normalized gallery.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Check if the gallery only holds a placeholder image, either a
    /// built-in one or one of `configured`.
    pub fn is_placeholder(&self, configured: &[&str]) -> bool {
        self.images.len() == 1
            && (BUILT_IN_PLACEHOLDERS.contains(&self.primary.as_str())
                || configured.contains(&self.primary.as_str()))
    }

    /// Append images. A gallery that only held a placeholder (see
    /// [`Gallery::is_placeholder`]) drops it and promotes the first new image
    /// to primary.
    pub fn add_images(&mut self, urls: impl IntoIterator<Item = String>, configured: &[&str]) {
        let new: Vec<String> = urls
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();
        if new.is_empty() {
            return;
        }

        if self.is_placeholder(configured) {
            self.images.clear();
            self.primary.clear();
        }
        self.images.extend(new);
        if self.primary.is_empty() {
            if let Some(first) = self.images.first() {
                self.primary = first.clone();
            }
        }
    }

    /// Make an existing image the primary. Returns false if it isn't in the
    /// gallery.
    pub fn set_primary(&mut self, url: &str) -> bool {
        if self.images.iter().any(|img| img == url) {
            self.primary = url.to_string();
            true
        } else {
            false
        }
    }

    /// Position of an image in the gallery.
    pub fn position(&self, url: &str) -> Option<usize> {
        self.images.iter().position(|img| img == url)
    }

    /// Remove the image at `index`.
    ///
    /// If the primary is removed the first remaining image takes its place.
    /// Removing the last image leaves only `placeholder`.
    pub fn remove_image(&mut self, index: usize, placeholder: &str) -> Option<String> {
        if index >= self.images.len() {
            return None;
        }
        let removed = self.images.remove(index);

        if self.images.is_empty() {
            *self = Self::with_placeholder("", Vec::new(), placeholder);
        } else if removed == self.primary && !self.images.contains(&removed) {
            if let Some(first) = self.images.first() {
                self.primary = first.clone();
            }
        }
        Some(removed)
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::single(DEFAULT_PLACEHOLDER_IMAGE)
    }
}
