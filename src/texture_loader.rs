use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, info, warn};
use crate::error::{HeroError, Result};
use crate::slide::Deck;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Textures of every slide and overlay image. `None` means the image could
/// not be loaded; the renderer then shows the background alone.
pub struct Assets {
    pub slides: Vec<Option<Texture2D>>,
    pub overlays: Vec<Option<Texture2D>>,
}

impl Assets {
    pub fn empty(deck: &Deck) -> Self {
        Self {
            slides: deck.slides.iter().map(|_| None).collect(),
            overlays: deck.overlays.iter().map(|_| None).collect(),
        }
    }

    /// Loads every image of `deck`. Failures are logged and skipped.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, deck: &Deck) -> Self {
        let client = match reqwest::blocking::Client::builder().timeout(FETCH_TIMEOUT).build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("HTTP client unavailable, remote images skipped: {}", e);
                None
            }
        };

        let mut load = |location: &str| match load_texture(rl, thread, client.as_ref(), location) {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let slides = deck.slides.iter().map(|s| load(&s.image)).collect::<Vec<_>>();
        let overlays = deck.overlays.iter().map(|o| load(&o.image)).collect::<Vec<_>>();

        let loaded = slides.iter().chain(overlays.iter()).filter(|t| t.is_some()).count();
        info!(loaded, total = slides.len() + overlays.len(), "images loaded");

        Self { slides, overlays }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

// --- Helper: File type hint for the image decoder ---
// Remote images name their format in the "fm" query parameter, local files
// in their extension.
pub fn image_extension(location: &str) -> String {
    let (path, query) = location.split_once('?').unwrap_or((location, ""));

    let from_query = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("fm="))
        .filter(|fm| !fm.is_empty());

    let from_path = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .filter(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"));

    from_query
        .or(from_path)
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string())
}

fn fetch_bytes(client: Option<&reqwest::blocking::Client>, location: &str) -> Result<Vec<u8>> {
    if is_remote(location) {
        let client = client.ok_or_else(|| HeroError::Image {
            location: location.to_string(),
            reason: "no HTTP client".to_string(),
        })?;
        debug!(location, "fetching image");
        let response = client.get(location).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Ok(fs::read(path)?)
    }
}

// --- EXIF orientation of a JPEG, 1 (no rotation) when absent ---
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            // Non-critical: proceed without rotation
            debug!("no EXIF data: {}", e);
            return 1;
        }
    };

    match exif.get_field(Tag::Orientation, In::PRIMARY).map(|field| &field.value) {
        Some(Value::Short(values)) if !values.is_empty() => values[0],
        _ => 1,
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    client: Option<&reqwest::blocking::Client>,
    location: &str,
) -> Result<Texture2D> {
    let image_error = |reason: String| HeroError::Image {
        location: location.to_string(),
        reason,
    };

    let bytes = fetch_bytes(client, location).map_err(|e| image_error(e.to_string()))?;
    let extension = image_extension(location);

    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &bytes)
        .map_err(|e| image_error(e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(location, orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| image_error(e.to_string()))?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_query_format() {
        assert_eq!(
            image_extension("https://images.unsplash.com/photo-1?crop=entropy&fm=jpg&q=80&w=400"),
            "jpg"
        );
        assert_eq!(image_extension("https://example.com/a?fm=PNG"), "png");
    }

    #[test]
    fn extension_from_local_path() {
        assert_eq!(image_extension("assets/slide.PNG"), "png");
        assert_eq!(image_extension("file:///tmp/slide.bmp"), "bmp");
    }

    #[test]
    fn extension_defaults_to_jpg() {
        assert_eq!(image_extension("https://example.com/photo"), "jpg");
        assert_eq!(image_extension("notes.txt"), "jpg");
    }

    #[test]
    fn missing_exif_means_no_rotation() {
        assert_eq!(exif_orientation(b"not a jpeg"), 1);
    }

    #[test]
    fn remote_locations() {
        assert!(is_remote("https://images.unsplash.com/x"));
        assert!(!is_remote("file:///tmp/x.png"));
        assert!(!is_remote("assets/x.png"));
    }
}
