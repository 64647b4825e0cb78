//! In-memory asset store for tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::sprites::{AssetError, AssetStore, SpriteName};

#[derive(Default)]
pub struct MemoryStore {
    assets: Mutex<HashMap<String, Vec<u8>>>,
    reads: AtomicUsize,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `load` sleeps for `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn insert_bytes(&self, name: &str, bytes: Vec<u8>) {
        self.assets.lock().unwrap().insert(name.to_string(), bytes);
    }

    pub fn insert_image(&self, name: &str, image: &RgbaImage) {
        self.insert_bytes(name, encode(image));
    }

    pub fn insert_solid(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) {
        self.insert_image(name, &RgbaImage::from_pixel(width, height, Rgba(rgba)));
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.lock().unwrap().contains_key(name)
    }
}

impl AssetStore for MemoryStore {
    fn load(&self, name: &SpriteName) -> Result<Vec<u8>, AssetError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.assets
            .lock()
            .unwrap()
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    fn save(&self, name: &SpriteName, image: &RgbaImage) -> Result<(), AssetError> {
        self.insert_image(name.as_str(), image);
        Ok(())
    }
}

fn encode(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
