use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use crate::error::Result;
use crate::host::TrackMeta;
use crate::io::write_tags;

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub duration: Duration,
    pub meta: BTreeMap<String, String>,
}

impl Track {
    pub fn new(path: PathBuf, duration: Duration) -> Self {
        Track {
            path,
            duration,
            meta: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl TrackMeta for Track {
    fn duration(&self) -> f32 {
        self.duration.as_secs_f32()
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    fn set_meta(&mut self, key: &str, value: String) {
        self.meta.insert(key.to_string(), value);
    }

    fn remove_meta(&mut self, key: &str) {
        self.meta.remove(key);
    }

    fn write_through(&mut self) -> Result<()> {
        write_tags(&self.path, &self.meta)
    }
}
