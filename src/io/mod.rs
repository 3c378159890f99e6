use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::read_from_path;
use lofty::tag::{ItemKey, ItemValue, Tag, TagItem};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Track;
use crate::{BOOKMARKS_FIELD, POSITION_FIELD};

/// Metadata fields mirrored into the file's tag.
const TAG_FIELDS: [&str; 2] = [POSITION_FIELD, BOOKMARKS_FIELD];

pub fn get_files(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();

    let mut files = vec![];
    let mut stack = vec![root];

    while let Some(dir) = stack.pop() {
        for entry in dir.read_dir()? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Some(ext) = path.extension() {
                if extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Reads duration and bookmark tags. Files lofty cannot read are skipped.
pub fn load_tracks<T>(paths: Vec<T>) -> Vec<Track>
where
    T: Into<PathBuf>,
{
    paths
        .into_iter()
        .filter_map(|p| {
            let path = p.into();
            match read_track(path.clone()) {
                Ok(track) => Some(track),
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable track");
                    None
                }
            }
        })
        .collect()
}

fn read_track(path: PathBuf) -> Result<Track> {
    let tagged = read_from_path(&path)?;
    let duration = tagged.properties().duration();

    let mut track = Track::new(path, duration);
    if let Some(tag) = tagged.primary_tag() {
        for field in TAG_FIELDS {
            if let Some(ItemValue::Text(value)) = tag
                .get(&ItemKey::Unknown(field.to_string()))
                .map(|t| t.value())
            {
                track.meta.insert(field.to_string(), value.clone());
            }
        }
    }

    Ok(track)
}

/// Writes the bookmark fields of `meta` into the primary tag, creating the tag
/// when the file has none. Fields missing from `meta` are removed.
pub fn write_tags(path: &Path, meta: &BTreeMap<String, String>) -> Result<()> {
    let mut tagged = read_from_path(path)?;

    if tagged.primary_tag().is_none() {
        let tag = Tag::new(tagged.file_type().primary_tag_type());
        tagged.insert_tag(tag);
    }

    let tag = tagged.primary_tag_mut().ok_or_else(|| Error::NoPrimaryTag {
        path: path.display().to_string(),
    })?;

    for field in TAG_FIELDS {
        let key = ItemKey::Unknown(field.to_string());
        match meta.get(field) {
            Some(value) => {
                tag.insert_unchecked(TagItem::new(key, ItemValue::Text(value.clone())));
            }
            None => tag.retain(|item| item.key() != &key),
        }
    }

    tagged.save_to_path(path, WriteOptions::default())?;
    debug!(path = %path.display(), "bookmark tags written");

    Ok(())
}
