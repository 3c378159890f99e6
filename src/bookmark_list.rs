//! Bookmark field format: one offset in seconds per line, newline terminated.
//!
//! Reading stops at the first entry that repeats the one before it. Older
//! writers left the last value duplicated as an end marker, so the rule is
//! kept to read their data. [`push`] never writes such a repeat, and drops
//! whatever a reader could not reach, so the field stays bounded.

pub const MAX_BOOKMARKS: usize = 20;

/// Iterates `(index, offset_seconds)` pairs of a raw bookmark field.
pub struct Bookmarks<'a> {
    lines: std::str::Split<'a, char>,
    previous: Option<u32>,
    index: usize,
}

pub fn parse(raw: &str) -> Bookmarks<'_> {
    Bookmarks {
        lines: raw.split('\n'),
        previous: None,
        index: 0,
    }
}

impl Iterator for Bookmarks<'_> {
    type Item = (usize, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= MAX_BOOKMARKS {
            return None;
        }

        let line = self.lines.next()?.trim();
        let Ok(offset) = line.parse::<u32>() else {
            // end of field or garbage, either way the list ends here
            self.index = MAX_BOOKMARKS;
            return None;
        };

        if self.previous == Some(offset) {
            self.index = MAX_BOOKMARKS;
            return None;
        }

        self.previous = Some(offset);
        let item = (self.index, offset);
        self.index += 1;
        Some(item)
    }
}

/// Line written for one bookmark.
pub fn entry(offset: u32) -> String {
    format!("{offset}\n")
}

/// Field contents with `offset` added after the listed entries. `None` when
/// the list is full or `offset` equals the last entry, which would end the
/// list on the next read.
pub fn push(raw: &str, offset: u32) -> Option<String> {
    let mut offsets: Vec<u32> = parse(raw).map(|(_, offset)| offset).collect();
    if offsets.len() >= MAX_BOOKMARKS || offsets.last() == Some(&offset) {
        return None;
    }

    offsets.push(offset);
    Some(offsets.into_iter().map(entry).collect())
}
