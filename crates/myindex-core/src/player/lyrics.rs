//! LRC lyric parsing and position lookup.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A leading `[mm:ss]`, `[mm:ss.xx]` or `[mm:ss:xxx]` time tag.
static TIME_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+):(\d{1,2})(?:[.:](\d{1,3}))?\]").unwrap());

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from the start of the track, in milliseconds.
    pub time_ms: u64,
    pub text: String,
}

/// Parsed lyrics, ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    lines: Vec<LyricLine>,
}

impl Lyrics {
    /// Parse LRC text.
    ///
    /// A line may carry several time tags and is then repeated at each of
    /// them. Metadata tags such as `[ar:...]` and untagged lines are skipped.
    pub fn parse(lrc: &str) -> Self {
        let mut lines = Vec::new();

        for raw in lrc.lines() {
            let mut rest = raw.trim();
            let mut times = Vec::new();
            while let Some(caps) = TIME_TAG.captures(rest) {
                times.push(tag_millis(&caps));
                rest = &rest[caps[0].len()..];
            }

            let text = rest.trim();
            lines.extend(times.into_iter().map(|time_ms| LyricLine {
                time_ms,
                text: text.to_string(),
            }));
        }

        lines.sort_by_key(|line| line.time_ms);
        Self { lines }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line being sung at `position_ms`, if any has started yet.
    pub fn line_at(&self, position_ms: u64) -> Option<&LyricLine> {
        let started = self.lines.partition_point(|line| line.time_ms <= position_ms);
        started.checked_sub(1).map(|i| &self.lines[i])
    }
}

fn tag_millis(caps: &regex::Captures<'_>) -> u64 {
    let minutes: u64 = caps[1].parse().unwrap_or(0);
    let seconds: u64 = caps[2].parse().unwrap_or(0);
    let fraction = caps.get(3).map_or(0, |m| {
        let value: u64 = m.as_str().parse().unwrap_or(0);
        match m.as_str().len() {
            1 => value * 100,
            2 => value * 10,
            _ => value,
        }
    });
    (minutes * 60 + seconds) * 1000 + fraction
}

/// Whether a track's `lrc` field points at a remote file rather than holding the text.
pub fn is_remote_lrc(lrc: &str) -> bool {
    let lrc = lrc.trim_start();
    lrc.starts_with("http://") || lrc.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[ti:Song]\n[ar:Someone]\n[00:01.50]first\n[00:10.00][01:00.00]chorus\n[00:05.123]second\nno tag here\n";

    #[test]
    fn test_parse_orders_and_expands_tags() {
        let lyrics = Lyrics::parse(SAMPLE);
        let times: Vec<u64> = lyrics.lines().iter().map(|l| l.time_ms).collect();
        assert_eq!(times, vec![1500, 5123, 10_000, 60_000]);
        assert_eq!(lyrics.lines()[2].text, "chorus");
        assert_eq!(lyrics.lines()[3].text, "chorus");
    }

    #[test]
    fn test_metadata_only_is_empty() {
        assert!(Lyrics::parse("[ti:x]\n[by:y]").is_empty());
        assert!(Lyrics::parse("").is_empty());
    }

    #[test]
    fn test_tag_without_fraction() {
        let lyrics = Lyrics::parse("[02:03]plain");
        assert_eq!(lyrics.lines()[0].time_ms, 123_000);
    }

    #[test]
    fn test_line_at() {
        let lyrics = Lyrics::parse(SAMPLE);
        assert_eq!(lyrics.line_at(0), None);
        assert_eq!(lyrics.line_at(1500).map(|l| l.text.as_str()), Some("first"));
        assert_eq!(lyrics.line_at(9_999).map(|l| l.text.as_str()), Some("second"));
        assert_eq!(lyrics.line_at(3_600_000).map(|l| l.time_ms), Some(60_000));
    }

    #[test]
    fn test_is_remote_lrc() {
        assert!(is_remote_lrc("https://api.example/lrc?id=1"));
        assert!(is_remote_lrc("http://x"));
        assert!(!is_remote_lrc("[00:01.00]hi"));
    }
}
