//! Loaded fixture object graph
//!
//! Parsed playlists are kept as returned by `m3u8_rs`; the fixture types add
//! file/route metadata next to them and time lookups on top. Segments are
//! borrowed views, so a fixture segment's media segment is the very value
//! stored in the parsed media playlist.

use m3u8_rs::{MasterPlaylist, MediaPlaylist, MediaSegment};

use crate::path::FixtureFile;
use crate::timeline;

/// One segment of a loaded media playlist
#[derive(Debug, Clone, Copy)]
pub struct FixtureSegment<'a> {
    index: usize,
    segment_file: &'a FixtureFile,
    media_segment: &'a MediaSegment,
}

impl<'a> FixtureSegment<'a> {
    /// Position of this segment in its media playlist
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn segment_file(&self) -> &'a FixtureFile {
        self.segment_file
    }

    pub fn media_segment(&self) -> &'a MediaSegment {
        self.media_segment
    }

    /// Segment duration in seconds
    pub fn duration(&self) -> f64 {
        timeline::duration_secs(self.media_segment.duration)
    }
}

/// A media playlist loaded from the fixture tree
#[derive(Debug, Clone)]
pub struct FixtureMediaPlaylist {
    playlist_file: FixtureFile,
    media_playlist: MediaPlaylist,
    segment_files: Vec<FixtureFile>,
}

impl FixtureMediaPlaylist {
    /// Pair a parsed playlist with one file per segment.
    ///
    /// Returns `None` when the counts differ.
    pub fn new(
        playlist_file: FixtureFile,
        media_playlist: MediaPlaylist,
        segment_files: Vec<FixtureFile>,
    ) -> Option<Self> {
        if segment_files.len() != media_playlist.segments.len() {
            return None;
        }
        Some(Self {
            playlist_file,
            media_playlist,
            segment_files,
        })
    }

    /// Build the segment files by resolving each parsed segment in order
    pub fn from_segments<F>(
        playlist_file: FixtureFile,
        media_playlist: MediaPlaylist,
        resolve: F,
    ) -> Self
    where
        F: FnMut(&MediaSegment) -> FixtureFile,
    {
        let segment_files = media_playlist.segments.iter().map(resolve).collect();
        Self {
            playlist_file,
            media_playlist,
            segment_files,
        }
    }

    pub fn playlist_file(&self) -> &FixtureFile {
        &self.playlist_file
    }

    pub fn media_playlist(&self) -> &MediaPlaylist {
        &self.media_playlist
    }

    pub fn len(&self) -> usize {
        self.segment_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_files.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<FixtureSegment<'_>> {
        Some(FixtureSegment {
            index,
            segment_file: self.segment_files.get(index)?,
            media_segment: self.media_playlist.segments.get(index)?,
        })
    }

    /// Segments in playlist order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = FixtureSegment<'_>> + '_ {
        self.segment_files
            .iter()
            .zip(&self.media_playlist.segments)
            .enumerate()
            .map(|(index, (segment_file, media_segment))| FixtureSegment {
                index,
                segment_file,
                media_segment,
            })
    }

    /// `EXT-X-START` time offset, or 0 when the playlist has none
    pub fn start_offset(&self) -> f64 {
        self.media_playlist
            .start
            .as_ref()
            .map(|start| f64::from(start.time_offset))
            .unwrap_or(0.0)
    }

    /// Sum of all segment durations
    pub fn total_duration(&self) -> f64 {
        self.durations().sum()
    }

    fn durations(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.media_playlist
            .segments
            .iter()
            .map(|segment| timeline::duration_secs(segment.duration))
    }

    /// Index of the segment playing `seconds` into the stream
    pub fn segment_index(&self, seconds: f64) -> Option<usize> {
        timeline::segment_index(self.start_offset(), self.durations(), seconds)
    }

    pub fn segment_at_time(&self, seconds: f64) -> Option<FixtureSegment<'_>> {
        self.segment(self.segment_index(seconds)?)
    }

    /// Segments from the one playing at `start_sec` up to, not including, the
    /// one playing at `end_sec` (or through the last segment when `end_sec`
    /// is `None` or past the end).
    pub fn segments_in_time_range(
        &self,
        start_sec: f64,
        end_sec: Option<f64>,
    ) -> Vec<FixtureSegment<'_>> {
        let range = timeline::range_in_time(
            self.start_offset(),
            self.durations(),
            self.len(),
            start_sec,
            end_sec,
        );
        range.filter_map(|i| self.segment(i)).collect()
    }
}

/// A whole fixture stream: the multivariant playlist and every variant
#[derive(Debug, Clone)]
pub struct FixtureStream {
    pub stream_name: String,
    pub playlist_file: FixtureFile,
    pub master_playlist: MasterPlaylist,
    /// One entry per `master_playlist.variants`, same order
    pub variants: Vec<FixtureMediaPlaylist>,
}

impl FixtureStream {
    pub fn variant(&self, index: usize) -> Option<&FixtureMediaPlaylist> {
        self.variants.get(index)
    }

    /// Every file of the stream: the master playlist, then each media
    /// playlist followed by its segments.
    pub fn files(&self) -> Vec<&FixtureFile> {
        let mut files = vec![&self.playlist_file];
        for variant in &self.variants {
            files.push(&variant.playlist_file);
            files.extend(variant.segment_files.iter());
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m3u8_rs::Start;
    use std::path::Path;

    fn playlist_of(durations: &[f32], start: Option<f64>) -> FixtureMediaPlaylist {
        let root = Path::new("/fixtures");
        let segments: Vec<MediaSegment> = durations
            .iter()
            .enumerate()
            .map(|(i, &duration)| MediaSegment {
                uri: format!("seg{i}.ts"),
                duration,
                ..Default::default()
            })
            .collect();
        let files = segments
            .iter()
            .map(|s| FixtureFile::new(root, &root.join("sample").join(&s.uri)))
            .collect();
        let media = MediaPlaylist {
            segments,
            start: start.map(|time_offset| Start {
                time_offset: time_offset.into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        FixtureMediaPlaylist::new(
            FixtureFile::new(root, Path::new("/fixtures/sample/index.m3u8")),
            media,
            files,
        )
        .unwrap()
    }

    fn indices(segments: &[FixtureSegment<'_>]) -> Vec<usize> {
        segments.iter().map(|s| s.index()).collect()
    }

    #[test]
    fn test_segment_index_five_second_segments() {
        let pl = playlist_of(&[5.0; 5], None);
        assert_eq!(pl.segment_index(10.0), Some(2));
        assert_eq!(pl.segment_index(24.999), Some(4));
        assert_eq!(pl.segment_index(25.0), None);
        assert_eq!(pl.total_duration(), 25.0);
    }

    #[test]
    fn test_segment_at_time() {
        let pl = playlist_of(&[5.0; 5], None);
        let seg = pl.segment_at_time(12.0).unwrap();
        assert_eq!(seg.index(), 2);
        assert_eq!(seg.segment_file().route, "/sample/seg2.ts");
        assert_eq!(seg.media_segment().uri, "seg2.ts");
        assert!(pl.segment_at_time(40.0).is_none());
    }

    #[test]
    fn test_segments_in_time_range() {
        let pl = playlist_of(&[5.0; 5], None);
        assert_eq!(indices(&pl.segments_in_time_range(7.0, Some(17.0))), vec![1, 2]);
        assert_eq!(indices(&pl.segments_in_time_range(7.0, None)), vec![1, 2, 3, 4]);
        assert!(pl.segments_in_time_range(30.0, None).is_empty());
        assert!(pl.segments_in_time_range(17.0, Some(7.0)).is_empty());
    }

    #[test]
    fn test_start_offset_is_timeline_origin() {
        let pl = playlist_of(&[5.0; 3], Some(6.0));
        assert_eq!(pl.start_offset(), 6.0);
        assert_eq!(pl.segment_index(10.9), Some(0));
        assert_eq!(pl.segment_index(11.0), Some(1));
        assert_eq!(pl.segment_index(21.0), None);
    }

    #[test]
    fn test_segments_share_parsed_values() {
        let pl = playlist_of(&[4.0, 4.0, 2.0], None);
        assert_eq!(pl.segments().len(), pl.media_playlist().segments.len());
        for (seg, parsed) in pl.segments().zip(&pl.media_playlist().segments) {
            assert!(std::ptr::eq(seg.media_segment(), parsed));
        }
    }

    #[test]
    fn test_mismatched_counts_rejected() {
        let media = MediaPlaylist {
            segments: vec![MediaSegment::default()],
            ..Default::default()
        };
        let file = FixtureFile::new(Path::new("/f"), Path::new("/f/a.m3u8"));
        assert!(FixtureMediaPlaylist::new(file, media, Vec::new()).is_none());
    }

    #[test]
    fn test_stream_files_order() {
        let variant = playlist_of(&[5.0, 5.0], None);
        let stream = FixtureStream {
            stream_name: "sample".to_string(),
            playlist_file: FixtureFile::new(
                Path::new("/fixtures"),
                Path::new("/fixtures/sample/stream.m3u8"),
            ),
            master_playlist: MasterPlaylist::default(),
            variants: vec![variant],
        };
        let routes: Vec<&str> = stream.files().iter().map(|f| f.route.as_str()).collect();
        assert_eq!(
            routes,
            vec![
                "/sample/stream.m3u8",
                "/sample/index.m3u8",
                "/sample/seg0.ts",
                "/sample/seg1.ts",
            ]
        );
    }
}
