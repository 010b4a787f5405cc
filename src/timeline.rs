//! Segment timeline lookup
//!
//! Maps a playback offset in seconds to the segment playing at that moment,
//! walking segment durations from the playlist's start offset.

use std::ops::Range;

/// Widen an `EXTINF` duration by its decimal value.
///
/// `f64::from(6.006f32)` is `6.00600004196167`; going through the shortest
/// round-trip text keeps it `6.006`, so window ends line up with the
/// durations written in the playlist.
pub fn duration_secs(duration: f32) -> f64 {
    duration
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(duration))
}

/// Index of the segment whose window `[cur, cur + duration)` contains `seconds`.
///
/// The first segment starts at `start`. Returns `None` once `seconds` is at or
/// past the end of the last segment; `f64::INFINITY` therefore never matches.
pub fn segment_index<I>(start: f64, durations: I, seconds: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut cur_time = start;
    for (i, duration) in durations.into_iter().enumerate() {
        // strict: a time on a boundary belongs to the segment starting there
        if seconds < cur_time + duration {
            return Some(i);
        }
        cur_time += duration;
    }
    None
}

/// Index range of the segments covering `[start_sec, end_sec)`.
///
/// The end index is exclusive. An unresolvable start yields an empty range;
/// an unresolvable end (past the stream) extends to `len`; an end at or
/// before the start collapses to empty.
pub fn range_in_time<I>(
    start: f64,
    durations: I,
    len: usize,
    start_sec: f64,
    end_sec: Option<f64>,
) -> Range<usize>
where
    I: IntoIterator<Item = f64> + Clone,
{
    let Some(start_idx) = segment_index(start, durations.clone(), start_sec) else {
        return 0..0;
    };
    let end_idx = segment_index(start, durations, end_sec.unwrap_or(f64::INFINITY)).unwrap_or(len);
    if end_idx <= start_idx {
        return start_idx..start_idx;
    }
    start_idx..end_idx
}
