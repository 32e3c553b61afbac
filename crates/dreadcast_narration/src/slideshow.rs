//! Timing and layout of the segment frames in a story video.

use dreadcast_core::{SegmentKind, Story, split_segments};
use dreadcast_interface::StorySegment;

/// Share `total_secs` between segments in proportion to their weights.
///
/// Every segment gets at least `min_secs`; time taken by short segments is
/// removed from the longer ones so the sum still equals `total_secs`. When
/// the track is too short to give every segment the minimum, each gets
/// exactly the minimum and the video outlasts the audio.
///
/// # Examples
///
/// ```
/// use dreadcast_narration::segment_durations;
///
/// assert_eq!(segment_durations(&[100, 300], 40.0, 2.0), vec![10.0, 30.0]);
/// assert_eq!(segment_durations(&[1, 1, 1], 3.0, 2.0), vec![2.0, 2.0, 2.0]);
/// ```
pub fn segment_durations(weights: &[usize], total_secs: f64, min_secs: f64) -> Vec<f64> {
    let count = weights.len();
    if count == 0 {
        return Vec::new();
    }
    if total_secs <= min_secs * count as f64 {
        return vec![min_secs; count];
    }

    let weights: Vec<f64> = weights.iter().map(|w| (*w).max(1) as f64).collect();
    let mut clamped = vec![false; count];
    let mut durations = vec![min_secs; count];

    loop {
        let fixed = clamped.iter().filter(|c| **c).count() as f64 * min_secs;
        let free_weight: f64 = weights
            .iter()
            .zip(&clamped)
            .filter(|(_, c)| !**c)
            .map(|(w, _)| w)
            .sum();
        let budget = total_secs - fixed;

        let mut changed = false;
        for ((duration, clamp), weight) in durations.iter_mut().zip(&mut clamped).zip(&weights) {
            if *clamp {
                continue;
            }
            let share = budget * weight / free_weight;
            if share < min_secs {
                *clamp = true;
                *duration = min_secs;
                changed = true;
            } else {
                *duration = share;
            }
        }

        if !changed {
            return durations;
        }
    }
}

/// Split a story into timed segments for a narration of `total_secs`.
///
/// Falls back to the title when the body yields no segments.
pub fn plan_segments(
    story: &Story,
    kind: SegmentKind,
    total_secs: f64,
    min_secs: f64,
) -> Vec<StorySegment> {
    let mut texts = split_segments(story.body(), kind);
    if texts.is_empty() {
        texts.push(story.title().clone());
    }

    let weights: Vec<usize> = texts.iter().map(|t| t.chars().count()).collect();
    let durations = segment_durations(&weights, total_secs, min_secs);

    texts
        .into_iter()
        .zip(durations)
        .enumerate()
        .map(|(index, (text, duration))| StorySegment::new(index, text, duration))
        .collect()
}

/// Greedy word wrap to lines of at most `max_chars` characters.
///
/// Words longer than a line are kept whole on their own line.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

/// Input for FFmpeg's concat demuxer: each frame file with its duration.
///
/// The last frame is listed twice so its duration is honoured.
pub fn concat_list(frames: &[(String, f64)]) -> String {
    let mut list = String::from("ffconcat version 1.0\n");
    for (file, duration) in frames {
        list.push_str(&format!("file '{}'\nduration {:.3}\n", file, duration));
    }
    if let Some((last, _)) = frames.last() {
        list.push_str(&format!("file '{}'\n", last));
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dreadcast_core::StoryBuilder;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_durations_follow_text_share() {
        assert_close(&segment_durations(&[50, 150, 200], 80.0, 2.0), &[10.0, 30.0, 40.0]);
    }

    #[test]
    fn test_short_segments_get_minimum_and_total_is_kept() {
        // 1 char of 1001 would get 0.06 s; it is lifted to 2 s and the rest shrink
        let durations = segment_durations(&[1, 500, 500], 60.0, 2.0);
        assert_close(&durations, &[2.0, 29.0, 29.0]);
        assert!((durations.iter().sum::<f64>() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_short_track_gives_everyone_minimum() {
        assert_eq!(segment_durations(&[10, 20], 0.0, 2.0), vec![2.0, 2.0]);
        assert!(segment_durations(&[], 30.0, 2.0).is_empty());
    }

    #[test]
    fn test_plan_segments_splits_body() {
        let story = StoryBuilder::default()
            .id("abc")
            .title("The Attic")
            .body("Scratching.\n\nThen silence, far too long a silence.")
            .score(1)
            .created_at(Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap())
            .build()
            .unwrap();

        let segments = plan_segments(&story, SegmentKind::Paragraph, 30.0, 2.0);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text(), "Scratching.");
        assert_eq!(*segments[1].index(), 1);
        assert!(segments[1].duration_secs() > segments[0].duration_secs());
        let total: f64 = segments.iter().map(|s| s.duration_secs()).sum();
        assert!((total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the  door was\nopen again", 8),
            "the door\nwas open\nagain"
        );
        assert_eq!(wrap_text("unbreakableword ok", 5), "unbreakableword\nok");
        assert_eq!(wrap_text("   ", 10), "");
    }

    #[test]
    fn test_concat_list_repeats_last_frame() {
        let list = concat_list(&[
            ("frame_0000.png".to_string(), 2.5),
            ("frame_0001.png".to_string(), 7.25),
        ]);
        assert_eq!(
            list,
            "ffconcat version 1.0\n\
             file 'frame_0000.png'\nduration 2.500\n\
             file 'frame_0001.png'\nduration 7.250\n\
             file 'frame_0001.png'\n"
        );
    }
}
