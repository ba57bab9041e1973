//! Track sequencing
//!
//! Resolves which index of the track list plays on next/previous. Shuffle is
//! a uniform pick over the whole list, the current index included, so the
//! same track may come up twice in a row.

use crate::types::{RepeatMode, SequencingMode};
use rand::Rng;

/// Index to play after `cursor`, or `None` when playback should not move
///
/// Without shuffle the cursor wraps to 0 after the last track, but only when
/// repeat is not `Off`: with repeat off the wrap point is where the list ends.
pub fn next_index<R: Rng + ?Sized>(
    cursor: usize,
    len: usize,
    mode: SequencingMode,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if mode.shuffle {
        return Some(rng.gen_range(0..len));
    }

    let next = (cursor + 1) % len;
    if next == 0 && mode.repeat == RepeatMode::Off {
        None
    } else {
        Some(next)
    }
}

/// Index to play before `cursor`, or `None` for an empty list
///
/// Unlike [`next_index`], stepping back from the first track always wraps to
/// the last one, whatever the repeat mode.
pub fn previous_index<R: Rng + ?Sized>(
    cursor: usize,
    len: usize,
    mode: SequencingMode,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if mode.shuffle {
        return Some(rng.gen_range(0..len));
    }

    if cursor == 0 {
        Some(len - 1)
    } else {
        Some((cursor - 1).min(len - 1))
    }
}
