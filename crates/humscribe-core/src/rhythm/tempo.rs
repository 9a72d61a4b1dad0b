//! Tempo estimation from note onsets

use crate::note::Note;

/// Tempo assumed when nothing better can be inferred
pub const DEFAULT_BPM: f64 = 120.0;

const MIN_NOTES: usize = 4;
const MIN_IOI: f64 = 0.1;
const MAX_IOI: f64 = 2.0;
const HISTOGRAM_BINS: usize = 20;
const BPM_RANGE: std::ops::RangeInclusive<f64> = 60.0..=180.0;

/// Left edge of the most populated bin of an equal-width histogram.
///
/// When all values coincide the value itself is the mode.
fn modal_interval(intervals: &[f64]) -> Option<f64> {
    let lo = intervals.iter().copied().reduce(f64::min)?;
    let hi = intervals.iter().copied().reduce(f64::max)?;
    if hi - lo < 1e-9 {
        return Some(lo);
    }

    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let mut counts = [0usize; HISTOGRAM_BINS];
    for &ioi in intervals {
        let bin = (((ioi - lo) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    // First bin wins ties
    let (modal_bin, _) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
    Some(lo + modal_bin as f64 * width)
}

/// Estimate BPM from inter-onset intervals.
///
/// The modal interval is tried as a quarter note, then as an eighth note;
/// failing both, the quarter-note reading is folded by octaves into 60-180.
pub fn detect_tempo(notes: &[Note]) -> f64 {
    if notes.len() < MIN_NOTES {
        return DEFAULT_BPM;
    }

    let intervals: Vec<f64> = notes
        .windows(2)
        .map(|w| w[1].start - w[0].start)
        .filter(|ioi| (MIN_IOI..=MAX_IOI).contains(ioi))
        .collect();

    let Some(beat) = modal_interval(&intervals).filter(|b| *b > 0.0) else {
        return DEFAULT_BPM;
    };

    let bpm_quarter = 60.0 / beat;
    let bpm_eighth = 60.0 / (beat * 2.0);

    let bpm = if BPM_RANGE.contains(&bpm_quarter) {
        bpm_quarter
    } else if BPM_RANGE.contains(&bpm_eighth) {
        bpm_eighth
    } else {
        let mut folded = bpm_quarter;
        // Bounded: a few octaves always reach the range from any finite reading
        for _ in 0..16 {
            if folded < *BPM_RANGE.start() {
                folded *= 2.0;
            } else if folded > *BPM_RANGE.end() {
                folded /= 2.0;
            } else {
                break;
            }
        }
        if !BPM_RANGE.contains(&folded) {
            return DEFAULT_BPM;
        }
        folded
    };

    let bpm = bpm.round();
    tracing::debug!(bpm, beat, "estimated tempo");
    bpm
}
