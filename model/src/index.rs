/// Finds the segment of a timestamp sequence bracketing `time`: the `i` with
/// `timestamps[i] <= time < timestamps[i + 1]`.
///
/// - Once `time` reaches the last timestamp, this returns the final segment (`len - 2`).
/// - Before the first timestamp, or when no bracket has two present entries, this returns 0.
/// - With fewer than 2 present timestamps, there's no segment at all, so None.
///
/// Missing entries are skipped over, never repaired. The caller still has to check that both
/// ends of the returned segment are present before interpolating.
pub fn locate_segment(timestamps: &[Option<f64>], time: f64) -> Option<usize> {
    let present = timestamps
        .iter()
        .filter(|t| t.map(|t| !t.is_nan()).unwrap_or(false))
        .count();
    if present < 2 {
        return None;
    }
    let last = timestamps.len() - 2;

    if let Some(end) = timestamps[timestamps.len() - 1] {
        if time >= end {
            return Some(last);
        }
    }

    for (idx, pair) in timestamps.windows(2).enumerate() {
        if let (Some(t1), Some(t2)) = (pair[0], pair[1]) {
            if t1 <= time && time < t2 {
                return Some(idx);
            }
        }
    }
    Some(0)
}
