use crate::{Error, Result};

/// How surplus and deficit space is spread across a run of groups.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Mode {
    /// Grow by the growth weights. When every growth weight is zero the slack
    /// is left unused.
    Normal,
    /// Grow by the growth weights, falling back to uniform growth when every
    /// weight is zero.
    #[default]
    Stretch,
    /// Split evenly, but let groups whose preferred size exceeds their share
    /// keep it.
    Equal,
    /// Split evenly, ignoring preferred sizes.
    EqualForce,
}

/// Split `full` into `n` parts whose sizes differ by at most one. The odd
/// units are spread with a running remainder, so they land evenly through the
/// run rather than piling up at one end.
pub fn even_split(full: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n64 = n as u64;
    let base = u64::from(full) / n64;
    let rem = u64::from(full) % n64;
    let mut carry = rem;
    (0..n)
        .map(|_| {
            let t = carry + rem;
            carry = t % n64;
            (base + t / n64) as u32
        })
        .collect()
}

/// Split `full` proportionally to `weights`. Fractional parts are carried
/// forward so that the result sums to exactly `full`.
///
/// Weights must be finite and non-negative with a positive sum; callers
/// substitute a fallback for all-zero weights before calling.
pub fn weighted_split(full: u32, weights: &[f64]) -> Result<Vec<u32>> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::Invariant(format!(
            "weights must be finite and non-negative: {weights:?}"
        )));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(Error::Invariant("weights sum to zero".into()));
    }

    let mut carry = 0.0;
    let mut out: Vec<u32> = weights
        .iter()
        .map(|w| {
            let exact = f64::from(full) * w / total + carry;
            let v = exact.floor().max(0.0);
            carry = exact - v;
            v as u32
        })
        .collect();

    // Float error can leave the sum a unit off in either direction.
    let assigned: u64 = out.iter().map(|v| u64::from(*v)).sum();
    let full64 = u64::from(full);
    if assigned < full64 {
        let idx = weights.iter().rposition(|w| *w > 0.0).unwrap_or(0);
        out[idx] += (full64 - assigned) as u32;
    } else if assigned > full64 {
        let mut excess = (assigned - full64) as u32;
        for v in out.iter_mut().rev() {
            let take = excess.min(*v);
            *v -= take;
            excess -= take;
            if excess == 0 {
                break;
            }
        }
    }
    Ok(out)
}

/// A run of consecutive items sharing one allotment.
#[derive(Debug, Clone, Copy)]
struct Group {
    /// Index of the first member.
    start: usize,
    /// One past the last member.
    end: usize,
    /// Largest preferred size among members.
    size: u32,
    /// Largest minimum among members.
    min: u32,
    /// Largest growth weight among members.
    grow: f64,
    /// Largest shrink weight among members.
    shrink: f64,
}

/// Collapse items into groups. An item opens a new group when it is first or
/// when the item before it advanced the cursor.
fn groups(sizes: &[u32], mins: &[u32], advances: &[bool], grow: &[f64], shrink: &[f64]) -> Vec<Group> {
    let mut out: Vec<Group> = Vec::new();
    for i in 0..sizes.len() {
        let opens = i == 0 || advances[i - 1];
        match out.last_mut() {
            Some(g) if !opens => {
                g.end = i + 1;
                g.size = g.size.max(sizes[i]);
                g.min = g.min.max(mins[i]);
                g.grow = g.grow.max(grow[i]);
                g.shrink = g.shrink.max(shrink[i]);
            }
            _ => out.push(Group {
                start: i,
                end: i + 1,
                size: sizes[i],
                min: mins[i],
                grow: grow[i],
                shrink: shrink[i],
            }),
        }
    }
    out
}

/// Sum a slice of sizes without overflow.
fn total(v: &[u32]) -> u64 {
    v.iter().map(|x| u64::from(*x)).sum()
}

/// The shrink weights of `idx`, or uniform weights when none is positive.
fn fallback_weights(idx: &[usize], weights: &[f64]) -> Vec<f64> {
    let w: Vec<f64> = idx.iter().map(|i| weights[*i]).collect();
    if w.iter().all(|w| *w <= 0.0) {
        vec![1.0; idx.len()]
    } else {
        w
    }
}

/// Reduce `values` until they fit into `full`.
///
/// Groups with a positive shrink weight give up space proportionally. Any
/// group whose share of the cut would take it below its minimum is pinned at
/// that minimum, and the remaining deficit is re-split over the rest until no
/// new group pins. If the result still overflows, the residual comes out of
/// every group still above its minimum, including zero-weight ones. Only when
/// the minimums themselves overflow does anything go below its minimum. Both
/// residual passes split by shrink weight, or uniformly when no candidate
/// has a weight.
fn shrink(full: u32, values: &[u32], mins: &[u32], weights: &[f64]) -> Result<Vec<u32>> {
    let n = values.len();
    let full64 = u64::from(full);
    let mut out = values.to_vec();
    let mut pinned = vec![false; n];

    loop {
        if total(&out) <= full64 {
            return Ok(out);
        }
        let active: Vec<usize> = (0..n).filter(|i| !pinned[*i] && weights[*i] > 0.0).collect();
        if active.is_empty() {
            break;
        }
        let fixed: u64 = (0..n)
            .filter(|i| !active.contains(i))
            .map(|i| u64::from(out[i]))
            .sum();
        let pool: u64 = active.iter().map(|i| u64::from(values[*i])).sum();
        let avail = full64.saturating_sub(fixed);
        if pool <= avail {
            break;
        }
        let deficit = (pool - avail).min(u64::from(u32::MAX)) as u32;
        let aw: Vec<f64> = active.iter().map(|i| weights[*i]).collect();
        let cuts = weighted_split(deficit, &aw)?;

        let mut pinned_any = false;
        for (i, cut) in active.iter().zip(cuts) {
            let i = *i;
            let remaining = i64::from(values[i]) - i64::from(cut);
            if remaining < i64::from(mins[i]) {
                pinned[i] = true;
                pinned_any = true;
                out[i] = mins[i].min(values[i]);
            } else {
                out[i] = remaining as u32;
            }
        }
        if !pinned_any {
            break;
        }
    }

    let mut residual = total(&out).saturating_sub(full64);

    // Everything still above its minimum yields next, zero-weight groups
    // included, so no group drops below its minimum while another has room.
    while residual > 0 {
        let room: Vec<usize> = (0..n).filter(|i| out[*i] > mins[*i]).collect();
        if room.is_empty() {
            break;
        }
        let cuts = weighted_split(
            residual.min(u64::from(u32::MAX)) as u32,
            &fallback_weights(&room, weights),
        )?;
        for (i, cut) in room.iter().zip(cuts) {
            let take = cut.min(out[*i] - mins[*i]);
            out[*i] -= take;
            residual -= u64::from(take);
        }
    }

    // The minimums alone overflow: spread the rest below them.
    while residual > 0 {
        let live: Vec<usize> = (0..n).filter(|i| out[*i] > 0).collect();
        if live.is_empty() {
            break;
        }
        let cuts = weighted_split(
            residual.min(u64::from(u32::MAX)) as u32,
            &fallback_weights(&live, weights),
        )?;
        for (i, cut) in live.iter().zip(cuts) {
            let take = cut.min(out[*i]);
            out[*i] -= take;
            residual -= u64::from(take);
        }
    }
    Ok(out)
}

/// Even split that lets over-sized groups keep their preferred size, then
/// shrinks if those groups alone overflow.
fn equalize(full: u32, sizes: &[u32], mins: &[u32], weights: &[f64]) -> Result<Vec<u32>> {
    let n = sizes.len();
    let mut kept = vec![false; n];
    let out = loop {
        let kept_total: u64 = (0..n).filter(|i| kept[*i]).map(|i| u64::from(sizes[i])).sum();
        let free: Vec<usize> = (0..n).filter(|i| !kept[*i]).collect();
        let avail = u64::from(full).saturating_sub(kept_total) as u32;
        let shares = even_split(avail, free.len());

        let mut kept_any = false;
        for (i, share) in free.iter().zip(&shares) {
            if sizes[*i] > *share {
                kept[*i] = true;
                kept_any = true;
            }
        }
        if !kept_any {
            let mut out = sizes.to_vec();
            for (i, share) in free.iter().zip(shares) {
                out[*i] = share;
            }
            break out;
        }
    };
    if total(&out) > u64::from(full) {
        shrink(full, &out, mins, weights)
    } else {
        Ok(out)
    }
}

/// Distribute `full` units of space over a run of items.
///
/// `sizes` are preferred sizes and `mins` minimums. `advances[i]` says whether
/// item `i` moves the layout cursor; consecutive items that do not advance
/// share one allotment. `grow` and `shrink` weight how surplus and deficit are
/// spread, and `mode` selects the policy.
///
/// The result sums to exactly `full`, except in `Mode::Normal` with all-zero
/// growth weights, where slack stays unused. Items receive at least their
/// minimum unless the minimums themselves exceed `full`.
pub fn distribute(
    full: u32,
    sizes: &[u32],
    mins: &[u32],
    advances: &[bool],
    grow: &[f64],
    shrink_weights: &[f64],
    mode: Mode,
) -> Result<Vec<u32>> {
    let n = sizes.len();
    if mins.len() != n || advances.len() != n || grow.len() != n || shrink_weights.len() != n {
        return Err(Error::Invariant(format!(
            "distribute: mismatched lengths (sizes {n}, mins {}, advances {}, grow {}, shrink {})",
            mins.len(),
            advances.len(),
            grow.len(),
            shrink_weights.len()
        )));
    }
    if grow
        .iter()
        .chain(shrink_weights)
        .any(|w| !w.is_finite() || *w < 0.0)
    {
        return Err(Error::Invariant(
            "distribute: weights must be finite and non-negative".into(),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let gs = groups(sizes, mins, advances, grow, shrink_weights);
    let g_sizes: Vec<u32> = gs.iter().map(|g| g.size).collect();
    let g_mins: Vec<u32> = gs.iter().map(|g| g.min).collect();
    let g_shrink: Vec<f64> = gs.iter().map(|g| g.shrink).collect();

    let alloc = match mode {
        Mode::Normal | Mode::Stretch => {
            let want = total(&g_sizes);
            if want <= u64::from(full) {
                let slack = (u64::from(full) - want) as u32;
                let mut weights: Vec<f64> = gs.iter().map(|g| g.grow).collect();
                if weights.iter().all(|w| *w <= 0.0) {
                    weights = match mode {
                        Mode::Stretch => vec![1.0; gs.len()],
                        _ => Vec::new(),
                    };
                }
                if weights.is_empty() {
                    g_sizes
                } else {
                    weighted_split(slack, &weights)?
                        .into_iter()
                        .zip(&g_sizes)
                        .map(|(extra, size)| size + extra)
                        .collect()
                }
            } else {
                shrink(full, &g_sizes, &g_mins, &g_shrink)?
            }
        }
        Mode::Equal => equalize(full, &g_sizes, &g_mins, &g_shrink)?,
        Mode::EqualForce => even_split(full, gs.len()),
    };

    let mut out = vec![0; n];
    for (g, v) in gs.iter().zip(alloc) {
        for slot in &mut out[g.start..g.end] {
            *slot = v;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Distribute with every item advancing and uniform weights.
    fn simple(full: u32, sizes: &[u32], mins: &[u32], grow: f64, mode: Mode) -> Result<Vec<u32>> {
        let n = sizes.len();
        distribute(full, sizes, mins, &vec![true; n], &vec![grow; n], &vec![1.0; n], mode)
    }

    #[test]
    fn even() {
        assert_eq!(even_split(10, 3), vec![3, 4, 3]);
        assert_eq!(even_split(0, 2), vec![0, 0]);
        assert_eq!(even_split(5, 0), Vec::<u32>::new());
        assert_eq!(even_split(7, 7), vec![1; 7]);
    }

    #[test]
    fn weighted() -> Result<()> {
        assert_eq!(weighted_split(10, &[1.0, 1.0])?, vec![5, 5]);
        assert_eq!(weighted_split(9, &[2.0, 1.0])?, vec![6, 3]);
        assert_eq!(weighted_split(10, &[0.0, 1.0, 0.0])?, vec![0, 10, 0]);
        assert!(weighted_split(10, &[0.0, 0.0]).is_err());
        assert!(weighted_split(10, &[1.0, -1.0]).is_err());
        assert!(weighted_split(10, &[f64::NAN]).is_err());
        Ok(())
    }

    #[test]
    fn length_mismatch() {
        let e = distribute(10, &[1, 2], &[0], &[true, true], &[0.0, 0.0], &[1.0, 1.0], Mode::Normal);
        assert!(matches!(e, Err(Error::Invariant(_))));
    }

    #[test]
    fn normal_leaves_slack() -> Result<()> {
        assert_eq!(simple(20, &[2, 3], &[0, 0], 0.0, Mode::Normal)?, vec![2, 3]);
        let r = distribute(
            20,
            &[2, 3],
            &[0, 0],
            &[true, true],
            &[0.0, 1.0],
            &[1.0, 1.0],
            Mode::Normal,
        )?;
        assert_eq!(r, vec![2, 18]);
        Ok(())
    }

    #[test]
    fn stretch() -> Result<()> {
        assert_eq!(simple(40, &[5, 10, 15], &[0, 0, 0], 0.0, Mode::Stretch)?, vec![8, 13, 19]);
        Ok(())
    }

    #[test]
    fn shrink_pins_minimums() -> Result<()> {
        // The first item can only give up one unit, so the others take the rest.
        let r = simple(12, &[6, 6, 6], &[5, 0, 0], 0.0, Mode::Normal)?;
        assert_eq!(r[0], 5);
        assert_eq!(r.iter().sum::<u32>(), 12);
        Ok(())
    }

    #[test]
    fn shrink_below_minimums() -> Result<()> {
        let r = simple(4, &[5, 5], &[4, 4], 0.0, Mode::Normal)?;
        assert_eq!(r.iter().sum::<u32>(), 4);
        assert_eq!(r, vec![2, 2]);
        Ok(())
    }

    #[test]
    fn zero_shrink_weight_holds_size() -> Result<()> {
        let r = distribute(10, &[6, 6], &[0, 0], &[true, true], &[0.0, 0.0], &[0.0, 1.0], Mode::Normal)?;
        assert_eq!(r, vec![6, 4]);
        Ok(())
    }

    #[test]
    fn zero_shrink_weight_yields_before_minimums_break() -> Result<()> {
        // The weighted item pins at its minimum; the rest of the deficit comes
        // out of the zero-weight item rather than pushing the first below 5.
        let r = distribute(10, &[8, 8], &[5, 0], &[true, true], &[0.0, 0.0], &[1.0, 0.0], Mode::Normal)?;
        assert_eq!(r, vec![5, 5]);
        // Only once the minimums themselves overflow does anything go under.
        let r = distribute(6, &[8, 8], &[5, 3], &[true, true], &[0.0, 0.0], &[1.0, 0.0], Mode::Normal)?;
        assert_eq!(r.iter().sum::<u32>(), 6);
        assert_eq!(r[1], 3);
        Ok(())
    }

    #[test]
    fn groups_share_allotment() -> Result<()> {
        // The first two items do not advance between them, so they overlap.
        let r = distribute(
            10,
            &[3, 5, 2],
            &[0, 0, 0],
            &[false, true, true],
            &[0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0],
            Mode::Stretch,
        )?;
        assert_eq!(r[0], r[1]);
        assert_eq!(r[1] + r[2], 10);
        Ok(())
    }

    #[test]
    fn equal() -> Result<()> {
        assert_eq!(simple(12, &[1, 1, 1], &[0, 0, 0], 0.0, Mode::Equal)?, vec![4, 4, 4]);
        // The large item keeps its size, the rest split what remains.
        assert_eq!(simple(12, &[8, 1, 1], &[0, 0, 0], 0.0, Mode::Equal)?, vec![8, 2, 2]);
        assert_eq!(simple(12, &[8, 1, 1], &[0, 0, 0], 0.0, Mode::EqualForce)?, vec![4, 4, 4]);
        // Kept sizes that overflow are shrunk back into the space.
        let r = simple(10, &[8, 8, 1], &[0, 0, 0], 0.0, Mode::Equal)?;
        assert_eq!(r.iter().sum::<u32>(), 10);
        Ok(())
    }

    proptest! {
        #[test]
        fn even_split_properties(full in 0u32..10_000, n in 1usize..50) {
            let v = even_split(full, n);
            prop_assert_eq!(v.len(), n);
            prop_assert_eq!(v.iter().map(|x| u64::from(*x)).sum::<u64>(), u64::from(full));
            let hi = v.iter().max().copied().unwrap_or(0);
            let lo = v.iter().min().copied().unwrap_or(0);
            prop_assert!(hi - lo <= 1);
        }

        #[test]
        fn weighted_split_sums(full in 0u32..10_000, weights in prop::collection::vec(0.0f64..100.0, 1..20)) {
            prop_assume!(weights.iter().sum::<f64>() > 0.0);
            let v = weighted_split(full, &weights).unwrap();
            prop_assert_eq!(v.len(), weights.len());
            prop_assert_eq!(v.iter().map(|x| u64::from(*x)).sum::<u64>(), u64::from(full));
        }

        #[test]
        fn normal_identity(sizes in prop::collection::vec(0u32..200, 1..20)) {
            let full: u32 = sizes.iter().sum();
            let mins = vec![0; sizes.len()];
            prop_assert_eq!(simple(full, &sizes, &mins, 0.0, Mode::Normal).unwrap(), sizes);
        }

        #[test]
        fn stretch_spreads_evenly(sizes in prop::collection::vec(0u32..200, 1..20), extra in 0u32..500) {
            let full = sizes.iter().sum::<u32>() + extra;
            let mins = vec![0; sizes.len()];
            let v = simple(full, &sizes, &mins, 0.0, Mode::Stretch).unwrap();
            let gains: Vec<u32> = v.iter().zip(&sizes).map(|(a, b)| a - b).collect();
            let hi = gains.iter().max().copied().unwrap_or(0);
            let lo = gains.iter().min().copied().unwrap_or(0);
            prop_assert!(hi - lo <= 1);
            prop_assert_eq!(v.iter().sum::<u32>(), full);
        }

        #[test]
        fn shrink_converges(
            items in prop::collection::vec(
                (0u32..50, 0u32..50, prop_oneof![Just(0.0f64), 0.0f64..5.0]),
                1..20,
            ),
            frac in 0.0f64..1.0,
        ) {
            let mins: Vec<u32> = items.iter().map(|(m, _, _)| *m).collect();
            let sizes: Vec<u32> = items.iter().map(|(m, d, _)| m + d).collect();
            let weights: Vec<f64> = items.iter().map(|(_, _, w)| *w).collect();
            let n = items.len();
            let lo: u32 = mins.iter().sum();
            let hi: u32 = sizes.iter().sum();
            prop_assume!(hi > lo);
            let full = lo + ((f64::from(hi - lo - 1)) * frac) as u32;
            let v = distribute(
                full,
                &sizes,
                &mins,
                &vec![true; n],
                &vec![0.0; n],
                &weights,
                Mode::Normal,
            )
            .unwrap();
            prop_assert_eq!(v.iter().sum::<u32>(), full);
            for (got, min) in v.iter().zip(&mins) {
                prop_assert!(got >= min);
            }
        }

        #[test]
        fn never_overflows(
            sizes in prop::collection::vec(0u32..100, 1..20),
            full in 0u32..500,
            mode in prop::sample::select(vec![Mode::Normal, Mode::Stretch, Mode::Equal, Mode::EqualForce]),
        ) {
            let mins: Vec<u32> = sizes.iter().map(|s| s / 2).collect();
            let v = simple(full, &sizes, &mins, 0.0, mode).unwrap();
            prop_assert!(v.iter().sum::<u32>() <= full);
        }
    }
}
