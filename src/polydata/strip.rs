//! Joining line segments into maximal polylines.

use crate::polydata::PolyData;
use hashbrown::HashMap;
use log::debug;

/// Options for [`PolyData::strip`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StripConfig {
    /// Maximum number of segments in one output polyline. A longer chain is
    /// continued in a new polyline starting where the previous one stopped.
    /// `None` keeps every chain whole, which a closed loop needs in order to
    /// be filled as one polygon.
    pub maximum_length: Option<usize>,
}

impl PolyData {
    /// Join this dataset's line cells into as few polylines as possible.
    ///
    /// Chains are grown greedily over shared point indices. Chains that have an
    /// end (a point used by one segment, or a branch point used by three or
    /// more) are started there first; what remains are closed loops, which are
    /// emitted with their first point repeated at the end. At branch points the
    /// lowest-numbered unused segment is taken, so which chain passes through a
    /// branch depends on segment order. Each chain is walked to its full length
    /// before `maximum_length` splits it.
    ///
    /// Points and point attributes pass through unchanged; polygons are copied.
    pub fn strip(&self, config: &StripConfig) -> PolyData {
        let segments: Vec<(usize, usize)> = self
            .lines
            .iter()
            .flat_map(|line| line.windows(2).map(|w| (w[0], w[1])))
            .filter(|(a, b)| a != b)
            .collect();

        // point -> segments using it
        let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, &(a, b)) in segments.iter().enumerate() {
            adjacency.entry(a).or_default().push(i);
            adjacency.entry(b).or_default().push(i);
        }
        let degree = |p: usize| adjacency.get(&p).map_or(0, Vec::len);

        let mut used = vec![false; segments.len()];
        let mut lines: Vec<Vec<usize>> = Vec::new();

        // Take the next unused segment at `point`, returning its other end.
        let next_from = |point: usize, used: &mut [bool]| -> Option<usize> {
            let seg = *adjacency.get(&point)?.iter().find(|&&s| !used[s])?;
            used[seg] = true;
            let (a, b) = segments[seg];
            Some(if a == point { b } else { a })
        };

        // Walk from `from` until the chain closes on `stop`, runs out of
        // segments, or (for open chains) reaches a point that is not degree 2.
        let walk = |from: usize, stop: usize, open: bool, used: &mut [bool]| -> Vec<usize> {
            let mut points = Vec::new();
            let mut current = from;
            loop {
                if current == stop || (open && degree(current) != 2) {
                    break;
                }
                match next_from(current, used) {
                    Some(next) => {
                        points.push(next);
                        current = next;
                    },
                    None => break,
                }
            }
            points
        };

        for open_pass in [true, false] {
            for start in 0..segments.len() {
                if used[start] {
                    continue;
                }
                let (a, b) = segments[start];
                let (head, tail) = if open_pass {
                    match (degree(a) != 2, degree(b) != 2) {
                        (true, _) => (a, b),
                        (false, true) => (b, a),
                        (false, false) => continue,
                    }
                } else {
                    (a, b)
                };
                used[start] = true;

                let mut chain = vec![head, tail];
                chain.extend(walk(tail, head, open_pass, &mut used));

                // A loop that did not close going forward is finished backward
                // from its head
                if !open_pass && chain.last() != Some(&head) {
                    let mut back = walk(head, tail, false, &mut used);
                    back.reverse();
                    back.extend(chain);
                    chain = back;
                }

                lines.extend(split_chain(chain, config.maximum_length));
            }
        }

        let out = PolyData {
            points: self.points.clone(),
            polys: self.polys.clone(),
            lines,
            point_normals: self.point_normals.clone(),
            cell_normals: self.cell_normals.clone(),
            scalars: self.scalars.clone(),
            ..Default::default()
        };
        debug!(
            "strip: {} segments -> {} polylines",
            segments.len(),
            out.num_lines()
        );
        out
    }
}

/// Cut `chain` into pieces of at most `maximum_length` segments, each piece
/// starting at the last point of the one before.
fn split_chain(chain: Vec<usize>, maximum_length: Option<usize>) -> Vec<Vec<usize>> {
    let segments = chain.len().saturating_sub(1);
    let Some(max) = maximum_length.map(|m| m.max(1)).filter(|&m| segments > m) else {
        return vec![chain];
    };
    (0..segments)
        .step_by(max)
        .map(|start| chain[start..=(start + max).min(segments)].to_vec())
        .collect()
}
