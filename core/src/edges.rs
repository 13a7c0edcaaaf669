use crate::types::{Edge, SignalRuns};

/// Edge between each pair of neighbouring samples; one shorter than `signal`.
pub fn extract_edges(signal: &[bool]) -> Vec<Edge> {
    signal
        .windows(2)
        .map(|pair| Edge::between(pair[0], pair[1]))
        .collect()
}

/// Positions of every rising or falling edge.
pub fn edge_indices(edges: &[Edge]) -> Vec<usize> {
    edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| edge.is_transition())
        .map(|(i, _)| i)
        .collect()
}

/// Frame counts of the high and low runs between edges.
///
/// The run before the first edge and the run after the last edge have an
/// unknown length, so neither ever shows up in the result. With zero or one
/// transition both lists are empty.
pub fn signal_runs(edges: &[Edge], edge_indices: &[usize]) -> SignalRuns {
    let Some(&first) = edge_indices.first() else {
        return SignalRuns::default();
    };

    // Run k spans from edge k-1 to edge k; run 0 is anchored at frame 0
    // and is only kept to line up positions.
    let runs = edge_indices.iter().scan(0usize, |previous, &index| {
        let duration = index - *previous;
        *previous = index;
        Some(duration as u32)
    });

    // Odd positions follow a rising edge when the first edge rises.
    let Some(&first_edge) = edges.get(first) else {
        return SignalRuns::default();
    };
    let high_parity = if first_edge == Edge::Rising { 1 } else { 0 };

    let mut result = SignalRuns::default();
    for (position, duration) in runs.enumerate().skip(1) {
        if position % 2 == high_parity {
            result.highs.push(duration);
        } else {
            result.lows.push(duration);
        }
    }
    result
}
