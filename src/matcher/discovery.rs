use std::sync::Arc;

use crate::dataset::Dataset;
use crate::entities::{Node, NumericChildRange};
use crate::error::Result;

pub struct WalkResult {
    pub nodes: Vec<Arc<Node>>,
    pub nodes_evaluated: u64,
    pub numeric_difference: i64,
    pub is_complete: bool,
}

impl WalkResult {
    pub fn node_offsets(&self) -> Vec<u64> {
        self.nodes.iter().map(|n| n.offset).collect()
    }
}

fn child_for_byte(children: &[(u8, u64)], byte: u8) -> Option<u64> {
    children.binary_search_by_key(&byte, |&(b, _)| b).ok().map(|i| children[i].1)
}

/// Picks the numeric child range closest to `value`: zero distance if
/// `value` falls inside `[low, high]`, otherwise the distance to the
/// nearer bound. Ties keep the first range encountered (stable).
fn best_numeric_range(ranges: &[NumericChildRange], value: i64) -> Option<(NumericChildRange, i64)> {
    let mut best: Option<(NumericChildRange, i64)> = None;
    for &range in ranges {
        let diff = if value >= range.low as i64 && value <= range.high as i64 {
            0
        } else {
            (value - range.low as i64).abs().min((value - range.high as i64).abs())
        };
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((range, diff)),
        }
    }
    best
}

/// Walks the UA byte-by-byte over the node trie starting at the root set
/// (§4.G step 1). When `allow_numeric` is set and a literal child lookup
/// fails, falls back to the last matched node's numeric-range children
/// (§4.G step 3, v3.2 only) before giving up on that branch.
pub fn walk(
    dataset: &Dataset,
    ua: &[u8],
    allow_numeric: bool,
    node_evaluation_budget: Option<u64>,
) -> Result<WalkResult> {
    let mut nodes: Vec<Arc<Node>> = Vec::new();
    let mut current: Option<Arc<Node>> = None;
    let mut position: usize = 0;
    let mut nodes_evaluated: u64 = 0;
    let mut numeric_difference: i64 = 0;
    let mut is_complete = true;

    loop {
        if position >= ua.len() {
            break;
        }
        if let Some(budget) = node_evaluation_budget {
            if nodes_evaluated >= budget {
                is_complete = false;
                break;
            }
        }
        nodes_evaluated += 1;

        let children: &[(u8, u64)] = match &current {
            Some(n) => &n.children,
            None => dataset.root_nodes(),
        };

        if let Some(child_offset) = child_for_byte(children, ua[position]) {
            let node = dataset.node_at(child_offset)?;
            let run = &node.characters;
            if position + run.len() <= ua.len() && &ua[position..position + run.len()] == run.as_slice() {
                position += node.run_len();
                nodes.push(node.clone());
                current = Some(node);
                continue;
            }
        }

        if allow_numeric {
            if let Some(last) = current.as_ref() {
                if !last.numeric_children.is_empty() {
                    let digit_len = ua[position..].iter().take_while(|b| b.is_ascii_digit()).count();
                    if digit_len > 0 {
                        let text = std::str::from_utf8(&ua[position..position + digit_len]).unwrap_or("0");
                        let value: i64 = text.parse().unwrap_or(0);
                        if let Some((range, diff)) = best_numeric_range(&last.numeric_children, value) {
                            let child = dataset.node_at(range.child_offset)?;
                            numeric_difference += diff;
                            position += digit_len;
                            nodes.push(child.clone());
                            current = Some(child);
                            continue;
                        }
                    }
                }
            }
        }

        break;
    }

    Ok(WalkResult { nodes, nodes_evaluated, numeric_difference, is_complete })
}
