pub mod discovery;
pub mod result;
pub mod strategy;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dataset::Dataset;
use crate::entities::{Node, Signature};
use crate::error::Result;

pub use result::MatchResult;
pub use strategy::Strategy;

/// Replaces any non-ASCII byte with a space, per §9's resolution of the
/// Numeric-strategy-vs-non-ASCII ambiguity: numeric fuzzing never sees
/// anything but 7-bit bytes.
fn sanitize(ua: &[u8]) -> Vec<u8> {
    ua.iter().map(|&b| if b.is_ascii() { b } else { b' ' }).collect()
}

/// Plain Levenshtein edit distance, used by the Closest strategy (§4.G
/// step 5) to score a candidate signature's rendered string against the
/// User-Agent.
fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];
    for i in 1..=n {
        curr[0] = i;
        for j in 1..=m {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// The User-Agent's own bytes at a candidate signature's node positions,
/// one node run at a time, space-padded where the User-Agent is shorter
/// than the run it's being compared against. The other side of the
/// Closest strategy's node-position-restricted edit distance.
fn ua_at_node_positions(ua: &[u8], nodes: &[Arc<Node>]) -> Vec<u8> {
    let mut out = Vec::new();
    for node in nodes {
        let start = node.position as usize;
        for i in 0..node.characters.len() {
            out.push(*ua.get(start + i).unwrap_or(&b' '));
        }
    }
    out
}

/// Runs the five-strategy search pipeline described in §4.G: exact,
/// numeric, nearest, closest, none — in that order, the first applicable
/// strategy wins.
pub struct SignatureMatcher {
    dataset: Arc<Dataset>,
    node_evaluation_budget: Option<u64>,
}

impl SignatureMatcher {
    pub fn new(dataset: Arc<Dataset>, node_evaluation_budget: Option<u64>) -> Self {
        SignatureMatcher { dataset, node_evaluation_budget }
    }

    pub fn match_user_agent(&self, ua: &[u8]) -> Result<MatchResult> {
        let start = Instant::now();
        let ua = sanitize(ua);

        let literal = discovery::walk(&self.dataset, &ua, false, self.node_evaluation_budget)?;
        let node_offsets = literal.node_offsets();

        if let Some(signature) = (!node_offsets.is_empty())
            .then(|| self.dataset.find_exact(&node_offsets))
            .flatten()
        {
            return self.finish(signature.clone(), Strategy::Exact, 0, 0, literal.nodes_evaluated, 0, start, literal.is_complete);
        }

        let numeric = discovery::walk(&self.dataset, &ua, true, self.node_evaluation_budget)?;
        let numeric_offsets = numeric.node_offsets();
        if numeric_offsets != node_offsets {
            if let Some(signature) = self.dataset.find_exact(&numeric_offsets) {
                return self.finish(
                    signature.clone(),
                    Strategy::Numeric,
                    numeric.numeric_difference,
                    0,
                    numeric.nodes_evaluated,
                    0,
                    start,
                    numeric.is_complete,
                );
            }
        }

        // From here on, use whichever walk discovered more nodes as the
        // basis for the overlap-based fallbacks.
        let (best_offsets, nodes_evaluated, is_complete) = if numeric_offsets.len() >= node_offsets.len() {
            (numeric_offsets, numeric.nodes_evaluated, numeric.is_complete)
        } else {
            (node_offsets, literal.nodes_evaluated, literal.is_complete)
        };

        if best_offsets.is_empty() {
            let signature = self.dataset.default_signature();
            return self.finish(signature, Strategy::None, ua.len() as i64, 0, nodes_evaluated, 0, start, is_complete);
        }

        let sharing = self.dataset.signatures_sharing_any_node(&best_offsets);
        if !sharing.is_empty() {
            let mut signatures_compared = 0u64;
            let mut best: Option<(Arc<Signature>, i64)> = None;
            for sig in &sharing {
                signatures_compared += 1;
                let not_shared = sig
                    .node_offsets
                    .iter()
                    .filter(|o| !best_offsets.contains(o))
                    .count() as i64;
                let better = match &best {
                    None => true,
                    Some((b, score)) => {
                        not_shared < *score || (not_shared == *score && rank_then_offset_less(sig, b))
                    }
                };
                if better {
                    best = Some((sig.clone(), not_shared));
                }
            }
            let (signature, score) = best.expect("sharing is non-empty");
            return self.finish(
                signature,
                Strategy::Nearest,
                score,
                score,
                nodes_evaluated,
                signatures_compared,
                start,
                is_complete,
            );
        }

        // Nothing shares a node with what we matched (an orphaned/stale
        // reference, or a dataset whose nodes all belong to signatures not
        // reachable by node overlap) — fall back to edit distance against
        // every candidate signature, restricted to node positions (§4.G
        // step 5), bounded only by the node-evaluation budget, same as the
        // trie walk above.
        let mut signatures_compared = 0u64;
        let mut best: Option<(Arc<Signature>, usize)> = None;
        let mut closest_complete = true;
        for i in 0..self.dataset.signature_count() {
            if let Some(budget) = self.node_evaluation_budget {
                if signatures_compared >= budget {
                    closest_complete = false;
                    break;
                }
            }
            let Some(sig) = self.dataset.signature_by_index(i) else { continue };
            signatures_compared += 1;
            let nodes = sig.nodes(&self.dataset)?;
            let sig_chars = sig.node_characters(&self.dataset)?;
            let ua_chars = ua_at_node_positions(&ua, &nodes);
            let score = edit_distance(&ua_chars, &sig_chars);
            let better = match &best {
                None => true,
                Some((b, best_score)) => score < *best_score || (score == *best_score && rank_then_offset_less(&sig, b)),
            };
            if better {
                best = Some((sig, score));
            }
        }

        match best {
            Some((signature, score)) => self.finish(
                signature,
                Strategy::Closest,
                score as i64,
                score as i64,
                nodes_evaluated,
                signatures_compared,
                start,
                is_complete && closest_complete,
            ),
            None => {
                let signature = self.dataset.default_signature();
                self.finish(
                    signature,
                    Strategy::None,
                    ua.len() as i64,
                    0,
                    nodes_evaluated,
                    signatures_compared,
                    start,
                    is_complete && closest_complete,
                )
            }
        }
    }

    fn finish(
        &self,
        signature: Arc<Signature>,
        strategy: Strategy,
        difference: i64,
        lowest_score: i64,
        nodes_evaluated: u64,
        signatures_compared: u64,
        start: Instant,
        is_complete: bool,
    ) -> Result<MatchResult> {
        let profiles = signature.profiles(&self.dataset)?;
        Ok(MatchResult {
            dataset: self.dataset.clone(),
            signature,
            profiles,
            strategy,
            difference,
            lowest_score,
            nodes_evaluated,
            signatures_compared,
            elapsed: elapsed_since(start),
            is_complete,
        })
    }
}

/// Deterministic tie-break: rank ascending, then signature offset
/// ascending (a stable proxy for signature index within the dataset).
fn rank_then_offset_less(a: &Signature, b: &Signature) -> bool {
    (a.rank, a.offset) < (b.rank, b.offset)
}

fn elapsed_since(start: Instant) -> Duration {
    start.elapsed()
}
