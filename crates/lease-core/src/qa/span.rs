//! Context windowing and answer-span selection for extractive QA.
//!
//! Long leases do not fit in one model input, so the context tokens are cut
//! into overlapping windows that each repeat the question. Every window is
//! scored independently and the best span across windows wins.

/// Logit given to tokens that cannot be part of an answer.
const MASKED_LOGIT: f32 = -10_000.0;

/// One model input: question tokens, a slice of the context, closing tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Token ids.
    pub input_ids: Vec<i64>,
    /// Segment ids (0 = question, 1 = context for BERT-style models).
    pub type_ids: Vec<i64>,
    /// For context tokens, their index in the full encoding.
    pub token_index: Vec<Option<usize>>,
}

impl Window {
    /// Which positions hold context tokens.
    pub fn context_mask(&self) -> Vec<bool> {
        self.token_index.iter().map(Option::is_some).collect()
    }
}

/// A candidate answer, in window token positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanCandidate {
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// Split a full `(question, context)` encoding into model-sized windows.
///
/// `sequence_ids` marks context tokens with `Some(1)`; everything before the
/// first context token is repeated at the head of every window and everything
/// after the last one at the tail. Returns `None` when the question alone does
/// not leave room for any context token.
pub fn context_windows(
    ids: &[u32],
    type_ids: &[u32],
    sequence_ids: &[Option<usize>],
    max_seq_len: usize,
    stride: usize,
) -> Option<Vec<Window>> {
    let first = sequence_ids.iter().position(|s| *s == Some(1))?;
    let last = sequence_ids.iter().rposition(|s| *s == Some(1))?;

    let prefix = 0..first;
    let suffix = last + 1..ids.len();
    let budget = max_seq_len.checked_sub(prefix.len() + suffix.len())?;
    if budget == 0 {
        return None;
    }

    let context_len = last + 1 - first;
    let step = budget - stride.min(budget - 1);
    let mut windows = Vec::new();
    let mut offset = 0;

    loop {
        let chunk = first + offset..first + (offset + budget).min(context_len);
        let mut window = Window {
            input_ids: Vec::with_capacity(max_seq_len),
            type_ids: Vec::with_capacity(max_seq_len),
            token_index: Vec::with_capacity(max_seq_len),
        };

        for i in prefix.clone() {
            window.push(ids[i], type_ids[i], None);
        }
        for i in chunk.clone() {
            window.push(ids[i], type_ids[i], Some(i));
        }
        for i in suffix.clone() {
            window.push(ids[i], type_ids[i], None);
        }
        windows.push(window);

        if chunk.end >= first + context_len {
            break;
        }
        offset += step;
    }

    Some(windows)
}

impl Window {
    fn push(&mut self, id: u32, type_id: u32, index: Option<usize>) {
        self.input_ids.push(id as i64);
        self.type_ids.push(type_id as i64);
        self.token_index.push(index);
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

/// Pick the most probable answer span inside the context.
///
/// Non-context tokens are masked before the softmax except position 0, the
/// classifier token, whose probability is then dropped so an "impossible
/// answer" never wins. The span score is `p_start * p_end`.
pub fn best_span(
    start_logits: &[f32],
    end_logits: &[f32],
    context_mask: &[bool],
    max_answer_len: usize,
) -> Option<SpanCandidate> {
    let n = start_logits.len().min(end_logits.len()).min(context_mask.len());
    if n == 0 || max_answer_len == 0 {
        return None;
    }

    let mask = |logits: &[f32]| -> Vec<f32> {
        (0..n)
            .map(|i| if i == 0 || context_mask[i] { logits[i] } else { MASKED_LOGIT })
            .collect()
    };

    let mut p_start = softmax(&mask(start_logits));
    let mut p_end = softmax(&mask(end_logits));
    p_start[0] = 0.0;
    p_end[0] = 0.0;

    let mut best: Option<SpanCandidate> = None;

    for s in (0..n).filter(|&i| context_mask[i]) {
        for e in s..(s + max_answer_len).min(n) {
            if !context_mask[e] {
                continue;
            }
            let score = p_start[s] * p_end[e];
            if best.is_none_or(|b| score > b.score) {
                best = Some(SpanCandidate { start: s, end: e, score });
            }
        }
    }

    best
}
