//! Top-K sentence selection
//!
//! Ranks scored sentences by score, keeps the best `k`, then restores
//! document order for the output.

/// Scored sentences ordered best first.
///
/// Unscored sentences are dropped. Equal scores keep the earlier sentence
/// first: the sort is stable over ascending indices and also breaks ties on
/// the index explicitly.
pub fn rank(scores: &[(usize, Option<f64>)]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .filter_map(|&(i, s)| s.map(|s| (i, s)))
        .collect();
    ranked.sort_by_key(|&(i, _)| i);
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Indices of the `k` best sentences, in ascending document order.
///
/// Fewer than `k` scored sentences means all of them are chosen.
pub fn select_indices(scores: &[(usize, Option<f64>)], k: usize) -> Vec<usize> {
    let mut chosen: Vec<usize> = rank(scores).into_iter().take(k).map(|(i, _)| i).collect();
    chosen.sort_unstable();
    chosen
}

/// The `k` best sentences joined with single spaces, in document order.
pub fn select<S: AsRef<str>>(scores: &[(usize, Option<f64>)], k: usize, sentences: &[S]) -> String {
    join(&select_indices(scores, k), sentences)
}

/// Join the sentences at `indices` with single spaces.
pub fn join<S: AsRef<str>>(indices: &[usize], sentences: &[S]) -> String {
    indices
        .iter()
        .filter_map(|&i| sentences.get(i).map(AsRef::as_ref))
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_score_descending() {
        let scores = vec![(0, Some(0.2)), (1, Some(0.9)), (2, Some(0.5))];
        let ranked: Vec<usize> = rank(&scores).into_iter().map(|(i, _)| i).collect();
        assert_eq!(ranked, vec![1, 2, 0]);
    }

    #[test]
    fn ties_go_to_the_earlier_sentence() {
        let scores = vec![(0, Some(0.1)), (1, Some(0.7)), (2, Some(0.7)), (3, Some(0.7))];
        assert_eq!(select_indices(&scores, 1), vec![1]);
        assert_eq!(select_indices(&scores, 2), vec![1, 2]);
    }

    #[test]
    fn tie_break_does_not_depend_on_input_order() {
        let scores = vec![(3, Some(0.5)), (1, Some(0.5)), (2, Some(0.5))];
        assert_eq!(select_indices(&scores, 1), vec![1]);
    }

    #[test]
    fn unscored_sentences_are_never_selected() {
        let scores = vec![(0, None), (1, Some(0.1)), (2, None)];
        assert_eq!(select_indices(&scores, 3), vec![1]);
    }

    #[test]
    fn output_follows_document_order() {
        let sentences = ["A one.", "B two.", "C three.", "D four."];
        let scores = vec![(0, Some(0.1)), (1, Some(0.8)), (2, Some(0.3)), (3, Some(0.9))];
        assert_eq!(select(&scores, 2, &sentences), "B two. D four.");
        assert_eq!(select(&scores, 3, &sentences), "B two. C three. D four.");
    }

    #[test]
    fn k_larger_than_candidates_takes_all() {
        let sentences = ["x.", "y."];
        let scores = vec![(0, Some(0.4)), (1, Some(0.6))];
        assert_eq!(select(&scores, 10, &sentences), "x. y.");
    }

    #[test]
    fn nothing_scored_yields_empty_string() {
        let sentences = ["x."];
        assert_eq!(select(&[(0, None)], 5, &sentences), "");
    }
}
