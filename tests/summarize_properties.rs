use freqsum_mcp::nlp::StopwordFilter;
use freqsum_mcp::{FrequencySummarizer, Summarizer};
use proptest::prelude::*;

const VOCAB: &[&str] = &["alpha", "beta", "gamma", "delta", "omega", "the", "is", "of"];

fn summarizer() -> FrequencySummarizer {
    FrequencySummarizer::with_stopwords(StopwordFilter::from_list(&["the", "is", "of"]))
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..6).prop_map(|words| {
        let mut s = words.join(" ");
        if let Some(first) = s.get(..1) {
            let upper = first.to_uppercase();
            s.replace_range(..1, &upper);
        }
        s.push('.');
        s
    })
}

fn document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn selection_keeps_document_order(sentences in document(), k in 1usize..8) {
        let text = sentences.join(" ");
        let report = summarizer().explain(&text, k).unwrap();
        prop_assert_eq!(report.sentences.len(), sentences.len());

        let selected: Vec<&str> = report
            .sentences
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.text.as_str())
            .collect();
        if report.fallback {
            prop_assert_eq!(report.summary.as_str(), text.as_str());
        } else {
            prop_assert_eq!(report.summary, selected.join(" "));
        }
    }

    #[test]
    fn selects_min_of_k_and_scorable(sentences in document(), k in 1usize..8) {
        let text = sentences.join(" ");
        let report = summarizer().explain(&text, k).unwrap();
        let scorable = report.sentences.iter().filter(|s| s.score.is_some()).count();
        let selected = report.sentences.iter().filter(|s| s.selected).count();
        prop_assert_eq!(selected, k.min(scorable));
        prop_assert_eq!(report.fallback, scorable == 0);
        prop_assert!(report.sentences.iter().all(|s| s.score.is_some() || !s.selected));
    }

    #[test]
    fn selected_outrank_unselected_with_earliest_tie_break(sentences in document(), k in 1usize..8) {
        let text = sentences.join(" ");
        let report = summarizer().explain(&text, k).unwrap();
        for chosen in report.sentences.iter().filter(|s| s.selected) {
            for other in report.sentences.iter().filter(|s| !s.selected) {
                let (Some(a), Some(b)) = (chosen.score, other.score) else { continue };
                prop_assert!(a > b || (a == b && chosen.index < other.index));
            }
        }
    }

    #[test]
    fn output_is_deterministic(sentences in document(), k in 1usize..8) {
        let text = sentences.join(" ");
        let first = summarizer().summarize(&text, k).unwrap();
        let second = summarizer().summarize(&text, k).unwrap();
        prop_assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn scores_are_normalized(sentences in document()) {
        let text = sentences.join(" ");
        let report = summarizer().explain(&text, 1).unwrap();
        for s in report.sentences.iter().filter_map(|s| s.score) {
            prop_assert!(s > 0.0 && s <= 1.0);
        }
    }
}

#[test]
fn large_k_returns_every_scorable_sentence() {
    let text = "Alpha beta. The is. Gamma alpha. Delta.";
    let res = summarizer().summarize(text, 100).unwrap();
    assert_eq!(res.summary, "Alpha beta. Gamma alpha. Delta.");
}
