//! Score postprocessing: softmax, ranking, and label lookup.
//!
//! Raw model scores become at most five (label, probability) pairs. The
//! probability is rounded to 3 decimals before the greater-than-zero
//! filter, so a class needs a true probability of at least 0.0005 to
//! survive. An empty result is valid output, not an error.

use crate::catalog::Catalog;
use crate::error::PipelineError;
use crate::math::softmax;
use crate::types::Prediction;

/// Maximum number of predictions returned per request.
pub const TOP_K: usize = 5;

/// Decimal digits kept on reported probabilities.
const SCORE_DECIMALS: i32 = 3;

/// Round a probability to 3 decimals, half away from zero.
///
/// Probabilities are non-negative, so this is plain half-up: 0.0005 rounds
/// to 0.001 and survives the zero filter, 0.0004 rounds to 0.0 and is
/// dropped.
fn round_score(score: f32) -> f32 {
    let factor = 10f32.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// Convert raw scores into ranked predictions against the catalog.
///
/// A score vector whose length disagrees with the catalog means the
/// catalog/model alignment invariant has been violated; that is reported
/// as [`PipelineError::ScoreLengthMismatch`], never papered over.
pub fn postprocess(scores: &[f32], catalog: &Catalog) -> Result<Vec<Prediction>, PipelineError> {
    if scores.len() != catalog.len() {
        tracing::error!(
            "Score vector length {} does not match catalog length {}",
            scores.len(),
            catalog.len()
        );
        return Err(PipelineError::ScoreLengthMismatch {
            scores_len: scores.len(),
            catalog_len: catalog.len(),
        });
    }

    let probs = softmax(scores);

    // Stable sort by descending probability; bit-identical ties keep
    // original class-index order.
    let mut ranked: Vec<usize> = (0..probs.len()).collect();
    ranked.sort_by(|&a, &b| probs[b].partial_cmp(&probs[a]).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(TOP_K)
        .map(|index| (index, round_score(probs[index])))
        .filter(|&(_, score)| score > 0.0)
        .map(|(index, score)| {
            let label = catalog
                .get(index)
                .ok_or(PipelineError::CatalogAlignment {
                    index,
                    catalog_len: catalog.len(),
                })?
                .clone();
            Ok(Prediction { label, score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Label;

    fn catalog_of(n: usize) -> Catalog {
        let labels = (0..n)
            .map(|i| Label::parse(&format!("n{i:08} class {i}")).unwrap())
            .collect();
        Catalog::from_labels(labels)
    }

    #[test]
    fn test_unique_maximum_ranks_first() {
        let catalog = catalog_of(4);
        let predictions = postprocess(&[0.1, 9.0, 0.2, 0.3], &catalog).unwrap();
        assert_eq!(predictions[0].label.synset_id, "n00000001");
    }

    #[test]
    fn test_end_to_end_synthetic_vector() {
        // softmax([12,5,0,0,0]) ~= [0.99907, 0.00091, 6.1e-6, 6.1e-6, 6.1e-6].
        // The winner rounds to 0.999, the runner-up to 0.001, the tail to
        // 0.000 and is filtered, leaving exactly two predictions.
        let catalog = catalog_of(5);
        let predictions = postprocess(&[12.0, 5.0, 0.0, 0.0, 0.0], &catalog).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label.synset_id, "n00000000");
        assert!(predictions[0].score > 0.9);
        assert_eq!(predictions[1].label.synset_id, "n00000001");
        assert!(predictions[1].score > 0.0);
    }

    #[test]
    fn test_low_probability_tail_excluded() {
        // Classes C, D, E sit far below A and round to 0.000.
        let catalog = catalog_of(5);
        let predictions = postprocess(&[10.0, 4.0, -2.0, -2.0, -2.0], &catalog).unwrap();
        assert_eq!(predictions.len(), 2);
        for p in &predictions {
            assert!(p.score > 0.0);
        }
    }

    #[test]
    fn test_uniform_scores_survive_by_tie_break() {
        // 1000 uniform classes: each probability is exactly 0.001, which
        // rounds to 0.001 > 0, so the top 5 by stable index order survive.
        let catalog = catalog_of(1000);
        let scores = vec![0.0; 1000];
        let predictions = postprocess(&scores, &catalog).unwrap();
        assert_eq!(predictions.len(), 5);
        for (i, p) in predictions.iter().enumerate() {
            assert_eq!(p.label.synset_id, format!("n{i:08}"));
            assert!((p.score - 0.001).abs() < 1e-6);
        }
    }

    #[test]
    fn test_all_predictions_can_round_to_zero() {
        // 10000 uniform classes: per-class probability 0.0001 rounds to 0.
        // An empty result is valid output.
        let catalog = catalog_of(10_000);
        let scores = vec![0.0; 10_000];
        let predictions = postprocess(&scores, &catalog).unwrap();
        assert!(predictions.is_empty());
    }

    #[test]
    fn test_result_never_longer_than_top_k() {
        let catalog = catalog_of(100);
        let scores: Vec<f32> = (0..100).map(|i| i as f32 * 0.01).collect();
        let predictions = postprocess(&scores, &catalog).unwrap();
        assert!(predictions.len() <= TOP_K);
    }

    #[test]
    fn test_descending_order() {
        let catalog = catalog_of(6);
        let predictions = postprocess(&[1.0, 4.0, 2.0, 6.0, 3.0, 5.0], &catalog).unwrap();
        for pair in predictions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_length_mismatch_is_alignment_error() {
        let catalog = catalog_of(3);
        let err = postprocess(&[1.0, 2.0], &catalog).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ScoreLengthMismatch {
                scores_len: 2,
                catalog_len: 3
            }
        ));

        let err = postprocess(&[1.0, 2.0, 3.0, 4.0], &catalog).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ScoreLengthMismatch {
                scores_len: 4,
                catalog_len: 3
            }
        ));
        // The rendered defect names the real condition, not a class index.
        assert!(err.to_string().contains("4 scores"));
    }

    #[test]
    fn test_round_score_half_away_from_zero() {
        assert_eq!(round_score(0.0005), 0.001);
        assert_eq!(round_score(0.0004), 0.0);
        assert_eq!(round_score(0.9666), 0.967);
        assert_eq!(round_score(0.0), 0.0);
    }
}
