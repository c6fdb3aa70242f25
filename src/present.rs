//! Mapping of ranked predictions to the displayed label.

use crate::classifier::Prediction;

/// Sentinel shown before any recognition and whenever one fails.
pub const UNKNOWN_LABEL: &str = "?";

/// Highest-confidence prediction, ties broken by first-seen order.
///
/// The ranked list already encodes the classifier's own tie-break, so a later
/// entry only wins with a strictly greater confidence.
pub fn top(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut best: Option<&Prediction> = None;
    for prediction in predictions {
        match best {
            Some(current) if prediction.confidence <= current.confidence => {}
            _ => best = Some(prediction),
        }
    }
    best
}

/// Format the winning prediction for display; empty input yields the sentinel.
pub fn present(predictions: &[Prediction]) -> String {
    top(predictions)
        .map(|p| p.label.clone())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: &str, confidence: f32) -> Prediction {
        Prediction {
            label: label.into(),
            confidence,
        }
    }

    #[test]
    fn picks_highest_confidence_entry() {
        let ranked = vec![prediction("7", 0.92), prediction("1", 0.05)];
        assert_eq!(present(&ranked), "7");
    }

    #[test]
    fn empty_list_yields_sentinel() {
        assert_eq!(present(&[]), UNKNOWN_LABEL);
    }

    #[test]
    fn exact_tie_keeps_first_seen_order() {
        let ranked = vec![
            prediction("3", 0.4),
            prediction("8", 0.4),
            prediction("5", 0.2),
        ];
        assert_eq!(present(&ranked), "3");
    }

    #[test]
    fn later_strictly_greater_entry_wins() {
        let ranked = vec![prediction("2", 0.1), prediction("6", 0.8)];
        assert_eq!(present(&ranked), "6");
    }
}
