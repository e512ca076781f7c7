use crate::suggestions::models::Suggestion;

/// Static gift ideas served whenever the completion service is unavailable
/// or its answer is unusable. Always three entries, in this order.
pub fn fallback_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new(
            "Aromatherapy Candle Set",
            "A set of calming scented candles, ideal for relaxing.",
            "Aromatherapy Candle Set",
        ),
        Suggestion::new(
            "Wireless Bluetooth Headphones",
            "Comfortable headphones with long battery life and rich sound.",
            "Wireless Bluetooth Headphones",
        ),
        Suggestion::new(
            "Personalized Photo Mug",
            "A mug printed with a photo of your choice, a good gift for any occasion.",
            "Personalized Photo Mug",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_three_complete_entries() {
        let list = fallback_suggestions();
        assert_eq!(list.len(), 3);
        for s in &list {
            assert!(!s.name.trim().is_empty());
            assert!(!s.description.trim().is_empty());
            assert!(!s.search_term.trim().is_empty());
        }
    }

    #[test]
    fn test_fallback_search_term_matches_name() {
        for s in fallback_suggestions() {
            assert_eq!(s.search_term, s.name);
        }
    }

    #[test]
    fn test_fallback_is_stable() {
        assert_eq!(fallback_suggestions(), fallback_suggestions());
    }
}
