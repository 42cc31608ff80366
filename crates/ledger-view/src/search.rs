use ledger_types::AssetRecord;

/// Narrows `assets` to the records whose code or cost center contains
/// `query`, ignoring case. An empty query keeps every record. Order is
/// preserved and the input is never modified.
pub fn filter_assets<'a>(assets: &'a [AssetRecord], query: &str) -> Vec<&'a AssetRecord> {
    filter_indices(assets, query)
        .into_iter()
        .map(|idx| &assets[idx])
        .collect()
}

/// Same predicate as [`filter_assets`], returning positions into `assets`.
pub fn filter_indices(assets: &[AssetRecord], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..assets.len()).collect();
    }

    let needle = query.to_lowercase();
    assets
        .iter()
        .enumerate()
        .filter(|(_, asset)| asset.matches_lowercase(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(code: &str, cost_center: Option<&str>) -> AssetRecord {
        AssetRecord {
            cost_center: cost_center.map(str::to_string),
            ..AssetRecord::new(code)
        }
    }

    fn sample() -> Vec<AssetRecord> {
        vec![
            asset("MAQ-001", Some("CC1")),
            asset("VEH-002", Some("CC2")),
            asset("cc1-EQ-003", None),
            asset("MUE-004", Some("Lima-CC10")),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let assets = sample();
        let filtered = filter_assets(&assets, "");

        assert_eq!(filtered.len(), assets.len());
        assert!(filtered.iter().zip(&assets).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_query_matches_cost_center_case_insensitively() {
        let assets = sample();
        let codes: Vec<&str> = filter_assets(&assets, "cc1")
            .iter()
            .map(|a| a.code.as_str())
            .collect();

        // VEH-002 sits in CC2 and its code has no "cc1".
        assert_eq!(codes, vec!["MAQ-001", "cc1-EQ-003", "MUE-004"]);
    }

    #[test]
    fn test_query_matches_code() {
        let assets = sample();
        assert_eq!(filter_indices(&assets, "veh"), vec![1]);
        assert!(filter_indices(&assets, "zzz").is_empty());
    }

    #[test]
    fn test_filter_is_ordered_subsequence() {
        let assets = sample();
        for query in ["", "c", "cc", "CC1", "-00", "lima", "nothing"] {
            let indices = filter_indices(&assets, query);
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
            let needle = query.to_lowercase();
            assert!(indices.iter().all(|&i| assets[i].matches_lowercase(&needle)));
        }
    }
}
