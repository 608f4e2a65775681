//! Stub distribution pipeline: fold, normalize, rank.
//!
//! An identical stub may be captured by several JitScripts, so records
//! arrive with duplicate identity hashes. Folding sums their call counts
//! into one record per hash, normalization derives each stub's share of
//! the total call volume, and ranking orders the set hottest-first.
//!
//! Every invocation works on a locally built map and returns a fresh
//! record set; nothing is accumulated across calls.

use crate::parser::stub_log::StubRecord;
use crate::utils::config::RATIO_DECIMALS;
use crate::utils::error::DistributionError;
use log::debug;
use std::collections::HashMap;

/// Merge records that share an identity hash
///
/// **Public** - first stage of the pipeline
///
/// # Arguments
/// * `records` - Flattened records, possibly with duplicate hashes
///
/// # Returns
/// One record per distinct hash, in first-seen order. The first record
/// seen for a hash is kept as the canonical representative; later
/// duplicates only contribute their call counts.
///
/// Empty input yields empty output. The operation is idempotent.
pub fn fold_duplicates(records: Vec<StubRecord>) -> Vec<StubRecord> {
    let input_len = records.len();

    let mut folded: Vec<StubRecord> = Vec::new();
    let mut index_by_hash: HashMap<String, usize> = HashMap::new();

    for record in records {
        match index_by_hash.get(&record.hash) {
            Some(&slot) => folded[slot].call_count += record.call_count,
            None => {
                index_by_hash.insert(record.hash.clone(), folded.len());
                folded.push(record);
            }
        }
    }

    debug!("Folded {} records into {} unique stubs", input_len, folded.len());

    folded
}

/// Populate each record's share of the total call count
///
/// **Public** - second stage of the pipeline
///
/// Ratios are rounded to three decimals; over a whole set they sum to 1.0
/// within rounding tolerance.
///
/// # Errors
/// * `DistributionError::EmptySet` - no records to normalize
/// * `DistributionError::ZeroCallTotal` - every call count is zero
///
/// Both cases would divide by zero, so they are rejected rather than
/// producing NaN ratios.
pub fn normalize_ratios(records: &mut [StubRecord]) -> Result<(), DistributionError> {
    if records.is_empty() {
        return Err(DistributionError::EmptySet);
    }

    let total: u64 = records.iter().map(|r| r.call_count).sum();
    if total == 0 {
        return Err(DistributionError::ZeroCallTotal(records.len()));
    }

    for record in records.iter_mut() {
        record.call_ratio = Some(round_ratio(record.call_count as f64 / total as f64));
    }

    Ok(())
}

/// Sort records by call count, hottest first
///
/// **Public** - third stage of the pipeline
///
/// The sort is stable: records with equal call counts keep their existing
/// relative order.
pub fn rank_by_call_count(records: &mut [StubRecord]) {
    records.sort_by(|a, b| b.call_count.cmp(&a.call_count));
}

/// Full pipeline: fold duplicates, normalize ratios, rank by call count
///
/// **Public** - the single entry point used by all callers
///
/// # Arguments
/// * `records` - Flattened records for one process type
///
/// # Returns
/// Deduplicated, normalized records sorted hottest-first
///
/// # Errors
/// * `DistributionError` - empty or all-zero input (see normalize_ratios)
pub fn compute_distribution(
    records: Vec<StubRecord>,
) -> Result<Vec<StubRecord>, DistributionError> {
    let mut folded = fold_duplicates(records);
    normalize_ratios(&mut folded)?;
    rank_by_call_count(&mut folded);
    Ok(folded)
}

/// Round a ratio to the configured number of decimals
///
/// **Private** - internal helper
fn round_ratio(ratio: f64) -> f64 {
    let scale = 10u64.pow(RATIO_DECIMALS) as f64;
    (ratio * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_duplicates_sums_counts() {
        let records = vec![
            StubRecord::new("a", 3).with_op("GetProp"),
            StubRecord::new("b", 1),
            StubRecord::new("a", 2).with_op("SetProp"),
        ];

        let folded = fold_duplicates(records);

        assert_eq!(folded.len(), 2);
        assert_eq!(folded[0].hash, "a");
        assert_eq!(folded[0].call_count, 5);
        assert_eq!(folded[1].hash, "b");
        assert_eq!(folded[1].call_count, 1);
    }

    #[test]
    fn test_fold_duplicates_first_seen_wins_for_labels() {
        let records = vec![
            StubRecord::new("a", 3).with_op("GetProp"),
            StubRecord::new("a", 2).with_op("SetProp"),
        ];

        let folded = fold_duplicates(records);

        // Later duplicates contribute counts only
        assert_eq!(folded[0].op.as_deref(), Some("GetProp"));
    }

    #[test]
    fn test_fold_duplicates_preserves_first_seen_order() {
        let records = vec![
            StubRecord::new("z", 1),
            StubRecord::new("m", 1),
            StubRecord::new("a", 1),
            StubRecord::new("m", 1),
        ];

        let folded = fold_duplicates(records);

        let hashes: Vec<&str> = folded.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_fold_duplicates_empty() {
        assert!(fold_duplicates(Vec::new()).is_empty());
    }

    #[test]
    fn test_normalize_ratios_empty_fails() {
        let mut records: Vec<StubRecord> = Vec::new();
        let result = normalize_ratios(&mut records);
        assert!(matches!(result, Err(DistributionError::EmptySet)));
    }

    #[test]
    fn test_normalize_ratios_zero_total_fails() {
        let mut records = vec![StubRecord::new("a", 0), StubRecord::new("b", 0)];
        let result = normalize_ratios(&mut records);
        assert!(matches!(result, Err(DistributionError::ZeroCallTotal(2))));
    }

    #[test]
    fn test_normalize_ratios_rounding() {
        let mut records = vec![StubRecord::new("a", 5), StubRecord::new("b", 1)];
        normalize_ratios(&mut records).unwrap();

        // 5/6 and 1/6, rounded to three decimals
        assert_eq!(records[0].call_ratio, Some(0.833));
        assert_eq!(records[1].call_ratio, Some(0.167));
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let mut records = vec![
            StubRecord::new("first", 2),
            StubRecord::new("second", 2),
            StubRecord::new("big", 9),
        ];

        rank_by_call_count(&mut records);

        assert_eq!(records[0].hash, "big");
        assert_eq!(records[1].hash, "first");
        assert_eq!(records[2].hash, "second");
    }

    #[test]
    fn test_round_ratio() {
        assert_eq!(round_ratio(0.8333333), 0.833);
        assert_eq!(round_ratio(0.16666), 0.167);
        assert_eq!(round_ratio(1.0), 1.0);
    }
}
