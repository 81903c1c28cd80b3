//! Weighted reciprocal-rank fusion for combining search results

use crate::embedding::ScoredId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Invalid weight configuration: weights must be non-negative and not all zero")]
    InvalidWeights,
}

/// Configuration for the fusion algorithm
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// RRF K constant (typically 60)
    pub rrf_k: f32,

    /// Weight for keyword (lexical) results
    pub lexical_weight: f32,

    /// Weight for embedding similarity results
    pub embedding_weight: f32,
}

impl FusionConfig {
    /// Weights are relative scalars; they need not sum to 1
    pub fn new(rrf_k: f32, lexical_weight: f32, embedding_weight: f32) -> Result<Self, FusionError> {
        if lexical_weight < 0.0 || embedding_weight < 0.0 {
            return Err(FusionError::InvalidWeights);
        }
        if lexical_weight == 0.0 && embedding_weight == 0.0 {
            return Err(FusionError::InvalidWeights);
        }

        Ok(Self {
            rrf_k,
            lexical_weight,
            embedding_weight,
        })
    }
}

/// Apply weighted reciprocal-rank fusion to two ranked lists
///
/// RRF formula: score(id) = sum over all rankings of: weight / (k + rank).
/// An id present in both lists accumulates both contributions and appears
/// once in the output.
///
/// Returns a single ranked list sorted by fused score descending.
pub fn weighted_rank_fusion(
    lexical_results: &[ScoredId],
    embedding_results: &[ScoredId],
    config: &FusionConfig,
) -> Vec<ScoredId> {
    let mut scores: HashMap<u64, f32> = HashMap::new();

    for (rank, hit) in lexical_results.iter().enumerate() {
        let rrf_score = config.lexical_weight / (config.rrf_k + (rank as f32) + 1.0);
        *scores.entry(hit.id).or_insert(0.0) += rrf_score;
    }

    for (rank, hit) in embedding_results.iter().enumerate() {
        let rrf_score = config.embedding_weight / (config.rrf_k + (rank as f32) + 1.0);
        *scores.entry(hit.id).or_insert(0.0) += rrf_score;
    }

    let mut results: Vec<ScoredId> = scores
        .into_iter()
        .map(|(id, score)| ScoredId { id, score })
        .collect();
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(pairs: &[(u64, f32)]) -> Vec<ScoredId> {
        pairs
            .iter()
            .map(|(id, score)| ScoredId {
                id: *id,
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_fusion_merges_duplicates() {
        let lexical = hits(&[(1, 0.9), (2, 0.8), (3, 0.7)]);
        let embedding = hits(&[(2, 0.95), (1, 0.85), (4, 0.75)]);

        let config = FusionConfig::new(60.0, 1.0, 1.0).unwrap();
        let fused = weighted_rank_fusion(&lexical, &embedding, &config);

        // 1 and 2 appear in both lists; each id appears exactly once
        assert_eq!(fused.len(), 4);
        assert!(fused[0].id == 1 || fused[0].id == 2);

        let ids: Vec<u64> = fused.iter().map(|h| h.id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
    }

    #[test]
    fn test_fusion_respects_weights() {
        let lexical = hits(&[(1, 0.9)]);
        let embedding = hits(&[(2, 0.9)]);

        // Lexical weighted higher, as in the default configuration
        let config = FusionConfig::new(60.0, 0.6, 0.4).unwrap();
        let fused = weighted_rank_fusion(&lexical, &embedding, &config);

        assert_eq!(fused[0].id, 1);
        assert_eq!(fused[1].id, 2);
    }

    #[test]
    fn test_fusion_sorted_descending() {
        let lexical = hits(&[(1, 0.9), (2, 0.8), (3, 0.7), (4, 0.6), (5, 0.5)]);
        let embedding = hits(&[(3, 0.9), (5, 0.8)]);

        let config = FusionConfig::new(60.0, 0.6, 0.4).unwrap();
        let fused = weighted_rank_fusion(&lexical, &embedding, &config);

        for pair in fused.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_zero_weight_allowed_on_one_side() {
        let config = FusionConfig::new(60.0, 0.0, 1.0);
        assert!(config.is_ok());
    }

    #[test]
    fn test_invalid_weights() {
        assert!(FusionConfig::new(60.0, -0.1, 0.4).is_err());
        assert!(FusionConfig::new(60.0, 0.0, 0.0).is_err());
    }
}
