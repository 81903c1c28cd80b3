/// HNSW vector index for similarity search
use crate::embedding::ScoredId;
use hnsw_rs::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorIndexError {
    #[error("Insert failed: {0}")]
    InsertError(String),

    #[error("Invalid dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}

/// HNSW vector index wrapper
///
/// Provides approximate nearest neighbor search over chunk embeddings.
/// Uses cosine similarity; memory-only, pipeline lifetime.
pub struct VectorIndex {
    index: Hnsw<'static, f32, DistCosine>,
    dimension: usize,
    count: u64,
}

impl VectorIndex {
    /// Create a new vector index
    ///
    /// # Arguments
    /// * `dimension` - Vector dimension (must match embedding dimension)
    /// * `capacity` - Expected number of vectors
    /// * `ef_construction` - HNSW construction parameter (higher = better recall, slower build)
    /// * `m` - HNSW M parameter (number of connections per layer)
    pub fn new(dimension: usize, capacity: usize, ef_construction: usize, m: usize) -> Self {
        let index = Hnsw::<f32, DistCosine>::new(
            m,
            capacity.max(1),
            16, // max_layer
            ef_construction,
            DistCosine,
        );

        Self {
            index,
            dimension,
            count: 0,
        }
    }

    /// Insert a vector into the index
    pub fn insert(&mut self, id: u64, vector: &[f32]) -> Result<(), VectorIndexError> {
        if vector.len() != self.dimension {
            return Err(VectorIndexError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let data = vector.to_vec();
        self.index.insert((&data, id as usize));
        self.count += 1;

        Ok(())
    }

    /// Insert multiple vectors in batch
    pub fn insert_batch(&mut self, items: &[(u64, Vec<f32>)]) -> Result<(), VectorIndexError> {
        for (id, vector) in items {
            self.insert(*id, vector)?;
        }
        Ok(())
    }

    /// Search for k nearest neighbors
    ///
    /// Returns (id, similarity) pairs sorted by similarity descending.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        ef_search: usize,
    ) -> Result<Vec<ScoredId>, VectorIndexError> {
        if query.len() != self.dimension {
            return Err(VectorIndexError::InvalidDimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let results = self.index.search(query, k, ef_search);

        Ok(results
            .into_iter()
            .map(|neighbor| ScoredId {
                id: neighbor.d_id as u64,
                score: 1.0 - neighbor.distance, // Convert distance to similarity
            })
            .collect())
    }

    /// Get the number of vectors in the index
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_creation() {
        let index = VectorIndex::new(384, 100, 200, 16);
        assert_eq!(index.dimension(), 384);
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_and_search() {
        let mut index = VectorIndex::new(3, 10, 200, 16);

        index.insert(1, &[1.0, 0.0, 0.0]).unwrap();
        index.insert(2, &[0.0, 1.0, 0.0]).unwrap();
        index.insert(3, &[0.9, 0.1, 0.0]).unwrap();

        assert_eq!(index.len(), 3);

        let results = index.search(&[1.0, 0.0, 0.0], 2, 50).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 3);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = VectorIndex::new(3, 10, 200, 16);

        let result = index.insert(1, &[1.0, 0.0]);
        assert!(matches!(
            result,
            Err(VectorIndexError::InvalidDimension { .. })
        ));

        index.insert(1, &[1.0, 0.0, 0.0]).unwrap();
        let result = index.search(&[1.0, 0.0, 0.0, 0.0], 1, 50);
        assert!(matches!(
            result,
            Err(VectorIndexError::InvalidDimension { .. })
        ));
    }
}
