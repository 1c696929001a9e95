//! Hierarchical agglomerative clustering with a distance-threshold cut.
//!
//! The full dendrogram is built with the nearest-neighbour-chain algorithm
//! over a condensed distance matrix, then cut: every merge whose linkage
//! distance is strictly below the threshold is applied, the rest are not.
//! The number of clusters therefore falls out of the threshold instead of
//! being fixed up front.

use crate::cluster::granularity::Granularity;
use crate::cluster::linkage::Linkage;
use crate::error::{IntentifyError, Result};
use crate::vector::core::matrix::DistanceMatrix;
use crate::vector::{DistanceMetric, Vector};

/// One step of the dendrogram: clusters represented by points `a` and `b`
/// were joined at `distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    /// Number of points in the merged cluster.
    pub size: usize,
}

/// Hard assignment of every input point to exactly one cluster.
///
/// Cluster ids are dense (`0..num_clusters`) and numbered in order of each
/// cluster's first member, so the assignment is reproducible for a given
/// input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    num_clusters: usize,
}

impl ClusterAssignment {
    /// Build an assignment from arbitrary per-point labels, renumbering them
    /// by first appearance.
    pub fn from_labels(raw: &[usize]) -> Self {
        let mut mapping = std::collections::HashMap::new();
        let labels = raw
            .iter()
            .map(|label| {
                let next = mapping.len();
                *mapping.entry(*label).or_insert(next)
            })
            .collect();

        ClusterAssignment {
            labels,
            num_clusters: mapping.len(),
        }
    }

    /// Cluster id of every point, index-aligned with the input.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Member indices of every cluster, indexed by cluster id. Members are
    /// listed in ascending order and no group is empty.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.num_clusters];
        for (index, &label) in self.labels.iter().enumerate() {
            groups[label].push(index);
        }
        groups
    }
}

/// Disjoint-set forest used to apply the cut.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Lower index becomes the root.
            let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[child] = root;
        }
    }
}

/// Agglomerative clusterer.
///
/// # Examples
///
/// ```
/// use intentify::cluster::{AgglomerativeClustering, Granularity};
/// use intentify::vector::Vector;
///
/// let vectors = vec![
///     Vector::new(vec![1.0, 0.0]),
///     Vector::new(vec![0.99, 0.05]),
///     Vector::new(vec![0.0, 1.0]),
/// ];
///
/// let clustering = AgglomerativeClustering::new();
/// let assignment = clustering.fit(&vectors, Granularity::new(50).unwrap()).unwrap();
/// assert_eq!(assignment.labels(), &[0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AgglomerativeClustering {
    metric: DistanceMetric,
    linkage: Linkage,
}

impl AgglomerativeClustering {
    /// Cosine distance with average linkage.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Cluster `vectors` at the threshold derived from `granularity`.
    pub fn fit(&self, vectors: &[Vector], granularity: Granularity) -> Result<ClusterAssignment> {
        self.fit_threshold(vectors, granularity.distance_threshold())
    }

    /// Cluster `vectors`, joining clusters while their linkage distance is
    /// strictly below `threshold`.
    pub fn fit_threshold(&self, vectors: &[Vector], threshold: f64) -> Result<ClusterAssignment> {
        if threshold.is_nan() {
            return Err(IntentifyError::cluster("distance threshold is NaN"));
        }

        let merges = self.dendrogram(vectors)?;

        let mut forest = UnionFind::new(vectors.len());
        for merge in merges.iter().filter(|m| m.distance < threshold) {
            forest.union(merge.a, merge.b);
        }

        let roots: Vec<usize> = (0..vectors.len()).map(|i| forest.find(i)).collect();
        let assignment = ClusterAssignment::from_labels(&roots);

        log::debug!(
            "{} points -> {} clusters ({} linkage, {} metric, threshold {threshold:.2})",
            vectors.len(),
            assignment.num_clusters(),
            self.linkage.name(),
            self.metric.name(),
        );

        Ok(assignment)
    }

    /// Build the complete dendrogram (`n - 1` merges for `n` points) in the
    /// order the nearest-neighbour chain discovers them.
    pub fn dendrogram(&self, vectors: &[Vector]) -> Result<Vec<Merge>> {
        if let Some(bad) = vectors.iter().position(|v| !v.is_valid()) {
            return Err(IntentifyError::cluster(format!(
                "vector {bad} contains non-finite values"
            )));
        }

        let mut matrix = DistanceMatrix::compute(vectors, self.metric)?;
        let n = matrix.len();
        if n < 2 {
            return Ok(Vec::new());
        }

        let mut active = vec![true; n];
        let mut size = vec![1usize; n];
        let mut chain: Vec<usize> = Vec::with_capacity(n);
        let mut merges = Vec::with_capacity(n - 1);

        for _ in 0..n - 1 {
            if chain.is_empty() {
                let start = active
                    .iter()
                    .position(|&a| a)
                    .ok_or_else(|| IntentifyError::cluster("no active cluster left"))?;
                chain.push(start);
            }

            // Grow the chain until its tip and the element before it are
            // reciprocal nearest neighbours.
            let (a, b, distance) = loop {
                let tip = chain[chain.len() - 1];
                let previous = chain.len().checked_sub(2).map(|i| chain[i]);

                // Prefer the previous element on ties so the chain terminates.
                let mut best = previous.map(|p| (p, matrix.get(tip, p)));
                for k in (0..n).filter(|&k| active[k] && k != tip) {
                    let d = matrix.get(tip, k);
                    if best.is_none_or(|(_, best_d)| d < best_d) {
                        best = Some((k, d));
                    }
                }

                let (nearest, d) = best
                    .ok_or_else(|| IntentifyError::cluster("cluster has no neighbour"))?;
                if Some(nearest) == previous {
                    chain.truncate(chain.len() - 2);
                    break (tip, nearest, d);
                }
                chain.push(nearest);
            };

            // The merged cluster lives on in the lower slot.
            let (keep, drop) = if a < b { (a, b) } else { (b, a) };
            for k in (0..n).filter(|&k| active[k] && k != keep && k != drop) {
                let updated = self.linkage.update(
                    matrix.get(k, keep),
                    matrix.get(k, drop),
                    size[keep],
                    size[drop],
                );
                matrix.set(k, keep, updated);
            }

            active[drop] = false;
            size[keep] += size[drop];
            merges.push(Merge {
                a: keep,
                b: drop,
                distance,
                size: size[keep],
            });
        }

        Ok(merges)
    }
}
