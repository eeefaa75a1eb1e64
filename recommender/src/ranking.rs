//! Similarity ranking over one precomputed matrix row.

use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::error::RecommendError;

/// Every other catalog index, most similar first.
///
/// Ties keep ascending catalog order. NaN scores sort after all real scores.
pub fn rank(selection: usize, catalog: &Catalog) -> Result<Vec<usize>, RecommendError> {
    let row = catalog
        .similarity_row(selection)
        .ok_or(RecommendError::InvalidSelection {
            index: selection,
            len: catalog.len(),
        })?;

    let mut ranking: Vec<usize> = (0..row.len()).filter(|&i| i != selection).collect();
    ranking.sort_by(|&a, &b| by_score_desc(row[a], row[b]).then(a.cmp(&b)));
    Ok(ranking)
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
