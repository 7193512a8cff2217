//! Normalization & statistics (§4.9), the final pipeline stage.

use crate::extended::ExtendedLocation;
use crate::pipeline::select::is_more_probable;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct Moments {
    pub avg: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub std_dev_perc: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Statistics {
    pub score: Moments,
    pub confidence: Moments,
}

fn moments(values: &[f64]) -> Moments {
    let n = values.len();
    if n == 0 {
        return Moments::default();
    }
    let avg = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n as f64;
    let std_dev = variance.sqrt();
    let std_dev_perc = if avg != 0.0 { std_dev / avg * 100.0 } else { 0.0 };
    Moments {
        avg,
        variance,
        std_dev,
        std_dev_perc,
    }
}

/// Renormalizes scores to sum to 1, attaches score/confidence deviations
/// and a country-strength metric, and sorts descending by probability.
/// Returns the run's summary statistics.
pub fn finalize(best: &mut Vec<ExtendedLocation>) -> Statistics {
    if best.is_empty() {
        return Statistics::default();
    }

    let score_sum: f64 = best.iter().map(|l| l.score).sum();
    if score_sum > 0.0 {
        for l in best.iter_mut() {
            l.score /= score_sum;
        }
    }

    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, l) in best.iter().enumerate() {
        let key = if l.location.is_inside_country {
            l.location.country_id.clone()
        } else if l.location.is_country() {
            Some(l.location.id.clone())
        } else {
            None
        };
        if let Some(k) = key {
            groups.entry(k).or_default().push(i);
        }
    }
    let mut country_strength = vec![0.0_f64; best.len()];
    for idxs in groups.values() {
        let mean_score = idxs.iter().map(|&i| best[i].score).sum::<f64>() / idxs.len() as f64;
        for &i in idxs {
            country_strength[i] = mean_score;
        }
    }
    for (i, l) in best.iter_mut().enumerate() {
        l.country_strength = country_strength[i];
    }

    let score_stats = moments(&best.iter().map(|l| l.score).collect::<Vec<_>>());
    let confidence_stats = moments(&best.iter().map(|l| l.confidence).collect::<Vec<_>>());
    for l in best.iter_mut() {
        l.score_deviation = l.score - score_stats.avg;
        l.confidence_deviation = l.confidence - confidence_stats.avg;
    }

    best.sort_by(|a, b| {
        if is_more_probable(a, b) {
            std::cmp::Ordering::Less
        } else if is_more_probable(b, a) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });

    Statistics {
        score: score_stats,
        confidence: confidence_stats,
    }
}
