use std::time::Instant;

use crate::catalog::search_catalog;
use crate::model::{EntityType, FilterSet, SearchOptions, SearchResponse, SearchResult};
use crate::search_state::{Direction, SearchUiState};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn catalog_query_p95_under_5ms() {
    let options = SearchOptions::compose(&FilterSet::default(), 50);
    for _ in 0..30 {
        let _ = search_catalog("short", &options);
    }

    let mut samples = Vec::with_capacity(200);
    for _ in 0..200 {
        let start = Instant::now();
        let _ = search_catalog("short", &options);
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 5.0, "catalog p95 too high: {p95:.3}ms (budget 5.0ms)");
}

#[test]
fn large_response_apply_and_navigation_p95_under_15ms() {
    let hits: Vec<SearchResult> = (0..10_000)
        .map(|i| SearchResult::new(&i.to_string(), EntityType::Note, &format!("Note {i:05}")))
        .collect();

    let mut samples = Vec::with_capacity(40);
    for _ in 0..40 {
        let response = SearchResponse {
            hits: hits.clone(),
            count: hits.len(),
        };
        let stale_response = response.clone();
        let mut state = SearchUiState::default();
        let start = Instant::now();
        let stale = state.begin_request();
        let current = state.begin_request();
        state.apply_response(stale, stale_response);
        state.apply_response(current, response);
        for _ in 0..1_000 {
            state.move_selection(Direction::Down);
        }
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
        assert_eq!(state.selected_index(), Some(999));
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 15.0, "apply/navigate p95 too high: {p95:.3}ms (budget 15.0ms)");
}
