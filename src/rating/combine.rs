//! Final rating combination and optional cross-season blending.

/// Apply the accumulated lobby bonus multiplicatively to the base rating.
pub fn final_rating(base_rating: f64, lobby_bonus_total: f64) -> f64 {
    base_rating * (1.0 + lobby_bonus_total)
}

/// Blend the current rating with a prior-season rating.
///
/// `weight` is the share of the current season. With no prior, or with
/// `weight = 1` (the default configuration), this is the identity.
pub fn blend_with_prior(current: f64, prior: Option<f64>, weight: f64) -> f64 {
    match prior {
        Some(prior) => weight * current + (1.0 - weight) * prior,
        None => current,
    }
}
