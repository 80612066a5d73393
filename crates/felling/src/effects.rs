//! Consequences of felling applied to the actor.

use crate::view::ActorHandle;
use tracing::debug;

/// Apply the damage accumulated after the actor's tool broke.
///
/// Returns the health actually lost. Actors without a health pool and
/// non-positive amounts are left untouched.
pub fn apply_felling_damage<A: ActorHandle + ?Sized>(actor: &mut A, amount: f32) -> f32 {
    if amount <= 0.0 || !amount.is_finite() {
        return 0.0;
    }
    let Some(before) = actor.health() else {
        return 0.0;
    };

    actor.apply_damage(amount);
    let after = actor.health().unwrap_or(before);
    let lost = before - after;
    debug!(actor = actor.id(), amount, before, after, "felling damage applied");
    lost
}
