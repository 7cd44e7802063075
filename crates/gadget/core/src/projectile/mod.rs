//! Thrown objects: launch kinematics, landing rules, and the tracker that
//! turns a physics object into a one-shot landing callback.
mod landing;
mod throw;
mod tracker;

pub use landing::{LandingParams, LandingRule};
pub use throw::ThrowProfile;
pub use tracker::{Landing, LandingCallback, ProjectileTracker, Resolution, TrackerPhase};

use crate::env::Env;
use crate::scheduler::TrackerId;
use crate::state::{ActorId, Location};

/// Sent to the thrower when the object could not be spawned.
pub const LAUNCH_FAILED_MESSAGE: &str = "Your throw went nowhere.";

/// Throws an object at `target` and starts tracking it.
///
/// Returns `None` (and starts nothing) when the object could not be spawned.
pub fn launch_tracked(
    env: &mut Env<'_>,
    actor: ActorId,
    target: Location,
    profile: &ThrowProfile,
    params: &LandingParams,
    on_land: impl FnOnce(&mut Env<'_>, Landing) + Send + 'static,
) -> Option<TrackerId> {
    let object = profile.launch(env.world, actor, target)?;
    let tracker = ProjectileTracker::new(object, params.clone(), on_land);
    Some(env.scheduler.track(tracker))
}
