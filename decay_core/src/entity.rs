//! Entity inspection seam - the engine-facing view of damageable objects
//!
//! The hosting game engine implements these traits; the core never touches
//! engine objects directly.

use crate::types::PrincipalId;

/// Concrete engine types the classifier can recognize
///
/// Tags mirror the engine's type hierarchy: a subtype entity answers
/// [`EntityView::is_a`] for its base tags as well. A scrap transport
/// helicopter is also a mini copter, an RHIB is also a motor rowboat, and a
/// duo submarine is also a base submarine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    HotAirBalloon,
    Kayak,
    ScrapTransportHelicopter,
    MiniCopter,
    Rhib,
    MotorRowboat,
    RidableHorse,
    VehicleModule,
    ModularCar,
    SubmarineDuo,
    BaseSubmarine,
    Snowmobile,
}

/// How an entity reports recent use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UseSignal {
    /// Seconds since last use, reported directly by the entity
    Elapsed(f64),
    /// Engine-clock time of last use; zero means the entity was never used
    Timestamp(f64),
    /// The entity carries no usage signal
    None,
}

/// Lazy probes into an entity's surroundings
///
/// Queried during rule evaluation rather than up front. The proximity probe
/// is never consulted once the decay multiplier has already reached zero.
pub trait Surroundings {
    /// Whether the entity is currently sheltered
    fn is_inside(&self) -> bool;

    /// Whether the entity is within range of an active protective structure
    fn is_near_protection(&self) -> bool;
}

/// Engine-facing view of a damaged entity
pub trait EntityView: Surroundings {
    /// Hierarchy-aware type test; see [`EntityTag`]
    fn is_a(&self, tag: EntityTag) -> bool;

    /// The entity's owner, if owned
    fn owner(&self) -> Option<PrincipalId>;

    /// Recent-use signal in the entity's native measurement
    fn usage(&self) -> UseSignal;

    /// Owner of an attached, currently engaged lock
    fn lock_owner(&self) -> Option<PrincipalId> {
        None
    }

    /// Short name tag, used to tell apart variants sharing an engine type
    fn name_tag(&self) -> &str {
        ""
    }

    /// The containing vehicle, for part/module entities
    fn parent(&self) -> Option<&dyn EntityView> {
        None
    }
}
