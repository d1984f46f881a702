//! Vehicle classification - mapping damaged entities to supported kinds

use crate::entity::{EntityTag, EntityView, UseSignal};
use crate::types::{PrincipalId, VehicleKind};
use log::debug;

/// Classification of a damaged entity, produced fresh for each event
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: VehicleKind,
    /// Seconds since the vehicle was last used; `None` means never or unknown
    pub time_since_last_used: Option<f64>,
    pub owner: Option<PrincipalId>,
    /// Owner of an engaged lock, only when distinct from the vehicle owner
    pub lock_owner: Option<PrincipalId>,
}

/// Tags probed in order; the first match wins.
///
/// Subtypes come before the types they specialize, so an entity answering for
/// both always classifies as the more specific kind:
/// ScrapTransportHelicopter before MiniCopter, Rhib before MotorRowboat,
/// SubmarineDuo before BaseSubmarine. A bare ModularCar hull is not probed at
/// all; only its modules take decay damage.
const CLASSIFICATION_ORDER: &[EntityTag] = &[
    EntityTag::HotAirBalloon,
    EntityTag::Kayak,
    EntityTag::ScrapTransportHelicopter,
    EntityTag::MiniCopter,
    EntityTag::Rhib,
    EntityTag::RidableHorse,
    EntityTag::MotorRowboat,
    EntityTag::VehicleModule,
    EntityTag::SubmarineDuo,
    EntityTag::BaseSubmarine,
    EntityTag::Snowmobile,
];

/// Name tag carried by the tomaha snowmobile variant
const TOMAHA_NAME_TAG: &str = "tomaha";

/// Classify a damaged entity, `None` if it is not a supported vehicle
///
/// `now` is the engine clock, used to convert absolute last-use timestamps
/// into elapsed seconds.
pub fn classify(entity: &dyn EntityView, now: f64) -> Option<Classification> {
    let tag = CLASSIFICATION_ORDER
        .iter()
        .copied()
        .find(|&tag| entity.is_a(tag))?;

    match tag {
        EntityTag::VehicleModule => classify_module(entity, now),
        EntityTag::Snowmobile => {
            let kind = if entity.name_tag().contains(TOMAHA_NAME_TAG) {
                VehicleKind::Tomaha
            } else {
                VehicleKind::Snowmobile
            };
            Some(classified(kind, entity, now))
        }
        _ => Some(classified(kind_of(tag)?, entity, now)),
    }
}

/// Direct tag-to-kind mapping; `None` for tags that never map on their own
fn kind_of(tag: EntityTag) -> Option<VehicleKind> {
    match tag {
        EntityTag::HotAirBalloon => Some(VehicleKind::HotAirBalloon),
        EntityTag::Kayak => Some(VehicleKind::Kayak),
        EntityTag::ScrapTransportHelicopter => Some(VehicleKind::ScrapHelicopter),
        EntityTag::MiniCopter => Some(VehicleKind::MiniCopter),
        EntityTag::Rhib => Some(VehicleKind::Rhib),
        EntityTag::RidableHorse => Some(VehicleKind::RidableHorse),
        EntityTag::MotorRowboat => Some(VehicleKind::Rowboat),
        EntityTag::SubmarineDuo => Some(VehicleKind::DuoSubmarine),
        EntityTag::BaseSubmarine => Some(VehicleKind::SoloSubmarine),
        EntityTag::Snowmobile => Some(VehicleKind::Snowmobile),
        EntityTag::VehicleModule | EntityTag::ModularCar => None,
    }
}

/// Modules have no independent ownership or usage; resolve the containing car
fn classify_module(module: &dyn EntityView, now: f64) -> Option<Classification> {
    let Some(car) = module.parent().filter(|p| p.is_a(EntityTag::ModularCar)) else {
        debug!("vehicle module without a modular car parent; not classified");
        return None;
    };
    Some(classified(VehicleKind::ModularCar, car, now))
}

fn classified(kind: VehicleKind, source: &dyn EntityView, now: f64) -> Classification {
    let owner = source.owner();
    Classification {
        kind,
        time_since_last_used: elapsed_seconds(source.usage(), now),
        owner,
        lock_owner: distinct_lock_owner(owner, source.lock_owner()),
    }
}

/// Convert a native use signal into elapsed seconds
///
/// A zero timestamp is an uninitialized "never used" marker, not "used at
/// time zero": the absence of a signal rather than a qualifying one.
fn elapsed_seconds(signal: UseSignal, now: f64) -> Option<f64> {
    match signal {
        UseSignal::Elapsed(seconds) => Some(seconds),
        UseSignal::Timestamp(at) if at > 0.0 => Some(now - at),
        UseSignal::Timestamp(_) | UseSignal::None => None,
    }
}

/// A lock owned by the vehicle owner adds no signal beyond ownership itself
fn distinct_lock_owner(
    owner: Option<PrincipalId>,
    lock_owner: Option<PrincipalId>,
) -> Option<PrincipalId> {
    lock_owner.filter(|lock| Some(*lock) != owner)
}
