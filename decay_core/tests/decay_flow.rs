//! Integration test: classify -> configure -> evaluate -> apply
//!
//! Drives the whole engine the way a hosting damage dispatcher would, over a
//! small fleet of host-style entities.

use decay_core::{
    no_decay_permission, DamageEvent, DamageKind, DecayConfig, DecayEngine, EntityTag, EntityView,
    PermissionRegistry, PrincipalId, Surroundings, UseSignal, VehicleKind, NODECAY_ALL_VEHICLES,
};

/// Host-style entity: carries every tag of its engine type hierarchy
struct HostEntity {
    tags: Vec<EntityTag>,
    name: String,
    owner: Option<PrincipalId>,
    lock_owner: Option<PrincipalId>,
    usage: UseSignal,
    inside: bool,
    near_protection: bool,
    parent: Option<Box<HostEntity>>,
}

impl HostEntity {
    fn new(tags: &[EntityTag], name: &str) -> Self {
        HostEntity {
            tags: tags.to_vec(),
            name: name.to_string(),
            owner: None,
            lock_owner: None,
            usage: UseSignal::None,
            inside: false,
            near_protection: false,
            parent: None,
        }
    }
}

impl Surroundings for HostEntity {
    fn is_inside(&self) -> bool {
        self.inside
    }

    fn is_near_protection(&self) -> bool {
        self.near_protection
    }
}

impl EntityView for HostEntity {
    fn is_a(&self, tag: EntityTag) -> bool {
        self.tags.contains(&tag)
    }

    fn owner(&self) -> Option<PrincipalId> {
        self.owner
    }

    fn usage(&self) -> UseSignal {
        self.usage
    }

    fn lock_owner(&self) -> Option<PrincipalId> {
        self.lock_owner
    }

    fn name_tag(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<&dyn EntityView> {
        self.parent.as_deref().map(|p| p as &dyn EntityView)
    }
}

#[test]
fn test_fleet_decay_tick() {
    let now = 10_000.0;

    let mut config = DecayConfig::default();
    config.vehicles.kayak.decay_multiplier_inside = 0.5;
    config.vehicles.kayak.decay_multiplier_near_protection = 0.5;

    let mut permissions = PermissionRegistry::new();
    permissions.grant(PrincipalId(100), no_decay_permission(VehicleKind::Rhib));
    permissions.grant(PrincipalId(200), NODECAY_ALL_VEHICLES);

    let engine = DecayEngine::new(&config, &permissions);

    // Scrap heli flown 2 minutes ago: inside its 10 minute window.
    let mut scrap_heli = HostEntity::new(
        &[EntityTag::ScrapTransportHelicopter, EntityTag::MiniCopter],
        "scraptransporthelicopter",
    );
    scrap_heli.usage = UseSignal::Timestamp(now - 120.0);

    let mut event = DamageEvent::decay(8.0);
    let outcome = engine.process(&scrap_heli, &mut event, now);
    assert!(!event.has(DamageKind::Decay));
    assert!(outcome.suppress_repair_reset);

    // RHIB idle past its window, but the owner holds the kind permission.
    let mut rhib = HostEntity::new(&[EntityTag::Rhib, EntityTag::MotorRowboat], "rhib");
    rhib.owner = Some(PrincipalId(100));
    rhib.usage = UseSignal::Elapsed(5000.0);

    let mut event = DamageEvent::decay(8.0);
    let outcome = engine.process(&rhib, &mut event, now);
    assert!(!event.has(DamageKind::Decay));
    assert!(outcome.suppress_repair_reset);

    // Idle kayak sheltered near a protective structure: 0.5 * 0.5.
    let mut kayak = HostEntity::new(&[EntityTag::Kayak], "kayak");
    kayak.usage = UseSignal::Elapsed(100_000.0);
    kayak.inside = true;
    kayak.near_protection = true;

    let mut event = DamageEvent::decay(8.0);
    let outcome = engine.process(&kayak, &mut event, now);
    assert!((outcome.multiplier - 0.25).abs() < f64::EPSILON);
    assert!((event.of_kind(DamageKind::Decay) - 2.0).abs() < f64::EPSILON);
    assert!(!outcome.suppress_repair_reset);

    // Idle unowned horse: nothing applies, decay goes through untouched.
    let mut horse = HostEntity::new(&[EntityTag::RidableHorse], "ridablehorse");
    horse.usage = UseSignal::Timestamp(0.0);

    let mut event = DamageEvent::decay(8.0);
    let outcome = engine.process(&horse, &mut event, now);
    assert!(outcome.is_pass());
    assert!((event.of_kind(DamageKind::Decay) - 8.0).abs() < f64::EPSILON);
}

#[test]
fn test_module_damage_resolves_the_parent_car() {
    let now = 10_000.0;
    let config = DecayConfig::default();
    let mut permissions = PermissionRegistry::new();
    permissions.grant(PrincipalId(300), no_decay_permission(VehicleKind::ModularCar));
    let engine = DecayEngine::new(&config, &permissions);

    // The module itself is unowned; its car belongs to a permitted player.
    let mut car = HostEntity::new(&[EntityTag::ModularCar], "modularcar");
    car.owner = Some(PrincipalId(300));
    car.usage = UseSignal::Timestamp(0.0);

    let mut module = HostEntity::new(&[EntityTag::VehicleModule], "engine.module");
    module.parent = Some(Box::new(car));

    let mut event = DamageEvent::decay(6.0);
    let outcome = engine.process(&module, &mut event, now);
    assert!(!event.has(DamageKind::Decay));
    assert!(outcome.suppress_repair_reset);

    // The same module detached from its car is not protected.
    let mut loose_module = HostEntity::new(&[EntityTag::VehicleModule], "engine.module");
    loose_module.parent = None;

    let mut event = DamageEvent::decay(6.0);
    let outcome = engine.process(&loose_module, &mut event, now);
    assert!(outcome.is_pass());
    assert!((event.of_kind(DamageKind::Decay) - 6.0).abs() < f64::EPSILON);
}

#[test]
fn test_locked_vehicle_honors_the_lock_owners_permission() {
    let config = DecayConfig::default();
    let mut permissions = PermissionRegistry::new();
    permissions.grant(PrincipalId(2), NODECAY_ALL_VEHICLES);
    let engine = DecayEngine::new(&config, &permissions);

    let mut sub = HostEntity::new(&[EntityTag::BaseSubmarine], "submarinesolo");
    sub.owner = Some(PrincipalId(1));
    sub.lock_owner = Some(PrincipalId(2));
    sub.usage = UseSignal::Elapsed(1_000_000.0);

    let mut event = DamageEvent::decay(3.0);
    let outcome = engine.process(&sub, &mut event, 0.0);

    assert!(!event.has(DamageKind::Decay));
    assert!(outcome.suppress_repair_reset);
}

#[test]
fn test_snowmobile_variants_use_their_own_configs() {
    let mut config = DecayConfig::default();
    config.vehicles.snowmobile.decay_multiplier_inside = 0.5;
    config.vehicles.tomaha.decay_multiplier_inside = 0.25;
    let permissions = PermissionRegistry::new();
    let engine = DecayEngine::new(&config, &permissions);

    let mut snowmobile = HostEntity::new(&[EntityTag::Snowmobile], "snowmobile");
    snowmobile.inside = true;
    let mut event = DamageEvent::decay(8.0);
    engine.process(&snowmobile, &mut event, 0.0);
    assert!((event.of_kind(DamageKind::Decay) - 4.0).abs() < f64::EPSILON);

    let mut tomaha = HostEntity::new(&[EntityTag::Snowmobile], "tomahasnowmobile");
    tomaha.inside = true;
    let mut event = DamageEvent::decay(8.0);
    engine.process(&tomaha, &mut event, 0.0);
    assert!((event.of_kind(DamageKind::Decay) - 2.0).abs() < f64::EPSILON);
}
