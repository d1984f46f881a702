//! Decay Sim - A minimal TUI fleet simulation demonstrating decay_core
//!
//! The sim shows:
//! - Classifying a mixed fleet of vehicles each decay tick
//! - Recent-use protection, owner/lock-owner permissions
//! - Environment multipliers (inside / near a protective structure)
//! - Toggling grants and surroundings live and watching the outcomes

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use decay_core::{
    classify, no_decay_permission, DamageEvent, DamageKind, DecayConfig, DecayEngine, EntityTag,
    EntityView, PermissionRegistry, PermissionStore, PrincipalId, Surroundings, UseSignal,
    NODECAY_ALL_VEHICLES,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::Path;

/// Simulated seconds per decay tick
const TICK_SECONDS: f64 = 60.0;

/// Raw decay damage delivered per tick
const DECAY_PER_TICK: f64 = 5.0;

const MAX_HEALTH: f64 = 100.0;

/// One simulated vehicle
struct SimVehicle {
    /// Every tag of the entity's engine type hierarchy
    tags: Vec<EntityTag>,
    name: String,
    owner: Option<PrincipalId>,
    lock_owner: Option<PrincipalId>,
    /// Engine time of last use; zero means never used
    last_used_at: f64,
    /// Whether the entity reports elapsed seconds instead of a timestamp
    reports_elapsed: bool,
    /// Engine clock snapshot, refreshed by the tick loop before inspection
    clock: f64,
    inside: bool,
    near_protection: bool,
    health: f64,
    /// What happened to this vehicle on the last tick
    last_note: String,
    /// Containing vehicle, for the module entity
    parent: Option<Box<SimVehicle>>,
}

impl SimVehicle {
    fn new(tags: &[EntityTag], name: &str, reports_elapsed: bool) -> Self {
        SimVehicle {
            tags: tags.to_vec(),
            name: name.to_string(),
            owner: None,
            lock_owner: None,
            last_used_at: 0.0,
            reports_elapsed,
            clock: 0.0,
            inside: false,
            near_protection: false,
            health: MAX_HEALTH,
            last_note: "-".to_string(),
            parent: None,
        }
    }

    /// Mark the vehicle as used right now; modules forward to their car
    fn use_now(&mut self, time: f64) {
        if let Some(parent) = self.parent.as_deref_mut() {
            parent.last_used_at = time;
        } else {
            self.last_used_at = time;
        }
    }

    fn refresh_clock(&mut self, time: f64) {
        self.clock = time;
        if let Some(parent) = self.parent.as_deref_mut() {
            parent.clock = time;
        }
    }
}

impl Surroundings for SimVehicle {
    fn is_inside(&self) -> bool {
        self.inside
    }

    fn is_near_protection(&self) -> bool {
        self.near_protection
    }
}

impl EntityView for SimVehicle {
    fn is_a(&self, tag: EntityTag) -> bool {
        self.tags.contains(&tag)
    }

    fn owner(&self) -> Option<PrincipalId> {
        self.owner
    }

    fn usage(&self) -> UseSignal {
        if self.reports_elapsed {
            if self.last_used_at > 0.0 {
                UseSignal::Elapsed(self.clock - self.last_used_at)
            } else {
                UseSignal::None
            }
        } else {
            UseSignal::Timestamp(self.last_used_at)
        }
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

/// Main simulation state
struct SimState {
    config: DecayConfig,
    permissions: PermissionRegistry,
    vehicles: Vec<SimVehicle>,
    time: f64,
    ticks: u32,
    selected: usize,
    messages: Vec<String>,
}

/// Build the starting fleet, covering every supported kind
fn create_fleet(rng: &mut ChaCha8Rng, now: f64) -> Vec<SimVehicle> {
    let p1 = PrincipalId(1001);
    let p2 = PrincipalId(1002);
    let p3 = PrincipalId(1003);

    let mut fleet = vec![
        SimVehicle::new(&[EntityTag::MiniCopter], "minicopter", false),
        SimVehicle::new(
            &[EntityTag::ScrapTransportHelicopter, EntityTag::MiniCopter],
            "scraptransporthelicopter",
            false,
        ),
        SimVehicle::new(&[EntityTag::Rhib, EntityTag::MotorRowboat], "rhib", true),
        SimVehicle::new(&[EntityTag::MotorRowboat], "rowboat", true),
        SimVehicle::new(&[EntityTag::Kayak], "kayak", true),
        SimVehicle::new(&[EntityTag::HotAirBalloon], "hotairballoon", false),
        SimVehicle::new(&[EntityTag::RidableHorse], "ridablehorse", false),
        SimVehicle::new(
            &[EntityTag::SubmarineDuo, EntityTag::BaseSubmarine],
            "submarineduo",
            true,
        ),
        SimVehicle::new(&[EntityTag::BaseSubmarine], "submarinesolo", true),
        SimVehicle::new(&[EntityTag::Snowmobile], "snowmobile", false),
        SimVehicle::new(&[EntityTag::Snowmobile], "tomahasnowmobile", false),
    ];

    // One modular car engine module; decay hits the module, the car answers.
    let mut car = SimVehicle::new(&[EntityTag::ModularCar], "modularcar", false);
    car.owner = Some(p1);
    let mut module = SimVehicle::new(&[EntityTag::VehicleModule], "engine.module", false);
    module.parent = Some(Box::new(car));
    fleet.push(module);

    let owners = [Some(p1), Some(p2), Some(p3), None];
    for vehicle in &mut fleet {
        if vehicle.parent.is_none() {
            vehicle.owner = *owners.choose(rng).unwrap_or(&None);
        }

        // Roughly half the fleet was used recently.
        if rng.gen_bool(0.5) {
            vehicle.use_now(now - rng.gen_range(30.0..4000.0));
        }
        if rng.gen_bool(0.2) {
            vehicle.inside = true;
        }
        if rng.gen_bool(0.2) {
            vehicle.near_protection = true;
        }
        // The odd vehicle carries someone else's lock. Modules are skipped;
        // their lock lives on the car.
        if vehicle.parent.is_none() && rng.gen_bool(0.25) {
            vehicle.lock_owner = Some(*[p1, p2, p3].choose(rng).unwrap_or(&p1));
        }

        vehicle.refresh_clock(now);
    }

    fleet
}

impl SimState {
    fn new() -> Self {
        // Load config from decay_sim's config directory, as when run from the
        // workspace root or from inside the crate.
        let config_paths = ["decay_sim/config", "config"];
        let (config, source) = config_paths
            .iter()
            .find(|p| Path::new(p).exists())
            .map(|p| {
                let path = Path::new(p).join("VehicleDecayProtection.json");
                (DecayConfig::load_or_default(&path), p.to_string())
            })
            .unwrap_or_else(|| (DecayConfig::default(), "defaults".to_string()));

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let time = 10_000.0;
        let vehicles = create_fleet(&mut rng, time);

        SimState {
            config,
            permissions: PermissionRegistry::new(),
            vehicles,
            time,
            ticks: 0,
            selected: 0,
            messages: vec![format!("Fleet spawned. Config: {}", source)],
        }
    }

    /// Advance one decay tick: every vehicle takes a decay event
    fn tick(&mut self) {
        self.time += TICK_SECONDS;
        self.ticks += 1;

        let engine = DecayEngine::new(&self.config, &self.permissions);
        let mut protected = 0u32;
        let mut scaled = 0u32;
        let mut decayed = 0u32;

        for vehicle in &mut self.vehicles {
            vehicle.refresh_clock(self.time);

            let mut event = DamageEvent::decay(DECAY_PER_TICK);
            let outcome = engine.process(&*vehicle, &mut event, self.time);

            let remaining = event.of_kind(DamageKind::Decay);
            vehicle.health = (vehicle.health - remaining).max(0.0);

            vehicle.last_note = if outcome.suppress_repair_reset {
                protected += 1;
                "protected".to_string()
            } else if !outcome.is_pass() {
                scaled += 1;
                format!("x{:.2}", outcome.multiplier)
            } else {
                decayed += 1;
                format!("-{:.1}", remaining)
            };
        }

        self.push_message(format!(
            "Tick {}: {} protected, {} scaled, {} decayed",
            self.ticks, protected, scaled, decayed
        ));
    }

    /// Refresh the selected vehicle's last-used signal
    fn use_selected(&mut self) {
        let time = self.time;
        if let Some(vehicle) = self.vehicles.get_mut(self.selected) {
            vehicle.use_now(time);
            let name = vehicle.name.clone();
            self.push_message(format!("{} used at t={:.0}", name, time));
        }
    }

    /// Toggle the kind-specific no-decay grant for the selected owner
    fn toggle_kind_permission(&mut self) {
        let Some((kind, owner)) = self.selected_classification() else {
            self.push_message("No owner or unsupported vehicle.".to_string());
            return;
        };
        let perm = no_decay_permission(kind);
        self.toggle_grant(owner, perm);
    }

    /// Toggle the blanket no-decay grant for the selected owner
    fn toggle_blanket_permission(&mut self) {
        let Some((_, owner)) = self.selected_classification() else {
            self.push_message("No owner or unsupported vehicle.".to_string());
            return;
        };
        self.toggle_grant(owner, NODECAY_ALL_VEHICLES);
    }

    fn toggle_grant(&mut self, owner: PrincipalId, perm: &str) {
        if self.permissions.has_permission(owner, perm) {
            self.permissions.revoke(owner, perm);
            self.push_message(format!("Revoked {} from {}", perm, owner));
        } else {
            self.permissions.grant(owner, perm);
            self.push_message(format!("Granted {} to {}", perm, owner));
        }
    }

    /// Kind and resolved owner of the selected vehicle, if classifiable
    fn selected_classification(&self) -> Option<(decay_core::VehicleKind, PrincipalId)> {
        let vehicle = self.vehicles.get(self.selected)?;
        let c = classify(vehicle, self.time)?;
        Some((c.kind, c.owner?))
    }

    fn toggle_inside(&mut self) {
        if let Some(vehicle) = self.vehicles.get_mut(self.selected) {
            vehicle.inside = !vehicle.inside;
            let note = format!("{} inside: {}", vehicle.name, vehicle.inside);
            self.push_message(note);
        }
    }

    fn toggle_near_protection(&mut self) {
        if let Some(vehicle) = self.vehicles.get_mut(self.selected) {
            vehicle.near_protection = !vehicle.near_protection;
            let note = format!("{} near protection: {}", vehicle.name, vehicle.near_protection);
            self.push_message(note);
        }
    }

    fn push_message(&mut self, message: String) {
        self.messages.push(message);
        while self.messages.len() > 8 {
            self.messages.remove(0);
        }
    }
}

fn health_bar(health: f64) -> String {
    let filled = ((health / MAX_HEALTH) * 10.0).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled.min(10)),
        "░".repeat(10 - filled.min(10))
    )
}

fn draw(f: &mut Frame, state: &SimState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(14),    // Fleet + details
            Constraint::Length(10), // Messages
            Constraint::Length(3),  // Controls
        ])
        .split(f.area());

    // Title
    let title = Paragraph::new(format!(
        "Decay Sim - t={:.0}s, tick {} ({}s per tick)",
        state.time, state.ticks, TICK_SECONDS
    ))
    .style(Style::default().fg(Color::Cyan))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    // Fleet list
    let items: Vec<ListItem> = state
        .vehicles
        .iter()
        .enumerate()
        .map(|(i, vehicle)| {
            let prefix = if i == state.selected { "> " } else { "  " };
            let style = if i == state.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{}{:<26} {} {:>5.0}  {}",
                prefix,
                vehicle.name,
                health_bar(vehicle.health),
                vehicle.health,
                vehicle.last_note
            ))
            .style(style)
        })
        .collect();
    let fleet_widget = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Fleet ({} vehicles)", state.vehicles.len())),
    );
    f.render_widget(fleet_widget, main_chunks[0]);

    // Details for the selected vehicle
    let detail_text = if let Some(vehicle) = state.vehicles.get(state.selected) {
        let mut lines = vec![Line::from(vec![Span::styled(
            vehicle.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )])];

        match classify(vehicle, state.time) {
            Some(c) => {
                lines.push(Line::from(format!("Kind: {:?}", c.kind)));
                let owner = c
                    .owner
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "unowned".to_string());
                lines.push(Line::from(format!("Owner: {}", owner)));
                if let Some(lock_owner) = c.lock_owner {
                    lines.push(Line::from(format!("Lock owner: {}", lock_owner)));
                }
                match c.time_since_last_used {
                    Some(elapsed) => {
                        lines.push(Line::from(format!("Last used: {:.0}s ago", elapsed)))
                    }
                    None => lines.push(Line::from("Last used: never")),
                }

                let config = state.config.for_kind(c.kind);
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "Protection window: {:.0} min",
                    config.protection_minutes_after_use
                )));
                lines.push(Line::from(format!(
                    "Inside multiplier: {:.2}",
                    config.decay_multiplier_inside
                )));
                lines.push(Line::from(format!(
                    "Near-protection multiplier: {:.2}",
                    config.decay_multiplier_near_protection
                )));

                if let Some(owner) = c.owner {
                    let kind_perm = no_decay_permission(c.kind);
                    lines.push(Line::from(""));
                    lines.push(Line::from(format!(
                        "Owner kind perm: {}",
                        state.permissions.has_permission(owner, kind_perm)
                    )));
                    lines.push(Line::from(format!(
                        "Owner blanket perm: {}",
                        state
                            .permissions
                            .has_permission(owner, NODECAY_ALL_VEHICLES)
                    )));
                }
            }
            None => lines.push(Line::from("Kind: unsupported (decay passes through)")),
        }

        lines.push(Line::from(""));
        lines.push(Line::from(format!("Inside: {}", vehicle.inside)));
        lines.push(Line::from(format!(
            "Near protection: {}",
            vehicle.near_protection
        )));

        lines
    } else {
        vec![Line::from("No vehicle selected")]
    };
    let detail_widget =
        Paragraph::new(detail_text).block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(detail_widget, main_chunks[1]);

    // Messages
    let messages: Vec<ListItem> = state
        .messages
        .iter()
        .map(|m| ListItem::new(m.as_str()))
        .collect();
    let messages_widget =
        List::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(messages_widget, chunks[2]);

    // Controls
    let controls = Paragraph::new(
        "[SPACE] Tick   [U] Use   [P] Kind perm   [B] Blanket perm   [I] Inside   [T] Near TC   [Q] Quit",
    )
    .style(Style::default().fg(Color::Yellow))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(controls, chunks[3]);
}

fn main() -> io::Result<()> {
    let mut state = SimState::new();

    // Setup terminal
    if let Err(e) = enable_raw_mode() {
        eprintln!("Error: Cannot enable raw mode: {}", e);
        eprintln!("This sim requires a terminal. Run it directly, not piped.");
        return Err(e);
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Error: Cannot enter alternate screen: {}", e);
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            eprintln!("Error: Cannot create terminal: {}", e);
            return Err(e);
        }
    };

    loop {
        terminal.draw(|f| draw(f, &state))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => state.tick(),
                    KeyCode::Char('u') => state.use_selected(),
                    KeyCode::Char('p') => state.toggle_kind_permission(),
                    KeyCode::Char('b') => state.toggle_blanket_permission(),
                    KeyCode::Char('i') => state.toggle_inside(),
                    KeyCode::Char('t') => state.toggle_near_protection(),
                    KeyCode::Up | KeyCode::Char('k') => {
                        if state.selected > 0 {
                            state.selected -= 1;
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if state.selected < state.vehicles.len().saturating_sub(1) {
                            state.selected += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
