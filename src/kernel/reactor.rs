use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::builder::{MenuChoice, RuleBuilder};
use super::cancel::{CancelHandle, CancellationRegistry};
use super::compiler::compile;
use super::error::{DialogError, DialogResult};
use super::event::{AskKind, Message, Outbox};
use super::filter::FilterBuilder;
use super::program::{Predicate, Program, Stage, StagePos};
use super::resolver::{DeviceResolver, Resolution};
use super::schema::Role;
use super::slots::{SlotFiller, SlotOutcome};
use super::state::{DialogMode, DialogState, StateDelta};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use super::time::Turn;
use crate::intent::{Answer, FilterIntent, Intent, Invocation, Special, WireIntent};
use crate::outputs::realizer;
use crate::services::Services;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Name the assistant goes by in prompts ("using Almond of Mom").
    pub assistant_name: String,
    /// Ask before running a lone local query. Off: queries run at once.
    pub confirm_queries: bool,
    pub parser_url: Option<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Almond".to_string(),
            confirm_queries: false,
            parser_url: None,
        }
    }
}

/// One conversation. Intents go in one at a time; each turn returns the
/// messages for the user in emission order.
///
/// **KERNEL LAW**: state changes only through `StateDelta`, and a turn that
/// fails validation leaves the state as it found it.
pub struct Reactor {
    pub config: DialogConfig,
    pub telemetry: TelemetryRecorder,
    state: DialogState,
    cancel_registry: CancellationRegistry,
    turn: Turn,
    services: Services,
    resolver: DeviceResolver,
    // Set when a lookup result came back after a cancel.
    discarded: bool,
}

impl Reactor {
    pub fn new(services: Services, config: DialogConfig) -> Self {
        let resolver = DeviceResolver::new(services.registry.clone());
        Self {
            state: DialogState::new(),
            config,
            cancel_registry: CancellationRegistry::new(),
            telemetry: TelemetryRecorder::new(),
            turn: Turn::new(),
            services,
            resolver,
            discarded: false,
        }
    }

    /// Handle for cancelling this session from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel_registry.handle()
    }

    /// Read-only view; mutation goes through `StateDelta` inside the reactor.
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn mode(&self) -> &DialogMode {
        &self.state.mode
    }

    pub fn program(&self) -> &Program {
        &self.state.program
    }

    /// Entry point for button payloads and pre-parsed intents.
    pub async fn handle_parsed_command(&mut self, json: &str) -> DialogResult<Vec<Message>> {
        let intent = WireIntent::from_json(json)?.into_intent()?;
        self.handle(intent).await
    }

    /// Entry point for raw utterances.
    pub async fn handle_command(&mut self, text: &str) -> DialogResult<Vec<Message>> {
        self.absorb_pending_cancel();
        if self.state.mode.expects_free_text() {
            return self.handle(Intent::Answer(Answer::String(text.to_string()))).await;
        }

        let parser = self.services.parser.clone().ok_or(DialogError::NoParser)?;
        let parsed = parser.parse(text).await;
        if self.discard_if_stale() {
            self.discarded = false;
            return Ok(Vec::new());
        }
        let intent = parsed?;
        debug!("Parsed utterance into {} intent", intent.tag());
        self.handle(intent).await
    }

    pub async fn handle(&mut self, intent: Intent) -> DialogResult<Vec<Message>> {
        self.turn = self.turn.next();
        self.absorb_pending_cancel();
        let mut out = Outbox::new();

        // === 1. CANCEL (always wins) ===
        let cancel_deltas = self.cancel_registry.process(&intent);
        if !cancel_deltas.is_empty() {
            for delta in cancel_deltas {
                self.state.reduce(delta);
            }
            info!("Dialog cancelled at turn {}", self.turn.index);
            self.telemetry.record(TelemetryEvent::Cancelled { turn: self.turn });
            return Ok(out.into_messages());
        }

        // === 2. DISPATCH ===
        debug!("Turn {}: {} intent in {}", self.turn.index, intent.tag(), self.state.mode.name());
        let result = self.dispatch(intent, &mut out).await;

        if std::mem::take(&mut self.discarded) {
            return Ok(Vec::new());
        }
        match result {
            Ok(()) => Ok(out.into_messages()),
            Err(e) => {
                warn!("Rejected intent: {}", e);
                self.telemetry.record(TelemetryEvent::Rejected { turn: self.turn });
                Err(e)
            }
        }
    }

    async fn dispatch(&mut self, intent: Intent, out: &mut Outbox) -> DialogResult<()> {
        match intent {
            Intent::Special(Special::Help) | Intent::Special(Special::MakeRule) => {
                self.state.reduce(StateDelta::EnterBuilder);
                RuleBuilder::prompt_menu(&self.state.program, out);
                Ok(())
            }
            // Consumed by the cancel step.
            Intent::Special(Special::Nevermind) => Ok(()),
            Intent::Special(Special::Yes) => self.on_confirmation(true, out).await,
            Intent::Special(Special::No) => self.on_confirmation(false, out).await,
            Intent::Special(Special::Back) => self.on_back(out),
            Intent::Special(Special::Empty) => self.on_empty(out),
            Intent::Rule { trigger, query, action } => {
                let parts = [
                    (Role::Trigger, trigger),
                    (Role::Query, query),
                    (Role::Action, action),
                ];
                let parts: Vec<(Role, Invocation)> = parts
                    .into_iter()
                    .filter_map(|(role, inv)| inv.map(|inv| (role, inv)))
                    .collect();
                if parts.is_empty() {
                    return Err(DialogError::MalformedIntent("rule without stages".to_string()));
                }
                self.start_rule(parts, out).await
            }
            Intent::Trigger(inv) => self.on_invocation(Role::Trigger, inv, out).await,
            Intent::Query(inv) => self.on_invocation(Role::Query, inv, out).await,
            Intent::Action(inv) => self.on_invocation(Role::Action, inv, out).await,
            Intent::Answer(answer) => self.on_answer(answer, out).await,
            Intent::Filter(filter) => self.on_filter(filter, out),
            Intent::Command { category } => self.on_command(category, out).await,
        }
    }

    // === DIRECT FLOW ===

    async fn on_invocation(&mut self, role: Role, inv: Invocation, out: &mut Outbox) -> DialogResult<()> {
        if self.state.building {
            return self.add_to_builder(role, inv, out).await;
        }
        self.start_rule(vec![(role, inv)], out).await
    }

    /// A fresh rule from top-level invocations. Whatever was in progress is
    /// dropped, but only once every stage validated.
    async fn start_rule(&mut self, parts: Vec<(Role, Invocation)>, out: &mut Outbox) -> DialogResult<()> {
        let mut draft = Program::default();
        for (role, inv) in &parts {
            let stage = match self.build_stage(*role, inv).await {
                Ok(stage) => stage,
                Err(DialogError::UnknownContact(person)) => {
                    if self.discard_if_stale() {
                        return Ok(());
                    }
                    self.report_unknown_contact(&person, out);
                    self.abort(out);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            if self.discard_if_stale() {
                return Ok(());
            }
            draft.push(stage);
        }
        check_remote_placement(&draft)?;
        check_references(&draft)?;

        self.state.reduce(StateDelta::Reset);
        for stage in draft.stages().cloned().collect::<Vec<_>>() {
            info!("Stage added: {} {}", stage.role.as_str(), stage.schema.qualified_id());
            self.telemetry.record(TelemetryEvent::StageAdded { role: stage.role, turn: self.turn });
            self.state.reduce(StateDelta::StageAdded(stage));
        }
        self.drive(out).await
    }

    async fn build_stage(&self, role: Role, inv: &Invocation) -> DialogResult<Stage> {
        let schema = self
            .services
            .schemas
            .function(&inv.function)
            .await?
            .ok_or_else(|| DialogError::UnknownFunction(inv.function.qualified_id()))?;
        if schema.role != role {
            return Err(DialogError::MalformedIntent(format!(
                "{} is a {}, not a {}",
                schema.qualified_id(),
                schema.role.as_str(),
                role.as_str()
            )));
        }

        let mut stage = Stage::from_invocation(role, Arc::new(schema), inv)?;
        if let Some(person) = &inv.person {
            if role != Role::Query {
                return Err(DialogError::MalformedIntent(format!(
                    "only a query can run for someone else, not a {}",
                    role.as_str()
                )));
            }
            let contact = self
                .services
                .contacts
                .lookup(person)
                .await?
                .ok_or_else(|| DialogError::UnknownContact(person.clone()))?;
            stage.remote = Some(contact);
        }
        Ok(stage)
    }

    /// Devices for every stage, then slots, then confirmation. Stops at the
    /// first question it has to ask.
    async fn drive(&mut self, out: &mut Outbox) -> DialogResult<()> {
        // === 1. DEVICES ===
        for pos in self.state.program.positions() {
            let kind = match self.state.program.stage(pos) {
                Some(stage) if stage.needs_device() => stage.kind().to_string(),
                _ => continue,
            };

            let resolution = self.resolver.resolve(&kind).await;
            if self.discard_if_stale() {
                return Ok(());
            }
            match resolution {
                Ok(Resolution::Resolved(device)) => {
                    debug!("Bound {} to {}", kind, device.id);
                    self.state.reduce(StateDelta::DeviceBound { stage: pos, device });
                }
                Ok(Resolution::Ambiguous(candidates)) => {
                    DeviceResolver::prompt(&kind, &candidates, out);
                    self.telemetry.record(TelemetryEvent::DevicePrompted {
                        candidates: candidates.len(),
                        turn: self.turn,
                    });
                    self.state.reduce(StateDelta::Mode(DialogMode::AwaitingDeviceChoice {
                        stage: pos,
                        candidates,
                    }));
                    return Ok(());
                }
                Err(DialogError::NoDevice(kind)) => {
                    info!("No device of type {}", kind);
                    self.resolver.report_missing(&kind, out).await;
                    if self.discard_if_stale() {
                        return Ok(());
                    }
                    self.telemetry.record(TelemetryEvent::DeviceMissing { turn: self.turn });
                    self.abort(out);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }

        // === 2. SLOTS ===
        if let Some((pos, param)) = SlotFiller::next_slot(&self.state.program) {
            let candidates = SlotFiller::candidates(&self.state.program, pos, &param);
            SlotFiller::prompt(&param, &candidates, out);
            self.telemetry.record(TelemetryEvent::SlotPrompted {
                candidates: candidates.len(),
                turn: self.turn,
            });
            self.state.reduce(StateDelta::Mode(DialogMode::AwaitingSlotValue {
                stage: pos,
                param: param.name,
                candidates,
            }));
            return Ok(());
        }

        // === 3. CONFIRM ===
        if self.state.program.is_local_query_only() && !self.config.confirm_queries {
            return self.commit(out, false).await;
        }
        out.send(realizer::confirmation(&self.state.program, &self.config.assistant_name));
        out.ask(AskKind::YesNo);
        self.telemetry.record(TelemetryEvent::ConfirmationRequested {
            stages: self.state.program.stages().count(),
            turn: self.turn,
        });
        self.state.reduce(StateDelta::Mode(DialogMode::AwaitingConfirmation));
        Ok(())
    }

    /// Compiles and hands the program off: to the remote sender when a stage
    /// runs elsewhere, to the local loader otherwise. Never both.
    async fn commit(&mut self, out: &mut Outbox, announce: bool) -> DialogResult<()> {
        let compiled = compile(&self.state.program, self.services.tokens.as_ref())?;
        self.state.reduce(StateDelta::Mode(DialogMode::Done));

        let remote = compiled.remote.is_some();
        match compiled.remote {
            Some(address) => {
                let description = match self.state.program.remote_stage() {
                    Some(stage) => format!("{} then send it to me", realizer::describe_local(stage)),
                    None => "send it to me".to_string(),
                };
                out.send(format!("Sending rule to {}: {}", address.contact.display_name, description));
                info!("Dispatching rule to {}", address.kind_channel);
                let dispatch = address.into_dispatch(description, compiled.code);
                if let Err(e) = self.services.remote.send_rule(dispatch).await {
                    warn!("Remote dispatch failed: {}", e);
                }
            }
            None => {
                info!("Loading program\n{}", compiled.code);
                if let Err(e) = self.services.loader.load_one_app(&compiled.code).await {
                    warn!("Program load failed: {}", e);
                }
            }
        }

        if announce {
            out.send("Consider it done.");
        }
        out.ask(AskKind::Null);
        self.telemetry.record(TelemetryEvent::Committed { remote, turn: self.turn });
        self.state.reduce(StateDelta::Reset);
        Ok(())
    }

    /// Gives up on the current attempt. The builder keeps its program and
    /// shows the menu again; the direct flow resets.
    fn abort(&mut self, out: &mut Outbox) {
        self.telemetry.record(TelemetryEvent::Aborted { turn: self.turn });
        if self.state.building {
            self.state.reduce(StateDelta::Mode(DialogMode::AwaitingStageChoice));
            RuleBuilder::prompt_menu(&self.state.program, out);
        } else {
            out.ask(AskKind::Null);
            self.state.reduce(StateDelta::Reset);
        }
    }

    fn report_unknown_contact(&self, person: &str, out: &mut Outbox) {
        out.send(format!("I don't know who {} is.", person));
    }

    // === ANSWERS ===

    async fn on_answer(&mut self, answer: Answer, out: &mut Outbox) -> DialogResult<()> {
        match self.state.mode.clone() {
            DialogMode::AwaitingDeviceChoice { stage, candidates } => {
                let index = match answer {
                    Answer::Choice(index) => index,
                    _ => return Err(DialogError::MalformedIntent("expected a device choice".to_string())),
                };
                let device = candidates.get(index).cloned().ok_or_else(|| {
                    DialogError::MalformedIntent(format!(
                        "choice {} out of range for {} option(s)",
                        index,
                        candidates.len()
                    ))
                })?;
                debug!("User picked {}", device.id);
                self.state.reduce(StateDelta::DeviceBound { stage, device });
                self.drive(out).await
            }
            DialogMode::AwaitingSlotValue { stage, param, candidates } => {
                let schema = self
                    .state
                    .program
                    .stage(stage)
                    .and_then(|s| s.schema.input(&param))
                    .cloned()
                    .ok_or_else(|| DialogError::IncompleteProgram(format!("slot {} vanished", param)))?;
                match SlotFiller::accept(&schema, &candidates, &answer)? {
                    SlotOutcome::Filled(value) => {
                        self.state.reduce(StateDelta::SlotFilled {
                            stage,
                            name: param,
                            value,
                        });
                        self.drive(out).await
                    }
                    SlotOutcome::AskFreeText => {
                        SlotFiller::prompt(&schema, &[], out);
                        self.telemetry.record(TelemetryEvent::SlotPrompted { candidates: 0, turn: self.turn });
                        self.state.reduce(StateDelta::Mode(DialogMode::AwaitingSlotValue {
                            stage,
                            param,
                            candidates: Vec::new(),
                        }));
                        Ok(())
                    }
                }
            }
            DialogMode::AwaitingStageChoice => {
                let index = expect_choice(&answer)?;
                match RuleBuilder::menu_choice(&self.state.program, index)? {
                    MenuChoice::Pick(role) => {
                        RuleBuilder::prompt_categories(role, out);
                        self.state.reduce(StateDelta::Mode(DialogMode::AwaitingCommand { role }));
                    }
                    MenuChoice::AddFilter => {
                        let targets = FilterBuilder::targets(&self.state.program);
                        if targets.is_empty() {
                            out.send("There is nothing to filter yet. Add a When or a Get first.");
                            RuleBuilder::prompt_menu(&self.state.program, out);
                        } else {
                            FilterBuilder::prompt_target(&self.state.program, &targets, out);
                            self.state.reduce(StateDelta::Mode(DialogMode::AwaitingFilterTarget { targets }));
                        }
                    }
                    MenuChoice::Run => {
                        if self.state.program.is_empty() {
                            out.send("There is nothing to run yet.");
                            RuleBuilder::prompt_menu(&self.state.program, out);
                            return Ok(());
                        }
                        check_remote_placement(&self.state.program)?;
                        info!("Running rule with {} stage(s)", self.state.program.stages().count());
                        return self.drive(out).await;
                    }
                }
                Ok(())
            }
            DialogMode::AwaitingFilterTarget { targets } => {
                let index = expect_choice(&answer)?;
                match FilterBuilder::choose_target(&targets, index)? {
                    None => self.back_to_menu(out),
                    Some(target) => {
                        let stage = self.stage_at(target)?;
                        FilterBuilder::prompt_spec(stage, out);
                        self.state.reduce(StateDelta::Mode(DialogMode::AwaitingFilterSpec { target }));
                    }
                }
                Ok(())
            }
            DialogMode::AwaitingFilterValue { target, field, op, ty } => {
                let value = FilterBuilder::accept_value(ty, &answer)?;
                self.attach_filter(target, FilterBuilder::predicate(field, op, value), out);
                Ok(())
            }
            other => Err(DialogError::MalformedIntent(format!("no answer is expected in {}", other.name()))),
        }
    }

    async fn on_confirmation(&mut self, yes: bool, out: &mut Outbox) -> DialogResult<()> {
        if self.state.mode != DialogMode::AwaitingConfirmation {
            return Err(DialogError::MalformedIntent(format!(
                "nothing to confirm in {}",
                self.state.mode.name()
            )));
        }
        if yes {
            return self.commit(out, true).await;
        }
        info!("Rule declined");
        out.send("Okay, I won't do that.");
        out.ask(AskKind::Null);
        self.telemetry.record(TelemetryEvent::Aborted { turn: self.turn });
        self.state.reduce(StateDelta::Reset);
        Ok(())
    }

    // === BUILDER ===

    async fn add_to_builder(&mut self, role: Role, inv: Invocation, out: &mut Outbox) -> DialogResult<()> {
        let stage = match self.build_stage(role, &inv).await {
            Ok(stage) => stage,
            Err(DialogError::UnknownContact(person)) => {
                if self.discard_if_stale() {
                    return Ok(());
                }
                self.report_unknown_contact(&person, out);
                self.back_to_menu(out);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        if self.discard_if_stale() {
            return Ok(());
        }

        let mut draft = self.state.program.clone();
        match role {
            Role::Query => draft.queries = vec![stage.clone()],
            _ => draft.push(stage.clone()),
        }
        check_remote_placement(&draft)?;
        let pos = match role {
            Role::Trigger => StagePos::Trigger,
            Role::Query => StagePos::Query(0),
            Role::Action => StagePos::Action,
        };
        if let Some(name) = draft.dangling_at(pos) {
            return Err(unbacked_reference(&name));
        }

        info!("Builder stage set: {} {}", role.as_str(), stage.schema.qualified_id());
        self.telemetry.record(TelemetryEvent::StageAdded { role, turn: self.turn });
        let delta = match role {
            Role::Query => StateDelta::QueriesReplaced(stage),
            _ => StateDelta::StageAdded(stage),
        };
        self.state.reduce(delta);
        self.back_to_menu(out);
        Ok(())
    }

    async fn on_command(&mut self, category: String, out: &mut Outbox) -> DialogResult<()> {
        let role = match self.state.mode {
            DialogMode::AwaitingCommand { role } => role,
            _ => {
                return Err(DialogError::MalformedIntent(format!(
                    "category {} outside of the rule builder",
                    category
                )))
            }
        };
        let functions = self.services.schemas.functions_in_category(&category).await?;
        if self.discard_if_stale() {
            return Ok(());
        }
        RuleBuilder::prompt_functions(role, &functions, out);
        Ok(())
    }

    fn on_back(&mut self, out: &mut Outbox) -> DialogResult<()> {
        match self.state.mode {
            DialogMode::AwaitingCommand { .. } | DialogMode::AwaitingFilterTarget { .. } => {
                self.back_to_menu(out);
                Ok(())
            }
            DialogMode::AwaitingFilterSpec { .. } => {
                let targets = FilterBuilder::targets(&self.state.program);
                FilterBuilder::prompt_target(&self.state.program, &targets, out);
                self.state.reduce(StateDelta::Mode(DialogMode::AwaitingFilterTarget { targets }));
                Ok(())
            }
            ref other => Err(DialogError::MalformedIntent(format!("nothing to go back to in {}", other.name()))),
        }
    }

    /// "Do it now": the rule runs without a trigger.
    fn on_empty(&mut self, out: &mut Outbox) -> DialogResult<()> {
        match self.state.mode {
            DialogMode::AwaitingCommand { role: Role::Trigger } => {
                self.state.reduce(StateDelta::TriggerCleared);
                self.back_to_menu(out);
                Ok(())
            }
            ref other => Err(DialogError::MalformedIntent(format!("\"do it now\" is not offered in {}", other.name()))),
        }
    }

    fn on_filter(&mut self, filter: FilterIntent, out: &mut Outbox) -> DialogResult<()> {
        let target = match self.state.mode {
            DialogMode::AwaitingFilterSpec { target } => target,
            ref other => return Err(DialogError::MalformedIntent(format!("no filter is expected in {}", other.name()))),
        };
        let (field, ty, op) = FilterBuilder::accept_spec(self.stage_at(target)?, &filter)?;
        match filter.value {
            Some(value) => self.attach_filter(target, FilterBuilder::predicate(field, op, value), out),
            None => {
                FilterBuilder::prompt_value(out);
                self.state.reduce(StateDelta::Mode(DialogMode::AwaitingFilterValue { target, field, op, ty }));
            }
        }
        Ok(())
    }

    fn attach_filter(&mut self, target: StagePos, predicate: Predicate, out: &mut Outbox) {
        debug!("Filter on {:?}: {} {}", target, predicate.field, predicate.op.label());
        self.telemetry.record(TelemetryEvent::FilterAttached { turn: self.turn });
        self.state.reduce(StateDelta::FilterAttached { stage: target, predicate });
        self.back_to_menu(out);
    }

    fn back_to_menu(&mut self, out: &mut Outbox) {
        self.state.reduce(StateDelta::Mode(DialogMode::AwaitingStageChoice));
        RuleBuilder::prompt_menu(&self.state.program, out);
    }

    fn stage_at(&self, pos: StagePos) -> DialogResult<&Stage> {
        self.state
            .program
            .stage(pos)
            .ok_or_else(|| DialogError::MalformedIntent(format!("no stage at {:?}", pos)))
    }

    // === CANCELLATION ===

    /// A cancel that arrived between turns takes effect before dispatch.
    fn absorb_pending_cancel(&mut self) {
        if self.cancel_registry.is_stale() {
            info!("Out-of-band cancel, resetting dialog");
            self.cancel_registry.sync();
            self.state.reduce(StateDelta::Reset);
            self.telemetry.record(TelemetryEvent::Cancelled { turn: self.turn });
        }
    }

    /// Called after every await. A result that outlived its dialog is
    /// dropped and the session resets.
    fn discard_if_stale(&mut self) -> bool {
        if !self.cancel_registry.is_stale() {
            return false;
        }
        warn!("Discarding stale result at epoch {}", self.cancel_registry.epoch());
        self.cancel_registry.sync();
        self.state.reduce(StateDelta::Reset);
        self.telemetry.record(TelemetryEvent::StaleDiscarded { turn: self.turn });
        self.discarded = true;
        true
    }
}

/// Every argument bound to an earlier output must find that output.
fn check_references(program: &Program) -> DialogResult<()> {
    match program.dangling_reference() {
        Some((_, name)) => Err(unbacked_reference(&name)),
        None => Ok(()),
    }
}

fn unbacked_reference(name: &str) -> DialogError {
    DialogError::MalformedIntent(format!("{} refers to an output no earlier stage produces", name))
}

fn expect_choice(answer: &Answer) -> DialogResult<usize> {
    match answer {
        Answer::Choice(index) => Ok(*index),
        _ => Err(DialogError::MalformedIntent("expected a choice".to_string())),
    }
}

/// A stage that runs on someone else's assistant has to open the chain.
fn check_remote_placement(program: &Program) -> DialogResult<()> {
    let first_remote = program.stages().position(|s| s.remote.is_some());
    match first_remote {
        Some(0) | None => Ok(()),
        Some(_) => Err(DialogError::MalformedIntent(
            "a query for someone else must come first".to_string(),
        )),
    }
}
