use super::program::{DeviceDescriptor, Predicate, Program, Stage, StagePos};
use super::schema::{FilterOp, Role, ValueType};
use super::slots::SlotCandidate;
use crate::intent::Value;

/// What the session is waiting for. Pending context lives in the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogMode {
    Idle,
    /// Rule builder menu: When / Get / Do, then "Add a filter" and "Run it".
    AwaitingStageChoice,
    /// Category buttons for the role being picked.
    AwaitingCommand { role: Role },
    AwaitingDeviceChoice {
        stage: StagePos,
        candidates: Vec<DeviceDescriptor>,
    },
    /// Empty `candidates` means a free-text value is expected.
    AwaitingSlotValue {
        stage: StagePos,
        param: String,
        candidates: Vec<SlotCandidate>,
    },
    AwaitingFilterTarget { targets: Vec<StagePos> },
    AwaitingFilterSpec { target: StagePos },
    AwaitingFilterValue {
        target: StagePos,
        field: String,
        op: FilterOp,
        ty: ValueType,
    },
    AwaitingConfirmation,
    /// Program handed off; a reset follows within the same turn.
    Done,
}

impl DialogMode {
    pub fn name(&self) -> &'static str {
        match self {
            DialogMode::Idle => "Idle",
            DialogMode::AwaitingStageChoice => "AwaitingStageChoice",
            DialogMode::AwaitingCommand { .. } => "AwaitingCommand",
            DialogMode::AwaitingDeviceChoice { .. } => "AwaitingDeviceChoice",
            DialogMode::AwaitingSlotValue { .. } => "AwaitingSlotValue",
            DialogMode::AwaitingFilterTarget { .. } => "AwaitingFilterTarget",
            DialogMode::AwaitingFilterSpec { .. } => "AwaitingFilterSpec",
            DialogMode::AwaitingFilterValue { .. } => "AwaitingFilterValue",
            DialogMode::AwaitingConfirmation => "AwaitingConfirmation",
            DialogMode::Done => "Done",
        }
    }

    /// Does this mode take a raw utterance verbatim as the answer?
    pub fn expects_free_text(&self) -> bool {
        match self {
            DialogMode::AwaitingSlotValue { candidates, .. } => candidates.is_empty(),
            DialogMode::AwaitingFilterValue { .. } => true,
            _ => false,
        }
    }
}

/// Strict state delta. This is the ONLY way dialog state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    Reset,
    EnterBuilder,
    Mode(DialogMode),
    StageAdded(Stage),
    /// Builder "Get" replaces whatever queries were there.
    QueriesReplaced(Stage),
    TriggerCleared,
    DeviceBound { stage: StagePos, device: DeviceDescriptor },
    SlotFilled { stage: StagePos, name: String, value: Value },
    FilterAttached { stage: StagePos, predicate: Predicate },
}

#[derive(Debug, Clone)]
pub struct DialogState {
    pub mode: DialogMode,
    pub program: Program,
    /// True while the rule is being assembled through the builder menu.
    pub building: bool,
    /// Monotonic, bumped by every delta.
    pub version: u64,
}

impl Default for DialogState {
    fn default() -> Self {
        Self {
            mode: DialogMode::Idle,
            program: Program::default(),
            building: false,
            version: 0,
        }
    }
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.mode == DialogMode::Idle && self.program.is_empty()
    }

    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;
        match delta {
            StateDelta::Reset => {
                self.mode = DialogMode::Idle;
                self.program = Program::default();
                self.building = false;
            }
            StateDelta::EnterBuilder => {
                self.mode = DialogMode::AwaitingStageChoice;
                self.program = Program::default();
                self.building = true;
            }
            StateDelta::Mode(mode) => self.mode = mode,
            StateDelta::StageAdded(stage) => {
                self.program.push(stage);
                self.program.unbind_dangling();
            }
            StateDelta::QueriesReplaced(stage) => {
                self.program.queries = vec![stage];
                self.program.unbind_dangling();
            }
            StateDelta::TriggerCleared => {
                self.program.trigger = None;
                self.program.unbind_dangling();
            }
            StateDelta::DeviceBound { stage, device } => {
                if let Some(s) = self.program.stage_mut(stage) {
                    s.device = Some(device);
                }
            }
            StateDelta::SlotFilled { stage, name, value } => {
                if let Some(s) = self.program.stage_mut(stage) {
                    s.bind(&name, value);
                }
            }
            StateDelta::FilterAttached { stage, predicate } => {
                if let Some(s) = self.program.stage_mut(stage) {
                    s.filters.push(predicate);
                }
            }
        }
    }
}
