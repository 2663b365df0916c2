//! CLI command definitions and dispatch
//!
//! This module defines the subcommand structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker → Display
//! ```
//!
//! Each command defines a clap `Args` struct here and converts it into the
//! corresponding `aegis_core::params` type via `From`, keeping the core
//! parameter types free of clap-specific attributes. [`Cli`] owns the
//! tracker and the terminal renderer and formats every outcome through the
//! display wrappers in `aegis_core::display`.

use std::fs;
use std::path::PathBuf;

use aegis_core::display::{CreateResult, OperationStatus, UpdateResult};
use aegis_core::params::{
    AddAction, CreateBusiness, CreatePlan, Id, ListPlans, OpenCrisis, RemoveAction, SetPlanStatus,
    ToggleAction, UpdateRecovery,
};
use aegis_core::{Tracker, TrackerError};
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::renderer::TerminalRenderer;

/// Register a new business
#[derive(Args)]
pub struct RegisterBusinessArgs {
    /// Display name of the business
    pub name: String,
}

impl RegisterBusinessArgs {
    /// Combine the positional name with the global principal flag.
    fn into_params(self, principal: String) -> CreateBusiness {
        CreateBusiness {
            principal,
            name: self.name,
        }
    }
}

#[derive(Subcommand)]
pub enum BusinessCommands {
    /// Register a new business for the acting principal
    #[command(alias = "r")]
    Register(RegisterBusinessArgs),
    /// Show the business registered for the acting principal
    #[command(alias = "s")]
    Show,
}

/// Create a new emergency plan
///
/// Either give the plan inline with --business-id and --name, or import a
/// generated plan document with --from-file. Generated documents may use
/// "action" as the field name for action descriptions.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// ID of the business the plan belongs to
    #[arg(long, required_unless_present = "from_file")]
    pub business_id: Option<u64>,
    /// Name of the plan
    #[arg(long, required_unless_present = "from_file")]
    pub name: Option<String>,
    /// Kind of crisis the plan addresses (flood, fire, ...)
    #[arg(long)]
    pub crisis_type: Option<String>,
    /// Estimated total cost of carrying out the plan
    #[arg(long)]
    pub estimated_cost: Option<f64>,
    /// Path to a JSON plan document to import
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

/// List all plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Show archived plans as well
    #[arg(long, help = "Include archived plans in the listing")]
    pub archived: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            archived: val.archived,
        }
    }
}

/// Show details of a specific plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    #[arg(help = "Unique identifier of the plan to show details for")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a plan's lifecycle status
#[derive(Args)]
pub struct SetPlanStatusArgs {
    /// ID of the plan to update
    pub id: u64,
    /// New status for the plan
    pub status: PlanStatusArg,
}

impl From<SetPlanStatusArgs> for SetPlanStatus {
    fn from(val: SetPlanStatusArgs) -> Self {
        SetPlanStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

/// Archive a plan
///
/// Move a plan to the archived state, hiding it from the default plan list.
/// Archived plans are preserved; plans are never hard-deleted.
#[derive(Args)]
pub struct ArchivePlanArgs {
    /// ID of the plan to archive
    #[arg(help = "Unique identifier of the plan to move to archived state")]
    pub id: u64,
}

impl From<ArchivePlanArgs> for Id {
    fn from(val: ArchivePlanArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan, inline or from a generated document
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Change a plan's lifecycle status
    Status(SetPlanStatusArgs),
    /// Archive a plan
    #[command(alias = "ar")]
    Archive(ArchivePlanArgs),
}

/// Add a new response action to a plan phase
#[derive(Args)]
pub struct AddActionArgs {
    /// ID of the plan to add the action to
    pub plan_id: u64,
    /// Phase the action belongs to
    pub phase: PhaseArg,
    /// What needs to be done
    pub description: String,
    /// Urgency of the action
    #[arg(short, long)]
    pub priority: Option<PriorityArg>,
    /// Estimated cost of carrying out the action
    #[arg(long)]
    pub estimated_cost: Option<f64>,
    /// Free-text time estimate (e.g. "2 hours")
    #[arg(long)]
    pub time_required: Option<String>,
    /// Person or role responsible for the action
    #[arg(long)]
    pub responsible_party: Option<String>,
}

impl From<AddActionArgs> for AddAction {
    fn from(val: AddActionArgs) -> Self {
        AddAction {
            plan_id: val.plan_id,
            phase: val.phase.to_string(),
            description: val.description,
            priority: val.priority.map(|p| p.to_string()),
            estimated_cost: val.estimated_cost,
            time_required: val.time_required,
            responsible_party: val.responsible_party,
        }
    }
}

/// Address an action by plan, phase, and position
#[derive(Args)]
pub struct ActionAddressArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Phase the action belongs to
    pub phase: PhaseArg,
    /// 0-based index of the action within the phase
    pub index: u32,
}

impl ActionAddressArgs {
    fn into_toggle(self, completed: bool) -> ToggleAction {
        ToggleAction {
            plan_id: self.plan_id,
            phase: self.phase.to_string(),
            index: self.index,
            completed,
        }
    }
}

impl From<ActionAddressArgs> for RemoveAction {
    fn from(val: ActionAddressArgs) -> Self {
        RemoveAction {
            plan_id: val.plan_id,
            phase: val.phase.to_string(),
            index: val.index,
        }
    }
}

#[derive(Subcommand)]
pub enum ActionCommands {
    /// Add a new action to a plan phase
    #[command(alias = "a")]
    Add(AddActionArgs),
    /// Mark an action as completed
    #[command(alias = "done")]
    Complete(ActionAddressArgs),
    /// Mark a completed action as outstanding again
    #[command(alias = "undo")]
    Reopen(ActionAddressArgs),
    /// Remove an action from a plan
    #[command(alias = "rm")]
    Remove(ActionAddressArgs),
}

/// Open a new crisis event
#[derive(Args)]
pub struct OpenCrisisArgs {
    /// ID of the affected business
    pub business_id: u64,
    /// Kind of crisis (flood, fire, ...)
    pub crisis_type: String,
    /// Free-text description of the situation
    #[arg(short, long)]
    pub description: Option<String>,
    /// ID of the emergency plan activated for this crisis
    #[arg(long)]
    pub plan_id: Option<u64>,
}

impl From<OpenCrisisArgs> for OpenCrisis {
    fn from(val: OpenCrisisArgs) -> Self {
        OpenCrisis {
            business_id: val.business_id,
            crisis_type: val.crisis_type,
            description: val.description,
            emergency_plan_id: val.plan_id,
        }
    }
}

/// Show details of a specific crisis event
#[derive(Args)]
pub struct ShowCrisisArgs {
    /// ID of the crisis event to display
    pub id: u64,
}

impl From<ShowCrisisArgs> for Id {
    fn from(val: ShowCrisisArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum CrisisCommands {
    /// Open a new crisis event
    #[command(alias = "o")]
    Open(OpenCrisisArgs),
    /// Show details of a specific crisis event
    #[command(alias = "s")]
    Show(ShowCrisisArgs),
}

/// Show a recovery record
#[derive(Args)]
pub struct ShowRecoveryArgs {
    /// ID of the recovery record to display
    pub id: u64,
}

impl From<ShowRecoveryArgs> for Id {
    fn from(val: ShowRecoveryArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a recovery record directly
///
/// Stage, revenue, and milestones entered here are kept; a capacity figure
/// holds only until the next action toggle on the linked plan recomputes it.
#[derive(Args)]
pub struct UpdateRecoveryArgs {
    /// ID of the recovery record to update
    pub id: u64,
    /// New recovery stage
    #[arg(short, long)]
    pub stage: Option<StageArg>,
    /// Manually assessed operating capacity (0-100)
    #[arg(long)]
    pub capacity: Option<u8>,
    /// Revenue recovered relative to the pre-crisis baseline (0-100)
    #[arg(long)]
    pub revenue: Option<u8>,
    /// Milestone to append to the completed-milestone history
    #[arg(short, long)]
    pub milestone: Option<String>,
}

impl From<UpdateRecoveryArgs> for UpdateRecovery {
    fn from(val: UpdateRecoveryArgs) -> Self {
        UpdateRecovery {
            id: val.id,
            stage: val.stage.map(|s| s.to_string()),
            operational_capacity_percent: val.capacity,
            revenue_recovery_percent: val.revenue,
            milestone: val.milestone,
        }
    }
}

#[derive(Subcommand)]
pub enum RecoveryCommands {
    /// Show a recovery record
    #[command(alias = "s")]
    Show(ShowRecoveryArgs),
    /// Update a recovery record directly
    #[command(alias = "u")]
    Update(UpdateRecoveryArgs),
}

/// Show derived metrics for a plan
#[derive(Args)]
pub struct MetricsArgs {
    /// ID of the plan to derive metrics for
    pub plan_id: u64,
}

impl From<MetricsArgs> for Id {
    fn from(val: MetricsArgs) -> Self {
        Id { id: val.plan_id }
    }
}

/// Command-line argument representation of plan phases
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PhaseArg {
    /// Preparation before the crisis
    Pre,
    /// Active response during the crisis
    During,
    /// Recovery after the crisis
    Post,
}

impl std::fmt::Display for PhaseArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseArg::Pre => write!(f, "pre"),
            PhaseArg::During => write!(f, "during"),
            PhaseArg::Post => write!(f, "post"),
        }
    }
}

/// Command-line argument representation of action priorities
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Must happen before anything else
    Critical,
    /// Important, schedule early
    High,
    /// Standard priority
    Medium,
    /// Can wait
    Low,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityArg::Critical => write!(f, "critical"),
            PriorityArg::High => write!(f, "high"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::Low => write!(f, "low"),
        }
    }
}

/// Command-line argument representation of plan statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PlanStatusArg {
    /// Freshly generated, not yet reviewed
    Draft,
    /// Reviewed and ready
    Active,
    /// Currently driving a live crisis response
    InUse,
    /// Retired and hidden from normal views
    Archived,
}

impl std::fmt::Display for PlanStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatusArg::Draft => write!(f, "draft"),
            PlanStatusArg::Active => write!(f, "active"),
            PlanStatusArg::InUse => write!(f, "in_use"),
            PlanStatusArg::Archived => write!(f, "archived"),
        }
    }
}

/// Command-line argument representation of recovery stages
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    /// Assessing the damage
    Assessment,
    /// Clearing debris and stabilizing the site
    Cleanup,
    /// Repairing and rebuilding
    Rebuilding,
    /// Preparing to reopen
    Reopening,
    /// Open again, stabilizing operations
    Stabilization,
    /// Recovery finished
    Complete,
}

impl std::fmt::Display for StageArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageArg::Assessment => write!(f, "assessment"),
            StageArg::Cleanup => write!(f, "cleanup"),
            StageArg::Rebuilding => write!(f, "rebuilding"),
            StageArg::Reopening => write!(f, "reopening"),
            StageArg::Stabilization => write!(f, "stabilization"),
            StageArg::Complete => write!(f, "complete"),
        }
    }
}

/// CLI command handler that owns the tracker and renderer
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    principal: Option<String>,
}

impl Cli {
    /// Create a new CLI handler
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, principal: Option<String>) -> Self {
        Self {
            tracker,
            renderer,
            principal,
        }
    }

    fn principal(&self) -> Result<&str> {
        self.principal
            .as_deref()
            .context("No principal given; pass --principal or set AEGIS_PRINCIPAL")
    }

    /// Handle business subcommands
    pub async fn handle_business_command(&self, command: BusinessCommands) -> Result<()> {
        match command {
            BusinessCommands::Register(args) => {
                let params = args.into_params(self.principal()?.to_string());
                let business = self.tracker.create_business(&params).await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(business)))
            }
            BusinessCommands::Show => {
                let business = self.tracker.get_business(self.principal()?).await?;
                self.renderer.render(&format!("{business}"))
            }
        }
    }

    /// Handle plan subcommands
    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let params = args.into();
                match self.tracker.get_plan(&params).await? {
                    Some(plan) => self.renderer.render(&format!("{plan}")),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!("Plan {} not found", params.id))
                    )),
                }
            }
            PlanCommands::Status(args) => {
                let status = args.status;
                let plan = self
                    .tracker
                    .set_plan_status(&args.into(), self.principal()?)
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    UpdateResult::with_changes(plan, vec![format!("Status set to {status}")])
                ))
            }
            PlanCommands::Archive(args) => {
                let plan = self
                    .tracker
                    .archive_plan(&args.into(), self.principal()?)
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Plan {} archived", plan.id))
                ))
            }
        }
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let params = match args.from_file {
            Some(path) => {
                let payload = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read plan file {}", path.display()))?;
                serde_json::from_str::<CreatePlan>(&payload)
                    .with_context(|| format!("Failed to parse plan file {}", path.display()))?
            }
            None => {
                // clap enforces these when --from-file is absent
                let (Some(business_id), Some(name)) = (args.business_id, args.name) else {
                    bail!("--business-id and --name are required without --from-file");
                };
                CreatePlan {
                    business_id,
                    name,
                    crisis_type: args.crisis_type,
                    estimated_cost: args.estimated_cost,
                    pre_crisis_actions: Vec::new(),
                    during_crisis_actions: Vec::new(),
                    post_crisis_actions: Vec::new(),
                }
            }
        };

        let plan = self.tracker.create_plan(&params, self.principal()?).await?;
        self.renderer.render(&format!("{}", CreateResult::new(plan)))
    }

    /// List plans, the default command when none is given
    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self.tracker.list_plans(params).await?;
        self.renderer.render(&format!("{summaries}"))
    }

    /// Handle action subcommands
    ///
    /// Toggles and removals report a stale-metrics warning instead of
    /// failing outright when the ledger write committed but the recovery
    /// sync did not.
    pub async fn handle_action_command(&self, command: ActionCommands) -> Result<()> {
        match command {
            ActionCommands::Add(args) => {
                let action = self
                    .tracker
                    .add_action(&args.into(), self.principal()?)
                    .await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(action)))
            }
            ActionCommands::Complete(args) => self.toggle_action(args, true).await,
            ActionCommands::Reopen(args) => self.toggle_action(args, false).await,
            ActionCommands::Remove(args) => {
                match self
                    .tracker
                    .remove_action(&args.into(), self.principal()?)
                    .await
                {
                    Ok(()) => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::success("Action removed".to_string())
                    )),
                    Err(err @ TrackerError::SyncFailed { .. }) => self
                        .renderer
                        .render(&format!("{}", OperationStatus::failure(err.to_string()))),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }

    async fn toggle_action(&self, args: ActionAddressArgs, completed: bool) -> Result<()> {
        let params = args.into_toggle(completed);
        match self.tracker.toggle_action(&params, self.principal()?).await {
            Ok(plan) => {
                let change = if completed {
                    "Action marked completed"
                } else {
                    "Action reopened"
                };
                self.renderer.render(&format!(
                    "{}",
                    UpdateResult::with_changes(plan, vec![change.to_string()])
                ))
            }
            Err(err @ TrackerError::SyncFailed { .. }) => self
                .renderer
                .render(&format!("{}", OperationStatus::failure(err.to_string()))),
            Err(err) => Err(err.into()),
        }
    }

    /// Handle crisis subcommands
    pub async fn handle_crisis_command(&self, command: CrisisCommands) -> Result<()> {
        match command {
            CrisisCommands::Open(args) => {
                let crisis = self
                    .tracker
                    .open_crisis(&args.into(), self.principal()?)
                    .await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(crisis)))
            }
            CrisisCommands::Show(args) => {
                let params = args.into();
                match self.tracker.get_crisis(&params).await? {
                    Some(crisis) => self.renderer.render(&format!("{crisis}")),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!("Crisis {} not found", params.id))
                    )),
                }
            }
        }
    }

    /// Handle recovery subcommands
    pub async fn handle_recovery_command(&self, command: RecoveryCommands) -> Result<()> {
        match command {
            RecoveryCommands::Show(args) => {
                let params = args.into();
                match self.tracker.get_recovery(&params).await? {
                    Some(recovery) => self.renderer.render(&format!("{recovery}")),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!(
                            "Recovery record {} not found",
                            params.id
                        ))
                    )),
                }
            }
            RecoveryCommands::Update(args) => {
                let mut changes = Vec::new();
                if let Some(stage) = args.stage {
                    changes.push(format!("Stage set to {stage}"));
                }
                if let Some(capacity) = args.capacity {
                    changes.push(format!("Operational capacity set to {capacity}%"));
                }
                if let Some(revenue) = args.revenue {
                    changes.push(format!("Revenue recovery set to {revenue}%"));
                }
                if let Some(milestone) = &args.milestone {
                    changes.push(format!("Milestone recorded: {milestone}"));
                }

                let recovery = self
                    .tracker
                    .update_recovery(&args.into(), self.principal()?)
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    UpdateResult::with_changes(recovery, changes)
                ))
            }
        }
    }

    /// Show derived metrics for a plan
    pub async fn show_metrics(&self, args: MetricsArgs) -> Result<()> {
        let metrics = self.tracker.compute_metrics(&args.into()).await?;
        self.renderer.render(&format!("{metrics}"))
    }
}
