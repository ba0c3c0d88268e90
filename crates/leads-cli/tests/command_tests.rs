// Rust guideline compliant 2026-10-14

//! Integration tests for CLI commands.

use leads_app::{AppError, ErrorCode, RepoContext};
use leads_cli::commands::{
    self, call::CallAction, create::CreateArgs, list::ListArgs, update::UpdateArgs,
    CommandContext,
};
use leads_cli::create_formatter;
use leads_core::{Lead, LeadResult, LeadRole, LeadSource, LeadStatus, OutputFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn context(root: &Path) -> CommandContext {
    CommandContext {
        repo: Some(root.to_path_buf()),
        formatter: create_formatter(OutputFormat::Plain, false, true),
        json: false,
        use_color: false,
    }
}

/// Initializes a repository and returns its context.
fn setup() -> (TempDir, CommandContext) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(temp_dir.path());
    commands::init::execute(&ctx).expect("init");
    (temp_dir, ctx)
}

fn create(ctx: &CommandContext, phone: &str) -> Lead {
    commands::create::execute(
        CreateArgs {
            phone: phone.to_string(),
            name: Some("Test Lead".to_string()),
            ..CreateArgs::default()
        },
        ctx,
    )
    .expect("create");
    let repo = ctx.repo().expect("repo");
    repo.open_leads()
        .expect("open leads")
        .find_by_phone(phone)
        .expect("find")
        .expect("lead exists")
}

fn load(ctx: &CommandContext, id: &str) -> Lead {
    ctx.repo()
        .expect("repo")
        .open_leads()
        .expect("open leads")
        .load_by_id(id)
        .expect("load lead")
}

fn app_code(err: &anyhow::Error) -> ErrorCode {
    if let Some(app) = err.downcast_ref::<AppError>() {
        return app.code();
    }
    let core = err
        .downcast_ref::<leads_core::Error>()
        .expect("application or core error");
    match core {
        leads_core::Error::NotFound(_) => ErrorCode::NotFound,
        leads_core::Error::DuplicatePhone(_) => ErrorCode::DuplicatePhone,
        leads_core::Error::InvalidTransition(_) => ErrorCode::InvalidTransition,
        leads_core::Error::InvalidLead(_) => ErrorCode::ValidationError,
        other => panic!("unexpected core error: {other}"),
    }
}

#[test]
fn test_init_creates_correct_structure() {
    let (temp_dir, _ctx) = setup();
    let leads_dir = temp_dir.path().join(".leads");

    assert!(leads_dir.join("leads.jsonl").exists());
    assert!(leads_dir.join("calls.jsonl").exists());
    let config = fs::read_to_string(leads_dir.join("config.toml")).expect("read config");
    assert!(config.contains("max_call_attempts"));
}

#[test]
fn test_init_is_idempotent() {
    let (temp_dir, ctx) = setup();
    create(&ctx, "+92-300-1234567");

    commands::init::execute(&ctx).expect("second init");

    let repo = RepoContext::discover(Some(temp_dir.path())).expect("discover");
    assert_eq!(repo.open_leads().expect("leads").load_all().expect("load").len(), 1);
}

#[test]
fn test_commands_require_initialized_repo() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = context(temp_dir.path());

    let err = commands::stats::execute(&ctx).expect_err("missing repo");
    assert_eq!(app_code(&err), ErrorCode::RepoNotInitialized);
}

#[test]
fn test_create_adds_pending_lead() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    assert!(lead.id.starts_with("lead-"));
    assert_eq!(lead.status, LeadStatus::Pending);
    assert_eq!(lead.source, LeadSource::New);
    assert_eq!(lead.call_attempts, 0);
    assert_eq!(lead.name.as_deref(), Some("Test Lead"));
}

#[test]
fn test_create_rejects_duplicate_phone() {
    let (_temp_dir, ctx) = setup();
    create(&ctx, "+92-300-1234567");

    let err = commands::create::execute(
        CreateArgs {
            phone: "+92 300 1234567".to_string(),
            ..CreateArgs::default()
        },
        &ctx,
    )
    .expect_err("duplicate phone");
    assert_eq!(app_code(&err), ErrorCode::DuplicatePhone);
}

#[test]
fn test_create_rejects_unknown_source() {
    let (_temp_dir, ctx) = setup();
    let err = commands::create::execute(
        CreateArgs {
            phone: "+92-300-1234567".to_string(),
            source: Some("referral".to_string()),
            ..CreateArgs::default()
        },
        &ctx,
    )
    .expect_err("unknown source");
    assert_eq!(app_code(&err), ErrorCode::InvalidInput);
}

#[test]
fn test_update_status_follows_transition_table() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    let err = commands::update::execute(
        UpdateArgs {
            id: lead.id.clone(),
            status: Some("qualified".to_string()),
            ..UpdateArgs::default()
        },
        &ctx,
    )
    .expect_err("pending -> qualified");
    assert_eq!(app_code(&err), ErrorCode::InvalidTransition);
    assert_eq!(load(&ctx, &lead.id).status, LeadStatus::Pending);

    commands::update::execute(
        UpdateArgs {
            id: lead.id.clone(),
            status: Some("calling".to_string()),
            area: Some("Bahria Town".to_string()),
            ..UpdateArgs::default()
        },
        &ctx,
    )
    .expect("pending -> calling");
    let updated = load(&ctx, &lead.id);
    assert_eq!(updated.status, LeadStatus::Calling);
    assert_eq!(updated.area.as_deref(), Some("Bahria Town"));
}

#[test]
fn test_update_without_fields_is_rejected() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    let err = commands::update::execute(
        UpdateArgs {
            id: lead.id,
            ..UpdateArgs::default()
        },
        &ctx,
    )
    .expect_err("empty update");
    assert_eq!(app_code(&err), ErrorCode::InvalidInput);
}

#[test]
fn test_update_accepts_partial_id() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");
    let partial = lead.id.trim_start_matches("lead-")[..4].to_string();

    commands::update::execute(
        UpdateArgs {
            id: partial,
            budget: Some("1 Crore PKR".to_string()),
            ..UpdateArgs::default()
        },
        &ctx,
    )
    .expect("update by partial id");
    assert_eq!(load(&ctx, &lead.id).budget.as_deref(), Some("1 Crore PKR"));
}

#[test]
fn test_call_lifecycle_to_qualified() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx).expect("start");
    let calling = load(&ctx, &lead.id);
    assert_eq!(calling.status, LeadStatus::Calling);
    assert_eq!(calling.call_attempts, 1);
    assert!(calling.last_call_at.is_some());

    commands::call::execute(CallAction::Answered { id: lead.id.clone() }, &ctx)
        .expect("answered");
    assert_eq!(load(&ctx, &lead.id).status, LeadStatus::Answered);

    commands::call::execute(
        CallAction::Qualify {
            id: lead.id.clone(),
            role: "buyer".to_string(),
            result: "hot".to_string(),
        },
        &ctx,
    )
    .expect("qualify");
    let qualified = load(&ctx, &lead.id);
    assert_eq!(qualified.status, LeadStatus::Qualified);
    assert_eq!(qualified.role, Some(LeadRole::Buyer));
    assert_eq!(qualified.result, Some(LeadResult::Hot));

    let err = commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx)
        .expect_err("qualified is terminal");
    assert_eq!(app_code(&err), ErrorCode::InvalidTransition);
}

#[test]
fn test_no_answer_retries_then_drops() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx).expect("start 1");
    commands::call::execute(CallAction::NoAnswer { id: lead.id.clone() }, &ctx)
        .expect("no answer 1");
    assert_eq!(load(&ctx, &lead.id).status, LeadStatus::Pending);

    commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx).expect("start 2");
    commands::call::execute(CallAction::NoAnswer { id: lead.id.clone() }, &ctx)
        .expect("no answer 2");
    let dropped = load(&ctx, &lead.id);
    assert_eq!(dropped.status, LeadStatus::Dropped);
    assert_eq!(dropped.call_attempts, 2);
}

#[test]
fn test_callback_for_unknown_phone_is_acknowledged() {
    let (_temp_dir, ctx) = setup();
    commands::call::execute(
        CallAction::Callback {
            call_status: "completed".to_string(),
            to: "+92-399-0000000".to_string(),
            call_sid: None,
        },
        &ctx,
    )
    .expect("unknown phone is not an error");
}

#[test]
fn test_callback_moves_calling_lead() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");
    commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx).expect("start");

    commands::call::execute(
        CallAction::Callback {
            call_status: "busy".to_string(),
            to: "+92 300 1234567".to_string(),
            call_sid: Some("CA123".to_string()),
        },
        &ctx,
    )
    .expect("callback");
    assert_eq!(load(&ctx, &lead.id).status, LeadStatus::Pending);
}

#[test]
fn test_delete_removes_lead_and_attempts() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");
    commands::call::execute(CallAction::Start { id: lead.id.clone() }, &ctx).expect("start");

    commands::delete::execute(lead.id.clone(), &ctx).expect("delete");

    let repo = ctx.repo().expect("repo");
    assert!(repo.open_leads().expect("leads").load_all().expect("load").is_empty());
    assert!(repo
        .open_calls()
        .expect("calls")
        .for_lead(&lead.id)
        .expect("attempts")
        .is_empty());
}

#[test]
fn test_list_rejects_zero_limit() {
    let (_temp_dir, ctx) = setup();
    let err = commands::list::execute(
        ListArgs {
            limit: Some(0),
            ..ListArgs::default()
        },
        &ctx,
    )
    .expect_err("zero limit");
    assert_eq!(app_code(&err), ErrorCode::InvalidInput);
}

#[test]
fn test_seed_then_clear() {
    let (_temp_dir, ctx) = setup();

    commands::seed::execute(false, &ctx).expect("seed");
    let repo = ctx.repo().expect("repo");
    let leads = repo.open_leads().expect("leads").load_all().expect("load");
    assert_eq!(leads.len(), 5);
    assert!(leads.iter().all(|lead| lead.status == LeadStatus::Pending));

    let err = commands::seed::execute(false, &ctx).expect_err("seed twice");
    assert_eq!(app_code(&err), ErrorCode::InvalidInput);

    commands::seed::execute(true, &ctx).expect("clear");
    assert!(repo.open_leads().expect("leads").load_all().expect("load").is_empty());
}

#[test]
fn test_read_only_commands_succeed() {
    let (_temp_dir, ctx) = setup();
    let lead = create(&ctx, "+92-300-1234567");

    commands::show::execute(lead.id, &ctx).expect("show");
    commands::list::execute(ListArgs::default(), &ctx).expect("list");
    commands::stats::execute(&ctx).expect("stats");
    commands::transitions::execute(None, &ctx).expect("transitions");
    commands::transitions::execute(Some("calling".to_string()), &ctx)
        .expect("transitions for one status");
}
