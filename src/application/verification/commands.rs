use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::bus::{BusError, Command, CommandHandler};
use crate::context::DispatchContext;
use crate::domain::verification::{Verification, VerificationRepository, VerificationUuid};

// ============================================================================
// Verification Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationCommandType {
    Create,
    Approve,
    Decline,
}

impl VerificationCommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationCommandType::Create => "create.verification.command",
            VerificationCommandType::Approve => "approve.verification.command",
            VerificationCommandType::Decline => "decline.verification.command",
        }
    }
}

impl fmt::Display for VerificationCommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CreateVerification {
    pub uuid: String,
    pub description: String,
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct ApproveVerification {
    pub uuid: String,
}

#[derive(Debug, Clone)]
pub struct DeclineVerification {
    pub uuid: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub enum VerificationCommand {
    Create(CreateVerification),
    Approve(ApproveVerification),
    Decline(DeclineVerification),
}

impl Command for VerificationCommand {
    type Type = VerificationCommandType;

    fn command_type(&self) -> Self::Type {
        match self {
            VerificationCommand::Create(_) => VerificationCommandType::Create,
            VerificationCommand::Approve(_) => VerificationCommandType::Approve,
            VerificationCommand::Decline(_) => VerificationCommandType::Decline,
        }
    }
}

impl From<CreateVerification> for VerificationCommand {
    fn from(value: CreateVerification) -> Self {
        VerificationCommand::Create(value)
    }
}

impl From<ApproveVerification> for VerificationCommand {
    fn from(value: ApproveVerification) -> Self {
        VerificationCommand::Approve(value)
    }
}

impl From<DeclineVerification> for VerificationCommand {
    fn from(value: DeclineVerification) -> Self {
        VerificationCommand::Decline(value)
    }
}

fn unexpected(command: &VerificationCommand) -> BusError {
    BusError::UnexpectedMessage(command.command_type().to_string())
}

// ============================================================================
// Command Handlers
// ============================================================================
//
// Orchestrates: Command → Aggregate → Repository
//
// Persistence is only attempted once the in-memory transition succeeded.
//
// ============================================================================

pub struct CreateVerificationHandler {
    repository: Arc<dyn VerificationRepository>,
}

impl CreateVerificationHandler {
    pub fn new(repository: Arc<dyn VerificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<VerificationCommand> for CreateVerificationHandler {
    async fn handle(&self, ctx: &DispatchContext, command: VerificationCommand) -> Result<(), BusError> {
        let command = match command {
            VerificationCommand::Create(command) => command,
            other => return Err(unexpected(&other)),
        };

        let verification = Verification::create(&command.uuid, &command.kind, &command.description)?;
        let id = self.repository.add(ctx, &verification).await?;

        tracing::info!(
            uuid = %verification.uuid(),
            id = %id,
            kind = %verification.kind(),
            "✅ Verification created"
        );

        Ok(())
    }
}

pub struct ApproveVerificationHandler {
    repository: Arc<dyn VerificationRepository>,
}

impl ApproveVerificationHandler {
    pub fn new(repository: Arc<dyn VerificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<VerificationCommand> for ApproveVerificationHandler {
    async fn handle(&self, ctx: &DispatchContext, command: VerificationCommand) -> Result<(), BusError> {
        let command = match command {
            VerificationCommand::Approve(command) => command,
            other => return Err(unexpected(&other)),
        };

        let uuid = VerificationUuid::parse(&command.uuid)?;
        let mut verification = self.repository.get_by_uuid(ctx, uuid).await?;

        verification.approve()?;
        self.repository.update(ctx, &verification).await?;

        tracing::info!(uuid = %uuid, "✅ Verification approved");
        Ok(())
    }
}

pub struct DeclineVerificationHandler {
    repository: Arc<dyn VerificationRepository>,
}

impl DeclineVerificationHandler {
    pub fn new(repository: Arc<dyn VerificationRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<VerificationCommand> for DeclineVerificationHandler {
    async fn handle(&self, ctx: &DispatchContext, command: VerificationCommand) -> Result<(), BusError> {
        let command = match command {
            VerificationCommand::Decline(command) => command,
            other => return Err(unexpected(&other)),
        };

        let uuid = VerificationUuid::parse(&command.uuid)?;
        let mut verification = self.repository.get_by_uuid(ctx, uuid).await?;

        verification.decline(&command.reason)?;
        self.repository.update(ctx, &verification).await?;

        tracing::info!(uuid = %uuid, reason = %command.reason, "✅ Verification declined");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
