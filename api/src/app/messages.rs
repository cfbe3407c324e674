//! Command and query dispatch
//!
//! `Messages` is built once at startup with one handler per command variant,
//! already wrapped in its decorators. Dispatch is a match on the variant.

use std::sync::Arc;

use super::commands::{
    CommandHandler, DisenrollCommand, DisenrollCommandHandler, EditPersonalInfoCommand,
    EditPersonalInfoCommandHandler, EnrollCommand, EnrollCommandHandler, RegisterCommand,
    RegisterCommandHandler, TransferCommand, TransferCommandHandler, UnregisterCommand,
    UnregisterCommandHandler,
};
use super::decorators::{AuditLoggingDecorator, DatabaseRetryDecorator, RetryPolicy};
use super::queries::{GetListQuery, GetListQueryHandler, QueryHandler, StudentDto};
use crate::domain::ports::{StudentListReader, UnitOfWorkFactory};
use crate::error::DomainError;

/// Every mutating request the API accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register(RegisterCommand),
    Unregister(UnregisterCommand),
    Enroll(EnrollCommand),
    Transfer(TransferCommand),
    Disenroll(DisenrollCommand),
    EditPersonalInfo(EditPersonalInfoCommand),
}

macro_rules! impl_from_command {
    ($($variant:ident => $command:ty),* $(,)?) => {
        $(
            impl From<$command> for Command {
                fn from(command: $command) -> Self {
                    Command::$variant(command)
                }
            }
        )*
    };
}

impl_from_command! {
    Register => RegisterCommand,
    Unregister => UnregisterCommand,
    Enroll => EnrollCommand,
    Transfer => TransferCommand,
    Disenroll => DisenrollCommand,
    EditPersonalInfo => EditPersonalInfoCommand,
}

/// Handler registry resolved at startup
pub struct Messages {
    register: Arc<dyn CommandHandler<RegisterCommand>>,
    unregister: Arc<dyn CommandHandler<UnregisterCommand>>,
    enroll: Arc<dyn CommandHandler<EnrollCommand>>,
    transfer: Arc<dyn CommandHandler<TransferCommand>>,
    disenroll: Arc<dyn CommandHandler<DisenrollCommand>>,
    edit_personal_info: Arc<dyn CommandHandler<EditPersonalInfoCommand>>,
    get_list: Arc<dyn QueryHandler<GetListQuery, Output = Vec<StudentDto>>>,
}

impl Messages {
    /// Wire every handler with its decorators:
    /// - Register: audit log
    /// - EditPersonalInfo: audit log around database retry
    pub fn new<F, R>(sessions: Arc<F>, reader: Arc<R>, retry: RetryPolicy) -> Self
    where
        F: UnitOfWorkFactory + 'static,
        R: StudentListReader + 'static,
    {
        Self {
            register: Arc::new(AuditLoggingDecorator::new(RegisterCommandHandler::new(
                sessions.clone(),
            ))),
            unregister: Arc::new(UnregisterCommandHandler::new(sessions.clone())),
            enroll: Arc::new(EnrollCommandHandler::new(sessions.clone())),
            transfer: Arc::new(TransferCommandHandler::new(sessions.clone())),
            disenroll: Arc::new(DisenrollCommandHandler::new(sessions.clone())),
            edit_personal_info: Arc::new(AuditLoggingDecorator::new(
                DatabaseRetryDecorator::new(EditPersonalInfoCommandHandler::new(sessions), retry),
            )),
            get_list: Arc::new(GetListQueryHandler::new(reader)),
        }
    }

    pub async fn dispatch(&self, command: impl Into<Command>) -> Result<(), DomainError> {
        match command.into() {
            Command::Register(c) => self.register.handle(&c).await,
            Command::Unregister(c) => self.unregister.handle(&c).await,
            Command::Enroll(c) => self.enroll.handle(&c).await,
            Command::Transfer(c) => self.transfer.handle(&c).await,
            Command::Disenroll(c) => self.disenroll.handle(&c).await,
            Command::EditPersonalInfo(c) => self.edit_personal_info.handle(&c).await,
        }
    }

    pub async fn query(&self, query: &GetListQuery) -> Result<Vec<StudentDto>, DomainError> {
        self.get_list.handle(query).await
    }
}
