//! Status of the single collaborator call the session allows at a time.

use std::fmt;

use crate::error::WorkflowError;

/// Where the workflow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Submitting,
    Settled,
    Failed,
}

impl WorkflowStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Settled => "settled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The collaborator call a submission stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Analyze,
    Export,
    Encrypt,
    Decrypt,
    ImageEncrypt,
    ImageDecrypt,
    ImageAnalyze,
}

impl Operation {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Analyze => "analysis",
            Self::Export => "export",
            Self::Encrypt => "encryption",
            Self::Decrypt => "decryption",
            Self::ImageEncrypt => "image encryption",
            Self::ImageDecrypt => "image decryption",
            Self::ImageAnalyze => "image analysis",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one submission. Completions carry it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticket #{}", self.0)
    }
}

/// Single-flight state machine.
///
/// ```text
/// Idle | Settled | Failed --begin--> Submitting --settle_success--> Settled
///                                    Submitting --settle_failure--> Failed
/// any --reset--> Idle
/// ```
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    status: WorkflowStatus,
    in_flight: Option<(Ticket, Operation)>,
    last_operation: Option<Operation>,
    error: Option<String>,
    next_ticket: u64,
}

impl Workflow {
    #[must_use]
    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Message of the last failed call, verbatim.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight.map(|(_, operation)| operation)
    }

    /// The operation that most recently started, settled or not.
    #[must_use]
    pub fn last_operation(&self) -> Option<Operation> {
        self.last_operation
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status == WorkflowStatus::Submitting
    }

    /// Starts a submission of `input`.
    ///
    /// `None` means nothing is selected to send. Refused while another call is
    /// in flight or without input; a refusal leaves state unchanged.
    pub fn begin<T>(
        &mut self,
        operation: Operation,
        input: Option<T>,
    ) -> Result<(Ticket, T), WorkflowError> {
        if let Some((_, current)) = self.in_flight {
            return Err(WorkflowError::AlreadyInFlight { operation: current });
        }
        let Some(input) = input else {
            return Err(WorkflowError::NothingSelected);
        };

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.in_flight = Some((ticket, operation));
        self.last_operation = Some(operation);
        self.status = WorkflowStatus::Submitting;
        self.error = None;

        tracing::debug!(%operation, %ticket, "Submission started");
        Ok((ticket, input))
    }

    /// Completes the in-flight submission successfully.
    pub fn settle_success(&mut self, ticket: Ticket) -> Result<Operation, WorkflowError> {
        let operation = self.take_in_flight(ticket)?;
        self.status = WorkflowStatus::Settled;
        self.error = None;

        tracing::debug!(%operation, %ticket, "Submission settled");
        Ok(operation)
    }

    /// Completes the in-flight submission with an error message.
    pub fn settle_failure(
        &mut self,
        ticket: Ticket,
        message: impl Into<String>,
    ) -> Result<Operation, WorkflowError> {
        let operation = self.take_in_flight(ticket)?;
        let message = message.into();
        tracing::warn!(%operation, %ticket, error = %message, "Submission failed");

        self.status = WorkflowStatus::Failed;
        self.error = Some(message);
        Ok(operation)
    }

    /// Back to `Idle`. Any in-flight completion becomes stale.
    pub fn reset(&mut self) {
        self.status = WorkflowStatus::Idle;
        self.in_flight = None;
        self.error = None;
    }

    fn take_in_flight(&mut self, ticket: Ticket) -> Result<Operation, WorkflowError> {
        match self.in_flight {
            Some((current, operation)) if current == ticket => {
                self.in_flight = None;
                Ok(operation)
            }
            _ => Err(WorkflowError::StaleTicket { ticket }),
        }
    }
}
