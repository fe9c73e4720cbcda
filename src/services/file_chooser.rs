//! File chooser broker.
//!
//! Tracks the single outstanding request from the page's upload control.
//! At most one request is pending; a new request supersedes the old one,
//! which must then be answered with an empty result.

use crate::types::errors::FileChooserError;
use crate::types::file_chooser::{
    ChooserId, ChooserMode, ChooserOutcome, ChooserTicket, FileChooserParams,
};
use crate::types::settings::UploadSettings;

/// Result of [`FileChooserTrait::open`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedChooser {
    pub ticket: ChooserTicket,
    /// Request that was pending before this one, to be answered as cancelled.
    pub superseded: Option<ChooserTicket>,
}

/// A request that has left the pending slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedChooser {
    pub ticket: ChooserTicket,
    pub outcome: ChooserOutcome,
}

/// Trait defining the file chooser broker interface.
pub trait FileChooserTrait {
    fn open(
        &mut self,
        input_token: &str,
        params: FileChooserParams,
    ) -> Result<OpenedChooser, FileChooserError>;
    fn resolve(
        &mut self,
        id: &ChooserId,
        outcome: ChooserOutcome,
    ) -> Result<CompletedChooser, FileChooserError>;
    fn abandon(&mut self, id: &ChooserId) -> Result<CompletedChooser, FileChooserError>;
    fn cancel_pending(&mut self) -> Option<ChooserTicket>;
    fn pending(&self) -> Option<&ChooserTicket>;
    fn is_pending(&self) -> bool;
}

pub struct FileChooserBroker {
    settings: UploadSettings,
    pending: Option<ChooserTicket>,
}

impl FileChooserBroker {
    pub fn new(settings: UploadSettings) -> Self {
        Self {
            settings,
            pending: None,
        }
    }

    fn take_matching(&mut self, id: &ChooserId) -> Result<ChooserTicket, FileChooserError> {
        let is_current = match &self.pending {
            None => return Err(FileChooserError::NoPendingRequest),
            Some(ticket) => ticket.id == *id,
        };
        if !is_current {
            return Err(FileChooserError::StaleRequest(id.to_string()));
        }
        self.pending.take().ok_or(FileChooserError::NoPendingRequest)
    }
}

impl FileChooserTrait for FileChooserBroker {
    fn open(
        &mut self,
        input_token: &str,
        mut params: FileChooserParams,
    ) -> Result<OpenedChooser, FileChooserError> {
        if !self.settings.enabled {
            return Err(FileChooserError::Disabled);
        }
        if self.settings.max_files <= 1 {
            params.mode = ChooserMode::Open;
        }

        let superseded = self.pending.take();
        if let Some(old) = &superseded {
            tracing::debug!(id = %old.id, "superseding pending file chooser");
        }

        let ticket = ChooserTicket {
            id: ChooserId::new(),
            input_token: input_token.to_string(),
            params,
        };
        self.pending = Some(ticket.clone());
        tracing::debug!(id = %ticket.id, token = input_token, "file chooser pending");

        Ok(OpenedChooser { ticket, superseded })
    }

    fn resolve(
        &mut self,
        id: &ChooserId,
        outcome: ChooserOutcome,
    ) -> Result<CompletedChooser, FileChooserError> {
        let ticket = self.take_matching(id)?;
        let outcome = match outcome {
            ChooserOutcome::Selected(paths) if paths.is_empty() => ChooserOutcome::Cancelled,
            other => other,
        };
        let cancelled = outcome == ChooserOutcome::Cancelled;
        tracing::debug!(id = %ticket.id, cancelled, "file chooser resolved");
        Ok(CompletedChooser { ticket, outcome })
    }

    fn abandon(&mut self, id: &ChooserId) -> Result<CompletedChooser, FileChooserError> {
        let ticket = self.take_matching(id)?;
        tracing::warn!(id = %ticket.id, "file chooser could not be shown");
        Ok(CompletedChooser {
            ticket,
            outcome: ChooserOutcome::Cancelled,
        })
    }

    fn cancel_pending(&mut self) -> Option<ChooserTicket> {
        self.pending.take()
    }

    fn pending(&self) -> Option<&ChooserTicket> {
        self.pending.as_ref()
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
