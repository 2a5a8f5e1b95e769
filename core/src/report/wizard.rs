use super::evidence::{
    EvidenceStore, IncomingFile, IntakeOutcome, MemoryEvidenceStore, UrlInputProvider,
};
use super::model::ReportDraft;
use super::notice::Notice;
use super::section::Section;
use super::submit::{ReportSubmitter, SubmissionReceipt};
use super::validate::{validate_section, SectionCheck};
use crate::config::WizardConfig;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WizardStage {
    Intro,
    Editing(Section),
    Submitting,
    Submitted(SubmissionReceipt),
}

/// One reporting session. Owns the draft exclusively; nothing outlives the session.
pub struct ReportWizard {
    stage: WizardStage,
    draft: ReportDraft,
    store: Box<dyn EvidenceStore>,
    config: WizardConfig,
    notice: Option<Notice>,
}

impl ReportWizard {
    pub fn new(config: WizardConfig) -> Self {
        Self::with_store(config, Box::new(MemoryEvidenceStore::new()))
    }

    pub fn with_store(config: WizardConfig, store: Box<dyn EvidenceStore>) -> Self {
        Self {
            stage: WizardStage::Intro,
            draft: ReportDraft::new(),
            store,
            config,
            notice: None,
        }
    }

    pub fn stage(&self) -> &WizardStage {
        &self.stage
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    /// Direct access to the draft. Only available while a section is being edited.
    pub fn draft_mut(&mut self) -> CoreResult<&mut ReportDraft> {
        self.editing_section("edit the draft")?;
        Ok(&mut self.draft)
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.draft_mut()?.set_field(key, value)
    }

    pub fn toggle_choice(&mut self, group: &str, value: &str) -> CoreResult<bool> {
        self.draft_mut()?.toggle_choice(group, value)
    }

    pub fn current_section(&self) -> Option<Section> {
        match self.stage {
            WizardStage::Editing(s) => Some(s),
            _ => None,
        }
    }

    /// The pending notice, if any. Taking it dismisses it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn pending_notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn check_current(&self) -> Option<SectionCheck> {
        self.current_section()
            .map(|s| validate_section(s, &self.draft))
    }

    pub fn start(&mut self) -> CoreResult<Section> {
        self.transition(WizardStage::Editing(Section::FIRST), "started")?;
        Ok(Section::FIRST)
    }

    /// Moves one section forward if the current one is complete. On failure the stage is
    /// unchanged and a notice listing every missing field is left pending.
    pub fn advance(&mut self) -> CoreResult<Section> {
        let current = self.editing_section("advance")?;
        let next = current.next().ok_or_else(|| {
            CoreError::WorkflowTransition("last section reached; submit instead".to_string())
        })?;
        let check = validate_section(current, &self.draft);
        if !check.passed() {
            tracing::warn!(
                section = current.number(),
                missing = ?check.missing,
                "forward navigation blocked"
            );
            self.notice = Some(Notice::missing_fields(&check));
        }
        check.into_result()?;
        self.transition(WizardStage::Editing(next), "section complete")?;
        Ok(next)
    }

    /// Moves one section back. Never validates.
    pub fn back(&mut self) -> CoreResult<Section> {
        let current = self.editing_section("go back")?;
        let prev = current.prev().ok_or_else(|| {
            CoreError::WorkflowTransition("already at the first section".to_string())
        })?;
        self.transition(WizardStage::Editing(prev), "back")?;
        Ok(prev)
    }

    /// Marks the submission as in flight and returns the draft to send.
    /// Calling again before `complete_submit` fails with `SubmissionInFlight`.
    pub fn begin_submit(&mut self) -> CoreResult<ReportDraft> {
        if self.stage == WizardStage::Submitting {
            return Err(CoreError::SubmissionInFlight);
        }
        let current = self.editing_section("submit")?;
        if current != Section::LAST {
            return Err(CoreError::WorkflowTransition(format!(
                "submit is only available from section {}",
                Section::LAST.number()
            )));
        }
        validate_section(current, &self.draft).into_result()?;
        self.transition(WizardStage::Submitting, "submit requested")?;
        Ok(self.draft.clone())
    }

    /// Settles an in-flight submission. Success discards the draft and its evidence;
    /// failure returns to the evidence section with everything intact.
    pub fn complete_submit(
        &mut self,
        result: CoreResult<SubmissionReceipt>,
    ) -> CoreResult<SubmissionReceipt> {
        if self.stage != WizardStage::Submitting {
            return Err(CoreError::WorkflowTransition(
                "no submission in flight".to_string(),
            ));
        }
        match result {
            Ok(receipt) => {
                self.transition(WizardStage::Submitted(receipt.clone()), "submitted")?;
                self.discard_draft();
                tracing::info!(case_id = %receipt.case_id, "report submitted");
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed");
                self.transition(WizardStage::Editing(Section::LAST), "submission failed")?;
                Err(e)
            }
        }
    }

    pub fn submit(&mut self, submitter: &dyn ReportSubmitter) -> CoreResult<SubmissionReceipt> {
        let draft = self.begin_submit()?;
        let result = submitter.submit(&draft);
        self.complete_submit(result)
    }

    /// Starts over with an empty draft after a confirmation.
    pub fn submit_another(&mut self) -> CoreResult<()> {
        self.transition(WizardStage::Intro, "submit another")?;
        self.discard_draft();
        Ok(())
    }

    pub fn attach_files(&mut self, batch: Vec<IncomingFile>) -> CoreResult<IntakeOutcome> {
        self.editing_section("attach files")?;
        let max_bytes = self.config.max_evidence_file_bytes;
        let oversize = IntakeOutcome {
            accepted_ids: Vec::new(),
            rejected_names: batch
                .iter()
                .filter(|f| f.size_bytes > max_bytes)
                .map(|f| f.name.clone())
                .collect(),
        };
        // The oversize notice stands even when storing the rest fails.
        if let Some(message) = oversize.rejection_message(max_bytes) {
            self.notice = Some(Notice::oversize_files(message));
        }
        self.draft
            .evidence
            .intake_files(batch, max_bytes, self.store.as_mut())
    }

    pub fn remove_file(&mut self, id: &str) -> CoreResult<bool> {
        self.editing_section("remove files")?;
        self.draft.evidence.remove_file(id, self.store.as_mut())
    }

    pub fn add_url(&mut self, raw: &str) -> CoreResult<Option<String>> {
        self.editing_section("add links")?;
        Ok(self.draft.evidence.add_url(raw))
    }

    pub fn add_url_from(
        &mut self,
        input: &mut dyn UrlInputProvider,
    ) -> CoreResult<Option<String>> {
        self.editing_section("add links")?;
        Ok(self.draft.evidence.add_url_from(input))
    }

    pub fn set_url_description(&mut self, id: &str, description: &str) -> CoreResult<bool> {
        self.editing_section("describe links")?;
        Ok(self.draft.evidence.set_url_description(id, description))
    }

    pub fn set_encryption(&mut self, enabled: bool) -> CoreResult<()> {
        self.editing_section("change encryption")?;
        self.draft.evidence.encryption.set_enabled(enabled);
        Ok(())
    }

    fn discard_draft(&mut self) {
        self.draft = ReportDraft::new();
        self.store.clear();
        self.notice = None;
    }

    fn editing_section(&self, action: &str) -> CoreResult<Section> {
        self.current_section().ok_or_else(|| {
            CoreError::WorkflowTransition(format!("cannot {} from {:?}", action, self.stage))
        })
    }

    fn transition(&mut self, to: WizardStage, reason: &str) -> CoreResult<()> {
        if !valid_transition(&self.stage, &to) {
            return Err(CoreError::WorkflowTransition(format!(
                "invalid wizard transition {:?} -> {:?}",
                self.stage, to
            )));
        }
        tracing::info!(from = ?self.stage, to = ?to, reason, "wizard stage changed");
        self.stage = to;
        Ok(())
    }
}

pub fn valid_transition(from: &WizardStage, to: &WizardStage) -> bool {
    use WizardStage::*;
    match (from, to) {
        (Intro, Editing(s)) => *s == Section::FIRST,
        (Editing(a), Editing(b)) => a.next() == Some(*b) || a.prev() == Some(*b),
        (Editing(s), Submitting) => *s == Section::LAST,
        (Submitting, Submitted(_)) => true,
        (Submitting, Editing(s)) => *s == Section::LAST,
        (Submitted(_), Intro) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{valid_transition, Section, SubmissionReceipt, WizardStage};

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt {
            case_id: "CSP-2026-AAAA0000".to_string(),
            submitted_at: "2026-01-01T00:00:00Z".to_string(),
            files_attached: 0,
            urls_attached: 0,
        }
    }

    #[test]
    fn state_machine_blocks_invalid_edges() {
        use WizardStage::*;
        assert!(valid_transition(&Intro, &Editing(Section::Reporter)));
        assert!(!valid_transition(&Intro, &Editing(Section::Incident)));
        assert!(valid_transition(
            &Editing(Section::Reporter),
            &Editing(Section::Victim)
        ));
        assert!(!valid_transition(
            &Editing(Section::Reporter),
            &Editing(Section::Impact)
        ));
        assert!(valid_transition(
            &Editing(Section::Impact),
            &Editing(Section::Incident)
        ));
        assert!(!valid_transition(&Editing(Section::Attacker), &Submitting));
        assert!(valid_transition(&Editing(Section::Evidence), &Submitting));
        assert!(valid_transition(&Submitting, &Submitted(receipt())));
        assert!(!valid_transition(&Submitted(receipt()), &Submitting));
        assert!(valid_transition(&Submitted(receipt()), &Intro));
        assert!(!valid_transition(&Editing(Section::Evidence), &Intro));
    }
}
