use alloy_primitives::Address;
use govern_migration_types::{MigrationFacts, MigrationTemplate};

use crate::{decoder::TemplateCall, errors::ValidationError};

/// Evaluate decoded calls against the organization's apps and the executor registry.
///
/// Returns the single recipient shared by every call.
pub fn evaluate_calls<F: MigrationFacts + ?Sized>(
    calls: &[TemplateCall],
    template: MigrationTemplate,
    facts: &F,
) -> Result<Address, ValidationError> {
    let configured = match template {
        MigrationTemplate::Vault => facts.configured_vault(),
        MigrationTemplate::Finance => facts.configured_finance(),
    }
    .ok_or(ValidationError::TargetNotConfigured)?;

    let Some(first) = calls.first() else {
        return Err(ValidationError::NoCalls);
    };

    for call in calls {
        if call.target != configured {
            return Err(ValidationError::TargetMismatch {
                expected: configured,
                actual: call.target,
            });
        }
    }

    for (index, call) in calls.iter().enumerate().skip(1) {
        if call.recipient != first.recipient {
            return Err(ValidationError::RecipientMismatch {
                index,
                expected: first.recipient,
                actual: call.recipient,
            });
        }
    }

    if !facts.is_recognized_recipient(first.recipient) {
        return Err(ValidationError::UnrecognizedRecipient(first.recipient));
    }

    Ok(first.recipient)
}
