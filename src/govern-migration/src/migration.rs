//! Migration call script classification and field extraction.
//!
//! A vote's execution script is a migration when it is a call script made exclusively of
//! Vault transfers (or exclusively of Finance payments) issued by the organization's own app,
//! all paying the same registered Govern executor. Anything else, including garbage bytes,
//! classifies as "not a migration"; this path never panics and never errors.

use alloy_primitives::{Address, U256};
use govern_migration_types::{codec::from_hex, MigrationFacts, MigrationTemplate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    decoder::{call_script_body, decode_template_calls, TemplateCall},
    errors::Mismatch,
    evaluator::evaluate_calls,
};

/// A call script that matched a migration template.
///
/// Only [`classify`] builds one, so the extractors below are never run on unvalidated bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedScript {
    template: MigrationTemplate,
    recipient: Address,
    calls: Vec<TemplateCall>,
}

/// One asset moved by a migration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigratedAsset {
    pub token: Address,
    pub amount: U256,
}

/// Owned, serialisable view of a classified script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    pub kind: MigrationTemplate,
    pub recipient: Address,
    pub assets: Vec<MigratedAsset>,
}

impl ClassifiedScript {
    pub fn template(&self) -> MigrationTemplate {
        self.template
    }

    /// Executor receiving every asset.
    pub fn recipient(&self) -> Address {
        self.recipient
    }

    pub fn tokens(&self) -> Vec<Address> {
        self.calls.iter().map(|call| call.token).collect()
    }

    pub fn amounts(&self) -> Vec<U256> {
        self.calls.iter().map(|call| call.amount).collect()
    }

    /// `(token, amount)` pairs in call order.
    pub fn assets(&self) -> Vec<MigratedAsset> {
        self.calls
            .iter()
            .map(|call| MigratedAsset {
                token: call.token,
                amount: call.amount,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn to_migration(&self) -> Migration {
        Migration {
            kind: self.template,
            recipient: self.recipient,
            assets: self.assets(),
        }
    }
}

/// Classify raw script bytes. Vault layout is tried before Finance.
pub fn classify<F: MigrationFacts + ?Sized>(script: &[u8], facts: &F) -> Option<ClassifiedScript> {
    let body = match call_script_body(script) {
        Ok(body) => body,
        Err(err) => {
            trace!(%err, "not a call script");
            return None;
        }
    };

    for template in MigrationTemplate::ALL {
        match match_template(body, template, facts) {
            Ok(classified) => return Some(classified),
            Err(err) => debug!(?template, %err, "call script does not match migration template"),
        }
    }
    None
}

/// Classify a `0x`-prefixed hex script; invalid hex is simply not a migration.
pub fn classify_hex<F: MigrationFacts + ?Sized>(script: &str, facts: &F) -> Option<ClassifiedScript> {
    match from_hex(script) {
        Ok(bytes) => classify(&bytes, facts),
        Err(err) => {
            debug!(%err, "script is not valid hex");
            None
        }
    }
}

/// Persisted migration type: `0` when the script is not a migration, else the template code.
pub fn migration_type<F: MigrationFacts + ?Sized>(script: &[u8], facts: &F) -> u8 {
    classify(script, facts).map_or(0, |classified| classified.template().code())
}

fn match_template<F: MigrationFacts + ?Sized>(
    body: &[u8],
    template: MigrationTemplate,
    facts: &F,
) -> Result<ClassifiedScript, Mismatch> {
    let calls = decode_template_calls(body, template)?;
    let recipient = evaluate_calls(&calls, template, facts)?;
    Ok(ClassifiedScript {
        template,
        recipient,
        calls,
    })
}
