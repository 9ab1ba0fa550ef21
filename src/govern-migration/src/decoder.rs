use alloy_primitives::{Address, U256};
use govern_migration_types::{
    codec::{decode_length, decode_raw_address, decode_uint256},
    template::{
        MigrationTemplate, AMOUNT_RANGE, CALLDATA_LENGTH_RANGE, CALL_SCRIPT_ID, RECIPIENT_RANGE,
        REFERENCE_DATA_RANGE, REFERENCE_LENGTH_RANGE, REFERENCE_OFFSET, REFERENCE_OFFSET_RANGE,
        SELECTOR_RANGE, TARGET_RANGE, TOKEN_RANGE,
    },
};

use crate::errors::DecodeError;

/// One call of a migration template, read at the template's fixed offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateCall {
    pub target: Address,
    pub token: Address,
    pub recipient: Address,
    pub amount: U256,
}

/// Strip and check the call script header, returning the (non-empty) body.
pub fn call_script_body(script: &[u8]) -> Result<&[u8], DecodeError> {
    if script.len() <= CALL_SCRIPT_ID.len() {
        return Err(DecodeError::TooShort(script.len()));
    }
    let mut spec_id = [0u8; 4];
    spec_id.copy_from_slice(&script[..CALL_SCRIPT_ID.len()]);
    if spec_id != CALL_SCRIPT_ID {
        return Err(DecodeError::UnknownSpecId(spec_id));
    }
    Ok(&script[CALL_SCRIPT_ID.len()..])
}

/// Split a call script body into calls of `template`, checking every call's layout.
///
/// All calls must target the same address as the first one; which address that must be is
/// decided by the evaluator.
pub fn decode_template_calls(
    body: &[u8],
    template: MigrationTemplate,
) -> Result<Vec<TemplateCall>, DecodeError> {
    let stride = template.call_length();
    if body.is_empty() || body.len() % stride != 0 {
        return Err(DecodeError::LengthMismatch {
            len: body.len(),
            stride,
        });
    }

    let expected = body.len() / stride;
    let target = &body[TARGET_RANGE];
    let actual = body
        .chunks_exact(stride)
        .filter(|call| &call[TARGET_RANGE] == target)
        .count();
    if actual != expected {
        return Err(DecodeError::HeterogeneousTargets { expected, actual });
    }

    body.chunks_exact(stride)
        .enumerate()
        .map(|(index, call)| decode_call(index, call, template))
        .collect()
}

fn decode_call(
    index: usize,
    call: &[u8],
    template: MigrationTemplate,
) -> Result<TemplateCall, DecodeError> {
    let calldata_length = decode_length(&call[CALLDATA_LENGTH_RANGE])?;
    if calldata_length != template.calldata_length() {
        return Err(DecodeError::CalldataLength {
            index,
            actual: calldata_length,
        });
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&call[SELECTOR_RANGE]);
    if selector != template.selector() {
        return Err(DecodeError::Selector {
            index,
            actual: selector,
        });
    }

    if template == MigrationTemplate::Finance {
        check_reference(index, call)?;
    }

    Ok(TemplateCall {
        target: decode_raw_address(&call[TARGET_RANGE])?,
        token: decode_raw_address(&call[TOKEN_RANGE])?,
        recipient: decode_raw_address(&call[RECIPIENT_RANGE])?,
        amount: decode_uint256(&call[AMOUNT_RANGE])?,
    })
}

/// The payment reference is a dynamic string that must sit right after the four head words
/// and fit in the two data words that follow its length.
fn check_reference(index: usize, call: &[u8]) -> Result<(), DecodeError> {
    let offset = decode_uint256(&call[REFERENCE_OFFSET_RANGE])?;
    if offset != U256::from(REFERENCE_OFFSET) {
        return Err(DecodeError::Reference { index });
    }
    let len = decode_uint256(&call[REFERENCE_LENGTH_RANGE])?;
    if len > U256::from(REFERENCE_DATA_RANGE.len()) {
        return Err(DecodeError::Reference { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, EXECUTOR, FINANCE, VAULT};

    #[test]
    fn header_is_required() {
        assert_eq!(call_script_body(&[]), Err(DecodeError::TooShort(0)));
        assert_eq!(call_script_body(&[0, 0, 0, 1]), Err(DecodeError::TooShort(4)));
        assert_eq!(
            call_script_body(&[0, 0, 0, 2, 0xff]),
            Err(DecodeError::UnknownSpecId([0, 0, 0, 2]))
        );
        assert_eq!(call_script_body(&[0, 0, 0, 1, 0xff]), Ok(&[0xff][..]));
    }

    #[test]
    fn decodes_vault_example() {
        let script = fixtures::vault_example();
        let body = call_script_body(&script).unwrap();
        let calls = decode_template_calls(body, MigrationTemplate::Vault).unwrap();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.target == VAULT && c.recipient == EXECUTOR));
        assert_eq!(calls[2].token, Address::ZERO);
    }

    #[test]
    fn decodes_finance_example() {
        let script = fixtures::finance_example();
        let body = call_script_body(&script).unwrap();
        let calls = decode_template_calls(body, MigrationTemplate::Finance).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.target == FINANCE && c.recipient == EXECUTOR));

        assert!(matches!(
            decode_template_calls(body, MigrationTemplate::Vault),
            Err(DecodeError::LengthMismatch { len: 504, stride: 124 })
        ));
    }

    #[test]
    fn rejects_mixed_targets() {
        let mut body = fixtures::vault_call(VAULT, fixtures::TOKEN_A, EXECUTOR, U256::from(1u64));
        body.extend(fixtures::vault_call(FINANCE, fixtures::TOKEN_B, EXECUTOR, U256::from(2u64)));
        assert_eq!(
            decode_template_calls(&body, MigrationTemplate::Vault),
            Err(DecodeError::HeterogeneousTargets { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn rejects_wrong_selector_and_length() {
        let mut call = fixtures::vault_call(VAULT, fixtures::TOKEN_A, EXECUTOR, U256::from(1u64));
        call[24] = 0x00;
        assert!(matches!(
            decode_template_calls(&call, MigrationTemplate::Vault),
            Err(DecodeError::Selector { index: 0, .. })
        ));

        let mut call = fixtures::vault_call(VAULT, fixtures::TOKEN_A, EXECUTOR, U256::from(1u64));
        call[23] = 0x65;
        assert_eq!(
            decode_template_calls(&call, MigrationTemplate::Vault),
            Err(DecodeError::CalldataLength { index: 0, actual: 0x65 })
        );
    }

    #[test]
    fn rejects_misplaced_reference() {
        let script = fixtures::finance_example();
        let mut body = call_script_body(&script).unwrap().to_vec();
        // second call's reference offset word
        body[252 + 155] = 0xa0;
        assert_eq!(
            decode_template_calls(&body, MigrationTemplate::Finance),
            Err(DecodeError::Reference { index: 1 })
        );

        let mut body = call_script_body(&script).unwrap().to_vec();
        body[187] = 0x41;
        assert_eq!(
            decode_template_calls(&body, MigrationTemplate::Finance),
            Err(DecodeError::Reference { index: 0 })
        );
    }
}
