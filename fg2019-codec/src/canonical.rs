//! Canonical code value generation.
//!
//! Given symbol records already sorted by `(code_length, symbol)`, assigns
//! numeric code values deterministically so that the decoder reproduces
//! identical values from the length table alone (`spec.md` §4.D).

use crate::SymbolRecord;

/// Assign `code_value` to every record with `code_length > 0`, in place.
///
/// `records` MUST already be sorted by `(code_length ascending, symbol
/// ascending)`; this is the same order [`crate::lengths::build_lengths`]
/// returns and the same order the decoder reconstructs from the header's
/// length table, so both sides derive identical values.
pub fn assign_code_values(records: &mut [SymbolRecord]) {
    let mut prev_length: u8 = 0;
    let mut prev_value: u32 = 0;
    let mut first = true;

    for record in records.iter_mut() {
        if record.code_length == 0 {
            continue;
        }
        if first {
            record.code_value = 0;
            first = false;
        } else {
            record.code_value = (prev_value + 1) << (record.code_length - prev_length);
        }
        prev_length = record.code_length;
        prev_value = record.code_value;
    }
}
