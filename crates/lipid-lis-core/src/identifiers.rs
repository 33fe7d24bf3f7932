//! Local-only fallback identifiers.
//!
//! Codes derive from the current collection length, not from a persisted
//! counter, so a delete followed by an add can reissue an existing code.
//! Only used when the remote side did not supply an identifier.

/// Entry code for the next patient: `P` + (count + 1), four digits.
pub fn patient_entry_code(current_count: usize) -> String {
    format!("P{:04}", current_count + 1)
}

/// Identifier for the next result: `R` + (count + 1), three digits.
pub fn result_id(current_count: usize) -> String {
    format!("R{:03}", current_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_entry_code() {
        assert_eq!(patient_entry_code(0), "P0001");
        assert_eq!(patient_entry_code(2), "P0003");
        assert_eq!(patient_entry_code(9999), "P10000");
    }

    #[test]
    fn test_result_id() {
        assert_eq!(result_id(0), "R001");
        assert_eq!(result_id(41), "R042");
    }

    #[test]
    fn test_codes_repeat_after_shrink() {
        let mut codes = vec![patient_entry_code(0)];
        codes.push(patient_entry_code(codes.len()));
        let removed = codes.remove(0);
        let reissued = patient_entry_code(codes.len());
        assert_eq!(removed, "P0001");
        assert_eq!(reissued, "P0002");
        assert!(codes.contains(&reissued));
    }
}
