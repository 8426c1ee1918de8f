//! Display helpers for sensitive fields.

/// Number of leading CPF characters left visible when masking.
const VISIBLE_PREFIX: usize = 3;

/// Mask a CPF for display, keeping the first three characters.
///
/// `"52998224725"` renders as `"529********"`. Inputs shorter than the
/// visible prefix come back unchanged.
pub fn mask_cpf(cpf: &str) -> String {
    cpf.chars()
        .enumerate()
        .map(|(index, ch)| if index < VISIBLE_PREFIX { ch } else { '*' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_the_first_three_digits() {
        assert_eq!(mask_cpf("52998224725"), "529********");
    }

    #[test]
    fn short_inputs_come_back_unchanged() {
        assert_eq!(mask_cpf("52"), "52");
        assert_eq!(mask_cpf("529"), "529");
        assert_eq!(mask_cpf(""), "");
    }

    #[test]
    fn masking_is_length_preserving() {
        assert_eq!(mask_cpf("5299822472").len(), 10);
    }
}
