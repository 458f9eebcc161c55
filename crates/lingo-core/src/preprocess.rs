use unicode_normalization::UnicodeNormalization;

/// Cleanup applied to words sent to the lexical search backend, whose
/// index normalizer expects composed forms.
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC), then strip stray line breaks
        let text: String = text.nfkc().collect();
        text.replace(['\n', '\r'], "").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_normalizes() {
        let p = DefaultPreprocessor;
        assert_eq!(p.process("  word\n"), "word");
        // full-width latin folds to ascii under NFKC
        assert_eq!(p.process("ｗｏｒｄ"), "word");
        assert_eq!(p.process("   "), "");
    }
}
