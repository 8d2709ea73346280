pub mod solver;

pub use solver::{bind_seme, contains_word, equivalent, Facts, SolverError, SEME};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sona_parser::{Parser, Sentence};
    use sona_protocol::Vocabulary;

    fn parse(text: &str) -> Sentence {
        let vocabulary = Vocabulary::builtin();
        Parser::new(&vocabulary).parse(text, text).expect("Failed to parse")
    }

    #[test]
    fn test_equivalence_ignores_punctuation() {
        assert!(equivalent(&parse("mi li moku."), &parse("mi li moku!")));
        assert!(equivalent(&parse("jan pona suli li lape."), &parse("jan suli pona li lape?")));
        assert!(!equivalent(&parse("mi li moku."), &parse("mi li lape.")));
    }

    #[test]
    fn test_contains_word() {
        let sentence = parse("jan li moku e kili ~lon tomo.");
        assert!(contains_word(&sentence, "kili"));
        assert!(contains_word(&sentence, "lon"));
        assert!(!contains_word(&sentence, "e"));
    }

    #[test]
    fn test_seme_binding() {
        // 1. Facts
        let mut facts = Facts::new();
        facts.tell(parse("soweli li moku e kili."));
        facts.tell(parse("jan li moku e telo."));
        assert_eq!(facts.len(), 2);

        // 2. Who eats water? -> the second fact
        let answer = facts.ask(&parse("seme li moku e telo?")).unwrap();
        assert_eq!(answer.to_string(), "jan li moku e telo.");

        // 3. What does the animal eat? -> the first fact
        let answer = facts.ask(&parse("soweli li moku e seme?")).unwrap();
        assert_eq!(answer.to_string(), "soweli li moku e kili.");

        // 4. Nothing sleeps
        let err = facts.ask(&parse("seme li lape?")).unwrap_err();
        assert!(matches!(err, SolverError::Unknown { .. }));
    }

    #[test]
    fn test_echo_binds_without_seme() {
        let fact = parse("mi li pona.");
        assert!(bind_seme(&fact, &parse("mi li pona?")).is_some());
        assert!(bind_seme(&fact, &parse("sina li pona?")).is_none());
    }
}
