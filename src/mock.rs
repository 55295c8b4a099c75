//! Canned, network-free replies used in dry-run mode.

pub const SYNTHESIS: &str =
    "Synthesis: EN emphasizes clarity; DE emphasizes structure; FR highlights ambiguity/experience.";

pub fn translate(text: &str, target_language: &str) -> String {
    format!("[{} translation of]: {}", target_language, text)
}

pub fn answer(code: &str) -> &'static str {
    match code {
        "en" => "Mock thoughtful answer in English about responsibility and freedom.",
        "de" => "Beispielhafte, nachdenkliche Antwort auf Deutsch über Verantwortung und Freiheit.",
        "fr" => "Réponse réfléchie en français sur la responsabilité et la liberté.",
        "ja" => "責任と自由についての思索的な日本語の回答です。",
        "ru" => "Вдумчивый ответ на русском о ответственности и свободе.",
        _ => "Mock answer.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_translate_template() {
        assert_eq!(
            translate("What is freedom?", "German"),
            "[German translation of]: What is freedom?"
        );
    }

    #[test]
    fn test_answers_for_known_codes_are_distinct() {
        let answers: Vec<_> = ["en", "de", "fr", "ja", "ru"].iter().map(|c| answer(c)).collect();
        for (i, a) in answers.iter().enumerate() {
            assert_ne!(*a, "Mock answer.");
            assert!(!answers[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_unknown_code_gets_generic_answer() {
        assert_eq!(answer("es"), "Mock answer.");
        assert_eq!(answer(""), "Mock answer.");
    }

    proptest! {
        #[test]
        fn translate_is_deterministic(text in ".*", language in "[A-Za-z ]{1,20}") {
            let first = translate(&text, &language);
            prop_assert_eq!(&first, &translate(&text, &language));
            prop_assert!(first.ends_with(&text));
            let prefix = format!("[{} translation of]: ", language);
            prop_assert!(first.starts_with(&prefix));
        }
    }
}
