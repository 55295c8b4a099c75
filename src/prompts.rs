//! Prompt templates for the translator, counselor and synthesis personas.

use crate::openai::Message;

pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a concise philosophical editor.";

/// Build the system prompt for translating into `target_language`
pub fn translator_system_prompt(target_language: &str, translation_style: &str) -> String {
    format!(
        r#"You are a professional translator.
Translate the user's text faithfully into {target_language}.
Keep key philosophical nuance. Output ONLY the translation.
Style: {translation_style}
"#
    )
}

/// Build the system prompt for the counselor persona
pub fn counselor_system_prompt(counselor_style: &str) -> String {
    format!(
        r#"You are a philosophical counselor.
Focus on existential meaning and self-reflection, while staying clear and concrete.
Cite thinkers or concepts briefly when helpful. Avoid therapy/medical claims.
Style: {counselor_style}
"#
    )
}

/// Build the user prompt asking the counselor to answer in the language of `code`.
///
/// Codes without a dedicated template get the translated question unchanged,
/// which is the intended behavior for user-configured languages.
pub fn counselor_user_prompt(code: &str, question: &str) -> String {
    match code {
        "de" => format!(
            "Bitte beantworte als philosophischer Berater auf Deutsch.\n\
             Halte die Sprache präzise und klar, aber tiefgründig.\n\
             Frage:\n{question}\n"
        ),
        "fr" => format!(
            "Veuillez répondre en tant que conseiller philosophique, en français.\n\
             Restez clair, concret et réfléchi.\n\
             Question :\n{question}\n"
        ),
        "ru" => format!(
            "Пожалуйста, ответьте как философский консультант на русском языке.\n\
             Сохраняйте ясность, конкретику и глубину.\n\
             Вопрос:\n{question}\n"
        ),
        "en" => format!(
            "Please respond as a philosophical counselor in English.\n\
             Keep the language precise and clear, but deep.\n\
             Question:\n{question}\n"
        ),
        "ja" => format!(
            "日本語で、哲学的カウンセラーとして回答してください。\n\
             明晰さと具体性を保ちながら、深く考察してください。\n\
             質問：\n{question}\n"
        ),
        _ => question.to_string(),
    }
}

/// Build the synthesis user prompt from `(language name, back-translation)` pairs
pub fn synthesis_user_prompt<'a>(answers: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let answers = answers
        .into_iter()
        .map(|(language, answer)| format!("[{}] {}", language, answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Compare these answers across languages (tone, concepts, and actionable insights). \
         Return a short English synthesis (<=150 words):\n\n{}",
        answers
    )
}

/// A system + user message pair, the shape of every call in the pipeline
pub fn conversation(system: String, user: String) -> Vec<Message> {
    vec![Message::system(system), Message::user(user)]
}
