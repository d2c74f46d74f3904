use crate::domain::LanguagePair;

/// Build the translation prompt for one message.
///
/// The model picks the direction itself; the input is embedded verbatim inside a
/// fenced block and never escaped.
pub fn translation_prompt(languages: &LanguagePair, text: &str) -> String {
    format!(
        "Auto-translate between {a} and {b}. Provide only the translated text, \
without any commentary, notes or explanations.\n\nInput: ```\n{text}\n```",
        a = languages.a,
        b = languages.b,
    )
}
