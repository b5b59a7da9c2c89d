pub const NOTES: &str = include_str!("../data/prompts/notes.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// The notes instruction with `text` appended as the content to summarize.
pub fn notes_prompt(text: &str) -> String {
    render(NOTES, &[("text", text)])
}
