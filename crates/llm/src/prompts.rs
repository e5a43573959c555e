//! Prompt templates for the three stages

/// System instruction for the describe stage
pub const DESCRIBE_INSTRUCTION: &str = "Describe the UI design of this interface in a structured, \
professional, rigorous and accurate way. State explicitly the layout position of every major \
functional region, the hierarchy between regions, how space is divided, and where the \
interactive elements are placed. Wherever the interface contains an image, say that an image \
placeholder is reserved there. Do not add subjective speculation. Use standard \
interface-design terminology throughout.";

/// Prompt for turning a UI description into HTML
pub fn markup_prompt(description: &str) -> String {
    format!(
        "Generate the HTML code for the following UI description (output only the code, no explanation):\n{}",
        description
    )
}

/// Prompt for applying an instruction to existing HTML
pub fn revision_prompt(markup: &str, instruction: &str) -> String {
    format!(
        "Produce the modified HTML code from the HTML code and the user instruction below (output only the code, no explanation):\n\nHTML:\n{}\n\nInstruction:\n{}",
        markup, instruction
    )
}
